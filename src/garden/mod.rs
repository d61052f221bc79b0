mod blink;
mod machine;
mod mode;
mod track;

pub use machine::{BlinkVerdict, DropCue, MachineSettings, ModeProfile, Profiles, RelaxationMachine, Signals};
pub use mode::Mode;
pub use track::TrackConfig;
