use super::blink::BlinkWindow;
use super::mode::Mode;
use super::track::{Track, TrackConfig};
use std::time::{Duration, Instant};

/// Everything a mode needs to know to drive its tracks.
#[derive(Clone, Debug, PartialEq)]
pub struct ModeProfile {
    /// The track that measures relaxation in this mode.
    pub progress: TrackConfig,

    /// A track that moves along with progress but never decides relaxation.
    pub companion: Option<TrackConfig>,

    /// The message shown once progress reaches its maximum.
    pub relaxed_message: String,

    /// How long the relaxed message stays on screen.
    pub relaxed_display: Duration,
}

/// The profiles of every mode.
#[derive(Clone, Debug, PartialEq)]
pub struct Profiles {
    pub static_growth: ModeProfile,
    pub animated: ModeProfile,
    pub health: ModeProfile,
}

impl Profiles {
    pub fn get(&self, mode: Mode) -> &ModeProfile {
        match mode {
            Mode::StaticGrowth => &self.static_growth,
            Mode::AnimatedFrame => &self.animated,
            Mode::HealthMeter => &self.health,
        }
    }

    /// Bound every frame track to the number of animation frames actually available.
    pub fn fit_frames(&mut self, frame_count: usize) {
        self.animated.progress.fit_frames(frame_count);
        if let Some(companion) = &mut self.health.companion {
            companion.fit_frames(frame_count);
        }
    }
}

/// Settings shared by all modes.
#[derive(Clone, Debug, PartialEq)]
pub struct MachineSettings {
    /// How far back blinks are remembered.
    pub blink_window: Duration,

    /// More blinks than this within the window count as stress.
    pub stress_threshold: usize,

    /// How many water drops a non-stressed blink produces.
    pub drops_per_blink: usize,
}

impl Default for MachineSettings {
    fn default() -> Self {
        Self { blink_window: Duration::from_secs(3), stress_threshold: 4, drops_per_blink: 1 }
    }
}

/// The signals read from the input source during a tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Signals {
    pub calm: bool,
    pub blink: bool,
}

#[cfg(test)]
impl Signals {
    pub fn calm() -> Self {
        Self { calm: true, blink: false }
    }

    pub fn blink() -> Self {
        Self { calm: false, blink: true }
    }

    pub fn both() -> Self {
        Self { calm: true, blink: true }
    }
}

/// How a blink was judged.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlinkVerdict {
    /// A moderate blink, which waters the garden.
    Grow,

    /// Too many blinks in the window.
    Stress,
}

/// A request for the renderer to spawn a water drop.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DropCue {
    /// Where the drop starts, as the fraction of the progress range reached (0 to 1).
    pub level: f32,
}

/// What happened during a tick.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TickOutcome {
    pub blink: Option<BlinkVerdict>,
    pub drops: Vec<DropCue>,

    /// Whether progress reached its maximum on this very tick.
    pub relaxed_entered: bool,
}

/// The relaxation progress of a single session.
#[derive(Clone, Debug)]
pub struct RelaxationState {
    progress: Track,
    companion: Option<Track>,
    recent_blinks: BlinkWindow,
    relaxed_since: Option<Instant>,
}

impl RelaxationState {
    fn new(profile: &ModeProfile, settings: &MachineSettings) -> Self {
        Self {
            progress: Track::new(profile.progress),
            companion: profile.companion.map(Track::new),
            recent_blinks: BlinkWindow::new(settings.blink_window),
            relaxed_since: None,
        }
    }

    pub fn progress(&self) -> f32 {
        self.progress.value()
    }

    pub fn companion(&self) -> Option<f32> {
        self.companion.as_ref().map(Track::value)
    }

    /// The number of blinks currently remembered.
    pub fn recent_blinks(&self) -> usize {
        self.recent_blinks.len()
    }

    #[cfg(test)]
    pub fn relaxed_since(&self) -> Option<Instant> {
        self.relaxed_since
    }

    fn tracks(&mut self) -> impl Iterator<Item = &mut Track> {
        std::iter::once(&mut self.progress).chain(self.companion.as_mut())
    }
}

/// Turns calm and blink signals into bounded, stress-aware progress.
///
/// One machine drives whichever mode is active. Switching mode or resetting replaces the state
/// with a fresh one, so nothing carries over between sessions.
#[derive(Clone, Debug)]
pub struct RelaxationMachine {
    mode: Mode,
    profiles: Profiles,
    settings: MachineSettings,
    state: RelaxationState,
}

impl RelaxationMachine {
    pub fn new(mode: Mode, profiles: Profiles, settings: MachineSettings) -> Self {
        let state = RelaxationState::new(profiles.get(mode), &settings);
        Self { mode, profiles, settings, state }
    }

    /// Advance the machine by one tick.
    pub fn tick(&mut self, signals: Signals, now: Instant) -> TickOutcome {
        let mut outcome = TickOutcome::default();
        let state = &mut self.state;
        state.recent_blinks.purge(now);

        if signals.calm {
            state.tracks().for_each(Track::calm);
        }

        if signals.blink {
            let count = state.recent_blinks.record(now);
            if count > self.settings.stress_threshold {
                state.tracks().for_each(Track::shrink);
                outcome.blink = Some(BlinkVerdict::Stress);
            } else {
                state.tracks().for_each(Track::grow);
                outcome.blink = Some(BlinkVerdict::Grow);

                // The fraction is clamped on its own, so the cue is valid before the tracks are.
                let level = state.progress.fraction();
                outcome.drops = vec![DropCue { level }; self.settings.drops_per_blink];
            }
        }

        state.tracks().for_each(Track::clamp);

        if state.progress.is_at_max() {
            if state.relaxed_since.is_none() {
                state.relaxed_since = Some(now);
                outcome.relaxed_entered = true;
            }
        } else {
            state.relaxed_since = None;
        }
        outcome
    }

    /// Start over in the current mode.
    pub fn reset(&mut self) {
        self.state = RelaxationState::new(self.profile(), &self.settings);
    }

    /// Start over in another mode.
    pub fn switch_mode(&mut self, mode: Mode) {
        self.mode = mode;
        self.reset();
    }

    /// Whether the relaxed message should be displayed at `now`.
    pub fn show_relaxed_message(&self, now: Instant) -> bool {
        match self.state.relaxed_since {
            Some(since) => now.saturating_duration_since(since) < self.profile().relaxed_display,
            None => false,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn profile(&self) -> &ModeProfile {
        self.profiles.get(self.mode)
    }

    pub fn state(&self) -> &RelaxationState {
        &self.state
    }

    /// The animation frame to display in the current mode, if it shows one.
    pub fn frame_index(&self) -> Option<usize> {
        let frame = match self.mode {
            Mode::StaticGrowth => return None,
            Mode::AnimatedFrame => self.state.progress(),
            Mode::HealthMeter => self.state.companion()?,
        };
        Some(frame.round().max(0.0) as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn profiles() -> Profiles {
        Profiles {
            static_growth: ModeProfile {
                progress: TrackConfig { min: 10.0, max: 42.0, initial: 10.0, calm: 0.5, grow: 0.7, shrink: 0.5 },
                companion: None,
                relaxed_message: "grown".into(),
                relaxed_display: Duration::from_secs(7),
            },
            animated: ModeProfile {
                progress: TrackConfig { min: 0.0, max: 98.0, initial: 0.0, calm: 1.0, grow: 2.0, shrink: 2.0 },
                companion: None,
                relaxed_message: "relaxed".into(),
                relaxed_display: Duration::from_secs(3),
            },
            health: ModeProfile {
                progress: TrackConfig { min: 0.0, max: 100.0, initial: 50.0, calm: 1.0, grow: 1.0, shrink: 3.0 },
                companion: Some(TrackConfig { min: 0.0, max: 98.0, initial: 0.0, calm: 1.0, grow: 1.0, shrink: 2.0 }),
                relaxed_message: "relaxed".into(),
                relaxed_display: Duration::from_secs(3),
            },
        }
    }

    fn machine(mode: Mode) -> RelaxationMachine {
        RelaxationMachine::new(mode, profiles(), MachineSettings::default())
    }

    fn at(base: Instant, seconds: f64) -> Instant {
        base + Duration::from_secs_f64(seconds)
    }

    fn assert_close(left: f32, right: f32) {
        assert!((left - right).abs() < 1e-4, "{left} != {right}");
    }

    #[rstest]
    #[case::static_growth(Mode::StaticGrowth, 10.0, 42.0)]
    #[case::animated(Mode::AnimatedFrame, 0.0, 98.0)]
    #[case::health(Mode::HealthMeter, 0.0, 100.0)]
    fn progress_stays_in_range(#[case] mode: Mode, #[case] min: f32, #[case] max: f32) {
        let base = Instant::now();
        let mut machine = machine(mode);
        for i in 0..500 {
            machine.tick(Signals::calm(), at(base, i as f64 * 0.01));
            assert!((min..=max).contains(&machine.state().progress()));
        }
        assert_eq!(machine.state().progress(), max);

        // Hammer blink until stress shrinks it all the way down.
        for i in 0..500 {
            machine.tick(Signals::blink(), at(base, 5.0 + i as f64 * 0.01));
            assert!((min..=max).contains(&machine.state().progress()));
        }
        assert_eq!(machine.state().progress(), min);
    }

    #[test]
    fn fifth_blink_in_window_is_stress() {
        let base = Instant::now();
        let mut machine = machine(Mode::StaticGrowth);
        // Lift it off the floor so the shrink is visible.
        for i in 0..10 {
            machine.tick(Signals::calm(), at(base, i as f64 * 0.01));
        }

        for i in 0..4 {
            let before = machine.state().progress();
            let outcome = machine.tick(Signals::blink(), at(base, 0.5 + i as f64 * 0.5));
            assert_eq!(outcome.blink, Some(BlinkVerdict::Grow));
            assert_close(machine.state().progress(), before + 0.7);
        }

        let before = machine.state().progress();
        let outcome = machine.tick(Signals::blink(), at(base, 2.5));
        assert_eq!(outcome.blink, Some(BlinkVerdict::Stress));
        assert!(outcome.drops.is_empty());
        assert!(machine.state().progress() < before);
    }

    #[test]
    fn expired_blinks_do_not_count() {
        let base = Instant::now();
        let mut machine = machine(Mode::StaticGrowth);
        for t in [0.0, 1.0, 2.0, 3.0] {
            machine.tick(Signals::blink(), at(base, t));
        }
        let outcome = machine.tick(Signals::blink(), at(base, 4.1));
        assert_eq!(outcome.blink, Some(BlinkVerdict::Grow));
        assert_eq!(machine.state().recent_blinks(), 3);
    }

    #[test]
    fn window_is_purged_without_blinks() {
        let base = Instant::now();
        let mut machine = machine(Mode::AnimatedFrame);
        machine.tick(Signals::blink(), base);
        machine.tick(Signals::default(), at(base, 3.5));
        assert_eq!(machine.state().recent_blinks(), 0);
    }

    #[test]
    fn relaxed_message_shows_for_display_duration() {
        let base = Instant::now();
        let mut machine = machine(Mode::StaticGrowth);
        let mut entered_at = None;
        for i in 0..100 {
            let now = at(base, i as f64 * 0.01);
            let outcome = machine.tick(Signals::calm(), now);
            if outcome.relaxed_entered {
                entered_at = Some(now);
                break;
            }
        }
        let entered_at = entered_at.expect("never relaxed");
        assert_eq!(machine.state().relaxed_since(), Some(entered_at));
        assert!(machine.show_relaxed_message(entered_at));

        // Staying at max keeps the original timestamp.
        let outcome = machine.tick(Signals::calm(), entered_at + Duration::from_secs(1));
        assert!(!outcome.relaxed_entered);
        assert!(machine.show_relaxed_message(entered_at + Duration::from_millis(6999)));
        assert!(!machine.show_relaxed_message(entered_at + Duration::from_secs(7)));

        machine.tick(Signals::default(), entered_at + Duration::from_secs(8));
        assert_eq!(machine.state().progress(), 42.0);
        assert!(!machine.show_relaxed_message(entered_at + Duration::from_secs(8)));
    }

    #[test]
    fn leaving_max_clears_relaxed() {
        let base = Instant::now();
        let mut machine = machine(Mode::HealthMeter);
        for i in 0..50 {
            machine.tick(Signals::calm(), at(base, i as f64 * 0.01));
        }
        assert!(machine.state().relaxed_since().is_some());

        for i in 0..5 {
            machine.tick(Signals::blink(), at(base, 1.0 + i as f64 * 0.1));
        }
        assert_eq!(machine.state().progress(), 97.0);
        assert_eq!(machine.state().relaxed_since(), None);
        assert!(!machine.show_relaxed_message(at(base, 1.5)));
    }

    #[rstest]
    #[case::static_growth(Mode::StaticGrowth, 10.0)]
    #[case::animated(Mode::AnimatedFrame, 0.0)]
    #[case::health(Mode::HealthMeter, 50.0)]
    fn reset_restores_initial_state(#[case] mode: Mode, #[case] initial: f32) {
        let base = Instant::now();
        let mut machine = machine(mode);
        for i in 0..300 {
            machine.tick(Signals::both(), at(base, i as f64));
        }
        machine.reset();
        assert_eq!(machine.state().progress(), initial);
        assert_eq!(machine.state().recent_blinks(), 0);
        assert_eq!(machine.state().relaxed_since(), None);

        machine.reset();
        assert_eq!(machine.state().progress(), initial);
    }

    #[test]
    fn calm_and_blink_in_one_tick() {
        let mut machine = machine(Mode::StaticGrowth);
        let outcome = machine.tick(Signals::both(), Instant::now());
        assert_close(machine.state().progress(), 11.2);
        assert_eq!(outcome.blink, Some(BlinkVerdict::Grow));
        assert_eq!(outcome.drops.len(), 1);
    }

    #[test]
    fn health_moves_its_frame_along() {
        let base = Instant::now();
        let mut machine = machine(Mode::HealthMeter);
        machine.tick(Signals::calm(), base);
        machine.tick(Signals::blink(), at(base, 0.1));
        assert_eq!(machine.state().progress(), 52.0);
        assert_eq!(machine.frame_index(), Some(2));

        for i in 0..4 {
            machine.tick(Signals::blink(), at(base, 0.2 + i as f64 * 0.1));
        }
        // Three more grows, then the fifth blink in the window shrinks.
        assert_eq!(machine.state().progress(), 52.0);
        assert_eq!(machine.frame_index(), Some(3));
    }

    #[test]
    fn switch_mode_starts_fresh() {
        let base = Instant::now();
        let mut machine = machine(Mode::StaticGrowth);
        machine.tick(Signals::both(), base);
        machine.switch_mode(Mode::AnimatedFrame);
        assert_eq!(machine.mode(), Mode::AnimatedFrame);
        assert_eq!(machine.state().progress(), 0.0);
        assert_eq!(machine.state().recent_blinks(), 0);
        assert_eq!(machine.frame_index(), Some(0));
    }

    #[test]
    fn drop_cues_follow_progress() {
        let settings = MachineSettings { drops_per_blink: 3, ..Default::default() };
        let mut machine = RelaxationMachine::new(Mode::AnimatedFrame, profiles(), settings);
        let outcome = machine.tick(Signals::blink(), Instant::now());
        assert_eq!(outcome.drops.len(), 3);
        assert_close(outcome.drops[0].level, 2.0 / 98.0);
    }

    #[test]
    fn fit_frames_bounds_frame_tracks() {
        let mut profiles = profiles();
        profiles.fit_frames(5);
        let mut machine = RelaxationMachine::new(Mode::AnimatedFrame, profiles, MachineSettings::default());
        let base = Instant::now();
        for i in 0..10 {
            machine.tick(Signals::calm(), at(base, i as f64));
        }
        assert_eq!(machine.frame_index(), Some(4));
        assert!(machine.state().relaxed_since().is_some());
    }
}
