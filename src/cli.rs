use crate::garden::Mode;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// A terminal relaxation garden that grows with calm and blink signals.
///
/// Hold or tap [C] to stay calm and [B] to blink. Blinking waters the garden, but blinking too
/// often stresses it.
#[derive(Parser, Debug)]
#[command(name = "mindgarden", version, about, long_about)]
pub struct Cli {
    /// The path to the configuration file.
    #[arg(short, long, value_name = "FILE", env = "MINDGARDEN_CONFIG")]
    pub config: Option<PathBuf>,

    /// Skip the menu and start in this mode.
    #[arg(short, long)]
    pub mode: Option<Mode>,

    /// Log at debug level.
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Check that the configured images and animation frames can be loaded.
    Check,

    /// Inspect the configuration.
    Config {
        /// Print the effective configuration as YAML.
        #[arg(long)]
        dump: bool,
    },
}
