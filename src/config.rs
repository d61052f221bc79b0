use crate::garden::{MachineSettings, Mode, ModeProfile, Profiles, TrackConfig};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// The smallest window the menu fits in, in pixels.
const MIN_WINDOW_WIDTH: u16 = 90;
const MIN_WINDOW_HEIGHT: u16 = 70;

/// The application configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub window: WindowConfig,

    #[serde(default)]
    pub timing: TimingConfig,

    #[serde(default)]
    pub modes: ModesConfig,

    #[serde(default)]
    pub decorations: DecorationsConfig,

    #[serde(default)]
    pub assets: AssetsConfig,
}

impl Config {
    /// Load the configuration.
    ///
    /// An explicit path must exist. Without one, the default location is used if there's a file
    /// there, and the built-in defaults otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => match Self::default_path() {
                Some(path) if path.exists() => path,
                _ => return Ok(Self::default()),
            },
        };
        Self::load_from_path(&path)
    }

    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents =
            fs::read_to_string(path).map_err(|e| ConfigError::Io { path: path.to_path_buf(), source: e })?;
        let config: Self =
            serde_yaml::from_str(&contents).map_err(|e| ConfigError::Parse { path: path.to_path_buf(), source: e })?;
        config.validate()?;
        Ok(config)
    }

    /// The path the configuration is read from when none is given.
    pub fn default_path() -> Option<PathBuf> {
        let dirs = directories::ProjectDirs::from("", "", "mindgarden")?;
        Some(dirs.config_dir().join("config.yaml"))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window.width < MIN_WINDOW_WIDTH || self.window.height < MIN_WINDOW_HEIGHT {
            return Err(ConfigError::Invalid(format!(
                "window must be at least {MIN_WINDOW_WIDTH}x{MIN_WINDOW_HEIGHT}, got {}x{}",
                self.window.width, self.window.height
            )));
        }
        if self.timing.tick_rate == 0 {
            return Err(ConfigError::Invalid("tick rate must be positive".into()));
        }
        if !self.timing.blink_window_seconds.is_finite() || self.timing.blink_window_seconds <= 0.0 {
            return Err(ConfigError::Invalid("blink window must be a positive number of seconds".into()));
        }
        for mode in [Mode::StaticGrowth, Mode::AnimatedFrame, Mode::HealthMeter] {
            let settings = self.modes.get(mode);
            if !settings.relaxed_display_seconds.is_finite() || settings.relaxed_display_seconds < 0.0 {
                return Err(ConfigError::Invalid(format!("{mode}: relaxed display time must be finite and non-negative")));
            }
            // Frame tracks get their bounds from the animation, the rest must be well formed.
            validate_track(mode, "progress", &settings.progress, !mode.progress_is_frame())?;
            if let Some(companion) = &settings.companion {
                validate_track(mode, "companion", companion, false)?;
            }
        }
        Ok(())
    }

    pub fn profiles(&self) -> Profiles {
        Profiles {
            static_growth: self.modes.static_growth.profile(),
            animated: self.modes.animated.profile(),
            health: self.modes.health.profile(),
        }
    }

    pub fn machine_settings(&self) -> MachineSettings {
        MachineSettings {
            blink_window: Duration::from_secs_f32(self.timing.blink_window_seconds),
            stress_threshold: self.timing.stress_threshold,
            drops_per_blink: self.decorations.drops_per_blink,
        }
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs(1) / self.timing.tick_rate
    }
}

fn validate_track(mode: Mode, name: &str, track: &TrackConfig, check_range: bool) -> Result<(), ConfigError> {
    let values = [track.min, track.max, track.initial, track.calm, track.grow, track.shrink];
    if !values.iter().all(|value| value.is_finite()) {
        return Err(ConfigError::Invalid(format!("{mode}: {name} values must be finite numbers")));
    }
    if check_range {
        if track.min >= track.max {
            return Err(ConfigError::Invalid(format!("{mode}: {name} min must be lower than max")));
        }
        if !(track.min..=track.max).contains(&track.initial) {
            return Err(ConfigError::Invalid(format!("{mode}: {name} initial value is out of range")));
        }
    }
    if track.calm < 0.0 || track.grow < 0.0 || track.shrink < 0.0 {
        return Err(ConfigError::Invalid(format!("{mode}: {name} increments can't be negative")));
    }
    Ok(())
}

/// The size of the garden, in half-block pixels.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WindowConfig {
    #[serde(default = "default_window_width")]
    pub width: u16,

    #[serde(default = "default_window_height")]
    pub height: u16,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self { width: default_window_width(), height: default_window_height() }
    }
}

fn default_window_width() -> u16 {
    110
}

fn default_window_height() -> u16 {
    70
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TimingConfig {
    /// Ticks per second.
    #[serde(default = "default_tick_rate")]
    pub tick_rate: u32,

    /// How long a blink is remembered, in seconds.
    #[serde(default = "default_blink_window")]
    pub blink_window_seconds: f32,

    /// More blinks than this within the window mean stress.
    #[serde(default = "default_stress_threshold")]
    pub stress_threshold: usize,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            tick_rate: default_tick_rate(),
            blink_window_seconds: default_blink_window(),
            stress_threshold: default_stress_threshold(),
        }
    }
}

fn default_tick_rate() -> u32 {
    30
}

fn default_blink_window() -> f32 {
    3.0
}

fn default_stress_threshold() -> usize {
    4
}

/// The settings of every mode.
///
/// A mode section replaces the defaults of that mode as a whole.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModesConfig {
    #[serde(rename = "static", default = "default_static_mode")]
    pub static_growth: ModeConfig,

    #[serde(default = "default_animated_mode")]
    pub animated: ModeConfig,

    #[serde(default = "default_health_mode")]
    pub health: ModeConfig,
}

impl ModesConfig {
    pub fn get(&self, mode: Mode) -> &ModeConfig {
        match mode {
            Mode::StaticGrowth => &self.static_growth,
            Mode::AnimatedFrame => &self.animated,
            Mode::HealthMeter => &self.health,
        }
    }
}

impl Default for ModesConfig {
    fn default() -> Self {
        Self { static_growth: default_static_mode(), animated: default_animated_mode(), health: default_health_mode() }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModeConfig {
    pub progress: TrackConfig,

    #[serde(default)]
    pub companion: Option<TrackConfig>,

    pub relaxed_message: String,

    pub relaxed_display_seconds: f32,
}

impl ModeConfig {
    fn profile(&self) -> ModeProfile {
        ModeProfile {
            progress: self.progress,
            companion: self.companion,
            relaxed_message: self.relaxed_message.clone(),
            relaxed_display: Duration::from_secs_f32(self.relaxed_display_seconds),
        }
    }
}

fn default_static_mode() -> ModeConfig {
    ModeConfig {
        progress: TrackConfig { min: 10.0, max: 42.0, initial: 10.0, calm: 0.5, grow: 0.7, shrink: 0.5 },
        companion: None,
        relaxed_message: "*** Your tree is fully grown! You are relaxed now! ***".into(),
        relaxed_display_seconds: 7.0,
    }
}

fn default_animated_mode() -> ModeConfig {
    ModeConfig {
        progress: TrackConfig { min: 0.0, max: 98.0, initial: 0.0, calm: 1.0, grow: 2.0, shrink: 2.0 },
        companion: None,
        relaxed_message: "*** You are relaxed now! ***".into(),
        relaxed_display_seconds: 3.0,
    }
}

fn default_health_mode() -> ModeConfig {
    ModeConfig {
        progress: TrackConfig { min: 0.0, max: 100.0, initial: 50.0, calm: 1.0, grow: 1.0, shrink: 3.0 },
        companion: Some(TrackConfig { min: 0.0, max: 98.0, initial: 0.0, calm: 1.0, grow: 1.0, shrink: 2.0 }),
        relaxed_message: "*** You are relaxed now! ***".into(),
        relaxed_display_seconds: 3.0,
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DecorationsConfig {
    /// How many leaves drift across the garden.
    #[serde(default = "default_leaves")]
    pub leaves: usize,

    /// How many water drops each moderate blink spawns.
    #[serde(default = "default_drops_per_blink")]
    pub drops_per_blink: usize,

    /// Ring the terminal bell whenever the garden is watered.
    #[serde(default)]
    pub bell_on_water: bool,
}

impl Default for DecorationsConfig {
    fn default() -> Self {
        Self { leaves: default_leaves(), drops_per_blink: default_drops_per_blink(), bell_on_water: false }
    }
}

fn default_leaves() -> usize {
    20
}

fn default_drops_per_blink() -> usize {
    1
}

/// Optional images. Anything missing is drawn procedurally instead.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AssetsConfig {
    /// The small, medium and large tree images.
    #[serde(default)]
    pub trees: Option<TreeAssets>,

    /// A GIF file or a directory of `frame_NNN.png` files.
    #[serde(default)]
    pub frames: Option<PathBuf>,

    /// The frame playback starts at; frames before it are played at the end of the loop.
    #[serde(default = "default_loop_start")]
    pub loop_start: usize,

    /// How many frames the built-in animation has.
    #[serde(default = "default_frame_count")]
    pub frame_count: usize,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self { trees: None, frames: None, loop_start: default_loop_start(), frame_count: default_frame_count() }
    }
}

fn default_loop_start() -> usize {
    33
}

fn default_frame_count() -> usize {
    99
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TreeAssets {
    pub small: PathBuf,
    pub medium: PathBuf,
    pub large: PathBuf,
}

/// Errors that can occur when loading the configuration
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("reading {path}: {source}")]
    Io { path: PathBuf, source: std::io::Error },

    #[error("parsing {path}: {source}")]
    Parse { path: PathBuf, source: serde_yaml::Error },

    #[error("invalid config: {0}")]
    Invalid(String),
}
