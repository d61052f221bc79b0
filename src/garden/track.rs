use serde::{Deserialize, Serialize};

/// The range and step sizes of a single progress track.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TrackConfig {
    /// The lowest value the track can take.
    pub min: f32,

    /// The highest value the track can take. Reaching it means "fully relaxed".
    pub max: f32,

    /// The value the track starts at and goes back to on reset.
    pub initial: f32,

    /// How much a calm signal adds.
    pub calm: f32,

    /// How much a non-stressed blink adds.
    pub grow: f32,

    /// How much a stressed blink takes away.
    pub shrink: f32,
}

impl TrackConfig {
    /// Bound a frame track to `frame_count` frames.
    pub fn fit_frames(&mut self, frame_count: usize) {
        self.min = 0.0;
        self.max = frame_count.saturating_sub(1) as f32;
        self.initial = self.initial.clamp(self.min, self.max);
    }
}

/// A single bounded scalar, such as the tree height or the animation frame.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Track {
    config: TrackConfig,
    value: f32,
}

impl Track {
    pub(crate) fn new(config: TrackConfig) -> Self {
        let value = config.initial.clamp(config.min, config.max);
        Self { config, value }
    }

    pub(crate) fn value(&self) -> f32 {
        self.value
    }

    pub(crate) fn calm(&mut self) {
        self.value += self.config.calm;
    }

    pub(crate) fn grow(&mut self) {
        self.value += self.config.grow;
    }

    pub(crate) fn shrink(&mut self) {
        self.value -= self.config.shrink;
    }

    pub(crate) fn clamp(&mut self) {
        self.value = self.value.clamp(self.config.min, self.config.max);
    }

    pub(crate) fn is_at_max(&self) -> bool {
        self.value >= self.config.max
    }

    /// Where the value sits within the range, from 0 to 1.
    pub(crate) fn fraction(&self) -> f32 {
        let span = self.config.max - self.config.min;
        if span <= 0.0 {
            return 1.0;
        }
        ((self.value - self.config.min) / span).clamp(0.0, 1.0)
    }
}
