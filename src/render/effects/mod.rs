mod common;

// Individual effect modules
mod breathe;
mod rainbow;
mod wave;

pub(crate) use common::{colorize, TextEffect};

/// The text effects used around the garden
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum EffectStyle {
    /// The menu title
    Rainbow,
    /// The relaxed message
    Breathe,
    /// The menu subtitle
    Wave,
}

/// Get the effect implementation for a given style
pub(crate) fn get_effect(style: EffectStyle) -> Box<dyn TextEffect> {
    match style {
        EffectStyle::Rainbow => Box::new(rainbow::Rainbow),
        EffectStyle::Breathe => Box::new(breathe::Breathe),
        EffectStyle::Wave => Box::new(wave::Wave),
    }
}
