use super::common::{EffectContext, TextEffect};
use crate::render::color::{hsl_to_rgb, Color};

/// Breathe effect - Gentle synchronized breathing in warm yellow
pub(crate) struct Breathe;

impl TextEffect for Breathe {
    fn color(&self, ctx: &EffectContext) -> Color {
        // Synchronized breathing: all characters pulse together
        let lightness = 60.0 + 15.0 * (ctx.phase * 0.05).sin();
        hsl_to_rgb(55.0, 100.0, lightness)
    }
}
