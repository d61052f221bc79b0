use super::common::{EffectContext, TextEffect};
use crate::render::color::{hsl_to_rgb, Color};

/// Wave effect - Green hues oscillating along the characters
pub(crate) struct Wave;

impl TextEffect for Wave {
    fn color(&self, ctx: &EffectContext) -> Color {
        let base = 110.0; // leafy green
        let amplitude = 25.0;
        let freq = 0.35; // chars per cycle
        let phase = ctx.phase.to_radians();
        let hue = base + amplitude * ((ctx.char_index as f32 * freq + phase).sin());
        hsl_to_rgb(hue, 45.0, 78.0)
    }
}
