use super::common::{EffectContext, TextEffect};
use crate::render::color::{hsl_to_rgb, Color};

/// Rainbow effect - Full spectrum colors cycling through characters
pub(crate) struct Rainbow;

impl TextEffect for Rainbow {
    fn color(&self, ctx: &EffectContext) -> Color {
        let base_hue = (ctx.char_index as f32 / ctx.total_chars.max(1) as f32) * 360.0;
        let hue = (base_hue + ctx.phase) % 360.0;
        // Pastel rather than full saturation so the title sits well on the night gradient
        hsl_to_rgb(hue, 70.0, 70.0)
    }
}
