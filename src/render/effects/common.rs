use crate::render::color::Color;

/// Effect context passed to all text effects
#[derive(Debug, Clone)]
pub(crate) struct EffectContext {
    /// Current phase (0-360 per cycle) - drives effect progression
    pub phase: f32,
    /// Character index within non-whitespace characters
    pub char_index: usize,
    /// Total non-whitespace characters in the text
    pub total_chars: usize,
}

/// Trait for text effects
pub(crate) trait TextEffect {
    /// Pick the color of a single character
    fn color(&self, ctx: &EffectContext) -> Color;
}

/// Color every character of `text`, leaving whitespace uncolored.
pub(crate) fn colorize(effect: &dyn TextEffect, text: &str, phase: f32) -> Vec<(char, Option<Color>)> {
    let total_chars = text.chars().filter(|c| !c.is_whitespace()).count();
    let mut char_index = 0;
    text.chars()
        .map(|ch| {
            if ch.is_whitespace() {
                return (ch, None);
            }
            let ctx = EffectContext { phase, char_index, total_chars };
            char_index += 1;
            (ch, Some(effect.color(&ctx)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Indexed;

    impl TextEffect for Indexed {
        fn color(&self, ctx: &EffectContext) -> Color {
            Color::new(ctx.char_index as u8, ctx.total_chars as u8, 0)
        }
    }

    #[test]
    fn whitespace_is_skipped() {
        let colored = colorize(&Indexed, "a b", 0.0);
        assert_eq!(colored, vec![('a', Some(Color::new(0, 2, 0))), (' ', None), ('b', Some(Color::new(1, 2, 0)))]);
    }
}
