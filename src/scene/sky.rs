use crate::render::color::Color;

/// The sky darkens from day to night as the tree grows.
const SKY_COLORS: [Color; 4] = [
    Color::new(135, 206, 235),
    Color::new(100, 149, 237),
    Color::new(70, 130, 180),
    Color::new(25, 25, 112),
];

/// The backdrop of the animated mode.
pub(crate) const ANIMATED_BACKDROP: Color = Color::new(40, 120, 180);

/// The backdrop of the health mode.
pub(crate) const HEALTH_BACKDROP: Color = Color::new(30, 110, 150);

/// The sky behind a tree of the given height. Each stage spans 8 units starting at 10.
pub(crate) fn sky_color(height: f32) -> Color {
    let stage = ((height - 10.0) / 8.0).max(0.0) as usize;
    SKY_COLORS[stage.min(SKY_COLORS.len() - 1)]
}
