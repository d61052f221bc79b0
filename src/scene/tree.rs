use super::sprite::Sprite;
use crate::render::canvas::Canvas;
use crate::render::color::Color;

/// The size of the garden the tree curve was designed for.
const REFERENCE_WIDTH: f32 = 1100.0;
const REFERENCE_HEIGHT: f32 = 700.0;

/// The three trees a growing tree goes through.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum TreeStage {
    Small,
    Medium,
    Large,
}

impl TreeStage {
    pub(crate) fn for_height(height: f32) -> Self {
        if height <= 20.0 {
            Self::Small
        } else if height <= 30.0 {
            Self::Medium
        } else {
            Self::Large
        }
    }

    pub(crate) fn name(self) -> &'static str {
        match self {
            Self::Small => "Small Tree",
            Self::Medium => "Medium Tree",
            Self::Large => "Large Tree",
        }
    }

    fn canopy(self) -> Color {
        match self {
            Self::Small => Color::new(124, 200, 92),
            Self::Medium => Color::new(64, 160, 64),
            Self::Large => Color::new(34, 125, 52),
        }
    }
}

/// The size a tree of the given height is displayed at, in the reference garden.
///
/// Each stage grows linearly from its smallest to its largest size, and a new stage starts a bit
/// larger than where the previous one ended.
pub(crate) fn reference_size(height: f32) -> (f32, f32) {
    let lerp = |from: (f32, f32), to: (f32, f32), t: f32| (from.0 + (to.0 - from.0) * t, from.1 + (to.1 - from.1) * t);
    let (size, max) = match TreeStage::for_height(height) {
        TreeStage::Small => {
            let t = ((height - 10.0) / 10.0).clamp(0.0, 1.0);
            (lerp((170.0, 158.0), (382.0, 355.0), t), (1100.0, 750.0))
        }
        TreeStage::Medium => {
            let t = ((height - 20.0) / 10.0).clamp(0.0, 1.0);
            (lerp((339.0, 361.0), (424.0, 551.0), t), (1100.0, 750.0))
        }
        TreeStage::Large => {
            let t = ((height - 30.0) / 12.0).clamp(0.0, 1.0);
            (lerp((432.0, 411.0), (631.0, 600.0), t), (1050.0, 680.0))
        }
    };
    // Never outgrow the window, shrinking both sides together.
    let scale = (max.0 / size.0).min(max.1 / size.1).min(1.0);
    (size.0 * scale, size.1 * scale)
}

/// The size of a tree of the given height on a canvas.
pub(crate) fn canvas_size(height: f32, canvas: &Canvas) -> (f32, f32) {
    let (width, tree_height) = reference_size(height);
    (
        width * canvas.width() as f32 / REFERENCE_WIDTH,
        tree_height * canvas.height() as f32 / REFERENCE_HEIGHT,
    )
}

/// The small, medium and large tree images.
#[derive(Clone, Debug)]
pub(crate) struct TreeSprites {
    pub small: Sprite,
    pub medium: Sprite,
    pub large: Sprite,
}

impl TreeSprites {
    fn get(&mut self, stage: TreeStage) -> &mut Sprite {
        match stage {
            TreeStage::Small => &mut self.small,
            TreeStage::Medium => &mut self.medium,
            TreeStage::Large => &mut self.large,
        }
    }
}

/// Draw the tree standing on the bottom of the canvas, horizontally centered.
///
/// Returns the pixel row of the top of the tree.
pub(crate) fn draw_static_tree(canvas: &mut Canvas, height: f32, sprites: Option<&mut TreeSprites>) -> f32 {
    let stage = TreeStage::for_height(height);
    let (width, tree_height) = canvas_size(height, canvas);
    let center_x = canvas.width() as f32 / 2.0;
    let ground = canvas.height() as f32;
    match sprites {
        Some(sprites) => {
            let sprite = sprites.get(stage);
            let (w, h) = sprite.fit(width, tree_height);
            let x = (center_x - w as f32 / 2.0).round() as i32;
            let y = (ground - h as f32).round() as i32;
            canvas.draw_image(sprite.scaled(w, h), x, y);
            ground - h as f32
        }
        None => {
            let bloom = if stage == TreeStage::Large { ((height - 30.0) / 12.0).clamp(0.0, 1.0) } else { 0.0 };
            draw_tree(canvas, TreeShape { center_x, ground, width, height: tree_height, stage, bloom, sway: 0.0 });
            ground - tree_height
        }
    }
}

/// A tree drawn from shapes rather than an image.
#[derive(Clone, Copy, Debug)]
pub(crate) struct TreeShape {
    pub center_x: f32,
    pub ground: f32,
    pub width: f32,
    pub height: f32,
    pub stage: TreeStage,
    /// How covered in blossoms the canopy is, from 0 to 1.
    pub bloom: f32,
    /// Horizontal offset of the canopy, in pixels.
    pub sway: f32,
}

pub(crate) fn draw_tree(canvas: &mut Canvas, shape: TreeShape) {
    const TRUNK: Color = Color::new(101, 67, 33);
    const TRUNK_SHADE: Color = Color::new(74, 48, 24);
    const BLOSSOM: Color = Color::new(255, 182, 193);

    let TreeShape { center_x, ground, width, height, stage, bloom, sway } = shape;
    if width < 1.0 || height < 1.0 {
        return;
    }

    let trunk_width = (width * 0.12).max(1.0);
    let trunk_height = height * 0.45;
    let trunk_x = (center_x - trunk_width / 2.0).round() as i32;
    let trunk_y = (ground - trunk_height).round() as i32;
    canvas.fill_rect(trunk_x, trunk_y, trunk_width.round() as i32, trunk_height.round() as i32 + 1, TRUNK);
    if trunk_width >= 3.0 {
        let shade_x = trunk_x + trunk_width.round() as i32 - 1;
        canvas.fill_rect(shade_x, trunk_y, 1, trunk_height.round() as i32 + 1, TRUNK_SHADE);
    }

    let canopy_width = width;
    let canopy_height = height * 0.7;
    let canopy_x = center_x + sway - canopy_width / 2.0;
    let canopy_y = ground - height;
    let canopy = stage.canopy();
    canvas.fill_ellipse(canopy_x, canopy_y, canopy_width, canopy_height, canopy, 255);

    // A lighter patch up and to the left, as if lit from there.
    let highlight = canopy.lerp(Color::new(200, 255, 160), 0.35);
    canvas.fill_ellipse(
        canopy_x + canopy_width * 0.18,
        canopy_y + canopy_height * 0.12,
        canopy_width * 0.4,
        canopy_height * 0.35,
        highlight,
        160,
    );

    let blossoms = (bloom.clamp(0.0, 1.0) * 14.0) as usize;
    let (rx, ry) = (canopy_width / 2.0, canopy_height / 2.0);
    let (cx, cy) = (canopy_x + rx, canopy_y + ry);
    for k in 0..blossoms {
        // Sunflower spiral, which spreads points evenly over a disc.
        let angle = k as f32 * 2.399_963;
        let radius = ((k as f32 + 0.5) / 14.0).sqrt() * 0.8;
        let x = cx + angle.cos() * radius * rx;
        let y = cy + angle.sin() * radius * ry;
        canvas.set(x.round() as i32, y.round() as i32, BLOSSOM);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(10.0, TreeStage::Small)]
    #[case(20.0, TreeStage::Small)]
    #[case(20.5, TreeStage::Medium)]
    #[case(30.0, TreeStage::Medium)]
    #[case(30.5, TreeStage::Large)]
    #[case(42.0, TreeStage::Large)]
    fn stages(#[case] height: f32, #[case] stage: TreeStage) {
        assert_eq!(TreeStage::for_height(height), stage);
    }

    #[rstest]
    #[case(10.0, (170.0, 158.0))]
    #[case(20.0, (382.0, 355.0))]
    #[case(30.0, (424.0, 551.0))]
    #[case(42.0, (631.0, 600.0))]
    fn reference_sizes(#[case] height: f32, #[case] expected: (f32, f32)) {
        let (width, tree_height) = reference_size(height);
        assert!((width - expected.0).abs() < 0.01, "{width}");
        assert!((tree_height - expected.1).abs() < 0.01, "{tree_height}");
    }

    #[test]
    fn grows_within_each_stage() {
        let mut last = (TreeStage::Small, reference_size(10.0).1);
        for step in 1..=64 {
            let height = 10.0 + step as f32 * 0.5;
            let stage = TreeStage::for_height(height);
            let (_, tree_height) = reference_size(height);
            // A new stage swaps in a different image, which may start out smaller.
            if stage == last.0 {
                assert!(tree_height > last.1, "shrank at {height}");
            }
            last = (stage, tree_height);
        }
    }

    #[test]
    fn procedural_tree_stands_on_the_ground() {
        let mut canvas = Canvas::new(110, 70);
        let top = draw_static_tree(&mut canvas, 42.0, None);
        assert!(top < 20.0);
        assert_ne!(canvas.pixel(55, 69), Some(Color::BLACK));
        assert_eq!(canvas.pixel(0, 69), Some(Color::BLACK));
    }

    #[test]
    fn sprite_tree_is_fitted() {
        let image = image::RgbaImage::from_pixel(20, 20, image::Rgba([0, 255, 0, 255]));
        let mut sprites = TreeSprites {
            small: Sprite::new(image.clone()),
            medium: Sprite::new(image.clone()),
            large: Sprite::new(image),
        };
        let mut canvas = Canvas::new(110, 70);
        let top = draw_static_tree(&mut canvas, 10.0, Some(&mut sprites));
        // 170x158 in the reference garden is 17x15.8 here, so a square image is 16 pixels.
        assert_eq!(top, 54.0);
        let pixel = canvas.pixel(55, 69).expect("out of bounds");
        assert!(pixel.g > 200 && pixel.r < 10, "{pixel:?}");
    }
}
