use super::sprite::Sprite;
use super::tree::{draw_tree, TreeShape, TreeStage};
use crate::render::canvas::Canvas;
use std::f32::consts::TAU;

/// The frames of the meditation animation.
pub(crate) enum Animation {
    /// Frames loaded from images.
    Sprites(Vec<Sprite>),

    /// A tree that grows, sways and blooms, drawn on the fly.
    Procedural { frames: usize },
}

impl Animation {
    pub(crate) fn len(&self) -> usize {
        match self {
            Self::Sprites(frames) => frames.len(),
            Self::Procedural { frames } => *frames,
        }
    }

    /// Draw a frame centered on the canvas, as large as fits in `max_width` by `max_height`.
    pub(crate) fn draw(&mut self, canvas: &mut Canvas, index: usize, max_width: f32, max_height: f32) {
        let center_x = canvas.width() as f32 / 2.0;
        let center_y = canvas.height() as f32 / 2.0;
        match self {
            Self::Sprites(frames) => {
                let Some(frame) = frames.get_mut(index) else {
                    return;
                };
                let (width, height) = frame.fit(max_width, max_height);
                let x = (center_x - width as f32 / 2.0).round() as i32;
                let y = (center_y - height as f32 / 2.0).round() as i32;
                canvas.draw_image(frame.scaled(width, height), x, y);
            }
            Self::Procedural { frames } => {
                if index >= *frames {
                    return;
                }
                let shape = procedural_frame(index, *frames, center_x, center_y + max_height / 2.0, max_width, max_height);
                draw_tree(canvas, shape);
            }
        }
    }
}

/// How far into the animation blossoms start to appear.
const BLOOM_START: f32 = 0.6;

/// The tree shown in frame `index` out of `frames`, standing on `ground`.
fn procedural_frame(index: usize, frames: usize, center_x: f32, ground: f32, max_width: f32, max_height: f32) -> TreeShape {
    let growth = if frames > 1 { index as f32 / (frames - 1) as f32 } else { 1.0 };
    let stage = match growth {
        g if g < 0.34 => TreeStage::Small,
        g if g < 0.67 => TreeStage::Medium,
        _ => TreeStage::Large,
    };
    // A full sway every 24 frames, gentle enough to read as wind.
    let sway = (index as f32 * TAU / 24.0).sin() * 1.5;
    TreeShape {
        center_x,
        ground,
        width: max_width * (0.3 + 0.7 * growth),
        height: max_height * (0.3 + 0.7 * growth),
        stage,
        bloom: ((growth - BLOOM_START) / (1.0 - BLOOM_START)).clamp(0.0, 1.0),
        sway,
    }
}

/// Reorder frames so playback starts at `loop_start`, with the frames before it moved to the end.
pub(crate) fn reorder<T>(mut frames: Vec<T>, loop_start: usize) -> Vec<T> {
    if !frames.is_empty() {
        let start = loop_start % frames.len();
        frames.rotate_left(start);
    }
    frames
}
