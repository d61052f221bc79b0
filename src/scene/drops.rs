use crate::render::canvas::Canvas;
use crate::render::color::Color;

const WATER: Color = Color::new(0, 0, 255);

/// How much opacity a drop loses every tick.
const FADE_PER_TICK: i16 = 10;

/// A drop of water falling from where the garden was watered, fading as it goes.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct WaterDrop {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub speed: f32,
    pub alpha: i16,
}

pub(crate) struct WaterDrops {
    drops: Vec<WaterDrop>,
    rng: fastrand::Rng,
}

impl WaterDrops {
    pub(crate) fn new(rng: fastrand::Rng) -> Self {
        Self { drops: Vec::new(), rng }
    }

    pub(crate) fn spawn(&mut self, x: f32, y: f32) {
        let drop = WaterDrop {
            x: x + self.rng.i8(-1..=1) as f32,
            y,
            size: self.rng.u8(1..=2) as f32,
            speed: 0.2 + self.rng.f32() * 0.2,
            alpha: 255,
        };
        self.drops.push(drop);
    }

    pub(crate) fn update(&mut self) {
        for drop in &mut self.drops {
            drop.y += drop.speed;
            drop.alpha = (drop.alpha - FADE_PER_TICK).max(0);
        }
        self.drops.retain(|drop| drop.alpha > 0);
    }

    pub(crate) fn clear(&mut self) {
        self.drops.clear();
    }

    pub(crate) fn draw(&self, canvas: &mut Canvas) {
        for drop in &self.drops {
            let (x, y) = (drop.x.round() as i32, drop.y.round() as i32);
            let size = drop.size as i32;
            for dy in 0..size {
                for dx in 0..size {
                    canvas.blend(x + dx, y + dy, WATER, drop.alpha as u8);
                }
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn drops(&self) -> &[WaterDrop] {
        &self.drops
    }
}
