use crate::render::canvas::Canvas;
use crate::render::color::Color;

const LEAF: Color = Color::new(34, 139, 34);

/// A leaf drifting down across the garden.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Leaf {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub speed: f32,
}

/// Leaves falling forever: whatever reaches the bottom starts over above the top.
pub(crate) struct Leaves {
    leaves: Vec<Leaf>,
    rng: fastrand::Rng,
    width: f32,
    height: f32,
}

impl Leaves {
    pub(crate) fn new(count: usize, width: u16, height: u16, rng: fastrand::Rng) -> Self {
        let mut leaves = Self { leaves: Vec::with_capacity(count), rng, width: width as f32, height: height as f32 };
        for _ in 0..count {
            let leaf = leaves.spawn();
            leaves.leaves.push(leaf);
        }
        leaves
    }

    fn spawn(&mut self) -> Leaf {
        Leaf {
            x: self.rng.f32() * self.width,
            y: self.above_top(),
            size: 1.0 + self.rng.f32(),
            speed: 0.03 + self.rng.f32() * 0.07,
        }
    }

    fn above_top(&mut self) -> f32 {
        -2.0 - self.rng.f32() * 8.0
    }

    pub(crate) fn update(&mut self) {
        for index in 0..self.leaves.len() {
            let jitter = (self.rng.f32() - 0.5) * 0.04;
            let leaf = &mut self.leaves[index];
            leaf.y += leaf.speed;
            leaf.x += jitter;
            if leaf.y > self.height + 2.0 {
                let y = self.above_top();
                let x = self.rng.f32() * self.width;
                let leaf = &mut self.leaves[index];
                leaf.y = y;
                leaf.x = x;
            }
        }
    }

    pub(crate) fn draw(&self, canvas: &mut Canvas) {
        for leaf in &self.leaves {
            canvas.fill_ellipse(leaf.x, leaf.y, leaf.size * 2.0, leaf.size, LEAF, 255);
        }
    }

    #[cfg(test)]
    pub(crate) fn leaves(&self) -> &[Leaf] {
        &self.leaves
    }
}
