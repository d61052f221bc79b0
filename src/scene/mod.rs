pub(crate) mod drops;
pub(crate) mod frames;
pub(crate) mod leaves;
pub(crate) mod sky;
pub(crate) mod sprite;
pub(crate) mod tree;

use crate::config::Config;
use drops::WaterDrops;
use frames::Animation;
use leaves::Leaves;
use tree::TreeSprites;

/// Everything drawn around the state machine's progress.
pub(crate) struct Scene {
    pub leaves: Leaves,
    pub drops: WaterDrops,
    pub trees: Option<TreeSprites>,
    pub animation: Animation,
}

impl Scene {
    pub(crate) fn new(config: &Config, trees: Option<TreeSprites>, animation: Animation) -> Self {
        let mut rng = fastrand::Rng::new();
        let leaves = Leaves::new(config.decorations.leaves, config.window.width, config.window.height, rng.fork());
        let drops = WaterDrops::new(rng.fork());
        Self { leaves, drops, trees, animation }
    }

    /// Advance the decorations by one tick.
    pub(crate) fn update(&mut self) {
        self.leaves.update();
        self.drops.update();
    }
}
