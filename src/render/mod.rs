pub(crate) mod canvas;
pub(crate) mod color;
pub(crate) mod effects;
pub(crate) mod garden;
pub(crate) mod menu;
pub(crate) mod terminal;
