use image::imageops::{self, FilterType};
use image::RgbaImage;

/// An image that gets drawn at varying sizes.
///
/// The last resized copy is kept around since the same size is usually requested many ticks in a
/// row.
#[derive(Clone, Debug)]
pub(crate) struct Sprite {
    image: RgbaImage,
    cached: Option<RgbaImage>,
}

impl Sprite {
    pub(crate) fn new(image: RgbaImage) -> Self {
        Self { image, cached: None }
    }

    /// The largest size that fits within the given bounds, keeping the aspect ratio.
    pub(crate) fn fit(&self, max_width: f32, max_height: f32) -> (u32, u32) {
        if self.image.width() == 0 || self.image.height() == 0 {
            return (0, 0);
        }
        let scale = (max_width / self.image.width() as f32).min(max_height / self.image.height() as f32);
        let width = (self.image.width() as f32 * scale).round().max(1.0) as u32;
        let height = (self.image.height() as f32 * scale).round().max(1.0) as u32;
        (width, height)
    }

    pub(crate) fn scaled(&mut self, width: u32, height: u32) -> &RgbaImage {
        let stale = match &self.cached {
            Some(cached) => cached.dimensions() != (width, height),
            None => true,
        };
        if stale {
            self.cached = Some(imageops::resize(&self.image, width, height, FilterType::Triangle));
        }
        self.cached.get_or_insert_with(|| RgbaImage::new(width, height))
    }
}
