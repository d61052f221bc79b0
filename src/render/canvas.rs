use super::color::Color;
use image::RgbaImage;
use std::collections::HashMap;
use unicode_width::UnicodeWidthStr;

/// A character printed on top of the pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Glyph {
    ch: char,
    fg: Color,
}

/// A single terminal cell, ready to be printed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Cell {
    pub ch: char,
    pub fg: Color,
    pub bg: Color,
}

/// A pixel buffer drawn to the terminal two pixels per cell, plus a layer of text on top.
///
/// Pixel coordinates go from the top left corner; a pixel row `y` lives in cell row `y / 2`.
/// Text coordinates are cell coordinates.
#[derive(Clone, Debug)]
pub(crate) struct Canvas {
    width: u16,
    height: u16,
    pixels: Vec<Color>,
    text: HashMap<(u16, u16), Glyph>,
}

impl Canvas {
    pub(crate) fn new(width: u16, height: u16) -> Self {
        // Keep an even number of pixel rows so every cell has a top and a bottom.
        let height = height + height % 2;
        Self { width, height, pixels: vec![Color::BLACK; width as usize * height as usize], text: HashMap::new() }
    }

    pub(crate) fn width(&self) -> u16 {
        self.width
    }

    pub(crate) fn height(&self) -> u16 {
        self.height
    }

    /// The number of terminal rows the canvas takes.
    pub(crate) fn rows(&self) -> u16 {
        self.height / 2
    }

    /// Clear the pixels to `color` and drop all text.
    pub(crate) fn clear(&mut self, color: Color) {
        self.pixels.fill(color);
        self.text.clear();
    }

    pub(crate) fn pixel(&self, x: i32, y: i32) -> Option<Color> {
        self.index(x, y).map(|index| self.pixels[index])
    }

    pub(crate) fn set(&mut self, x: i32, y: i32, color: Color) {
        if let Some(index) = self.index(x, y) {
            self.pixels[index] = color;
        }
    }

    pub(crate) fn blend(&mut self, x: i32, y: i32, color: Color, alpha: u8) {
        if let Some(index) = self.index(x, y) {
            self.pixels[index] = self.pixels[index].blend(color, alpha);
        }
    }

    /// Fill every row with a color interpolated from `top` to `bottom`.
    pub(crate) fn vertical_gradient(&mut self, top: Color, bottom: Color) {
        let height = self.height as usize;
        for (y, row) in self.pixels.chunks_mut(self.width as usize).enumerate() {
            row.fill(top.lerp(bottom, y as f32 / height as f32));
        }
        self.text.clear();
    }

    pub(crate) fn fill_rect(&mut self, x: i32, y: i32, width: i32, height: i32, color: Color) {
        for py in y..y + height {
            for px in x..x + width {
                self.set(px, py, color);
            }
        }
    }

    pub(crate) fn outline_rect(&mut self, x: i32, y: i32, width: i32, height: i32, color: Color) {
        if width <= 0 || height <= 0 {
            return;
        }
        for px in x..x + width {
            self.set(px, y, color);
            self.set(px, y + height - 1, color);
        }
        for py in y..y + height {
            self.set(x, py, color);
            self.set(x + width - 1, py, color);
        }
    }

    /// Fill the ellipse inscribed in the given box.
    pub(crate) fn fill_ellipse(&mut self, x: f32, y: f32, width: f32, height: f32, color: Color, alpha: u8) {
        let (rx, ry) = (width / 2.0, height / 2.0);
        if rx <= 0.0 || ry <= 0.0 {
            return;
        }
        let (cx, cy) = (x + rx, y + ry);
        for py in y.floor() as i32..=(y + height).ceil() as i32 {
            for px in x.floor() as i32..=(x + width).ceil() as i32 {
                let dx = (px as f32 + 0.5 - cx) / rx;
                let dy = (py as f32 + 0.5 - cy) / ry;
                if dx * dx + dy * dy <= 1.0 {
                    self.blend(px, py, color, alpha);
                }
            }
        }
    }

    pub(crate) fn outline_circle(&mut self, cx: i32, cy: i32, radius: i32, color: Color) {
        let steps = (radius.max(1) * 8) as usize;
        for step in 0..steps {
            let angle = step as f32 / steps as f32 * std::f32::consts::TAU;
            let px = cx as f32 + angle.cos() * radius as f32;
            let py = cy as f32 + angle.sin() * radius as f32;
            self.set(px.round() as i32, py.round() as i32, color);
        }
    }

    /// Paint an image with its top left corner at `(x, y)`, honoring its alpha channel.
    pub(crate) fn draw_image(&mut self, image: &RgbaImage, x: i32, y: i32) {
        for (ix, iy, pixel) in image.enumerate_pixels() {
            let alpha = pixel.0[3];
            if alpha > 0 {
                self.blend(x + ix as i32, y + iy as i32, Color::from(*pixel), alpha);
            }
        }
    }

    /// Print text starting at a cell. Characters past the right edge are dropped.
    pub(crate) fn text(&mut self, col: u16, row: u16, text: &str, fg: Color) {
        for (offset, ch) in text.chars().enumerate() {
            self.put_glyph(col + offset as u16, row, Glyph { ch, fg });
        }
    }

    /// Print text horizontally centered on a row.
    pub(crate) fn text_centered(&mut self, row: u16, text: &str, fg: Color) {
        let col = self.centered_column(text);
        self.text(col, row, text, fg);
    }

    /// Print individually colored characters horizontally centered on a row.
    pub(crate) fn colored_text_centered(&mut self, row: u16, text: &[(char, Option<Color>)], fallback: Color) {
        let plain: String = text.iter().map(|(ch, _)| *ch).collect();
        let col = self.centered_column(&plain);
        for (offset, (ch, color)) in text.iter().enumerate() {
            self.put_glyph(col + offset as u16, row, Glyph { ch: *ch, fg: color.unwrap_or(fallback) });
        }
    }

    fn centered_column(&self, text: &str) -> u16 {
        let width = text.width() as u16;
        self.width.saturating_sub(width) / 2
    }

    fn put_glyph(&mut self, col: u16, row: u16, glyph: Glyph) {
        if col < self.width && row < self.rows() {
            self.text.insert((col, row), glyph);
        }
    }

    /// The terminal cell at a cell position.
    pub(crate) fn cell(&self, col: u16, row: u16) -> Cell {
        let x = col as i32;
        let top = self.pixel(x, row as i32 * 2).unwrap_or_default();
        let bottom = self.pixel(x, row as i32 * 2 + 1).unwrap_or_default();
        match self.text.get(&(col, row)) {
            // Text sits on the average of the two pixels it covers.
            Some(glyph) => Cell { ch: glyph.ch, fg: glyph.fg, bg: top.lerp(bottom, 0.5) },
            None => Cell { ch: '▀', fg: top, bg: bottom },
        }
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }
}
