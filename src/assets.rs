use crate::config::{AssetsConfig, TreeAssets};
use crate::scene::frames::{reorder, Animation};
use crate::scene::sprite::Sprite;
use crate::scene::tree::TreeSprites;
use image::codecs::gif::GifDecoder;
use image::{AnimationDecoder, RgbaImage};
use std::fmt;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// Errors that can occur when loading images
#[derive(thiserror::Error, Debug)]
pub enum AssetError {
    #[error("reading {0}: {1}")]
    Io(PathBuf, std::io::Error),

    #[error("decoding {0}: {1}")]
    Image(PathBuf, image::ImageError),

    #[error("no frame_NNN.png files in {0}")]
    NoFrames(PathBuf),
}

pub(crate) fn load_image(path: &Path) -> Result<RgbaImage, AssetError> {
    let image = image::open(path).map_err(|e| match e {
        image::ImageError::IoError(e) => AssetError::Io(path.to_path_buf(), e),
        e => AssetError::Image(path.to_path_buf(), e),
    })?;
    Ok(image.to_rgba8())
}

pub(crate) fn load_trees(assets: &TreeAssets) -> Result<TreeSprites, AssetError> {
    Ok(TreeSprites {
        small: Sprite::new(load_image(&assets.small)?),
        medium: Sprite::new(load_image(&assets.medium)?),
        large: Sprite::new(load_image(&assets.large)?),
    })
}

/// Load animation frames from a GIF file or a directory of `frame_NNN.png` files, in playback
/// order.
pub(crate) fn load_frames(path: &Path, loop_start: usize) -> Result<Vec<RgbaImage>, AssetError> {
    let frames = if path.is_dir() { load_frame_directory(path)? } else { load_gif(path)? };
    if frames.is_empty() {
        return Err(AssetError::NoFrames(path.to_path_buf()));
    }
    Ok(reorder(frames, loop_start))
}

fn load_gif(path: &Path) -> Result<Vec<RgbaImage>, AssetError> {
    let file = File::open(path).map_err(|e| AssetError::Io(path.to_path_buf(), e))?;
    let decoder = GifDecoder::new(BufReader::new(file)).map_err(|e| AssetError::Image(path.to_path_buf(), e))?;
    let frames = decoder.into_frames().collect_frames().map_err(|e| AssetError::Image(path.to_path_buf(), e))?;
    Ok(frames.into_iter().map(|frame| frame.into_buffer()).collect())
}

fn load_frame_directory(path: &Path) -> Result<Vec<RgbaImage>, AssetError> {
    let entries = fs::read_dir(path).map_err(|e| AssetError::Io(path.to_path_buf(), e))?;
    let mut numbered: Vec<(u32, PathBuf)> = entries
        .flatten()
        .map(|entry| entry.path())
        .filter_map(|path| frame_number(&path).map(|number| (number, path)))
        .collect();
    numbered.sort_by_key(|(number, _)| *number);
    numbered.into_iter().map(|(_, path)| load_image(&path)).collect()
}

/// The number in a `frame_NNN.png` file name.
fn frame_number(path: &Path) -> Option<u32> {
    if path.extension()? != "png" {
        return None;
    }
    let stem = path.file_stem()?.to_str()?;
    stem.strip_prefix("frame_")?.parse().ok()
}

/// Load the configured assets, falling back to drawn art for anything that can't be loaded.
pub(crate) fn load_or_fallback(config: &AssetsConfig) -> (Option<TreeSprites>, Animation) {
    let trees = config.trees.as_ref().and_then(|trees| match load_trees(trees) {
        Ok(trees) => Some(trees),
        Err(e) => {
            tracing::warn!("tree images unavailable, drawing trees instead: {e}");
            None
        }
    });

    let animation = match &config.frames {
        Some(path) => match load_frames(path, config.loop_start) {
            Ok(frames) => {
                tracing::info!("loaded {} animation frames from {}", frames.len(), path.display());
                Animation::Sprites(frames.into_iter().map(Sprite::new).collect())
            }
            Err(e) => {
                tracing::warn!("animation frames unavailable, drawing them instead: {e}");
                Animation::Procedural { frames: config.frame_count.max(1) }
            }
        },
        None => Animation::Procedural { frames: config.frame_count.max(1) },
    };
    (trees, animation)
}

/// The state of a single configured asset.
#[derive(Debug)]
pub enum AssetStatus {
    NotConfigured,
    Found(String),
    Failed(AssetError),
}

/// What `check` found.
#[derive(Debug)]
pub struct AssetReport {
    pub entries: Vec<(&'static str, AssetStatus)>,
}

impl AssetReport {
    pub fn build(config: &AssetsConfig) -> Self {
        let mut entries = Vec::new();
        match &config.trees {
            Some(trees) => {
                for (name, path) in [("small tree", &trees.small), ("medium tree", &trees.medium), ("large tree", &trees.large)] {
                    let status = match load_image(path) {
                        Ok(image) => AssetStatus::Found(format!("{} ({}x{})", path.display(), image.width(), image.height())),
                        Err(e) => AssetStatus::Failed(e),
                    };
                    entries.push((name, status));
                }
            }
            None => entries.push(("trees", AssetStatus::NotConfigured)),
        }

        let frames = match &config.frames {
            Some(path) => match load_frames(path, config.loop_start) {
                Ok(frames) => AssetStatus::Found(format!("{} ({} frames)", path.display(), frames.len())),
                Err(e) => AssetStatus::Failed(e),
            },
            None => AssetStatus::NotConfigured,
        };
        entries.push(("animation frames", frames));
        Self { entries }
    }

    /// Whether every configured asset loaded.
    pub fn is_ok(&self) -> bool {
        !self.entries.iter().any(|(_, status)| matches!(status, AssetStatus::Failed(_)))
    }
}

impl fmt::Display for AssetReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, status) in &self.entries {
            match status {
                AssetStatus::NotConfigured => writeln!(f, "[--] {name}: not configured, drawn procedurally")?,
                AssetStatus::Found(details) => writeln!(f, "[ok] {name}: {details}")?,
                AssetStatus::Failed(e) => writeln!(f, "[!!] {name}: {e}")?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn save_frame(dir: &Path, name: &str, shade: u8) {
        let image = RgbaImage::from_pixel(2, 2, image::Rgba([shade, shade, shade, 255]));
        image.save(dir.join(name)).expect("failed to save frame");
    }

    #[rstest]
    #[case("frame_007.png", Some(7))]
    #[case("frame_100.png", Some(100))]
    #[case("frame_abc.png", None)]
    #[case("frame_001.gif", None)]
    #[case("tree_small.png", None)]
    fn frame_numbers(#[case] name: &str, #[case] expected: Option<u32>) {
        assert_eq!(frame_number(Path::new(name)), expected);
    }

    #[test]
    fn frame_directory_is_sorted_and_reordered() {
        let dir = tempfile::tempdir().expect("failed to create dir");
        save_frame(dir.path(), "frame_010.png", 10);
        save_frame(dir.path(), "frame_002.png", 2);
        save_frame(dir.path(), "frame_001.png", 1);
        save_frame(dir.path(), "notes.png", 99);

        let frames = load_frames(dir.path(), 1).expect("load failed");
        let shades: Vec<u8> = frames.iter().map(|frame| frame.get_pixel(0, 0).0[0]).collect();
        assert_eq!(shades, vec![2, 10, 1]);
    }

    #[test]
    fn empty_directory_has_no_frames() {
        let dir = tempfile::tempdir().expect("failed to create dir");
        assert!(matches!(load_frames(dir.path(), 0), Err(AssetError::NoFrames(_))));
    }

    #[test]
    fn missing_assets_fall_back() {
        let config = AssetsConfig {
            trees: Some(TreeAssets {
                small: "/nope/small.png".into(),
                medium: "/nope/medium.png".into(),
                large: "/nope/large.png".into(),
            }),
            frames: Some("/nope/tenor.gif".into()),
            loop_start: 33,
            frame_count: 12,
        };
        let (trees, animation) = load_or_fallback(&config);
        assert!(trees.is_none());
        assert_eq!(animation.len(), 12);

        let report = AssetReport::build(&config);
        assert!(!report.is_ok());
        assert!(report.to_string().contains("[!!] small tree"));
    }

    #[test]
    fn unconfigured_assets_are_fine() {
        let report = AssetReport::build(&AssetsConfig::default());
        assert!(report.is_ok());
        assert!(report.to_string().contains("[--] animation frames"));
    }
}
