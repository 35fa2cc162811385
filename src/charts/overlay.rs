//! Compositing several images of the same field into one.
//!
//! The composite is written next to the first input as
//! `overlay::<stem>:<stem>...jpeg` and reused on later runs if it already
//! exists.

use image::{DynamicImage, Rgba, RgbaImage};
use std::fs;
use std::path::{Path, PathBuf};

use super::{Item, Overlay, Tagged};
use crate::ingest::convert::{write_jpeg, DEFAULT_QUALITY};
use crate::metadata::Metadata;

/// File name prefix of written composites.
pub const OVERLAY_PREFIX: &str = "overlay::";

/// Default opacity of each layer blended over the base image.
pub const DEFAULT_OPACITY: f32 = 0.5;

/// Errors that can occur while building a composite image.
#[derive(Debug, thiserror::Error)]
pub enum OverlayError {
    #[error("Nothing to overlay: no images were selected")]
    Empty,

    #[error("Failed to load image {path}: {source}")]
    Load {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Failed to write overlay {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Failed to inspect overlay {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Blends images with the `image` crate and writes the result as JPEG.
#[derive(Debug, Clone, Copy)]
pub struct ImageOverlay {
    /// Opacity of each layer drawn over the accumulated image, in (0, 1].
    pub opacity: f32,
    pub quality: u8,
}

impl Default for ImageOverlay {
    fn default() -> Self {
        Self {
            opacity: DEFAULT_OPACITY,
            quality: DEFAULT_QUALITY,
        }
    }
}

impl ImageOverlay {
    pub fn new(opacity: f32, quality: u8) -> Self {
        Self { opacity, quality }
    }
}

impl Overlay for ImageOverlay {
    fn overlay(&self, items: &[Item]) -> Result<Item, OverlayError> {
        let (first, rest) = items.split_first().ok_or(OverlayError::Empty)?;
        if rest.is_empty() {
            return Ok(first.clone());
        }

        let meta = common_metadata(items);
        let path = overlay_path(items);
        match fs::metadata(&path) {
            Ok(info) if info.is_file() && info.len() > 0 => {
                tracing::debug!(path = %path.display(), "reusing existing overlay");
                return Ok(Item::new(path, meta));
            }
            Ok(_) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(source) => return Err(OverlayError::Io { path, source }),
        }

        let mut base = load(first.path())?.to_rgba8();
        for item in rest {
            let layer = load(item.path())?.to_rgba8();
            blend(&mut base, &layer, self.opacity);
        }

        if let Err(source) = write_jpeg(&DynamicImage::ImageRgba8(base), &path, self.quality) {
            let _ = fs::remove_file(&path);
            return Err(OverlayError::Write { path, source });
        }
        tracing::info!(path = %path.display(), layers = items.len(), "wrote overlay");
        Ok(Item::new(path, meta))
    }
}

fn load(path: &Path) -> Result<DynamicImage, OverlayError> {
    image::open(path).map_err(|source| OverlayError::Load {
        path: path.to_path_buf(),
        source,
    })
}

/// Draws `layer` over `base` at `opacity`, anchored at the top-left corner.
///
/// The canvas keeps the size of `base`; parts of `layer` outside it are dropped.
fn blend(base: &mut RgbaImage, layer: &RgbaImage, opacity: f32) {
    let width = base.width().min(layer.width());
    let height = base.height().min(layer.height());
    for y in 0..height {
        for x in 0..width {
            let src = layer.get_pixel(x, y);
            let dst = base.get_pixel_mut(x, y);
            let alpha = opacity * f32::from(src[3]) / 255.0;
            let mix = |d: u8, s: u8| -> u8 {
                (f32::from(d) * (1.0 - alpha) + f32::from(s) * alpha).round() as u8
            };
            *dst = Rgba([
                mix(dst[0], src[0]),
                mix(dst[1], src[1]),
                mix(dst[2], src[2]),
                dst[3].max((alpha * 255.0).round() as u8),
            ]);
        }
    }
}

/// The metadata entries every item agrees on.
pub fn common_metadata(items: &[Item]) -> Metadata {
    match items.first() {
        Some(first) => first
            .metadata()
            .common(items.iter().map(|item| item.metadata())),
        None => Metadata::new(),
    }
}

/// `overlay::<stem>:<stem>...jpeg` in the first item's directory.
pub fn overlay_path(items: &[Item]) -> PathBuf {
    let dir = items
        .first()
        .and_then(|item| item.path().parent())
        .unwrap_or_else(|| Path::new(""));
    let stems: Vec<String> = items
        .iter()
        .map(|item| {
            item.path()
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default()
        })
        .collect();
    dir.join(format!("{}{}.jpeg", OVERLAY_PREFIX, stems.join(":")))
}
