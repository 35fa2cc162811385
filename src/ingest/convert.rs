//! Conversion of source images (usually TIFF) to JPEG for the browser.

use image::codecs::jpeg::JpegEncoder;
use image::DynamicImage;
use std::fs::{self, File};
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

/// Default JPEG quality, for converted images and composites alike.
pub const DEFAULT_QUALITY: u8 = 75;

/// Errors that can occur while converting an image to JPEG.
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error("Failed to resolve {path}: {source}")]
    Resolve {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to inspect {path}: {source}")]
    Inspect {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to decode {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Failed to encode {path}: {source}")]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// Returns true for paths with a `.jpg`/`.jpeg` extension (any case).
pub fn is_jpeg(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("jpg") || ext.eq_ignore_ascii_case("jpeg"))
}

/// The sibling path a converted copy of `path` is written to.
pub fn jpeg_path(path: &Path) -> PathBuf {
    path.with_extension("jpeg")
}

/// Converts `path` to JPEG, returning the absolute path of the JPEG.
///
/// JPEGs are returned as-is. A non-empty `<stem>.jpeg` sibling from an
/// earlier run is reused. A partially written file is removed on failure.
pub fn to_jpeg(path: &Path, quality: u8) -> Result<PathBuf, ConvertError> {
    let path = std::path::absolute(path).map_err(|source| ConvertError::Resolve {
        path: path.to_path_buf(),
        source,
    })?;
    if is_jpeg(&path) {
        return Ok(path);
    }

    let target = jpeg_path(&path);
    match fs::metadata(&target) {
        Ok(info) if info.is_file() && info.len() > 0 => {
            tracing::debug!(path = %target.display(), "reusing converted jpeg");
            return Ok(target);
        }
        Ok(_) => {}
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(source) => {
            return Err(ConvertError::Inspect {
                path: target,
                source,
            })
        }
    }

    let img = image::open(&path).map_err(|source| ConvertError::Decode {
        path: path.clone(),
        source,
    })?;
    if let Err(source) = write_jpeg(&img, &target, quality) {
        let _ = fs::remove_file(&target);
        return Err(ConvertError::Encode {
            path: target,
            source,
        });
    }

    tracing::debug!(from = %path.display(), to = %target.display(), "converted to jpeg");
    Ok(target)
}

/// Encodes `img` as a JPEG at `quality` (1-100). Alpha is dropped.
///
/// The output is flushed before returning, so a failed write is an error
/// rather than a truncated file.
pub fn write_jpeg(img: &DynamicImage, path: &Path, quality: u8) -> Result<(), image::ImageError> {
    let mut writer = BufWriter::new(File::create(path)?);
    let encoder = JpegEncoder::new_with_quality(&mut writer, quality);
    img.to_rgb8().write_with_encoder(encoder)?;
    writer.flush().map_err(image::ImageError::IoError)
}
