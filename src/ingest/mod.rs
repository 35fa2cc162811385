//! Discovery of images on disk.
//!
//! Walks a directory tree, keeps the files whose names match the pattern and
//! optionally converts them to JPEG so the report can display them.

pub mod convert;

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::charts::overlay::OVERLAY_PREFIX;
use crate::charts::Item;
use crate::pattern::Pattern;

pub use convert::{is_jpeg, jpeg_path, to_jpeg, ConvertError};

/// Options controlling ingestion.
#[derive(Debug, Clone)]
pub struct Options {
    /// Convert non-JPEG images to a sibling `.jpeg`.
    pub convert_to_jpeg: bool,
    pub jpeg_quality: u8,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            convert_to_jpeg: true,
            jpeg_quality: convert::DEFAULT_QUALITY,
        }
    }
}

/// Errors that abort ingestion.
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("Directory not found: {path}")]
    NotFound { path: PathBuf },

    #[error("Failed to read {path}: {source}")]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}

/// Collects every file under `dir` whose name matches `pattern`.
///
/// Files are visited depth first in name order. Files that don't match are
/// skipped with a warning; a failed JPEG conversion keeps the original path.
/// With conversion on, a `.jpeg` that is the converted copy of another
/// matched file is not ingested a second time.
pub fn ingest(dir: &Path, pattern: &Pattern, options: &Options) -> Result<Vec<Item>, IngestError> {
    if !dir.exists() {
        return Err(IngestError::NotFound {
            path: dir.to_path_buf(),
        });
    }

    let mut matched = Vec::new();
    let mut skipped = 0usize;
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.map_err(|source| IngestError::Walk {
            path: source
                .path()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| dir.to_path_buf()),
            source,
        })?;
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let name = entry.file_name().to_string_lossy();
        if name.starts_with(OVERLAY_PREFIX) {
            continue;
        }
        match pattern.match_str(&name) {
            Ok(meta) => matched.push((path.to_path_buf(), meta)),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "skipping file");
                skipped += 1;
            }
        }
    }

    let converted: HashSet<PathBuf> = if options.convert_to_jpeg {
        matched
            .iter()
            .filter(|(path, _)| !is_jpeg(path))
            .map(|(path, _)| jpeg_path(path))
            .collect()
    } else {
        HashSet::new()
    };

    let mut items = Vec::with_capacity(matched.len());
    for (path, meta) in matched {
        if converted.contains(&path) {
            tracing::debug!(path = %path.display(), "skipping converted copy");
            continue;
        }

        let path = if options.convert_to_jpeg {
            match to_jpeg(&path, options.jpeg_quality) {
                Ok(jpeg) => jpeg,
                Err(e) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %e,
                        "could not convert to jpeg, using original"
                    );
                    path
                }
            }
        } else {
            path
        };

        tracing::debug!(path = %path.display(), meta = %meta, "ingested");
        items.push(Item::new(path, meta));
    }

    tracing::info!(images = items.len(), skipped, dir = %dir.display(), "ingest complete");
    Ok(items)
}
