//! Chart hierarchy: charts contain rows, rows contain images.
//!
//! Images are grouped into charts by the chart keys, each chart's images are
//! grouped into rows by the row keys, and each row is ordered by the sort
//! keys. A row can additionally carry one composite image built from the
//! images whose first sort key value is listed in the overlay values.
//!
//! # Example
//!
//! ```ignore
//! use wvm::charts::{build_charts, ImageOverlay};
//!
//! let charts = build_charts(
//!     items,
//!     &["subject", "slide"],
//!     &["region"],
//!     &["stain"],
//!     &[],
//!     &ImageOverlay::default(),
//! )?;
//! ```

pub mod group;
pub mod overlay;

pub use group::{group, order_by, submeta, Group, Tagged};
pub use overlay::{ImageOverlay, OverlayError};

use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::metadata::Metadata;

/// A single image and the metadata parsed from its name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Item {
    path: PathBuf,
    metadata: Metadata,
}

impl Item {
    pub fn new(path: impl Into<PathBuf>, metadata: Metadata) -> Self {
        Self {
            path: path.into(),
            metadata,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Tagged for Item {
    fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    fn leaves(&self) -> Vec<&Item> {
        vec![self]
    }
}

/// Images sharing the row keys, in column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Row {
    metadata: Metadata,
    items: Vec<Item>,
}

impl Row {
    pub fn new(metadata: Metadata, items: Vec<Item>) -> Self {
        Self { metadata, items }
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }
}

impl Tagged for Row {
    fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    fn leaves(&self) -> Vec<&Item> {
        self.items.iter().collect()
    }
}

/// Rows sharing the chart keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Chart {
    metadata: Metadata,
    rows: Vec<Row>,
}

impl Chart {
    pub fn new(metadata: Metadata, rows: Vec<Row>) -> Self {
        Self { metadata, rows }
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }
}

impl Tagged for Chart {
    fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    fn leaves(&self) -> Vec<&Item> {
        self.rows.iter().flat_map(|row| row.items.iter()).collect()
    }
}

/// Composes several images into one synthetic image.
///
/// Given one item it must return that item unchanged. Given none it fails.
pub trait Overlay {
    fn overlay(&self, items: &[Item]) -> Result<Item, OverlayError>;
}

impl<F> Overlay for F
where
    F: Fn(&[Item]) -> Result<Item, OverlayError>,
{
    fn overlay(&self, items: &[Item]) -> Result<Item, OverlayError> {
        self(items)
    }
}

/// Groups `items` into rows on `row_keys`, ordering each row by `sort_keys`.
///
/// When `sort_keys` is non-empty and more than one overlay value is given,
/// the row's items whose `sort_keys[0]` value is one of `overlay_values` are
/// composed by `overlay` and the composite is appended to the row. The
/// originals stay in place. Rows with no matching items get no composite.
pub fn build_rows<S: AsRef<str>>(
    items: Vec<Item>,
    row_keys: &[S],
    sort_keys: &[S],
    overlay_values: &[S],
    overlay: &dyn Overlay,
) -> Result<Vec<Row>, OverlayError> {
    group(items, row_keys)
        .into_iter()
        .map(|g| -> Result<Row, OverlayError> {
            let mut items = order_by(g.members, sort_keys);
            if let Some(composite) = overlay_row(&items, sort_keys, overlay_values, overlay)? {
                items.push(composite);
            }
            tracing::debug!(row = %g.metadata, images = items.len(), "built row");
            Ok(Row::new(g.metadata, items))
        })
        .collect()
}

fn overlay_row<S: AsRef<str>>(
    items: &[Item],
    sort_keys: &[S],
    overlay_values: &[S],
    overlay: &dyn Overlay,
) -> Result<Option<Item>, OverlayError> {
    let Some(key) = sort_keys.first() else {
        return Ok(None);
    };
    if overlay_values.len() <= 1 {
        return Ok(None);
    }

    let key = key.as_ref();
    let selected: Vec<Item> = items
        .iter()
        .filter(|item| {
            let value = item.metadata.value(key);
            overlay_values.iter().any(|v| v.as_ref() == value)
        })
        .cloned()
        .collect();
    if selected.is_empty() {
        return Ok(None);
    }

    overlay.overlay(&selected).map(Some)
}

/// Groups `items` into charts on `chart_keys`, then builds each chart's rows
/// with [`build_rows`].
pub fn build_charts<S: AsRef<str>>(
    items: Vec<Item>,
    chart_keys: &[S],
    row_keys: &[S],
    sort_keys: &[S],
    overlay_values: &[S],
    overlay: &dyn Overlay,
) -> Result<Vec<Chart>, OverlayError> {
    let charts = group(items, chart_keys)
        .into_iter()
        .map(|g| -> Result<Chart, OverlayError> {
            let leaves: Vec<Item> = g.members.iter().flat_map(|m| m.leaves()).cloned().collect();
            let rows = build_rows(leaves, row_keys, sort_keys, overlay_values, overlay)?;
            tracing::debug!(chart = %g.metadata, rows = rows.len(), "built chart");
            Ok(Chart::new(g.metadata, rows))
        })
        .collect::<Result<Vec<_>, _>>()?;

    tracing::info!(charts = charts.len(), "built charts");
    Ok(charts)
}
