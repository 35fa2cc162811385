//! Wide View Microscopy (WVM) Library
//!
//! Extracts metadata from image file names with a small `$(name)` pattern
//! language, arranges the images into charts of rows and columns, and renders
//! the charts as an HTML comparison page.

pub mod charts;
pub mod config;
pub mod ingest;
pub mod logging;
pub mod metadata;
pub mod pattern;
pub mod render;

pub use charts::{build_charts, build_rows, Chart, ImageOverlay, Item, Overlay, Row, Tagged};
pub use config::Config;
pub use metadata::Metadata;
pub use pattern::{MatchError, Pattern, PatternError};
pub use render::{render_charts, Layout};
