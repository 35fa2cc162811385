//! Configuration type definitions and defaults

use serde::{Deserialize, Serialize};

use crate::charts::overlay::DEFAULT_OPACITY;
use crate::ingest::convert::DEFAULT_QUALITY;
use crate::pattern::DEFAULT_FORMAT;

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub chart: ChartConfig,
    #[serde(default)]
    pub ingest: IngestConfig,
    #[serde(default)]
    pub overlay: OverlayConfig,
}

/// How file names are parsed and arranged into charts.
///
/// Key lists are comma separated, e.g. `"subject,slide"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    /// Pattern applied to each file name
    #[serde(default = "default_format")]
    pub format: String,
    /// Keys that split images into separate charts
    #[serde(default = "default_chart_group")]
    pub chart_group: String,
    /// Keys that split a chart into rows
    #[serde(default = "default_row_group")]
    pub row_group: String,
    /// Keys ordering the images within a row
    #[serde(default = "default_column_sort")]
    pub column_sort: String,
    /// Values of the first sort key to composite into an extra column
    #[serde(default)]
    pub overlay: String,
}

pub fn default_format() -> String {
    DEFAULT_FORMAT.to_string()
}

pub fn default_chart_group() -> String {
    "subject,slide".to_string()
}

pub fn default_row_group() -> String {
    "region".to_string()
}

pub fn default_column_sort() -> String {
    "stain".to_string()
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
            chart_group: default_chart_group(),
            row_group: default_row_group(),
            column_sort: default_column_sort(),
            overlay: String::new(),
        }
    }
}

/// Image discovery settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngestConfig {
    /// Convert non-JPEG images to a sibling `.jpeg` for the browser
    #[serde(default = "default_convert_to_jpeg")]
    pub convert_to_jpeg: bool,
    /// JPEG quality, 1-100
    #[serde(default = "default_jpeg_quality")]
    pub jpeg_quality: u8,
}

pub fn default_convert_to_jpeg() -> bool {
    true
}

pub fn default_jpeg_quality() -> u8 {
    DEFAULT_QUALITY
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            convert_to_jpeg: default_convert_to_jpeg(),
            jpeg_quality: default_jpeg_quality(),
        }
    }
}

/// Composite image settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlayConfig {
    /// Opacity of each blended layer, in (0, 1]
    #[serde(default = "default_opacity")]
    pub opacity: f32,
}

pub fn default_opacity() -> f32 {
    DEFAULT_OPACITY
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            opacity: default_opacity(),
        }
    }
}
