//! Configuration management for WVM

mod io;
mod types;

pub use types::*;

use anyhow::Result;
use std::path::{Path, PathBuf};

use crate::pattern::Pattern;

impl Config {
    /// Get the config file path (~/.config/wvm/config.toml)
    pub fn config_path() -> Result<PathBuf> {
        io::config_path()
    }

    /// Get the config directory path (~/.config/wvm)
    pub fn config_dir() -> Result<PathBuf> {
        io::config_dir()
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> Result<Self> {
        io::load()
    }

    /// Load configuration from a specific file, or return defaults if not found
    pub fn load_from(path: &Path) -> Result<Self> {
        io::load_from(path)
    }

    /// Check values that serde cannot.
    pub fn validate(&self) -> Result<(), String> {
        Pattern::compile(&self.chart.format)
            .map_err(|e| format!("chart.format {:?}: {}", self.chart.format, e))?;
        if !(1..=100).contains(&self.ingest.jpeg_quality) {
            return Err(format!(
                "ingest.jpeg_quality must be between 1 and 100, got {}",
                self.ingest.jpeg_quality
            ));
        }
        let opacity = self.overlay.opacity;
        if !(opacity > 0.0 && opacity <= 1.0) {
            return Err(format!(
                "overlay.opacity must be in (0, 1], got {}",
                opacity
            ));
        }
        Ok(())
    }

    /// The compiled file name pattern.
    pub fn pattern(&self) -> Result<Pattern> {
        Ok(Pattern::compile(&self.chart.format)?)
    }
}

/// Splits a comma separated key list, trimming whitespace and dropping empties.
pub fn parse_vars(vars: &str) -> Vec<String> {
    vars.split(',')
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
        .collect()
}
