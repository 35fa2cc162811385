//! Command handlers for the WVM CLI.
//!
//! Each submodule handles a specific CLI command or command group.
//! The main dispatch logic remains in main.rs.

pub mod chart;
pub mod completions;
pub mod config;
pub mod matching;

use anyhow::{Context, Result};
use std::path::Path;

use wvm::Config;

/// Load the config from `path` when given, else from the default location.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let config = match path {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("Config file not found: {}", path.display());
            }
            Config::load_from(path)
        }
        None => Config::load(),
    };
    config.context("Failed to load configuration")
}
