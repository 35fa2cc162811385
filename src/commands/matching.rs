//! Match command handler

use anyhow::{Context, Result};
use serde_json::json;

use wvm::{Config, Pattern};

/// Print the metadata each name yields, or why it failed.
///
/// Returns `false` if any name did not match.
#[cfg(not(tarpaulin_include))]
pub fn handle(format: Option<&str>, names: &[String], as_json: bool, config: &Config) -> Result<bool> {
    let format = format.unwrap_or(&config.chart.format);
    let pattern =
        Pattern::compile(format).with_context(|| format!("Invalid format {:?}", format))?;
    tracing::debug!(pattern = %pattern.verbose(), "compiled format");

    let results: Vec<_> = names
        .iter()
        .map(|name| (name, pattern.match_str(name)))
        .collect();
    let all_matched = results.iter().all(|(_, result)| result.is_ok());

    if as_json {
        let entries: Vec<_> = results
            .iter()
            .map(|(name, result)| match result {
                Ok(meta) => json!({ "name": name, "metadata": meta }),
                Err(e) => json!({ "name": name, "error": e.to_string() }),
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else {
        for (name, result) in &results {
            match result {
                Ok(meta) => println!("{}: {}", name, meta),
                Err(e) => println!("{}: error: {}", name, e),
            }
        }
    }
    Ok(all_matched)
}
