//! Chart command handler

use anyhow::{Context, Result};
use std::fs;

use wvm::config::parse_vars;
use wvm::ingest::{self, ingest};
use wvm::{build_charts, render_charts, Config, ImageOverlay, Layout, Pattern};

use crate::cli::ChartArgs;

/// Ingest, build and render charts, writing HTML to the output file or stdout.
#[cfg(not(tarpaulin_include))]
pub fn handle(args: &ChartArgs, config: &Config) -> Result<()> {
    let format = args.format.as_deref().unwrap_or(&config.chart.format);
    let pattern =
        Pattern::compile(format).with_context(|| format!("Invalid format {:?}", format))?;

    let chart_keys = parse_vars(args.chart.as_deref().unwrap_or(&config.chart.chart_group));
    let row_keys = parse_vars(args.row.as_deref().unwrap_or(&config.chart.row_group));
    let sort_keys = parse_vars(args.sort.as_deref().unwrap_or(&config.chart.column_sort));
    let overlay_values = parse_vars(args.overlay.as_deref().unwrap_or(&config.chart.overlay));
    tracing::debug!(?chart_keys, ?row_keys, ?sort_keys, ?overlay_values, "chart layout");

    let options = ingest::Options {
        convert_to_jpeg: config.ingest.convert_to_jpeg && !args.no_convert,
        jpeg_quality: config.ingest.jpeg_quality,
    };
    let items = ingest(&args.dir, &pattern, &options)
        .with_context(|| format!("Failed to read images from {}", args.dir.display()))?;
    if items.is_empty() {
        tracing::warn!(dir = %args.dir.display(), format, "no file names matched the format");
    }

    let overlay = ImageOverlay::new(config.overlay.opacity, config.ingest.jpeg_quality);
    let charts = build_charts(
        items,
        &chart_keys,
        &row_keys,
        &sort_keys,
        &overlay_values,
        &overlay,
    )
    .context("Failed to build overlay images")?;

    let html = render_charts(&charts, &Layout::new(row_keys, sort_keys))
        .context("Failed to render charts")?;

    match &args.output {
        Some(path) => {
            fs::write(path, html)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!("Wrote {} chart(s) to {}", charts.len(), path.display());
        }
        None => print!("{}", html),
    }
    Ok(())
}
