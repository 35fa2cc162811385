//! HTML rendering of charts.
//!
//! The page template is embedded at compile time and rendered with
//! `minijinja`; values are HTML-escaped.

use std::path::Path;
use std::sync::LazyLock;

use minijinja::{context, AutoEscape, Environment};
use serde::Serialize;

use crate::charts::{Chart, Item, Tagged};

const PAGE_TEMPLATE: &str = "charts.html";

/// Width and height of one image cell, in pixels.
pub const CELL_SIZE: u32 = 250;

static ENV: LazyLock<Environment<'static>> = LazyLock::new(|| {
    let mut env = Environment::new();
    env.set_auto_escape_callback(|name| {
        if name.ends_with(".html") {
            AutoEscape::Html
        } else {
            AutoEscape::None
        }
    });
    if let Err(e) = env.add_template(PAGE_TEMPLATE, include_str!("../templates/charts.html")) {
        tracing::error!(error = %e, "embedded template failed to parse");
    }
    env
});

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Failed to render {template}: {source}")]
    Template {
        template: &'static str,
        #[source]
        source: minijinja::Error,
    },
}

/// The keys the charts were built with, used for labels.
#[derive(Debug, Clone, Default)]
pub struct Layout {
    pub row_keys: Vec<String>,
    pub sort_keys: Vec<String>,
    pub title: String,
}

impl Layout {
    pub fn new(row_keys: Vec<String>, sort_keys: Vec<String>) -> Self {
        Self {
            row_keys,
            sort_keys,
            title: "wvm".to_string(),
        }
    }

    /// The label of `item` in the header row: its first sort key value, or
    /// the file stem when that is empty.
    pub fn column_label(&self, item: &Item) -> String {
        let value = self
            .sort_keys
            .first()
            .map(|key| item.metadata().value(key))
            .unwrap_or_default();
        if !value.is_empty() {
            return value.to_string();
        }
        item.path()
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

#[derive(Serialize)]
struct ChartView {
    title: String,
    row_label: String,
    columns: Vec<String>,
    rows: Vec<RowView>,
}

#[derive(Serialize)]
struct RowView {
    name: String,
    images: Vec<String>,
}

/// Image `src` for `path`. Absolute paths become `file://` URLs.
pub fn image_src(path: &Path) -> String {
    if path.is_absolute() {
        format!("file://{}", path.display())
    } else {
        path.display().to_string()
    }
}

fn chart_view(chart: &Chart, layout: &Layout) -> ChartView {
    let columns = chart
        .rows()
        .first()
        .map(|row| row.items().iter().map(|item| layout.column_label(item)).collect())
        .unwrap_or_default();

    let rows = chart
        .rows()
        .iter()
        .map(|row| RowView {
            name: layout
                .row_keys
                .iter()
                .map(|key| row.metadata().value(key))
                .collect::<Vec<_>>()
                .join(" "),
            images: row.items().iter().map(|item| image_src(item.path())).collect(),
        })
        .collect();

    ChartView {
        title: chart.metadata().to_string(),
        row_label: layout.row_keys.join(", "),
        columns,
        rows,
    }
}

/// Renders every chart into one HTML document.
pub fn render_charts(charts: &[Chart], layout: &Layout) -> Result<String, RenderError> {
    let views: Vec<ChartView> = charts.iter().map(|chart| chart_view(chart, layout)).collect();
    let template = ENV
        .get_template(PAGE_TEMPLATE)
        .map_err(|source| RenderError::Template {
            template: PAGE_TEMPLATE,
            source,
        })?;
    let html = template
        .render(context! {
            title => &layout.title,
            cell => CELL_SIZE,
            charts => views,
        })
        .map_err(|source| RenderError::Template {
            template: PAGE_TEMPLATE,
            source,
        })?;
    tracing::debug!(charts = charts.len(), bytes = html.len(), "rendered html");
    Ok(html)
}
