//! Config loading from disk

use std::fs;
use tempfile::TempDir;
use wvm::config::{parse_vars, Config};

fn write_config(dir: &TempDir, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join("config.toml");
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn missing_file_gives_defaults() {
    let dir = TempDir::new().unwrap();
    let config = Config::load_from(&dir.path().join("nope.toml")).unwrap();
    assert_eq!(config, Config::default());
    assert_eq!(config.chart.format, "$(slide) $(subject) $(region) $(stain).tif");
    assert_eq!(parse_vars(&config.chart.chart_group), ["subject", "slide"]);
    assert_eq!(parse_vars(&config.chart.row_group), ["region"]);
    assert_eq!(parse_vars(&config.chart.column_sort), ["stain"]);
    assert!(parse_vars(&config.chart.overlay).is_empty());
    assert!(config.ingest.convert_to_jpeg);
    assert_eq!(config.ingest.jpeg_quality, 75);
    assert_eq!(config.overlay.opacity, 0.5);
}

#[test]
fn partial_file_fills_in_defaults() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        r#"
[chart]
format = "$(a)_$(b).png"
overlay = "FFa, FFb"

[ingest]
convert_to_jpeg = false
"#,
    );
    let config = Config::load_from(&path).unwrap();
    assert_eq!(config.chart.format, "$(a)_$(b).png");
    assert_eq!(parse_vars(&config.chart.overlay), ["FFa", "FFb"]);
    assert_eq!(config.chart.row_group, "region");
    assert!(!config.ingest.convert_to_jpeg);
    assert_eq!(config.ingest.jpeg_quality, 75);
    assert_eq!(config.overlay.opacity, 0.5);
    assert_eq!(config.pattern().unwrap().variables().collect::<Vec<_>>(), ["a", "b"]);
}

#[test]
fn invalid_format_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "[chart]\nformat = \"$(a)$(b)\"\n");
    let err = Config::load_from(&path).unwrap_err();
    assert!(format!("{:#}", err).contains("separated by a literal"));
}

#[test]
fn out_of_range_values_are_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "[ingest]\njpeg_quality = 101\n");
    assert!(Config::load_from(&path).is_err());

    let path = write_config(&dir, "[overlay]\nopacity = 1.5\n");
    assert!(Config::load_from(&path).is_err());
}

#[test]
fn malformed_toml_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "[chart\nformat = ");
    let err = Config::load_from(&path).unwrap_err();
    assert!(err.to_string().contains("Failed to parse config file"));
}

#[test]
fn show_output_round_trips() {
    let config = Config::default();
    let text = toml::to_string_pretty(&config).unwrap();
    let back: Config = toml::from_str(&text).unwrap();
    assert_eq!(back, config);
}
