//! CLI definitions for WVM
//!
//! The clap structure lives apart from main.rs so tests can parse arguments
//! without running commands.

use clap::builder::styling::{AnsiColor, Effects, Styles};
use clap::{ArgAction, Parser, Subcommand};
use clap_complete::Shell as CompletionShell;
use std::path::PathBuf;

/// Build clap styles.
///
/// - Green: headers, usage, command names
/// - White: placeholders and valid values (light gray on dark terminals)
pub fn build_cli_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Green.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::White.on_default())
        .valid(AnsiColor::White.on_default())
        .invalid(AnsiColor::Red.on_default())
        .error(AnsiColor::Red.on_default() | Effects::BOLD)
}

#[derive(Parser)]
#[command(name = "wvm")]
#[command(about = "[ Wide View Microscopy ] - arrange microscopy images into comparison charts")]
#[command(
    long_about = "Wide View Microscopy (WVM) - arrange microscopy images into comparison charts.

WVM reads metadata out of image file names with a format such as
'$(slide) $(subject) $(region) $(stain).tif', groups the images into charts
and rows by that metadata, and writes an HTML page placing related images
side by side.

QUICK START:
    wvm chart -d ./scans -o charts.html     Build charts with the default format
    wvm match '1 s L1 FFa.tif'              Show what a file name parses to
    wvm config show                         Show the effective configuration"
)]
#[command(version)]
#[command(styles = build_cli_styles())]
pub struct Cli {
    /// Config file to use instead of ~/.config/wvm/config.toml
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build HTML charts from a directory of images
    #[command(long_about = "Build HTML charts from a directory of images.

Every file below DIR whose name matches the format is ingested. Images are
split into charts by the chart keys, each chart into rows by the row keys,
and each row is ordered by the sort keys. Key lists are comma separated.
Options not given fall back to the config file.

With --overlay, the images of each row whose first sort key has one of the
listed values are blended into one extra composite image.

EXAMPLES:
    wvm chart -d ./scans                          Print HTML to stdout
    wvm chart -d ./scans -o charts.html           Write HTML to a file
    wvm chart -d ./scans -c subject -r region,slide
    wvm chart -d ./scans --overlay FFa,FFb        Add an FFa+FFb composite")]
    Chart(ChartArgs),

    /// Show the metadata a format extracts from file names
    #[command(long_about = "Show the metadata a format extracts from file names.

Useful for debugging a format before building charts. Exits with status 1
if any name does not match.

EXAMPLES:
    wvm match '1 s L1 FFa.tif'
    wvm match -f '$(a)-$(b).png' x-y.png --json")]
    Match {
        /// File name format (defaults to the configured format)
        #[arg(short, long, value_name = "FORMAT")]
        format: Option<String>,
        /// Print results as JSON
        #[arg(long)]
        json: bool,
        /// File names to match
        #[arg(required = true, value_name = "NAME")]
        names: Vec<String>,
    },

    /// Configuration management
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Generate shell completions
    #[command(long_about = "Generate shell completion scripts.

EXAMPLES:
    wvm completions bash > ~/.local/share/bash-completion/completions/wvm
    wvm completions zsh > ~/.zfunc/_wvm")]
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: CompletionShell,
    },
}

#[derive(clap::Args, Debug, Clone, Default)]
pub struct ChartArgs {
    /// Directory to search for images
    #[arg(short, long, value_name = "DIR")]
    pub dir: PathBuf,
    /// Output HTML file (stdout if omitted)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
    /// File name format
    #[arg(short, long, value_name = "FORMAT")]
    pub format: Option<String>,
    /// Keys that split images into charts
    #[arg(short, long, value_name = "VARS")]
    pub chart: Option<String>,
    /// Keys that split a chart into rows
    #[arg(short, long, value_name = "VARS")]
    pub row: Option<String>,
    /// Keys ordering images within a row
    #[arg(short, long, value_name = "VARS")]
    pub sort: Option<String>,
    /// Values of the first sort key to blend into a composite
    #[arg(long, value_name = "VALUES")]
    pub overlay: Option<String>,
    /// Do not convert images to JPEG
    #[arg(long)]
    pub no_convert: bool,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Print the config file path
    Path,
}
