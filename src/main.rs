//! Wide View Microscopy (WVM) - CLI entry point

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

use cli::{Cli, Commands, ConfigCommands};

#[cfg(not(tarpaulin_include))]
fn main() -> Result<()> {
    let cli = Cli::parse();
    wvm::logging::init(cli.verbose);

    let config_path = cli.config.as_deref();
    match cli.command {
        Commands::Chart(args) => {
            let config = commands::load_config(config_path)?;
            commands::chart::handle(&args, &config)
        }
        Commands::Match {
            format,
            json,
            names,
        } => {
            let config = commands::load_config(config_path)?;
            if !commands::matching::handle(format.as_deref(), &names, json, &config)? {
                std::process::exit(1);
            }
            Ok(())
        }
        Commands::Config(cmd) => match cmd {
            ConfigCommands::Show => {
                let config = commands::load_config(config_path)?;
                commands::config::handle_show(&config)
            }
            ConfigCommands::Path => commands::config::handle_path(config_path),
        },
        Commands::Completions { shell } => commands::completions::handle::<Cli>(shell),
    }
}
