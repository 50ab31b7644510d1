//! teamlog library root.
//! Exposes the store abstraction, the typed client, the report functions,
//! the admin gate, the CLI parser and the high-level run() function.

pub mod access;
pub mod cli;
pub mod client;
pub mod config;
pub mod core;
pub mod errors;
pub mod export;
pub mod models;
pub mod report;
pub mod store;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    match &cli.command {
        Commands::Init => cli::commands::init::handle(cli, cfg),
        Commands::Config { .. } => cli::commands::config::handle(&cli.command, cfg),
        Commands::Log { .. } => cli::commands::log::handle(&cli.command, cfg),
        Commands::Add { .. } => cli::commands::add::handle(&cli.command, cfg),
        Commands::List { .. } => cli::commands::list::handle(&cli.command, cfg),
        Commands::Stats { .. } => cli::commands::stats::handle(&cli.command, cfg),
        Commands::Archive { .. } => cli::commands::archive::handle(&cli.command, cfg),
        Commands::Undo { .. } => cli::commands::undo::handle(&cli.command, cfg),
        Commands::Recover { .. } => cli::commands::recover::handle(&cli.command, cfg),
        Commands::Settings { .. } => cli::commands::settings::handle(&cli.command, cfg),
        Commands::Export { .. } => cli::commands::export::handle(&cli.command, cfg),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    // config is loaded once per command
    let mut cfg = Config::load()?;

    if let Some(path) = &cli.workbook {
        cfg.workbook = path.clone();
    }
    if let Some(path) = &cli.credentials {
        cfg.credentials_file = path.clone();
    }

    dispatch(&cli, &cfg)
}
