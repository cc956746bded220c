//! Startup wiring and top-level dispatch.
//!
//! - `run()`: parses arguments, resolves configuration, installs logging and
//!   hands over to the chosen command
//! - `resolve_config()`: layers command-line flags over the loaded config
//! - `handle_*()`: one function per subcommand

use super::menu;
use super::render::{journal_messages, print_messages};
use super::setup::{Cli, Commands};
use super::terminal::ConsoleTerminal;
use clap::Parser;
use northwind::api::CatalogApi;
use northwind::config::NorthwindConfig;
use northwind::error::Result;
use northwind::logging::{self, LogJournal};
use northwind::store::sqlite::SqliteOpener;
use northwind::store::StoreOpener;

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = resolve_config(&cli)?;
    logging::init(&config.log_level, Some(&config.log_file_path()));

    let opener = SqliteOpener::new(config.database_path());
    log::debug!(target: logging::TARGET, "Using database {}", opener.path().display());

    match cli.command.unwrap_or(Commands::Menu) {
        Commands::Menu => handle_menu(&opener),
        Commands::Seed => handle_seed(&opener),
    }
}

/// Flags beat everything `NorthwindConfig::load` found.
fn resolve_config(cli: &Cli) -> Result<NorthwindConfig> {
    let mut config = NorthwindConfig::load(cli.config.as_deref())?;
    if let Some(database) = &cli.database {
        config.database = Some(database.clone());
    }
    if let Some(log_file) = &cli.log_file {
        config.log_file = Some(log_file.clone());
    }
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
    }
    Ok(config)
}

fn handle_menu(opener: &SqliteOpener) -> Result<()> {
    let mut term = ConsoleTerminal::new();
    menu::run(opener, &mut term, &LogJournal)
}

fn handle_seed(opener: &SqliteOpener) -> Result<()> {
    let mut api = CatalogApi::new(opener.open()?);
    let result = api.seed()?;
    print_messages(&mut ConsoleTerminal::new(), &result.messages)?;
    journal_messages(&LogJournal, &result.messages);
    Ok(())
}
