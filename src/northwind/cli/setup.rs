use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "northwind", bin_name = "northwind", version)]
#[command(about = "Menu-driven console for the Northwind product catalog", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// SQLite database file
    #[arg(long, global = true, value_name = "PATH", help_heading = "Options")]
    pub database: Option<PathBuf>,

    /// Configuration file, read before ./northwind.toml and the global one
    #[arg(long, global = true, value_name = "PATH", help_heading = "Options")]
    pub config: Option<PathBuf>,

    /// File log records are appended to
    #[arg(long, global = true, value_name = "PATH", help_heading = "Options")]
    pub log_file: Option<PathBuf>,

    /// Log filter, e.g. "info" or "northwind=debug"
    #[arg(long, global = true, value_name = "LEVEL", help_heading = "Options")]
    pub log_level: Option<String>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commands {
    /// Run the interactive menu (default)
    Menu,
    /// Load the sample catalog into an empty database
    Seed,
}
