//! # Configuration
//!
//! Settings are loaded with [`confique`] from TOML files and environment
//! variables. Command-line flags are applied on top by the binary.
//!
//! ## Storage Hierarchy
//!
//! Configuration is resolved in priority order:
//! 1. **Environment variables**: `NORTHWIND_DATABASE`, `NORTHWIND_LOG_FILE`,
//!    `NORTHWIND_LOG_LEVEL`.
//! 2. **Explicit file**: the path given with `--config`.
//! 3. **Local file**: `./northwind.toml`.
//! 4. **Global file**: `northwind.toml` in the OS config directory (via `directories`).
//! 5. **Compiled defaults**.
//!
//! Missing files are skipped.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `database` | `<data dir>/northwind.db` | SQLite catalog file |
//! | `log_file` | `<data dir>/northwind.log` | Where log records are appended |
//! | `log_level` | `info` | `env_logger` filter, overridden by `RUST_LOG` |

use confique::Config;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

use crate::error::Result;

pub const CONFIG_FILENAME: &str = "northwind.toml";
const DATABASE_FILENAME: &str = "northwind.db";
const LOG_FILENAME: &str = "northwind.log";

#[derive(Config, Debug, Clone, PartialEq, Eq)]
pub struct NorthwindConfig {
    /// SQLite database file.
    #[config(env = "NORTHWIND_DATABASE")]
    pub database: Option<PathBuf>,

    /// File log records are appended to.
    #[config(env = "NORTHWIND_LOG_FILE")]
    pub log_file: Option<PathBuf>,

    #[config(default = "info", env = "NORTHWIND_LOG_LEVEL")]
    pub log_level: String,
}

impl Default for NorthwindConfig {
    fn default() -> Self {
        Self {
            database: None,
            log_file: None,
            log_level: "info".to_string(),
        }
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "northwind", "northwind")
}

fn data_file(name: &str) -> PathBuf {
    match project_dirs() {
        Some(dirs) => dirs.data_dir().join(name),
        None => PathBuf::from(name),
    }
}

impl NorthwindConfig {
    /// Loads the layered configuration. `explicit` is the `--config` path.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut files = Vec::new();
        if let Some(path) = explicit {
            files.push(path.to_path_buf());
        }
        files.push(PathBuf::from(CONFIG_FILENAME));
        if let Some(dirs) = project_dirs() {
            files.push(dirs.config_dir().join(CONFIG_FILENAME));
        }
        Self::load_files(&files)
    }

    /// Loads from the environment and then `files`, highest priority first.
    pub fn load_files(files: &[PathBuf]) -> Result<Self> {
        let mut builder = Self::builder().env();
        for file in files {
            builder = builder.file(file);
        }
        Ok(builder.load()?)
    }

    pub fn database_path(&self) -> PathBuf {
        self.database
            .clone()
            .unwrap_or_else(|| data_file(DATABASE_FILENAME))
    }

    pub fn log_file_path(&self) -> PathBuf {
        self.log_file
            .clone()
            .unwrap_or_else(|| data_file(LOG_FILENAME))
    }
}
