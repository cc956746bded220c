//! # Journal
//!
//! The workflow never calls the `log` macros directly. It is handed a
//! [`Journal`] and records through it, so tests can capture what a session
//! logged with [`MemoryJournal`] while the binary forwards everything to `log`
//! through [`LogJournal`].
//!
//! [`init`] installs `env_logger` as the `log` backend for the lifetime of the
//! process. `RUST_LOG` wins over the configured level.

use log::Level;
use std::cell::RefCell;
use std::fs::OpenOptions;
use std::path::Path;

/// Target used for every record the console writes.
pub const TARGET: &str = "northwind";

pub trait Journal {
    fn record(&self, level: Level, message: &str);

    fn info(&self, message: &str) {
        self.record(Level::Info, message);
    }

    fn warn(&self, message: &str) {
        self.record(Level::Warn, message);
    }

    fn error(&self, message: &str) {
        self.record(Level::Error, message);
    }
}

/// Forwards to the `log` facade.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogJournal;

impl Journal for LogJournal {
    fn record(&self, level: Level, message: &str) {
        log::log!(target: TARGET, level, "{}", message);
    }
}

/// Keeps every record in memory.
#[derive(Debug, Default)]
pub struct MemoryJournal {
    entries: RefCell<Vec<(Level, String)>>,
}

impl MemoryJournal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<(Level, String)> {
        self.entries.borrow().clone()
    }

    pub fn contains(&self, level: Level, message: &str) -> bool {
        self.entries
            .borrow()
            .iter()
            .any(|(l, m)| *l == level && m == message)
    }
}

impl Journal for MemoryJournal {
    fn record(&self, level: Level, message: &str) {
        self.entries.borrow_mut().push((level, message.to_string()));
    }
}

/// Installs the `env_logger` backend.
///
/// Records are appended to `log_file` when it can be opened, otherwise they go
/// to stderr. Returns `false` when a logger was already installed, in which
/// case that logger stays in place.
pub fn init(level: &str, log_file: Option<&Path>) -> bool {
    let env = env_logger::Env::default().default_filter_or(level);
    let mut builder = env_logger::Builder::from_env(env);
    builder.format_timestamp_secs();

    if let Some(file) = log_file.and_then(open_log_file) {
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }

    match builder.try_init() {
        Ok(()) => true,
        Err(e) => {
            log::debug!(target: TARGET, "Keeping the installed logger: {e}");
            false
        }
    }
}

fn open_log_file(path: &Path) -> Option<std::fs::File> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).ok()?;
        }
    }
    OpenOptions::new().create(true).append(true).open(path).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_journal_keeps_order_and_level() {
        let journal = MemoryJournal::new();
        journal.info("Program started");
        journal.error("CategoryName : Name exists");

        assert_eq!(
            journal.entries(),
            vec![
                (Level::Info, "Program started".to_string()),
                (Level::Error, "CategoryName : Name exists".to_string()),
            ]
        );
        assert!(journal.contains(Level::Error, "CategoryName : Name exists"));
        assert!(!journal.contains(Level::Info, "CategoryName : Name exists"));
    }

    #[test]
    fn second_init_keeps_the_first_logger() {
        init("info", None);
        assert!(!init("debug", None));
    }

    #[test]
    fn log_file_is_created_with_parents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("northwind.log");
        assert!(open_log_file(&path).is_some());
        assert!(path.exists());
    }
}
