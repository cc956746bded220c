//! # Northwind Console
//!
//! The binary is intentionally thin: the menu, prompts and terminal handling
//! live in `cli/`, while this file only invokes `cli::run()` and handles process
//! termination.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (src/northwind/cli/)                             │
//! │  - clap argument parsing (setup.rs)                         │
//! │  - Startup wiring: config, logging, store (commands.rs)     │
//! │  - Menu loop and per-option handlers (menu.rs, handlers.rs) │
//! │  - Typed prompts (input.rs) over a Terminal (terminal.rs)   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (src/northwind/api.rs)                           │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Startup failures (bad config, unreadable database) end the process with
//! status 1. Once the menu is running, failures are reported per option and
//! the loop continues.

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
