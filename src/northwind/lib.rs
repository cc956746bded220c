//! # Northwind Architecture
//!
//! Northwind is a **menu-driven catalog console** over the classic Northwind
//! product data: categories, products, suppliers and the order lines that
//! reference products. The library holds everything except the terminal; the
//! binary only adds the menu loop and prompts.
//!
//! ## The Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Menu loop, prompts, typed input collection               │
//! │  - The ONLY place that knows about stdin/stdout/exit codes  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands, one unit of work per handle   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Validation, cascades, outcome messages                   │
//! │  - No I/O assumptions whatsoever                            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - StorageBackend trait, DataContext change tracker         │
//! │  - SqliteBackend (production), MemBackend (testing)         │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! From `api.rs` inward, code takes plain arguments and returns plain Rust
//! types. It never prompts, never prints and never logs; outcomes come back as
//! [`commands::CmdMessage`]s and the caller decides what to show and what to
//! record in its [`logging::Journal`].
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade
//! - [`commands`]: One module per catalog operation
//! - [`store`]: Storage abstraction, SQLite and in-memory backends
//! - [`model`]: Entities and eager-include projections
//! - [`validation`]: Field rules and ordered error reporting
//! - [`config`]: Layered configuration
//! - [`logging`]: The journal capability and `env_logger` setup
//! - [`error`]: Error types
//! - `cli`: Menu, prompts and terminal handling for the binary (not part of the lib API)

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod store;
pub mod validation;
