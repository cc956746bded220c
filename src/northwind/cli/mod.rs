//! # CLI Behavior
//!
//! This is the terminal client for the catalog. It is the only place that
//! knows about stdin, stdout, screen clearing and exit codes.
//!
//! ## Running
//!
//! - `northwind` or `northwind menu`: the interactive menu. A blank choice (or
//!   closing stdin) quits.
//! - `northwind seed`: loads the sample catalog into an empty database.
//!
//! ## Module Structure
//!
//! - `commands`: Startup wiring and top-level dispatch
//! - `setup`: Argument parsing via clap
//! - `menu`: The menu loop and the handler boundary
//! - `handlers`: One function per menu option
//! - `input`: Typed prompt collection
//! - `terminal`: Line-oriented terminal abstraction
//! - `render`: Output formatting
//! - `styles`: Terminal styling constants

mod commands;
mod handlers;
mod input;
mod menu;
mod render;
pub mod setup;
mod styles;
mod terminal;

pub use commands::run;
