//! # Storage Layer
//!
//! The persistence gateway for the catalog. It is split the same way at every
//! level: a raw table backend, and a unit of work on top of it.
//!
//! ```text
//! DataContext<B>            change tracking, collection views, eager includes
//!     │
//!     ▼
//! StorageBackend            load tables, apply a batch of changes atomically
//!     ├── SqliteBackend     production (rusqlite, bundled SQLite)
//!     └── MemBackend        tests (shared in-memory tables)
//! ```
//!
//! ## Unit of Work
//!
//! Mutations are staged on the [`context::DataContext`] (`add_*`, `update_*`,
//! `remove_*`) and written together by `commit()`. The backend applies the whole
//! batch or none of it, which is what makes the cascading deletes safe: nulling
//! a category's products and removing the category land together.
//!
//! ## Handles
//!
//! A [`backend::StoreOpener`] hands out a fresh backend per menu iteration. There
//! is no pooling and nothing survives between iterations except what was
//! committed.
//!
//! ## Concurrency
//!
//! None. The console is a single-user, single-threaded session. Uniqueness
//! checks are check-then-act against whatever the handle last read; a
//! multi-user version would need a schema-level unique constraint and
//! optimistic concurrency tokens instead.

pub mod backend;
pub mod context;
pub mod memory;
pub mod query;
pub mod sqlite;

pub use backend::{StorageBackend, StoreOpener};
pub use context::DataContext;
pub use query::Query;
