//! Storage Layer - SQLite-backed persistence
//!
//! System of record is a single SQLite table:
//! - entries(id, serial_number, amharic, orom_latin, orom_saba, english)
//!
//! Connections come from a process-wide r2d2 [`ConnectionPool`]; every
//! operation checks out its own connection and returns it when done.

pub mod pool;
pub mod schema;
pub mod sqlite;

pub use pool::{ConnectionPool, PoolOptions, PooledConnection, open_pool};
pub use sqlite::{DictionaryStats, DictionaryStore, PopulateOutcome};
