//! # Bizu - Multilingual Dictionary Lookup
//!
//! Word lookup across Amharic, Afaan Oromo (Latin and Sabaean script) and
//! English, backed by a small SQLite table.
//!
//! Bizu provides:
//! - An r2d2-pooled SQLite store with idempotent schema creation
//! - One-time population from a source spreadsheet (xlsx/xls/ods/csv)
//! - Case-insensitive substring search on a selected language column
//! - Uniform random entry selection
//! - A CLI and an HTTP JSON API for thin UI clients

pub mod entry;
pub mod storage;
pub mod source;
pub mod query;
pub mod server;
pub mod config;
pub mod output;
pub mod ui;

// Re-exports for convenient access
pub use entry::{Entry, Language, SourceRow};
pub use storage::{ConnectionPool, DictionaryStats, DictionaryStore, PopulateOutcome};
pub use source::{EntrySource, SpreadsheetSource};
pub use query::QueryService;

/// Result type alias for Bizu operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for Bizu operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The storage engine could not be reached or rejected an operation
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(#[from] rusqlite::Error),

    /// No pooled connection could be established within the checkout timeout
    #[error("Storage unavailable: {0}")]
    ConnectionUnavailable(#[from] r2d2::Error),

    /// The population source is missing or unreadable; the table is left empty
    #[error("Source data unavailable ({location}): {reason}")]
    SourceDataUnavailable { location: String, reason: String },

    /// A source row is structurally invalid; the whole load is aborted
    #[error("Malformed source row {row}: {reason}")]
    MalformedSourceRow { row: usize, reason: String },

    /// A read was issued before `ensure_ready` succeeded
    #[error("Dictionary is not ready: call ensure_ready first")]
    NotReady,

    #[error("Unknown language: {0}")]
    UnknownLanguage(String),
}
