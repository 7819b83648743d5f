//! SQLite storage implementation

use std::path::{Path, PathBuf};

use rusqlite::{OptionalExtension, TransactionBehavior, params};
use serde::{Deserialize, Serialize};

use super::pool::{self, ConnectionPool, PoolOptions, UNICODE_LOWER};
use super::schema;
use crate::Result;
use crate::entry::{Entry, Language};
use crate::source::EntrySource;

/// Result of a population attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PopulateOutcome {
    /// The table already held rows; nothing was read or written
    AlreadyPopulated { entries: usize },
    /// The source was loaded into an empty table
    Loaded { entries: usize },
    /// The source had no data rows; the table is still empty
    SourceEmpty,
}

/// SQLite-backed storage for dictionary entries
pub struct DictionaryStore {
    path: PathBuf,
    pool: ConnectionPool,
}

impl DictionaryStore {
    /// Open a database file (creates if doesn't exist)
    pub fn open(path: &Path) -> Result<Self> {
        Self::open_with(path, PoolOptions::default())
    }

    /// Open a database file with explicit pool options
    pub fn open_with(path: &Path, options: PoolOptions) -> Result<Self> {
        let pool = pool::open_pool(path, &options)?;
        Ok(Self {
            path: path.to_path_buf(),
            pool,
        })
    }

    /// Create the entries table and its indexes if they don't exist
    pub fn ensure_schema(&self) -> Result<()> {
        let conn = self.pool.get()?;
        for stmt in schema::all_schema_statements() {
            conn.execute(stmt, [])?;
        }
        tracing::debug!("Schema ensured at {}", self.path.display());
        Ok(())
    }

    /// Load `source` into the table if, and only if, the table is empty.
    ///
    /// The emptiness check and the inserts share one IMMEDIATE transaction,
    /// which takes the database write lock up front: a second populator on
    /// any connection or process waits (up to the busy timeout) and then sees
    /// the committed rows. The source is read only once the table is known to
    /// be empty. On any error the transaction is dropped and rolled back.
    pub fn populate_if_empty(&self, source: &dyn EntrySource) -> Result<PopulateOutcome> {
        let mut conn = self.pool.get()?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        let existing: i64 = tx.query_row("SELECT COUNT(*) FROM entries", [], |row| row.get(0))?;
        if existing > 0 {
            tracing::info!("Dictionary already populated ({} entries)", existing);
            return Ok(PopulateOutcome::AlreadyPopulated {
                entries: existing as usize,
            });
        }

        tracing::info!("Populating dictionary from {}", source.describe());
        let rows = source.rows()?;
        if rows.is_empty() {
            tracing::warn!(
                "Source {} has no data rows; dictionary left empty",
                source.describe()
            );
            return Ok(PopulateOutcome::SourceEmpty);
        }

        let next_serial: i64 = tx.query_row(
            "SELECT COALESCE(MAX(serial_number), 0) + 1 FROM entries",
            [],
            |row| row.get(0),
        )?;

        {
            let mut stmt = tx.prepare(
                r#"
                INSERT INTO entries (serial_number, amharic, orom_latin, orom_saba, english)
                VALUES (?1, ?2, ?3, ?4, ?5)
                "#,
            )?;
            for (offset, row) in rows.iter().enumerate() {
                stmt.execute(params![
                    next_serial + offset as i64,
                    row.amharic,
                    row.orom_latin,
                    row.orom_saba,
                    row.english,
                ])?;
            }
        }

        tx.commit()?;
        tracing::info!("Dictionary populated with {} entries", rows.len());
        Ok(PopulateOutcome::Loaded {
            entries: rows.len(),
        })
    }

    /// Entries whose `language` column contains `lowered_query`.
    ///
    /// The column is lower-cased with Unicode rules; the caller lower-cases
    /// the query. `instr` keeps `%` and `_` literal, and a NULL column never
    /// matches.
    pub fn search_column(&self, language: Language, lowered_query: &str) -> Result<Vec<Entry>> {
        let sql = format!(
            "SELECT {cols} FROM entries WHERE instr({lower}({col}), ?1) > 0 ORDER BY serial_number",
            cols = schema::ENTRY_COLUMNS,
            lower = UNICODE_LOWER,
            col = language.column(),
        );

        let conn = self.pool.get()?;
        let mut stmt = conn.prepare(&sql)?;
        let entries = stmt
            .query_map([lowered_query], row_to_entry)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(entries)
    }

    /// One entry chosen uniformly at random, or `None` on an empty table
    pub fn random_entry(&self) -> Result<Option<Entry>> {
        let sql = format!(
            "SELECT {} FROM entries ORDER BY RANDOM() LIMIT 1",
            schema::ENTRY_COLUMNS
        );
        let conn = self.pool.get()?;
        conn.query_row(&sql, [], row_to_entry)
            .optional()
            .map_err(Into::into)
    }

    /// Get database statistics
    pub fn stats(&self) -> Result<DictionaryStats> {
        let conn = self.pool.get()?;
        conn.query_row(
            "SELECT COUNT(*), COUNT(amharic), COUNT(orom_latin), COUNT(orom_saba), COUNT(english) FROM entries",
            [],
            |row| {
                Ok(DictionaryStats {
                    entries: row.get::<_, i64>(0)? as usize,
                    amharic: row.get::<_, i64>(1)? as usize,
                    orom_latin: row.get::<_, i64>(2)? as usize,
                    orom_saba: row.get::<_, i64>(3)? as usize,
                    english: row.get::<_, i64>(4)? as usize,
                })
            },
        )
        .map_err(Into::into)
    }
}

/// Helper to convert a row selected with `ENTRY_COLUMNS` to an Entry
fn row_to_entry(row: &rusqlite::Row) -> rusqlite::Result<Entry> {
    Ok(Entry {
        id: row.get(0)?,
        serial_number: row.get(1)?,
        amharic: row.get(2)?,
        orom_latin: row.get(3)?,
        orom_saba: row.get(4)?,
        english: row.get(5)?,
    })
}

/// Database statistics: total entries and non-absent values per language
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DictionaryStats {
    pub entries: usize,
    pub amharic: usize,
    pub orom_latin: usize,
    pub orom_saba: usize,
    pub english: usize,
}

impl DictionaryStats {
    pub fn for_language(&self, language: Language) -> usize {
        match language {
            Language::Amharic => self.amharic,
            Language::OromLatin => self.orom_latin,
            Language::OromSaba => self.orom_saba,
            Language::English => self.english,
        }
    }
}

impl std::fmt::Display for DictionaryStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Dictionary Statistics:")?;
        writeln!(f, "  Entries: {}", self.entries)?;
        for language in Language::all() {
            writeln!(f, "  {}: {}", language, self.for_language(*language))?;
        }
        Ok(())
    }
}
