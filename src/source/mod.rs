//! Population sources
//!
//! A source yields the rows used for the one-time load of an empty
//! dictionary. Spreadsheets are matched to their columns by header name:
//! `Amharic`, `OromLatin`, `OromSaba`, `English`. Missing columns read as
//! absent for every row; other columns (a serial number, notes) are ignored.

mod delimited;
mod workbook;

use std::path::{Path, PathBuf};

use crate::entry::{Language, SourceRow};
use crate::{Error, Result};

/// Anything that can produce the rows for a population run.
///
/// `rows` is only called once the store has confirmed it is empty, so a
/// broken source never blocks startup of an already-populated dictionary.
pub trait EntrySource: Send + Sync {
    /// Human-readable origin, used in logs and errors
    fn describe(&self) -> String;

    /// Read every data row, normalized
    fn rows(&self) -> Result<Vec<SourceRow>>;
}

impl EntrySource for Vec<SourceRow> {
    fn describe(&self) -> String {
        format!("{} in-memory rows", self.len())
    }

    fn rows(&self) -> Result<Vec<SourceRow>> {
        Ok(self.clone())
    }
}

/// Supported spreadsheet formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// Excel / OpenDocument workbooks, first sheet
    Workbook,
    /// Comma-separated values
    Csv,
    /// Tab-separated values
    Tsv,
}

impl SourceFormat {
    /// Detect the format from a file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => Some(SourceFormat::Workbook),
            "csv" => Some(SourceFormat::Csv),
            "tsv" | "tab" => Some(SourceFormat::Tsv),
            _ => None,
        }
    }
}

/// A spreadsheet file on disk
#[derive(Debug, Clone)]
pub struct SpreadsheetSource {
    path: PathBuf,
}

impl SpreadsheetSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn unavailable(&self, reason: impl Into<String>) -> Error {
        Error::SourceDataUnavailable {
            location: self.path.display().to_string(),
            reason: reason.into(),
        }
    }
}

impl EntrySource for SpreadsheetSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn rows(&self) -> Result<Vec<SourceRow>> {
        if !self.path.is_file() {
            return Err(self.unavailable("file not found"));
        }

        let format = SourceFormat::from_path(&self.path)
            .ok_or_else(|| self.unavailable("unsupported file format"))?;

        let rows = match format {
            SourceFormat::Workbook => workbook::read_rows(&self.path),
            SourceFormat::Csv => delimited::read_rows(&self.path, b','),
            SourceFormat::Tsv => delimited::read_rows(&self.path, b'\t'),
        }
        .map_err(|e| match e {
            ReadError::Unavailable(reason) => self.unavailable(reason),
            ReadError::Malformed { row, reason } => Error::MalformedSourceRow { row, reason },
        })?;

        tracing::debug!("Read {} rows from {}", rows.len(), self.path.display());
        Ok(rows)
    }
}

/// Failure inside a format reader, before the source path is attached
#[derive(Debug)]
enum ReadError {
    Unavailable(String),
    Malformed { row: usize, reason: String },
}

/// Position of each language column in the header row
#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct ColumnMap {
    positions: [Option<usize>; 4],
}

impl ColumnMap {
    fn from_headers<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut map = Self::default();
        for (index, header) in headers.into_iter().enumerate() {
            if let Some(language) = Language::parse(header.as_ref()) {
                let slot = &mut map.positions[slot_of(language)];
                // First matching column wins
                if slot.is_none() {
                    *slot = Some(index);
                }
            }
        }
        map
    }

    fn missing(&self) -> Vec<Language> {
        Language::all()
            .iter()
            .copied()
            .filter(|lang| self.positions[slot_of(*lang)].is_none())
            .collect()
    }

    /// Build a row from its cells; `None` if every cell is blank
    fn assemble(&self, cells: &[Option<String>]) -> Option<SourceRow> {
        let blank = cells
            .iter()
            .all(|cell| cell.as_deref().is_none_or(|v| v.trim().is_empty()));
        if blank {
            return None;
        }

        let mut row = SourceRow::default();
        for language in Language::all() {
            let value = self.positions[slot_of(*language)]
                .and_then(|index| cells.get(index))
                .and_then(|cell| cell.as_deref());
            row.set(*language, value);
        }
        Some(row)
    }
}

fn slot_of(language: Language) -> usize {
    match language {
        Language::Amharic => 0,
        Language::OromLatin => 1,
        Language::OromSaba => 2,
        Language::English => 3,
    }
}

fn warn_missing_columns(map: &ColumnMap, path: &Path) {
    for language in map.missing() {
        tracing::warn!(
            "Source {} has no {} column; values will be absent",
            path.display(),
            language
        );
    }
}
