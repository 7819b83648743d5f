//! CSV / TSV reader

use std::path::Path;

use super::{ColumnMap, ReadError, warn_missing_columns};
use crate::entry::SourceRow;

/// Read a delimited file with a header row.
///
/// Records whose field count differs from the header are malformed; the
/// whole read is aborted rather than guessing which column shifted. The
/// reported row is the record's line after the header, so blank lines the
/// reader skips still count, as blank rows do in a workbook.
pub(super) fn read_rows(path: &Path, delimiter: u8) -> Result<Vec<SourceRow>, ReadError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .from_path(path)
        .map_err(|e| ReadError::Unavailable(e.to_string()))?;

    let headers = reader
        .headers()
        .map_err(|e| ReadError::Unavailable(format!("unreadable header row: {}", e)))?
        .clone();
    let map = ColumnMap::from_headers(headers.iter());
    warn_missing_columns(&map, path);

    let mut rows = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record = record.map_err(|e| match e.kind() {
            csv::ErrorKind::Io(_) => ReadError::Unavailable(e.to_string()),
            _ => ReadError::Malformed {
                row: e
                    .position()
                    .map(|pos| pos.line().saturating_sub(1) as usize)
                    .unwrap_or(index + 1),
                reason: e.to_string(),
            },
        })?;

        let cells: Vec<Option<String>> = record.iter().map(|v| Some(v.to_string())).collect();
        if let Some(row) = map.assemble(&cells) {
            rows.push(row);
        }
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(dir: &tempfile::TempDir, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_reads_rows_by_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            &dir,
            "lang.csv",
            "srno,Amharic,OromLatin,OromSaba,English\n1,ሰላም,Nagaa,,hello\n2,ውሃ,,,water\n",
        );

        let rows = read_rows(&path, b',').unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].amharic.as_deref(), Some("ሰላም"));
        assert_eq!(rows[0].orom_latin.as_deref(), Some("Nagaa"));
        assert_eq!(rows[0].orom_saba, None);
        assert_eq!(rows[1].orom_latin, None);
        assert_eq!(rows[1].english.as_deref(), Some("water"));
    }

    #[test]
    fn test_missing_column_is_absent() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "lang.csv", "Amharic,English\nሰላም,hello\n");

        let rows = read_rows(&path, b',').unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].orom_latin, None);
        assert_eq!(rows[0].orom_saba, None);
    }

    #[test]
    fn test_blank_rows_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "lang.csv", "Amharic,English\nሰላም,hello\n,\nውሃ,water\n");

        let rows = read_rows(&path, b',').unwrap();
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn test_unequal_record_is_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "lang.csv", "Amharic,English\nሰላም,hello\nውሃ,water,extra\n");

        match read_rows(&path, b',') {
            Err(ReadError::Malformed { row, .. }) => assert_eq!(row, 2),
            other => panic!("expected malformed row, got {:?}", other),
        }
    }

    #[test]
    fn test_malformed_row_counts_skipped_blank_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "lang.csv", "Amharic,English\nሰላም,hello\n\nውሃ,water,extra\n");

        match read_rows(&path, b',') {
            Err(ReadError::Malformed { row, .. }) => assert_eq!(row, 3),
            other => panic!("expected malformed row, got {:?}", other),
        }
    }

    #[test]
    fn test_tab_delimited() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "lang.tsv", "English\tOromLatin\nwater\tBishaan\n");

        let rows = read_rows(&path, b'\t').unwrap();
        assert_eq!(rows[0].orom_latin.as_deref(), Some("Bishaan"));
    }

    #[test]
    fn test_header_only_yields_no_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "lang.csv", "Amharic,OromLatin,OromSaba,English\n");
        assert!(read_rows(&path, b',').unwrap().is_empty());
    }
}
