//! Excel / OpenDocument reader (first worksheet)

use std::path::Path;

use calamine::{Data, Reader, open_workbook_auto};

use super::{ColumnMap, ReadError, warn_missing_columns};
use crate::entry::SourceRow;

pub(super) fn read_rows(path: &Path) -> Result<Vec<SourceRow>, ReadError> {
    let mut workbook =
        open_workbook_auto(path).map_err(|e| ReadError::Unavailable(e.to_string()))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| ReadError::Unavailable("workbook has no worksheets".to_string()))?
        .map_err(|e| ReadError::Unavailable(e.to_string()))?;

    let mut sheet_rows = range.rows();
    let Some(header) = sheet_rows.next() else {
        return Ok(Vec::new());
    };
    let map = ColumnMap::from_headers(header.iter().map(|cell| cell.to_string()));
    warn_missing_columns(&map, path);

    let mut rows = Vec::new();
    for (index, sheet_row) in sheet_rows.enumerate() {
        let row_number = index + 1;
        let cells = sheet_row
            .iter()
            .map(|cell| cell_text(cell, row_number))
            .collect::<Result<Vec<_>, _>>()?;
        if let Some(row) = map.assemble(&cells) {
            rows.push(row);
        }
    }

    Ok(rows)
}

/// Text of a cell; numbers, booleans and dates keep their display form
fn cell_text(cell: &Data, row: usize) -> Result<Option<String>, ReadError> {
    match cell {
        Data::Empty => Ok(None),
        Data::String(s) => Ok(Some(s.clone())),
        Data::Error(e) => Err(ReadError::Malformed {
            row,
            reason: format!("spreadsheet error cell {:?}", e),
        }),
        other => Ok(Some(other.to_string())),
    }
}
