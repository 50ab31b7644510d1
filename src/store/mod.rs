//! Tabular store abstraction.
//!
//! A store is a set of named sheets, each an ordered list of rows of string
//! cells. Callers address it with A1 ranges, the way a spreadsheet API does.

pub mod log;
pub mod memory;
pub mod migrate;
pub mod range;
pub mod workbook;

use crate::errors::AppResult;

pub use memory::MemoryStore;
pub use range::SheetRange;
pub use workbook::SqliteWorkbook;

pub type Row = Vec<String>;

pub trait TabularStore {
    /// Rows covered by `range`, each cut to the range columns.
    /// Trailing empty cells and trailing empty rows are omitted.
    fn get(&self, range: &SheetRange) -> AppResult<Vec<Row>>;

    /// Append `rows` after the last non-empty row of the sheet.
    fn append(&mut self, range: &SheetRange, rows: &[Row]) -> AppResult<()>;

    /// Overwrite cells starting at the top-left corner of `range`.
    fn update(&mut self, range: &SheetRange, rows: &[Row]) -> AppResult<()>;

    /// Delete sheet rows `start..end` (0-based, end exclusive) and shift the
    /// following rows up.
    fn delete_rows(&mut self, sheet: &str, start: usize, end: usize) -> AppResult<()>;

    /// Record an audit line. Stores without an audit log ignore it.
    fn audit(&mut self, _operation: &str, _target: &str, _message: &str) -> AppResult<()> {
        Ok(())
    }
}

/// Trim trailing empty rows in place.
pub(crate) fn trim_trailing_empty(rows: &mut Vec<Row>) {
    while rows.last().is_some_and(|r| r.is_empty()) {
        rows.pop();
    }
}

/// Shared `get` logic over a full, 0-indexed sheet.
pub(crate) fn read_window(sheet_rows: &[Row], range: &SheetRange) -> Vec<Row> {
    let mut out: Vec<Row> = sheet_rows
        .iter()
        .enumerate()
        .filter(|(pos, _)| range.covers_row(*pos))
        .map(|(_, row)| range.project(row))
        .collect();
    trim_trailing_empty(&mut out);
    out
}

/// Position of the next append: one past the last row holding any cell.
pub(crate) fn next_free_row(sheet_rows: &[Row]) -> usize {
    sheet_rows
        .iter()
        .rposition(|r| r.iter().any(|c| !c.is_empty()))
        .map(|p| p + 1)
        .unwrap_or(0)
}
