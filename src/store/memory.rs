//! In-process tabular store. Same addressing rules as the workbook,
//! nothing is persisted.

use super::{Row, SheetRange, TabularStore, next_free_row, read_window};
use crate::errors::{AppError, AppResult};
use std::collections::BTreeMap;

#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    sheets: BTreeMap<String, Vec<Row>>,
    audit: Vec<(String, String, String)>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty sheet (no-op if it already exists).
    pub fn add_sheet(&mut self, name: &str) {
        self.sheets.entry(name.to_string()).or_default();
    }

    /// Builder helper for tests and demos.
    pub fn with_sheet(mut self, name: &str, rows: Vec<Row>) -> Self {
        self.sheets.insert(name.to_string(), rows);
        self
    }

    /// Raw rows of a sheet, untrimmed.
    pub fn sheet(&self, name: &str) -> Option<&[Row]> {
        self.sheets.get(name).map(|v| v.as_slice())
    }

    pub fn audit_lines(&self) -> &[(String, String, String)] {
        &self.audit
    }

    fn sheet_mut(&mut self, name: &str) -> AppResult<&mut Vec<Row>> {
        self.sheets
            .get_mut(name)
            .ok_or_else(|| unknown_sheet(name))
    }
}

fn unknown_sheet(name: &str) -> AppError {
    AppError::Connectivity(format!("Unable to parse range: sheet '{name}' does not exist"))
}

impl TabularStore for MemoryStore {
    fn get(&self, range: &SheetRange) -> AppResult<Vec<Row>> {
        let rows = self
            .sheets
            .get(&range.sheet)
            .ok_or_else(|| unknown_sheet(&range.sheet))?;
        Ok(read_window(rows, range))
    }

    fn append(&mut self, range: &SheetRange, rows: &[Row]) -> AppResult<()> {
        let sheet = self.sheet_mut(&range.sheet)?;
        let mut pos = next_free_row(sheet).max(range.start_offset());
        for cells in rows {
            if sheet.len() <= pos {
                sheet.resize(pos + 1, Vec::new());
            }
            let mut row = Vec::new();
            range.place(&mut row, cells);
            sheet[pos] = row;
            pos += 1;
        }
        Ok(())
    }

    fn update(&mut self, range: &SheetRange, rows: &[Row]) -> AppResult<()> {
        let sheet = self.sheet_mut(&range.sheet)?;
        let start = range.start_offset();
        for (i, cells) in rows.iter().enumerate() {
            let pos = start + i;
            if !range.covers_row(pos) {
                break;
            }
            if sheet.len() <= pos {
                sheet.resize(pos + 1, Vec::new());
            }
            range.place(&mut sheet[pos], cells);
        }
        Ok(())
    }

    fn delete_rows(&mut self, sheet: &str, start: usize, end: usize) -> AppResult<()> {
        let rows = self.sheet_mut(sheet)?;
        if start >= end {
            return Err(AppError::InvalidRange(format!(
                "{sheet}: empty row span {start}..{end}"
            )));
        }
        if start < rows.len() {
            rows.drain(start..end.min(rows.len()));
        }
        Ok(())
    }

    fn audit(&mut self, operation: &str, target: &str, message: &str) -> AppResult<()> {
        self.audit
            .push((operation.to_string(), target.to_string(), message.to_string()));
        Ok(())
    }
}
