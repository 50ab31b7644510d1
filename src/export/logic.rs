use crate::errors::{AppError, AppResult};
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{export_csv, export_json};
use crate::export::model::EntryExport;
use crate::export::xlsx::export_xlsx;
use crate::export::ExportFormat;
use crate::models::entry::Entry;
use crate::utils::path::expand_tilde;

pub struct ExportLogic;

impl ExportLogic {
    /// Write `entries` (already filtered) to `file`.
    ///
    /// - `file` must be an absolute path (a leading `~/` is expanded)
    /// - an existing file is replaced only with `force`
    /// - each record keeps its 1-based row number from the source range
    pub fn export(
        entries: &[(usize, Entry)],
        format: ExportFormat,
        file: &str,
        sheet_name: &str,
        force: bool,
    ) -> AppResult<()> {
        let expanded = expand_tilde(file);
        let path = expanded.as_path();

        if !path.is_absolute() {
            return Err(AppError::Export(format!(
                "Output file path must be absolute: {file}"
            )));
        }

        ensure_writable(path, force)?;

        let records: Vec<EntryExport> = entries
            .iter()
            .map(|(row, e)| EntryExport::from_entry(*row, e))
            .collect();

        match format {
            ExportFormat::Csv => export_csv(&records, path),
            ExportFormat::Json => export_json(&records, path),
            ExportFormat::Xlsx => export_xlsx(&records, path, sheet_name),
        }
    }
}
