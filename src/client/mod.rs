//! Typed operations over a [`TabularStore`]: list, append, archive, delete
//! and the settings record.

use crate::access::Session;
use crate::errors::{AppError, AppResult};
use crate::models::entry::{ARCHIVE_HEADER, Entry, HEADER, TIMESTAMP_FORMAT};
use crate::models::settings::Settings;
use crate::store::{Row, SheetRange, TabularStore};
use crate::ui::messages::warning;
use chrono::Local;
use std::collections::HashSet;

/// Minimum length of a key prefix accepted by [`StoreClient::find_by_key`].
pub const MIN_KEY_PREFIX: usize = 4;

const KEY_COLUMN: usize = 4;

/// The three ranges the client works with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetRanges {
    pub primary: SheetRange,
    pub archive: SheetRange,
    pub settings: SheetRange,
}

impl SheetRanges {
    pub fn parse(primary: &str, archive: &str, settings: &str) -> AppResult<Self> {
        Ok(Self {
            primary: SheetRange::parse(primary)?,
            archive: SheetRange::parse(archive)?,
            settings: SheetRange::parse(settings)?,
        })
    }

    /// Names of the sheets that must exist in a fresh workbook.
    pub fn sheet_names(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        for r in [&self.primary, &self.archive, &self.settings] {
            if !out.contains(&r.sheet.as_str()) {
                out.push(&r.sheet);
            }
        }
        out
    }
}

impl Default for SheetRanges {
    fn default() -> Self {
        let cols = |sheet: &str, last_col: usize, rows: Option<usize>| SheetRange {
            sheet: sheet.to_string(),
            first_col: 0,
            last_col,
            first_row: rows,
            last_row: rows,
        };
        Self {
            primary: cols("Reports", 4, None),
            archive: cols("Archive", 5, None),
            settings: cols("Settings", 1, Some(1)),
        }
    }
}

/// Where a keyed entry currently lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveState {
    /// Only in the report list.
    Active,
    /// Copied to the archive, removal from the report list still pending.
    PendingRemoval,
    /// Only in the archive.
    Archived,
    /// Nowhere.
    Unknown,
}

/// Outcome of a completed archive operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveReceipt {
    pub entry: Entry,
    /// 1-based data row the entry was removed from.
    pub row_index: usize,
    /// True when the archive copy already existed and only removal ran.
    pub resumed: bool,
}

pub struct StoreClient<S: TabularStore> {
    store: S,
    ranges: SheetRanges,
}

impl<S: TabularStore> StoreClient<S> {
    pub fn new(store: S, ranges: SheetRanges) -> Self {
        Self { store, ranges }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn ranges(&self) -> &SheetRanges {
        &self.ranges
    }

    // ------------------------------------------------
    // Reads
    // ------------------------------------------------

    /// Data rows of the primary range; the first row is the header.
    pub fn list_rows(&self) -> AppResult<Vec<Row>> {
        let mut rows = self.store.get(&self.ranges.primary)?;
        if !rows.is_empty() {
            rows.remove(0);
        }
        Ok(rows)
    }

    /// Entries in store order. Short rows are padded with placeholders.
    pub fn list_entries(&self) -> AppResult<Vec<Entry>> {
        Ok(self
            .list_rows()?
            .iter()
            .map(|r| Entry::from_row_or_placeholder(r))
            .collect())
    }

    /// Archived entries in archive order.
    pub fn list_archive(&self) -> AppResult<Vec<Entry>> {
        let mut rows = self.store.get(&self.ranges.archive)?;
        if !rows.is_empty() {
            rows.remove(0);
        }
        Ok(rows
            .iter()
            .map(|r| Entry::from_row_or_placeholder(r))
            .collect())
    }

    /// Resolve a full key or an unambiguous prefix to the 1-based row index
    /// and entry currently holding it.
    pub fn find_by_key(&self, key: &str) -> AppResult<Option<(usize, Entry)>> {
        let key = key.trim();
        if key.len() < MIN_KEY_PREFIX {
            return Err(AppError::Validation(format!(
                "key '{key}' is too short (at least {MIN_KEY_PREFIX} characters)"
            )));
        }

        let rows = self.list_rows()?;
        let hits: Vec<(usize, &Row)> = rows
            .iter()
            .enumerate()
            .filter(|(_, r)| r.get(KEY_COLUMN).is_some_and(|k| k.starts_with(key)))
            .collect();

        match hits.as_slice() {
            [] => Ok(None),
            [(i, row)] => Ok(Some((i + 1, Entry::from_row_or_placeholder(row)))),
            many => {
                // an exact match beats prefix siblings
                if let Some((i, row)) = many
                    .iter()
                    .find(|(_, r)| r.get(KEY_COLUMN).is_some_and(|k| k == key))
                {
                    return Ok(Some((i + 1, Entry::from_row_or_placeholder(row))));
                }
                Err(AppError::Validation(format!(
                    "key prefix '{key}' matches {} entries",
                    many.len()
                )))
            }
        }
    }

    fn archived_keys(&self) -> AppResult<HashSet<String>> {
        Ok(self
            .list_archive()?
            .into_iter()
            .filter_map(|e| e.key)
            .collect())
    }

    pub fn archive_state(&self, key: &str) -> AppResult<ArchiveState> {
        let in_primary = self
            .list_rows()?
            .iter()
            .any(|r| r.get(KEY_COLUMN).is_some_and(|k| k == key));
        let in_archive = self.archived_keys()?.contains(key);

        Ok(match (in_primary, in_archive) {
            (true, false) => ArchiveState::Active,
            (true, true) => ArchiveState::PendingRemoval,
            (false, true) => ArchiveState::Archived,
            (false, false) => ArchiveState::Unknown,
        })
    }

    /// The settings record, `None` when missing or unparseable.
    pub fn load_settings(&self) -> AppResult<Option<Settings>> {
        let rows = self.store.get(&self.ranges.settings)?;
        Ok(rows.first().and_then(|r| Settings::from_row(r)))
    }

    /// The settings record, or the built-in default.
    pub fn read_settings(&self) -> AppResult<Settings> {
        Ok(self.load_settings()?.unwrap_or_default())
    }

    // ------------------------------------------------
    // Writes
    // ------------------------------------------------

    /// Write header rows into empty primary/archive ranges.
    pub fn ensure_headers(&mut self) -> AppResult<()> {
        if self.store.get(&self.ranges.primary)?.is_empty() {
            let header: Row = HEADER.iter().map(|s| s.to_string()).collect();
            self.store.update(&self.ranges.primary, &[header])?;
        }
        if self.store.get(&self.ranges.archive)?.is_empty() {
            let header: Row = ARCHIVE_HEADER.iter().map(|s| s.to_string()).collect();
            self.store.update(&self.ranges.archive, &[header])?;
        }
        Ok(())
    }

    /// Append exactly one row at the end of the primary range.
    pub fn append_entry(&mut self, entry: &Entry) -> AppResult<()> {
        self.store.append(&self.ranges.primary, &[entry.to_row()])?;
        self.audit("add", &entry.author, &entry.label());
        Ok(())
    }

    /// Move the entry at 1-based data row `row_index` to the archive.
    ///
    /// The row is first checked against `row`; a mismatch means the list
    /// moved since it was read and nothing is touched. The copy to the archive
    /// and the removal are two separate store calls: if the removal fails the
    /// entry exists twice and `PartialArchive` is returned.
    pub fn archive_and_remove(
        &mut self,
        session: &Session,
        row_index: usize,
        row: &Entry,
    ) -> AppResult<ArchiveReceipt> {
        session.require_admin("archive an entry")?;

        let rows = self.list_rows()?;
        let current = row_index
            .checked_sub(1)
            .and_then(|i| rows.get(i))
            .ok_or_else(|| AppError::EntryNotFound(format!("row {row_index}")))?;

        if !row.matches_row(current) {
            return Err(AppError::StaleRow { index: row_index });
        }

        self.copy_to_archive(row)?;
        self.remove_archived(row_index, row)?;

        Ok(ArchiveReceipt {
            entry: row.clone(),
            row_index,
            resumed: false,
        })
    }

    /// Keyed archive. Resumes a pending archive without copying twice.
    pub fn archive_by_key(&mut self, session: &Session, key: &str) -> AppResult<ArchiveReceipt> {
        session.require_admin("archive an entry")?;

        let Some((row_index, entry)) = self.find_by_key(key)? else {
            let archived = self
                .archived_keys()?
                .iter()
                .any(|k| k.starts_with(key.trim()));
            return Err(if archived {
                AppError::AlreadyArchived(key.to_string())
            } else {
                AppError::EntryNotFound(key.to_string())
            });
        };

        let full_key = entry.key.clone().unwrap_or_default();
        let resumed = self.archived_keys()?.contains(&full_key);
        if !resumed {
            self.copy_to_archive(&entry)?;
        }
        self.remove_archived(row_index, &entry)?;

        Ok(ArchiveReceipt {
            entry,
            row_index,
            resumed,
        })
    }

    /// Finish every pending archive: remove keyed rows whose key is already
    /// in the archive. Returns the number of rows removed.
    pub fn resume_pending_archives(&mut self, session: &Session) -> AppResult<usize> {
        session.require_admin("recover pending archives")?;

        let archived = self.archived_keys()?;
        let rows = self.list_rows()?;

        let pending: Vec<usize> = rows
            .iter()
            .enumerate()
            .filter(|(_, r)| r.get(KEY_COLUMN).is_some_and(|k| archived.contains(k)))
            .map(|(i, _)| i + 1)
            .collect();

        // bottom-up so earlier indices stay valid
        for &row_index in pending.iter().rev() {
            self.delete_data_row(row_index)?;
            let entry = Entry::from_row_or_placeholder(&rows[row_index - 1]);
            self.audit("recover", entry.short_key(), &entry.label());
        }

        Ok(pending.len())
    }

    /// Remove the final data row without archiving it.
    /// Returns `false` when there is nothing to remove.
    ///
    /// With `expected`, the current last row must still hold that entry;
    /// otherwise `StaleRow` is returned and nothing is deleted.
    pub fn delete_last_entry(
        &mut self,
        session: &Session,
        expected: Option<&Entry>,
    ) -> AppResult<bool> {
        session.require_admin("delete the last entry")?;

        let rows = self.list_rows()?;
        let Some(last) = rows.last() else {
            return Ok(false);
        };
        if expected.is_some_and(|e| !e.matches_row(last)) {
            return Err(AppError::StaleRow { index: rows.len() });
        }
        let entry = Entry::from_row_or_placeholder(last);

        self.delete_data_row(rows.len())?;
        self.audit("undo", entry.short_key(), &entry.label());
        Ok(true)
    }

    pub fn write_settings(&mut self, session: &Session, settings: &Settings) -> AppResult<()> {
        session.require_admin("change settings")?;
        if settings.goal_name.trim().is_empty() {
            return Err(AppError::Validation("goal name must not be empty".into()));
        }

        self.store
            .update(&self.ranges.settings, &[settings.to_row()])?;
        self.audit(
            "settings",
            &settings.goal_name,
            &format!("target date {}", settings.target_date),
        );
        Ok(())
    }

    // ------------------------------------------------
    // Helpers
    // ------------------------------------------------

    fn copy_to_archive(&mut self, entry: &Entry) -> AppResult<()> {
        let now = Local::now().naive_local();
        self.store
            .append(&self.ranges.archive, &[entry.to_archive_row(now)])?;
        Ok(())
    }

    fn remove_archived(&mut self, row_index: usize, entry: &Entry) -> AppResult<()> {
        self.delete_data_row(row_index)
            .map_err(|e| AppError::PartialArchive {
                entry: entry.label(),
                cause: e.to_string(),
            })?;
        self.audit(
            "archive",
            entry.short_key(),
            &format!(
                "{} archived at {}",
                entry.label(),
                Local::now().format(TIMESTAMP_FORMAT)
            ),
        );
        Ok(())
    }

    /// Delete 1-based data row `row_index` (the header sits right above).
    fn delete_data_row(&mut self, row_index: usize) -> AppResult<()> {
        let pos = self.ranges.primary.start_offset() + row_index;
        self.store
            .delete_rows(&self.ranges.primary.sheet, pos, pos + 1)
    }

    /// Audit failures never abort the operation that triggered them.
    fn audit(&mut self, operation: &str, target: &str, message: &str) {
        if let Err(e) = self.store.audit(operation, target, message) {
            warning(format!("Failed to write internal log: {e}"));
        }
    }
}
