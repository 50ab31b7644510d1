//! SQLite-backed workbook.
//!
//! Each sheet is a list of JSON-encoded rows keyed by 0-based position.
//! Opening a workbook requires a service credential whose `client_email`
//! has been granted access, like sharing a spreadsheet with a robot account.

use super::log::{LogLine, load_log, ttlog};
use super::migrate::run_pending_migrations;
use super::{Row, SheetRange, TabularStore, next_free_row, read_window};
use crate::config::credentials::ServiceCredential;
use crate::errors::{AppError, AppResult};
use chrono::Local;
use rusqlite::{Connection, OpenFlags, OptionalExtension, Transaction, params};
use std::path::Path;

pub struct SqliteWorkbook {
    conn: Connection,
    actor: String,
}

impl SqliteWorkbook {
    /// Create (or reuse) a workbook file, ensure the given sheets exist and
    /// grant the credential access.
    pub fn create(path: &str, cred: &ServiceCredential, sheets: &[&str]) -> AppResult<Self> {
        let conn = Connection::open(Path::new(path))?;
        run_pending_migrations(&conn)?;

        let mut wb = Self {
            conn,
            actor: cred.client_email.clone(),
        };
        wb.grant(&cred.client_email)?;
        for name in sheets {
            wb.add_sheet(name)?;
        }
        Ok(wb)
    }

    /// Open an existing workbook. Fails when the file is missing or the
    /// credential has not been granted.
    pub fn open(path: &str, cred: &ServiceCredential) -> AppResult<Self> {
        if !Path::new(path).exists() {
            return Err(AppError::Connectivity(format!(
                "workbook not found: {path} (run `teamlog init`)"
            )));
        }

        let conn = Connection::open_with_flags(
            Path::new(path),
            OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        run_pending_migrations(&conn)?;

        let granted: Option<String> = conn
            .query_row(
                "SELECT client_email FROM access WHERE client_email = ?1",
                [&cred.client_email],
                |row| row.get(0),
            )
            .optional()?;

        if granted.is_none() {
            return Err(AppError::Connectivity(format!(
                "permission denied: {} has no access to {path}",
                cred.client_email
            )));
        }

        Ok(Self {
            conn,
            actor: cred.client_email.clone(),
        })
    }

    pub fn grant(&mut self, client_email: &str) -> AppResult<()> {
        self.conn.execute(
            "INSERT OR IGNORE INTO access (client_email, granted_at) VALUES (?1, ?2)",
            params![client_email, Local::now().to_rfc3339()],
        )?;
        Ok(())
    }

    /// Create an empty sheet if it does not exist yet.
    pub fn add_sheet(&mut self, name: &str) -> AppResult<()> {
        let next_id: i64 = self.conn.query_row(
            "SELECT IFNULL(MAX(sheet_id) + 1, 0) FROM sheets",
            [],
            |row| row.get(0),
        )?;
        self.conn.execute(
            "INSERT OR IGNORE INTO sheets (name, sheet_id, created_at) VALUES (?1, ?2, ?3)",
            params![name, next_id, Local::now().to_rfc3339()],
        )?;
        Ok(())
    }

    pub fn sheet_names(&self) -> AppResult<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT name FROM sheets ORDER BY sheet_id ASC")?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

        let mut out = Vec::new();
        for r in rows {
            out.push(r?);
        }
        Ok(out)
    }

    pub fn log_lines(&self) -> AppResult<Vec<LogLine>> {
        load_log(&self.conn)
    }
}

fn ensure_sheet(conn: &Connection, name: &str) -> AppResult<()> {
    let found: Option<String> = conn
        .query_row("SELECT name FROM sheets WHERE name = ?1", [name], |row| {
            row.get(0)
        })
        .optional()?;
    match found {
        Some(_) => Ok(()),
        None => Err(AppError::Connectivity(format!(
            "Unable to parse range: sheet '{name}' does not exist"
        ))),
    }
}

/// Load a whole sheet as a dense, 0-indexed list of rows.
fn load_sheet(conn: &Connection, name: &str) -> AppResult<Vec<Row>> {
    ensure_sheet(conn, name)?;

    let mut stmt =
        conn.prepare_cached("SELECT position, cells FROM rows WHERE sheet = ?1 ORDER BY position")?;
    let rows = stmt.query_map([name], |row| {
        Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?))
    })?;

    let mut out: Vec<Row> = Vec::new();
    for r in rows {
        let (pos, raw) = r?;
        let cells: Row = serde_json::from_str(&raw)
            .map_err(|e| AppError::Format(format!("sheet '{name}' row {pos}: {e}")))?;
        let pos = pos as usize;
        if out.len() <= pos {
            out.resize(pos + 1, Vec::new());
        }
        out[pos] = cells;
    }
    Ok(out)
}

fn write_row(tx: &Transaction, sheet: &str, pos: usize, cells: &Row) -> AppResult<()> {
    let raw = serde_json::to_string(cells)
        .map_err(|e| AppError::Format(format!("cannot encode row: {e}")))?;
    tx.execute(
        "INSERT INTO rows (sheet, position, cells) VALUES (?1, ?2, ?3)
         ON CONFLICT(sheet, position) DO UPDATE SET cells = excluded.cells",
        params![sheet, pos as i64, raw],
    )?;
    Ok(())
}

impl TabularStore for SqliteWorkbook {
    fn get(&self, range: &SheetRange) -> AppResult<Vec<Row>> {
        let rows = load_sheet(&self.conn, &range.sheet)?;
        Ok(read_window(&rows, range))
    }

    fn append(&mut self, range: &SheetRange, rows: &[Row]) -> AppResult<()> {
        let tx = self.conn.transaction()?;
        let existing = load_sheet(&tx, &range.sheet)?;

        let mut pos = next_free_row(&existing).max(range.start_offset());
        for cells in rows {
            let mut row = Vec::new();
            range.place(&mut row, cells);
            write_row(&tx, &range.sheet, pos, &row)?;
            pos += 1;
        }

        tx.commit()?;
        Ok(())
    }

    fn update(&mut self, range: &SheetRange, rows: &[Row]) -> AppResult<()> {
        let tx = self.conn.transaction()?;
        let existing = load_sheet(&tx, &range.sheet)?;

        let start = range.start_offset();
        for (i, cells) in rows.iter().enumerate() {
            let pos = start + i;
            if !range.covers_row(pos) {
                break;
            }
            let mut row = existing.get(pos).cloned().unwrap_or_default();
            range.place(&mut row, cells);
            write_row(&tx, &range.sheet, pos, &row)?;
        }

        tx.commit()?;
        Ok(())
    }

    fn delete_rows(&mut self, sheet: &str, start: usize, end: usize) -> AppResult<()> {
        if start >= end {
            return Err(AppError::InvalidRange(format!(
                "{sheet}: empty row span {start}..{end}"
            )));
        }

        let tx = self.conn.transaction()?;
        ensure_sheet(&tx, sheet)?;

        let (s, e) = (start as i64, end as i64);
        tx.execute(
            "DELETE FROM rows WHERE sheet = ?1 AND position >= ?2 AND position < ?3",
            params![sheet, s, e],
        )?;

        // Shift through negative positions so the primary key never collides.
        tx.execute(
            "UPDATE rows SET position = -(position - ?2) - 1 WHERE sheet = ?1 AND position >= ?3",
            params![sheet, e - s, e],
        )?;
        tx.execute(
            "UPDATE rows SET position = -position - 1 WHERE sheet = ?1 AND position < 0",
            params![sheet],
        )?;

        tx.commit()?;
        Ok(())
    }

    fn audit(&mut self, operation: &str, target: &str, message: &str) -> AppResult<()> {
        let message = format!("{message} [by {}]", self.actor);
        ttlog(&self.conn, operation, target, &message)
    }
}
