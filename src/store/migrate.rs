use crate::ui::messages::success;
use rusqlite::{Connection, Result};

/// Current workbook schema version, stored in `PRAGMA user_version`.
pub const SCHEMA_VERSION: i32 = 2;

/// Ensure that the `log` table exists.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

/// Sheets, rows and the sharing table.
fn create_sheet_tables(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS sheets (
            name       TEXT PRIMARY KEY,
            sheet_id   INTEGER NOT NULL UNIQUE,
            created_at TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS rows (
            sheet    TEXT NOT NULL REFERENCES sheets(name) ON DELETE CASCADE,
            position INTEGER NOT NULL,
            cells    TEXT NOT NULL DEFAULT '[]',
            PRIMARY KEY (sheet, position)
        );

        CREATE TABLE IF NOT EXISTS access (
            client_email TEXT PRIMARY KEY,
            granted_at   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn schema_version(conn: &Connection) -> Result<i32> {
    conn.query_row("PRAGMA user_version", [], |row| row.get(0))
}

/// Public entry point: bring the workbook schema up to date.
///
/// Version 1 had sheets/rows only; version 2 added the access table
/// (created idempotently by `create_sheet_tables`).
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    ensure_log_table(conn)?;

    let version = schema_version(conn)?;
    if version >= SCHEMA_VERSION {
        return Ok(());
    }

    create_sheet_tables(conn)?;
    conn.execute_batch(&format!("PRAGMA user_version = {SCHEMA_VERSION};"))?;

    if version > 0 {
        success(format!(
            "Workbook schema migrated from v{version} to v{SCHEMA_VERSION}."
        ));
    }
    Ok(())
}
