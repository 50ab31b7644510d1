//! Unified application error type.
//! Every module (store, client, report, access, cli) returns AppError so
//! the binary can surface a single, typed message per command.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Store / connectivity
    // ---------------------------
    #[error("Store unreachable: {0}")]
    Connectivity(String),

    #[error("No service credential found (checked {0})")]
    NoCredential(String),

    #[error("Invalid range: {0}")]
    InvalidRange(String),

    // ---------------------------
    // Data shape
    // ---------------------------
    #[error("Unexpected data format: {0}")]
    Format(String),

    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    // ---------------------------
    // Access
    // ---------------------------
    #[error("Admin access required: {0}")]
    Unauthorized(String),

    // ---------------------------
    // Archive / delete
    // ---------------------------
    #[error("Row {index} changed since it was listed; reload and try again")]
    StaleRow { index: usize },

    #[error(
        "Entry '{entry}' was archived but could not be removed from the report list ({cause}); \
         it is now present in both ranges. Run `teamlog recover` to finish the removal"
    )]
    PartialArchive { entry: String, cause: String },

    #[error("Entry {0} is already archived")]
    AlreadyArchived(String),

    #[error("Entry not found: {0}")]
    EntryNotFound(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),
}

impl From<rusqlite::Error> for AppError {
    fn from(e: rusqlite::Error) -> Self {
        AppError::Connectivity(e.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;
