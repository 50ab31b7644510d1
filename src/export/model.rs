use crate::models::entry::Entry;
use serde::Serialize;

/// Flat record written by every export format.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct EntryExport {
    pub row: usize,
    pub timestamp: String,
    pub author: String,
    pub area: String,
    pub description: String,
    pub key: String,
}

impl EntryExport {
    /// `row` is the 1-based position in the source range.
    pub fn from_entry(row: usize, e: &Entry) -> Self {
        Self {
            row,
            timestamp: e.timestamp.clone(),
            author: e.author.clone(),
            area: e.area.clone(),
            description: e.description.clone(),
            key: e.key.clone().unwrap_or_default(),
        }
    }
}

pub(crate) fn get_headers() -> [&'static str; 6] {
    ["row", "timestamp", "author", "area", "description", "key"]
}

pub(crate) fn export_to_row(e: &EntryExport) -> [String; 6] {
    [
        e.row.to_string(),
        e.timestamp.clone(),
        e.author.clone(),
        e.area.clone(),
        e.description.clone(),
        e.key.clone(),
    ]
}
