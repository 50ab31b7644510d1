use crate::errors::{AppError, AppResult};
use chrono::{Local, NaiveDateTime};
use serde::Serialize;
use uuid::Uuid;

/// Stored timestamp layout, sortable as plain text.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Substitute for cells missing from short rows.
pub const PLACEHOLDER: &str = "-";

/// Header of the primary range.
pub const HEADER: [&str; 5] = ["Date", "Name", "Area", "Task", "Key"];

/// Header of the archive range.
pub const ARCHIVE_HEADER: [&str; 6] = ["Date", "Name", "Area", "Task", "Key", "ArchivedAt"];

/// Number of cells an entry needs (the key column is optional).
const DATA_COLUMNS: usize = 4;

/// One reported unit of work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    pub timestamp: String,   // ⇔ column A "YYYY-MM-DD HH:MM"
    pub author: String,      // ⇔ column B
    pub area: String,        // ⇔ column C
    pub description: String, // ⇔ column D
    pub key: Option<String>, // ⇔ column E, absent on legacy rows
}

impl Entry {
    /// Build a new entry stamped with the current local time.
    pub fn new(author: &str, area: &str, description: &str) -> AppResult<Self> {
        Self::new_at(author, area, description, Local::now().naive_local())
    }

    /// Build a new entry at an explicit time. Author and description must not
    /// be blank; a fresh surrogate key is assigned.
    pub fn new_at(
        author: &str,
        area: &str,
        description: &str,
        at: NaiveDateTime,
    ) -> AppResult<Self> {
        let author = author.trim();
        let description = description.trim();
        let area = area.trim();

        if author.is_empty() {
            return Err(AppError::Validation("name must not be empty".into()));
        }
        if description.is_empty() {
            return Err(AppError::Validation("task description must not be empty".into()));
        }
        if area.is_empty() {
            return Err(AppError::Validation("area must not be empty".into()));
        }

        Ok(Self {
            timestamp: at.format(TIMESTAMP_FORMAT).to_string(),
            author: author.to_string(),
            area: area.to_string(),
            description: description.to_string(),
            key: Some(Uuid::new_v4().to_string()),
        })
    }

    /// Strict conversion from a stored row.
    pub fn from_row(row: &[String]) -> AppResult<Self> {
        if row.len() < DATA_COLUMNS {
            return Err(AppError::Format(format!(
                "row has {} cells, expected at least {}: {:?}",
                row.len(),
                DATA_COLUMNS,
                row
            )));
        }
        Ok(Self::from_row_or_placeholder(row))
    }

    /// Lenient conversion: missing cells become [`PLACEHOLDER`].
    pub fn from_row_or_placeholder(row: &[String]) -> Self {
        let cell = |i: usize| {
            row.get(i)
                .filter(|c| !c.is_empty())
                .cloned()
                .unwrap_or_else(|| PLACEHOLDER.to_string())
        };
        Self {
            timestamp: cell(0),
            author: cell(1),
            area: cell(2),
            description: cell(3),
            key: row.get(4).filter(|k| !k.trim().is_empty()).cloned(),
        }
    }

    pub fn to_row(&self) -> Vec<String> {
        let mut row = vec![
            self.timestamp.clone(),
            self.author.clone(),
            self.area.clone(),
            self.description.clone(),
        ];
        if let Some(k) = &self.key {
            row.push(k.clone());
        }
        row
    }

    /// Row written to the archive: the entry plus the archive time.
    pub fn to_archive_row(&self, archived_at: NaiveDateTime) -> Vec<String> {
        let mut row = self.to_row();
        row.resize(5, String::new());
        row.push(archived_at.format(TIMESTAMP_FORMAT).to_string());
        row
    }

    /// True when `row` holds the same data as this entry.
    pub fn matches_row(&self, row: &[String]) -> bool {
        *self == Entry::from_row_or_placeholder(row)
    }

    pub fn parsed_timestamp(&self) -> AppResult<NaiveDateTime> {
        parse_timestamp(&self.timestamp)
    }

    /// Short label used in prompts and logs.
    pub fn label(&self) -> String {
        format!("{} - {} ({})", self.timestamp, self.author, self.area)
    }

    /// First eight characters of the key; keys read from the store may hold
    /// any text.
    pub fn short_key(&self) -> &str {
        self.key
            .as_deref()
            .map(|k| k.char_indices().nth(8).map_or(k, |(i, _)| &k[..i]))
            .unwrap_or("")
    }
}

/// Parse a stored timestamp. Seconds are tolerated for rows written by hand.
pub fn parse_timestamp(s: &str) -> AppResult<NaiveDateTime> {
    let s = s.trim();
    NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S"))
        .map_err(|_| AppError::Format(format!("invalid timestamp '{s}'")))
}

impl AsRef<Entry> for Entry {
    fn as_ref(&self) -> &Entry {
        self
    }
}

/// An entry together with its 1-based data row at read time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Listed {
    pub row: usize,
    pub entry: Entry,
}

impl Listed {
    /// Number entries in store order.
    pub fn enumerate(entries: Vec<Entry>) -> Vec<Listed> {
        entries
            .into_iter()
            .enumerate()
            .map(|(i, entry)| Listed { row: i + 1, entry })
            .collect()
    }
}

impl AsRef<Entry> for Listed {
    fn as_ref(&self) -> &Entry {
        &self.entry
    }
}
