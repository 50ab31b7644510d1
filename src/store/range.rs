//! A1-notation ranges: `Reports!A:E`, `Settings!A1:B1`, `'Team sheet'!C2:D`.

use crate::errors::{AppError, AppResult};
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

static A1_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:'([^']+)'|([^'!]+))!([A-Za-z]+)(\d+)?(?::([A-Za-z]+)(\d+)?)?$")
        .expect("static A1 regex")
});

/// A rectangular window on one sheet.
///
/// Columns are 0-based and inclusive; rows are 1-based like the A1 notation,
/// `None` meaning "unbounded" on that side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetRange {
    pub sheet: String,
    pub first_col: usize,
    pub last_col: usize,
    pub first_row: Option<usize>,
    pub last_row: Option<usize>,
}

impl SheetRange {
    pub fn parse(s: &str) -> AppResult<Self> {
        let caps = A1_RE
            .captures(s.trim())
            .ok_or_else(|| AppError::InvalidRange(s.to_string()))?;

        let sheet = caps
            .get(1)
            .or_else(|| caps.get(2))
            .map(|m| m.as_str().to_string())
            .ok_or_else(|| AppError::InvalidRange(s.to_string()))?;

        let first_col = column_index(&caps[3])?;
        let first_row = caps.get(4).map(|m| parse_row(m.as_str(), s)).transpose()?;

        let (last_col, last_row) = match caps.get(5) {
            Some(c) => (
                column_index(c.as_str())?,
                caps.get(6).map(|m| parse_row(m.as_str(), s)).transpose()?,
            ),
            // single cell: `Sheet!B3`
            None => (first_col, first_row),
        };

        if last_col < first_col {
            return Err(AppError::InvalidRange(s.to_string()));
        }
        if let (Some(a), Some(b)) = (first_row, last_row)
            && b < a
        {
            return Err(AppError::InvalidRange(s.to_string()));
        }

        Ok(Self {
            sheet,
            first_col,
            last_col,
            first_row,
            last_row,
        })
    }

    pub fn width(&self) -> usize {
        self.last_col - self.first_col + 1
    }

    /// 0-based index of the first row covered by this range.
    pub fn start_offset(&self) -> usize {
        self.first_row.map(|r| r - 1).unwrap_or(0)
    }

    /// True when the 0-based sheet row `pos` falls inside the range.
    pub fn covers_row(&self, pos: usize) -> bool {
        if pos < self.start_offset() {
            return false;
        }
        match self.last_row {
            Some(last) => pos < last,
            None => true,
        }
    }

    /// Cut a full sheet row down to the columns of this range,
    /// dropping trailing empty cells the way spreadsheet APIs do.
    pub fn project(&self, row: &[String]) -> Vec<String> {
        let mut out: Vec<String> = row
            .iter()
            .skip(self.first_col)
            .take(self.width())
            .cloned()
            .collect();
        while out.last().is_some_and(|c| c.is_empty()) {
            out.pop();
        }
        out
    }

    /// Write `cells` into `row` starting at the first column of the range.
    /// Cells beyond the range width are ignored.
    pub fn place(&self, row: &mut Vec<String>, cells: &[String]) {
        let n = cells.len().min(self.width());
        let needed = self.first_col + n;
        if row.len() < needed {
            row.resize(needed, String::new());
        }
        for (i, cell) in cells.iter().take(n).enumerate() {
            row[self.first_col + i] = cell.clone();
        }
    }
}

impl fmt::Display for SheetRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sheet = if self.sheet.contains(' ') {
            format!("'{}'", self.sheet)
        } else {
            self.sheet.clone()
        };
        let row = |r: Option<usize>| r.map(|v| v.to_string()).unwrap_or_default();
        write!(
            f,
            "{}!{}{}:{}{}",
            sheet,
            column_name(self.first_col),
            row(self.first_row),
            column_name(self.last_col),
            row(self.last_row)
        )
    }
}

fn parse_row(s: &str, whole: &str) -> AppResult<usize> {
    match s.parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n),
        _ => Err(AppError::InvalidRange(whole.to_string())),
    }
}

/// Widest sheet supported, column `ZZZ`.
pub const MAX_COLUMNS: usize = 18_278;

/// `A` → 0, `Z` → 25, `AA` → 26.
pub fn column_index(letters: &str) -> AppResult<usize> {
    let invalid = || AppError::InvalidRange(format!("column '{letters}'"));

    let mut acc: usize = 0;
    for c in letters.chars() {
        if !c.is_ascii_alphabetic() {
            return Err(invalid());
        }
        let v = c.to_ascii_uppercase() as usize - 'A' as usize + 1;
        acc = acc
            .checked_mul(26)
            .and_then(|a| a.checked_add(v))
            .ok_or_else(invalid)?;
    }
    if acc == 0 || acc > MAX_COLUMNS {
        return Err(invalid());
    }
    Ok(acc - 1)
}

pub fn column_name(mut idx: usize) -> String {
    let mut out = Vec::new();
    loop {
        out.push((b'A' + (idx % 26) as u8) as char);
        if idx < 26 {
            break;
        }
        idx = idx / 26 - 1;
    }
    out.iter().rev().collect()
}
