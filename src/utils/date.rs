use crate::errors::{AppError, AppResult};
use chrono::{Datelike, NaiveDate};

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

pub fn parse_date(s: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| AppError::InvalidDate(s.into()))
}

/// Month given as `M`, `MM` or `YYYY-MM`.
/// Returns the month and, when present, the year.
pub fn parse_month(s: &str) -> AppResult<(u32, Option<i32>)> {
    let s = s.trim();

    if let Ok(m) = s.parse::<u32>()
        && (1..=12).contains(&m)
    {
        return Ok((m, None));
    }

    if let Ok(d) = NaiveDate::parse_from_str(&format!("{s}-01"), "%Y-%m-%d") {
        return Ok((d.month(), Some(d.year())));
    }

    Err(AppError::InvalidDate(format!("invalid month '{s}'")))
}
