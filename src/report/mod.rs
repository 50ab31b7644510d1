//! Read-only transformations over the entries returned by the store client.
//!
//! Every function works on plain entries or on
//! [`Listed`](crate::models::entry::Listed) rows that keep their store
//! position. Nothing here touches the store. Functions that need a parsed
//! timestamp return `AppError::Format` on the first malformed row; use
//! [`split_malformed`] first to build a partial view instead.

pub mod dataset;
pub mod stats;

use crate::errors::AppResult;
use crate::models::entry::Entry;
use chrono::{Datelike, NaiveDate};

pub use dataset::Dataset;
pub use stats::{Share, count_by_area, leader, shares};

/// Area filter value that keeps every entry.
pub const ALL_AREAS: &str = "All";

/// Exact match on `area`; [`ALL_AREAS`] is the identity filter.
pub fn filter_by_area<T: AsRef<Entry> + Clone>(entries: &[T], area: &str) -> Vec<T> {
    if area == ALL_AREAS {
        return entries.to_vec();
    }
    entries
        .iter()
        .filter(|e| e.as_ref().area == area)
        .cloned()
        .collect()
}

/// Entries whose timestamp falls on `date`.
pub fn filter_by_day<T: AsRef<Entry> + Clone>(entries: &[T], date: NaiveDate) -> AppResult<Vec<T>> {
    filter_parsed(entries, |ts| ts.date() == date)
}

/// Entries of calendar month `month` (1-12).
///
/// With `year == None` the year is ignored, so the same month of another
/// year matches too (a single reporting season).
pub fn filter_by_month<T: AsRef<Entry> + Clone>(
    entries: &[T],
    month: u32,
    year: Option<i32>,
) -> AppResult<Vec<T>> {
    filter_parsed(entries, |ts| {
        ts.month() == month && year.is_none_or(|y| ts.year() == y)
    })
}

/// Entries dated between `from` and `to`, both inclusive.
pub fn filter_by_range<T: AsRef<Entry> + Clone>(
    entries: &[T],
    from: NaiveDate,
    to: NaiveDate,
) -> AppResult<Vec<T>> {
    filter_parsed(entries, |ts| ts.date() >= from && ts.date() <= to)
}

/// Most recent first. The sort is stable: equal timestamps keep store order.
pub fn sort_by_timestamp_desc<T: AsRef<Entry> + Clone>(entries: &[T]) -> AppResult<Vec<T>> {
    let mut keyed = Vec::with_capacity(entries.len());
    for e in entries {
        keyed.push((e.as_ref().parsed_timestamp()?, e.clone()));
    }
    keyed.sort_by(|a, b| b.0.cmp(&a.0));
    Ok(keyed.into_iter().map(|(_, e)| e).collect())
}

/// Separate rows with a parseable timestamp from the rest, keeping order.
pub fn split_malformed<T: AsRef<Entry> + Clone>(entries: &[T]) -> (Vec<T>, Vec<T>) {
    entries
        .iter()
        .cloned()
        .partition(|e| e.as_ref().parsed_timestamp().is_ok())
}

fn filter_parsed<T, F>(entries: &[T], keep: F) -> AppResult<Vec<T>>
where
    T: AsRef<Entry> + Clone,
    F: Fn(chrono::NaiveDateTime) -> bool,
{
    let mut out = Vec::new();
    for e in entries {
        if keep(e.as_ref().parsed_timestamp()?) {
            out.push(e.clone());
        }
    }
    Ok(out)
}
