use crate::errors::AppResult;
use crate::models::entry::{Entry, Listed};
use crate::report::{self, ALL_AREAS};
use chrono::NaiveDate;

/// Filters selected on the command line.
#[derive(Debug, Clone)]
pub struct ListQuery {
    pub area: String,
    pub day: Option<NaiveDate>,
    pub month: Option<(u32, Option<i32>)>,
    pub range: Option<(NaiveDate, NaiveDate)>,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            area: ALL_AREAS.to_string(),
            day: None,
            month: None,
            range: None,
        }
    }
}

/// Filtered, newest-first rows plus the rows whose date could not be read.
#[derive(Debug, Clone, Default)]
pub struct ListView {
    pub rows: Vec<Listed>,
    pub malformed: Vec<Listed>,
}

pub struct ListLogic;

impl ListLogic {
    pub fn build(entries: Vec<Entry>, query: &ListQuery) -> AppResult<ListView> {
        let listed = Listed::enumerate(entries);
        let by_area = report::filter_by_area(&listed, &query.area);
        let (mut rows, malformed) = report::split_malformed(&by_area);

        if let Some(day) = query.day {
            rows = report::filter_by_day(&rows, day)?;
        }
        if let Some((month, year)) = query.month {
            rows = report::filter_by_month(&rows, month, year)?;
        }
        if let Some((from, to)) = query.range {
            rows = report::filter_by_range(&rows, from, to)?;
        }

        Ok(ListView {
            rows: report::sort_by_timestamp_desc(&rows)?,
            malformed,
        })
    }
}
