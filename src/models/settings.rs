use chrono::NaiveDate;
use serde::Serialize;

pub const DEFAULT_GOAL_NAME: &str = "Season goal";

/// Singleton record kept in the settings range: `[goal_name, target_date]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Settings {
    pub goal_name: String,
    pub target_date: NaiveDate,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            goal_name: DEFAULT_GOAL_NAME.to_string(),
            target_date: NaiveDate::from_ymd_opt(2026, 9, 1).unwrap_or_default(),
        }
    }
}

impl Settings {
    /// Parse the stored row. `None` when the row is absent, short or its date
    /// does not parse; callers fall back to [`Settings::default`].
    pub fn from_row(row: &[String]) -> Option<Self> {
        let goal = row.first()?.trim();
        let date = row.get(1)?.trim();
        if goal.is_empty() {
            return None;
        }
        let target_date = NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()?;
        Some(Self {
            goal_name: goal.to_string(),
            target_date,
        })
    }

    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.goal_name.clone(),
            self.target_date.format("%Y-%m-%d").to_string(),
        ]
    }

    /// Whole days from `today` to the target date (negative once passed).
    pub fn days_remaining(&self, today: NaiveDate) -> i64 {
        (self.target_date - today).num_days()
    }
}
