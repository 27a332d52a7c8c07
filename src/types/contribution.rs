//! Contribution records and the derived week grid

use chrono::NaiveDate;
use serde::Serialize;

/// Number of week columns in the graph
pub const WEEKS: usize = 51;

/// Rows per week column (Monday through Sunday)
pub const DAYS_IN_WEEK: usize = 7;

/// One `(date, count)` pair from the fetched map. The date is kept as the raw
/// key string so lookups are exact string matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContributionRecord {
    pub date: String,
    pub count: u64,
}

impl ContributionRecord {
    pub fn new(date: impl Into<String>, count: u64) -> Self {
        Self {
            date: date.into(),
            count,
        }
    }
}

/// A populated day in the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GridCell {
    pub date: NaiveDate,
    pub count: u64,
}

/// One week column; `None` slots are placeholders after today
pub type WeekColumn = [Option<GridCell>; DAYS_IN_WEEK];

/// Week columns, oldest first
pub type Grid = Vec<WeekColumn>;

/// Number of week columns whose first row falls in `key` ("YYYY-MM")
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthSpan {
    pub key: String,
    pub columns: usize,
}
