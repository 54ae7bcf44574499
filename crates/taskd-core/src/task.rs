use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Wire format for calendar dates: `YYYY-MM-DD`, no time-of-day.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a `YYYY-MM-DD` date string.
pub fn parse_wire_date(s: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(s, DATE_FORMAT)
}

/// A persisted task as exposed on the wire. The soft-delete marker is
/// internal to the store and never serialized.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub date: NaiveDate,
    pub completed: bool,
    pub created_at: String,
    pub updated_at: String,
}

/// Validated input for creating a task. Completed always starts false.
#[derive(Clone, Debug)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub date: NaiveDate,
}

/// A sparse update: only supplied fields are written.
#[derive(Clone, Debug, Default)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub date: Option<NaiveDate>,
    pub completed: Option<bool>,
}

impl TaskPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.date.is_none()
            && self.completed.is_none()
    }
}

/// Listing filters with final pagination values. Defaulting of limit and
/// offset happens in the service layer; the store receives these as-is.
#[derive(Clone, Debug)]
pub struct TaskFilter {
    pub completed: Option<bool>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub limit: u32,
    pub offset: u32,
}
