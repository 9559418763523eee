use crate::period::AttendancePeriod;
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AttendanceSummary {
    pub target_days: usize,
    pub checked_days: usize,
    pub percentage: f64,
    pub streak: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub day: u32,
    pub checked: bool,
    pub today: bool,
    pub in_period: bool,
    pub weekend: bool,
    pub in_month: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarMonth {
    pub year: i32,
    pub month: u32,
    pub weeks: Vec<Vec<CalendarDay>>,
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub user_name: String,
    pub date: NaiveDate,
    pub period: AttendancePeriod,
    pub in_period: bool,
    pub checked_in_at: Option<NaiveTime>,
    pub locked: bool,
    pub repeat_allowed: bool,
    pub summary: AttendanceSummary,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CheckInResponse {
    pub date: NaiveDate,
    pub time: NaiveTime,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RecordPoint {
    pub date: NaiveDate,
    pub time: NaiveTime,
}

#[derive(Debug, Serialize)]
pub struct CalendarResponse {
    pub months: Vec<CalendarMonth>,
}

#[derive(Debug, Deserialize)]
pub struct IndexQuery {
    pub notice: Option<String>,
}

/// Result banner shown after a form check-in redirects back to the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    CheckedIn,
    AlreadyCheckedIn,
    OutOfPeriod,
}

impl Notice {
    pub fn as_query(self) -> &'static str {
        match self {
            Notice::CheckedIn => "checked_in",
            Notice::AlreadyCheckedIn => "already_checked_in",
            Notice::OutOfPeriod => "out_of_period",
        }
    }

    pub fn from_query(value: &str) -> Option<Self> {
        match value {
            "checked_in" => Some(Notice::CheckedIn),
            "already_checked_in" => Some(Notice::AlreadyCheckedIn),
            "out_of_period" => Some(Notice::OutOfPeriod),
            _ => None,
        }
    }
}
