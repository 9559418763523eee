use crate::period::AttendancePeriod;
use chrono::{Local, NaiveDate};
use std::env;
use thiserror::Error;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_PERIOD_DAYS: u32 = 40;
pub const MAX_PERIOD_DAYS: u32 = 3650;
pub const DEFAULT_USER_NAME: &str = "Guest";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key} must be a date in YYYY-MM-DD form, got {value:?}")]
    InvalidDate { key: &'static str, value: String },
    #[error("{key} must be a number of days between 0 and {max}, got {value:?}", max = MAX_PERIOD_DAYS)]
    InvalidDays { key: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub user_name: String,
    pub period: AttendancePeriod,
    /// Date on which repeated check-ins are accepted. Test and demo setups only.
    pub allow_repeat_checkin_on: Option<NaiveDate>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(Local::now().date_naive(), |key| env::var(key).ok())
    }

    /// Builds the config from `lookup`, with `today` as the startup date.
    pub fn from_lookup(
        today: NaiveDate,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let port = lookup("PORT")
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        let user_name = lookup("ATTENDANCE_USER")
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_USER_NAME.to_string());

        let start = match lookup("ATTENDANCE_PERIOD_START") {
            Some(value) => parse_date("ATTENDANCE_PERIOD_START", &value, today)?,
            None => today,
        };

        let days = match lookup("ATTENDANCE_PERIOD_DAYS") {
            Some(value) => match value.trim().parse::<u32>() {
                Ok(days) if days <= MAX_PERIOD_DAYS => days,
                _ => {
                    return Err(ConfigError::InvalidDays {
                        key: "ATTENDANCE_PERIOD_DAYS",
                        value,
                    });
                }
            },
            None => DEFAULT_PERIOD_DAYS,
        };

        let allow_repeat_checkin_on = lookup("ATTENDANCE_ALLOW_REPEAT_ON")
            .map(|value| parse_date("ATTENDANCE_ALLOW_REPEAT_ON", &value, today))
            .transpose()?;

        Ok(Self {
            port,
            user_name,
            period: AttendancePeriod::starting_at(start, days),
            allow_repeat_checkin_on,
        })
    }
}

fn parse_date(key: &'static str, value: &str, today: NaiveDate) -> Result<NaiveDate, ConfigError> {
    let trimmed = value.trim();
    if trimmed.eq_ignore_ascii_case("today") {
        return Ok(today);
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").map_err(|_| ConfigError::InvalidDate {
        key,
        value: value.to_string(),
    })
}
