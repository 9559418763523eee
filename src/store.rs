use crate::period::{is_within_period, AttendancePeriod};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use std::collections::{BTreeMap, BTreeSet};
use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CheckInError {
    #[error("{date} is outside the attendance period; check-ins are closed")]
    OutOfPeriod { date: NaiveDate },
    #[error("already checked in on {date} at {at}; try again after midnight")]
    AlreadyCheckedIn { date: NaiveDate, at: NaiveTime },
}

/// In-memory attendance records, one check-in time per calendar date.
///
/// Records are never removed and are not persisted; they live as long as the
/// store does.
#[derive(Debug, Clone, Default)]
pub struct AttendanceStore {
    records: BTreeMap<NaiveDate, NaiveTime>,
}

impl AttendanceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a check-in for `now`'s date and returns the stored time.
    ///
    /// `allow_repeat_on` waives the once-per-day rule for that single date and
    /// is meant for test and demo setups only; production callers pass `None`.
    pub fn check_in(
        &mut self,
        now: NaiveDateTime,
        period: &AttendancePeriod,
        allow_repeat_on: Option<NaiveDate>,
    ) -> Result<NaiveTime, CheckInError> {
        let today = now.date();

        if !is_within_period(today, period) {
            return Err(CheckInError::OutOfPeriod { date: today });
        }

        if let Some(at) = self.records.get(&today) {
            if allow_repeat_on != Some(today) {
                return Err(CheckInError::AlreadyCheckedIn { date: today, at: *at });
            }
        }

        let time = now.time().with_nanosecond(0).unwrap_or(now.time());
        self.records.insert(today, time);
        Ok(time)
    }

    pub fn record_for(&self, date: NaiveDate) -> Option<NaiveTime> {
        self.records.get(&date).copied()
    }

    pub fn is_checked(&self, date: NaiveDate) -> bool {
        self.records.contains_key(&date)
    }

    /// Whether the check-in action is unavailable for `date` because it has
    /// already been used.
    pub fn is_locked(&self, date: NaiveDate, allow_repeat_on: Option<NaiveDate>) -> bool {
        self.is_checked(date) && allow_repeat_on != Some(date)
    }

    pub fn checked_dates(&self) -> BTreeSet<NaiveDate> {
        self.records.keys().copied().collect()
    }

    /// Number of checked dates within `period`.
    pub fn checked_within(&self, period: &AttendancePeriod) -> usize {
        self.records.range(period.start()..=period.end()).count()
    }

    pub fn records_newest_first(&self) -> impl Iterator<Item = (NaiveDate, NaiveTime)> + '_ {
        self.records.iter().rev().map(|(date, time)| (*date, *time))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
