use chrono::{Duration, NaiveDate};
use serde::Serialize;
use std::collections::BTreeSet;
use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("period start {start} is after period end {end}")]
pub struct InvalidPeriod {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Inclusive date window in which check-ins are accepted and counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AttendancePeriod {
    start: NaiveDate,
    end: NaiveDate,
}

impl AttendancePeriod {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, InvalidPeriod> {
        if start > end {
            return Err(InvalidPeriod { start, end });
        }
        Ok(Self { start, end })
    }

    /// Period running from `start` through `start + days`.
    pub fn starting_at(start: NaiveDate, days: u32) -> Self {
        let end = start
            .checked_add_signed(Duration::days(i64::from(days)))
            .unwrap_or(NaiveDate::MAX);
        Self { start, end }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        is_within_period(date, self)
    }

    pub fn target_days(&self) -> BTreeSet<NaiveDate> {
        target_day_set(self.start, self.end, self)
    }

    /// Number of target days, without materialising them.
    pub fn day_count(&self) -> usize {
        (self.end - self.start).num_days() as usize + 1
    }
}

pub fn is_within_period(date: NaiveDate, period: &AttendancePeriod) -> bool {
    period.start <= date && date <= period.end
}

/// Every calendar day from `max(query_start, period.start)` through
/// `query_end`, weekends included. Reversed ranges yield an empty set.
pub fn target_day_set(
    query_start: NaiveDate,
    query_end: NaiveDate,
    period: &AttendancePeriod,
) -> BTreeSet<NaiveDate> {
    if query_start > query_end {
        return BTreeSet::new();
    }

    days_inclusive(query_start.max(period.start), query_end).collect()
}

/// Walks `start..=end` one day at a time, including `end` even when it is
/// the last representable date.
pub(crate) fn days_inclusive(start: NaiveDate, end: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    let first = (start <= end).then_some(start);
    std::iter::successors(first, move |day| day.succ_opt().filter(|next| *next <= end))
}
