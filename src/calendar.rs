use crate::models::{CalendarDay, CalendarMonth};
use crate::period::{days_inclusive, is_within_period, AttendancePeriod};
use crate::store::AttendanceStore;
use chrono::{Datelike, Duration, NaiveDate, Weekday};

/// Months shown on the page: the one containing `today`, plus the next one
/// if the period reaches into it.
pub fn months_to_display(today: NaiveDate, period: &AttendancePeriod) -> Vec<NaiveDate> {
    let current = first_of_month(today);
    let mut months = vec![current];
    if let Some(next) = next_month(current) {
        if next <= period.end() {
            months.push(next);
        }
    }
    months
}

/// Sunday-first grid of whole weeks covering the month of `month_start`.
pub fn month_grid(
    month_start: NaiveDate,
    today: NaiveDate,
    store: &AttendanceStore,
    period: &AttendancePeriod,
) -> CalendarMonth {
    let month_start = first_of_month(month_start);
    let month_end = next_month(month_start)
        .and_then(|next| next.pred_opt())
        .unwrap_or(NaiveDate::MAX);

    let grid_start =
        month_start - Duration::days(i64::from(month_start.weekday().num_days_from_sunday()));
    let grid_end = month_end
        .checked_add_signed(Duration::days(
            6 - i64::from(month_end.weekday().num_days_from_sunday()),
        ))
        .unwrap_or(month_end);

    let days: Vec<CalendarDay> = days_inclusive(grid_start, grid_end)
        .map(|date| {
            let checked = store.is_checked(date);
            CalendarDay {
                date,
                day: date.day(),
                checked,
                today: !checked && date == today,
                in_period: is_within_period(date, period),
                weekend: matches!(date.weekday(), Weekday::Sat | Weekday::Sun),
                in_month: date.month() == month_start.month(),
            }
        })
        .collect();

    CalendarMonth {
        year: month_start.year(),
        month: month_start.month(),
        weeks: days.chunks(7).map(<[CalendarDay]>::to_vec).collect(),
    }
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

fn next_month(month_start: NaiveDate) -> Option<NaiveDate> {
    let (year, month) = if month_start.month() == 12 {
        (month_start.year() + 1, 1)
    } else {
        (month_start.year(), month_start.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1)
}
