use crate::models::AttendanceSummary;
use crate::period::AttendancePeriod;
use crate::store::AttendanceStore;
use crate::streak::streak;
use chrono::NaiveDate;

pub fn build_summary_at(
    today: NaiveDate,
    store: &AttendanceStore,
    period: &AttendancePeriod,
) -> AttendanceSummary {
    let target_days = period.day_count();
    let checked_days = store.checked_within(period);

    let percentage = if target_days == 0 {
        0.0
    } else {
        checked_days as f64 / target_days as f64 * 100.0
    };

    AttendanceSummary {
        target_days,
        checked_days,
        percentage,
        streak: streak(today, &store.checked_dates(), period.start()),
    }
}
