use chrono::NaiveDate;
use std::collections::BTreeSet;

/// Consecutive checked days ending at `today`, walking back no further than
/// `period_start`. The first missing day ends the run; weekends are not skipped.
pub fn streak(today: NaiveDate, checked: &BTreeSet<NaiveDate>, period_start: NaiveDate) -> u32 {
    if checked.is_empty() {
        return 0;
    }

    let mut streak = 0u32;
    let mut cursor = Some(today);

    if checked.contains(&today) {
        streak = 1;
        cursor = today.pred_opt();
    }

    while let Some(day) = cursor {
        if day < period_start || !checked.contains(&day) {
            break;
        }
        streak = streak.saturating_add(1);
        cursor = day.pred_opt();
    }

    streak
}
