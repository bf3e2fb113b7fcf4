//! Calendar month arithmetic
//!
//! All stepping is by calendar month. Adding a month to Jan 31 lands on the
//! last day of February, never on a fixed 30-day offset.

use chrono::{DateTime, Datelike, Months, NaiveTime, Utc};

/// Shift `date` by `months` calendar months (negative goes back)
///
/// The day of month is clamped to the length of the target month.
pub fn add_months(date: DateTime<Utc>, months: i32) -> DateTime<Utc> {
    let shifted = if months >= 0 {
        date.checked_add_months(Months::new(months.unsigned_abs()))
    } else {
        date.checked_sub_months(Months::new(months.unsigned_abs()))
    };
    shifted.unwrap_or(date)
}

/// Midnight UTC on the first day of `date`'s month
pub fn month_start(date: DateTime<Utc>) -> DateTime<Utc> {
    let day = date.date_naive();
    day.with_day(1)
        .unwrap_or(day)
        .and_time(NaiveTime::default())
        .and_utc()
}

/// Every month start from `earliest`'s month through `now`'s month, inclusive
pub fn monthly_grid(earliest: DateTime<Utc>, now: DateTime<Utc>) -> Vec<DateTime<Utc>> {
    let mut grid = Vec::new();
    let mut cursor = month_start(earliest);
    while cursor <= now {
        grid.push(cursor);
        let next = add_months(cursor, 1);
        if next == cursor {
            break;
        }
        cursor = next;
    }
    grid
}

/// Short month label, e.g. "Mar 2026"
pub fn month_label(date: DateTime<Utc>) -> String {
    date.format("%b %Y").to_string()
}
