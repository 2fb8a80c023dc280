//! Quota reset clock.
//!
//! Premium-request quotas reset on the first of each calendar month, UTC.
//! Both helpers take `now` as a parameter so tests can pin the clock.

use chrono::{DateTime, Datelike, TimeZone, Utc};

const SECONDS_PER_DAY: i64 = 86_400;

/// First instant of the next calendar month in UTC.
///
/// December rolls into January of the following year.
pub fn reset_date(now: DateTime<Utc>) -> DateTime<Utc> {
    let (year, month) = if now.month() == 12 {
        (now.year() + 1, 1)
    } else {
        (now.year(), now.month() + 1)
    };
    Utc.with_ymd_and_hms(year, month, 1, 0, 0, 0)
        .single()
        .expect("first of month is a valid UTC instant")
}

/// Whole days until the quota resets, rounded up.
///
/// On the first instant of a month this equals the number of days in that
/// month; at midnight of the last day it is 1.
pub fn days_until_reset(now: DateTime<Utc>) -> i64 {
    let seconds = (reset_date(now) - now).num_seconds();
    (seconds + SECONDS_PER_DAY - 1) / SECONDS_PER_DAY
}
