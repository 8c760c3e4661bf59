//! Business-timezone day boundaries.
//!
//! Date to timestamp conversion happens at the handler/service layer;
//! storage only ever sees `i64` unix millis.

use chrono::NaiveDate;
use chrono_tz::Tz;

/// Start of the date (00:00:00) in the business timezone, as unix millis.
///
/// DST gap fallback: if local midnight does not exist the UTC reading
/// is used instead.
pub fn day_start_millis(date: NaiveDate, tz: Tz) -> i64 {
    let naive = date.and_hms_opt(0, 0, 0).unwrap();
    naive
        .and_local_timezone(tz)
        .latest()
        .map(|dt| dt.timestamp_millis())
        .unwrap_or_else(|| naive.and_utc().timestamp_millis())
}

/// Exclusive end of the date: next day 00:00:00 as unix millis.
///
/// Callers pair this with `< end` semantics.
pub fn day_end_millis(date: NaiveDate, tz: Tz) -> i64 {
    day_start_millis(date.succ_opt().unwrap_or(date), tz)
}
