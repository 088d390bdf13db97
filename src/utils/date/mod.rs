// Date utility functions

use chrono::{DateTime, Datelike, Duration, Local};

/// Seconds added per iteration when calendar year-addition is unavailable
/// for a date (365 days).
const YEAR_FALLBACK_SECONDS: i64 = 31_536_000;

/// Start of the next local calendar day after `date`.
///
/// Returns `None` when that midnight is not representable in the local
/// timezone (e.g. skipped by a DST transition).
pub fn next_midnight(date: DateTime<Local>) -> Option<DateTime<Local>> {
    date.date_naive()
        .succ_opt()?
        .and_hms_opt(0, 0, 0)?
        .and_local_timezone(date.timezone())
        .earliest()
}

/// Advance a date by one calendar year, keeping month/day/time.
///
/// Dates with no counterpart in the next year (Feb 29) fall back to a fixed
/// 365-day interval. The result is always strictly later than the input.
pub fn add_one_year(date: DateTime<Local>) -> DateTime<Local> {
    let next_year = date.year() + 1;
    date.with_year(next_year)
        .unwrap_or(date + Duration::seconds(YEAR_FALLBACK_SECONDS))
}
