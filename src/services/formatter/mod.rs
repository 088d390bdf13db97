// Time formatter
// Pure functions mapping (event, now) to display strings and derived flags.
// `now` is always an explicit input; nothing here reads the system clock.

use chrono::{DateTime, Datelike, Duration, Local, Weekday};

use crate::models::event::{CountMode, CountdownEvent};
use crate::utils::date::next_midnight;

const SECONDS_PER_DAY: i64 = 86_400;
const SECONDS_PER_HOUR: i64 = 3_600;

/// Compact display state for list rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountdownSummary {
    pub header_text: &'static str,
    pub countdown_text: String,
    pub show_day_unit: bool,
    pub is_critical: bool,
    pub expired: bool,
}

/// Rich display state for a single-event view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountdownDetailInfo {
    pub date_text: String,
    pub time_text: String,
    pub remaining_for_date_tab: String,
    pub remaining_for_time_tab: String,
    pub until_midnight: String,
    pub expired: bool,
}

/// Summarize an event relative to `now`.
///
/// Countdown events are expired once the target is reached (`diff <= 0`) and
/// critical inside the final day (`0 < diff < 86_400` seconds, compared at
/// full precision). Count-up events are never expired and never critical.
pub fn summary(event: &CountdownEvent, now: DateTime<Local>) -> CountdownSummary {
    let is_count_up = event.mode == CountMode::Countup;
    let diff = event.target_at.signed_duration_since(now);
    let expired = !is_count_up && diff <= Duration::zero();
    let is_critical =
        !is_count_up && diff > Duration::zero() && diff < Duration::seconds(SECONDS_PER_DAY);
    let header_text = if is_count_up { "あれから" } else { "残り" };
    let show_day_unit = is_count_up || !is_critical;

    let countdown_text = if is_count_up {
        let elapsed = now.signed_duration_since(event.target_at);
        whole_days(elapsed).to_string()
    } else if expired {
        "0".to_string()
    } else if is_critical {
        if diff < Duration::seconds(SECONDS_PER_HOUR) {
            format_duration_ms(diff)
        } else {
            format_duration_hms(diff)
        }
    } else {
        whole_days(diff).to_string()
    };

    CountdownSummary {
        header_text,
        countdown_text,
        show_day_unit,
        is_critical,
        expired,
    }
}

/// Detail strings for an event relative to `now`: target date/time, the
/// days tab, the hours tab, and the time left until the next local midnight.
pub fn detail(event: &CountdownEvent, now: DateTime<Local>) -> CountdownDetailInfo {
    let is_count_up = event.mode == CountMode::Countup;
    let diff = event.target_at.signed_duration_since(now);
    let expired = !is_count_up && diff <= Duration::zero();
    let is_critical =
        !is_count_up && diff > Duration::zero() && diff < Duration::seconds(SECONDS_PER_DAY);

    let remaining_for_date_tab = if is_count_up {
        let elapsed = now.signed_duration_since(event.target_at);
        format!("{}日", whole_days(elapsed))
    } else if expired {
        "終了".to_string()
    } else if is_critical {
        format_duration_hms(diff)
    } else {
        format!("{}日", whole_days(diff))
    };

    let remaining_for_time_tab = if is_count_up {
        let elapsed = now.signed_duration_since(event.target_at);
        format_total_hours_duration(elapsed)
    } else if expired {
        "0:00:00".to_string()
    } else {
        format_total_hours_duration(diff)
    };

    CountdownDetailInfo {
        date_text: date_text(event.target_at),
        time_text: time_text(event.target_at),
        remaining_for_date_tab,
        remaining_for_time_tab,
        until_midnight: time_until_midnight(now),
        expired,
    }
}

/// `HH:MM:SS` until the start of the next local calendar day.
pub fn time_until_midnight(now: DateTime<Local>) -> String {
    match next_midnight(now) {
        Some(next_day) => format_duration_hms(next_day.signed_duration_since(now)),
        None => format_duration_hms(Duration::zero()),
    }
}

pub fn date_text(date: DateTime<Local>) -> String {
    date.format("%Y/%m/%d").to_string()
}

pub fn date_with_weekday_text(date: DateTime<Local>) -> String {
    format!(
        "{}年{}月{}日 ({})",
        date.year(),
        date.month(),
        date.day(),
        weekday_kanji(date.weekday())
    )
}

pub fn time_text(date: DateTime<Local>) -> String {
    date.format("%H:%M").to_string()
}

fn weekday_kanji(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "月",
        Weekday::Tue => "火",
        Weekday::Wed => "水",
        Weekday::Thu => "木",
        Weekday::Fri => "金",
        Weekday::Sat => "土",
        Weekday::Sun => "日",
    }
}

// Whole days in an interval, truncating and clamping negatives to zero.
fn whole_days(interval: Duration) -> i64 {
    interval.num_seconds().max(0) / SECONDS_PER_DAY
}

fn format_duration_hms(interval: Duration) -> String {
    let total_seconds = interval.num_seconds().max(0);
    let hours = total_seconds / SECONDS_PER_HOUR;
    let minutes = (total_seconds % SECONDS_PER_HOUR) / 60;
    let seconds = total_seconds % 60;
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}

fn format_duration_ms(interval: Duration) -> String {
    let total_seconds = interval.num_seconds().max(0);
    let minutes = total_seconds / 60;
    let seconds = total_seconds % 60;
    format!("{minutes:02}:{seconds:02}")
}

// Hours are not zero-padded here: this is the running total for the time
// tab, where values like 132:00:00 are expected.
fn format_total_hours_duration(interval: Duration) -> String {
    let total_seconds = interval.num_seconds().max(0);
    let hours = total_seconds / SECONDS_PER_HOUR;
    let minutes = (total_seconds % SECONDS_PER_HOUR) / 60;
    let seconds = total_seconds % 60;
    format!("{hours}:{minutes:02}:{seconds:02}")
}
