// Test fixtures - reusable test data
// Provides consistent test data across all test files

use chrono::{DateTime, Local, TimeZone};

use rust_countdown::models::event::{CountMode, CountdownEvent, EventId};

/// Sample instants for testing, kept away from DST transitions
pub mod dates {
    use super::*;

    /// Returns Jan 1, 2025 at midnight local time
    pub fn jan_1_2025() -> DateTime<Local> {
        Local.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()
    }

    /// Returns Jun 15, 2025 at noon local time
    pub fn mid_june_2025() -> DateTime<Local> {
        Local.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap()
    }

    /// Returns Dec 31, 2025 at 23:59 (New Year's Eve)
    pub fn new_years_eve_2025() -> DateTime<Local> {
        Local.with_ymd_and_hms(2025, 12, 31, 23, 59, 0).unwrap()
    }

    /// Returns Feb 29, 2024 at noon (leap day)
    pub fn leap_day_2024() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 2, 29, 12, 0, 0).unwrap()
    }
}

/// Sample events for testing
pub mod events {
    use super::*;

    /// Builds an event record with explicit timestamps
    pub fn event(
        id: u64,
        title: &str,
        target_at: DateTime<Local>,
        mode: CountMode,
        created_at: DateTime<Local>,
    ) -> CountdownEvent {
        CountdownEvent {
            id: EventId(id),
            title: title.to_string(),
            target_at,
            mode,
            created_at,
            updated_at: created_at,
            image_id: "birthday".to_string(),
            custom_image: None,
        }
    }

    /// Countdown to New Year's Day 2026, created mid-2025
    pub fn new_year_countdown(id: u64) -> CountdownEvent {
        event(
            id,
            "お正月",
            Local.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
            CountMode::Countdown,
            dates::mid_june_2025(),
        )
    }

    /// Count-up from New Year's Day 2025, created the same day
    pub fn new_year_countup(id: u64) -> CountdownEvent {
        event(
            id,
            "今年",
            dates::jan_1_2025(),
            CountMode::Countup,
            dates::jan_1_2025(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    #[test]
    fn test_fixture_dates_are_valid() {
        // Ensure fixture dates are valid
        assert!(dates::jan_1_2025().year() == 2025);
        assert!(dates::mid_june_2025().month() == 6);
        assert!(dates::new_years_eve_2025().day() == 31);
        assert!(dates::leap_day_2024().day() == 29);
    }

    #[test]
    fn test_fixture_events_are_valid() {
        // Ensure fixture events are valid
        let countdown = events::new_year_countdown(1);
        assert_eq!(countdown.mode, CountMode::Countdown);
        assert!(countdown.target_at > countdown.created_at);

        let countup = events::new_year_countup(2);
        assert_eq!(countup.mode, CountMode::Countup);
        assert_eq!(countup.target_at, countup.created_at);
    }
}
