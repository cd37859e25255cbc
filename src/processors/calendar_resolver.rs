use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Utc};

use crate::error::Result;
use crate::models::{CalendarDay, YearWindow};
use crate::utils::constants::{DEFAULT_WINDOW_YEARS, MAX_WINDOW_YEARS};

/// Target day of year plus the years to look it up in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedCalendar {
    pub day: CalendarDay,
    pub window: YearWindow,
}

pub struct CalendarResolver {
    window_years: u32,
}

impl CalendarResolver {
    pub fn new(window_years: u32) -> Self {
        Self {
            window_years: window_years.clamp(1, MAX_WINDOW_YEARS),
        }
    }

    pub fn window_years(&self) -> u32 {
        self.window_years
    }

    /// Resolve an ISO-style date against the year the window trails
    pub fn resolve(&self, date: &str, reference_year: i32) -> Result<ResolvedCalendar> {
        let date = parse_target_date(date)?;
        self.resolve_date(date, reference_year)
    }

    pub fn resolve_date(&self, date: NaiveDate, reference_year: i32) -> Result<ResolvedCalendar> {
        Ok(ResolvedCalendar {
            day: CalendarDay::from_date(date),
            window: YearWindow::trailing(reference_year, self.window_years)?,
        })
    }

    /// Same as `resolve`, with the window trailing the year of `now`
    pub fn resolve_at(&self, date: &str, now: DateTime<Utc>) -> Result<ResolvedCalendar> {
        self.resolve(date, now.year())
    }
}

impl Default for CalendarResolver {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW_YEARS)
    }
}

/// Parse `YYYY-MM-DD`, an RFC 3339 timestamp, or a naive `YYYY-MM-DDTHH:MM[:SS]`.
/// Timestamps keep the calendar date as written; the offset is not applied.
pub fn parse_target_date(input: &str) -> Result<NaiveDate> {
    let input = input.trim();

    let plain_err = match NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        Ok(date) => return Ok(date),
        Err(e) => e,
    };

    if let Ok(timestamp) = DateTime::parse_from_rfc3339(input) {
        return Ok(timestamp.date_naive());
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(timestamp) = NaiveDateTime::parse_from_str(input, format) {
            return Ok(timestamp.date());
        }
    }

    Err(plain_err.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_target_date_forms() {
        let july_4 = NaiveDate::from_ymd_opt(2024, 7, 4).unwrap();

        assert_eq!(parse_target_date("2024-07-04").unwrap(), july_4);
        assert_eq!(parse_target_date(" 2024-07-04 ").unwrap(), july_4);
        assert_eq!(parse_target_date("2024-07-04T23:30:00-07:00").unwrap(), july_4);
        assert_eq!(parse_target_date("2024-07-04T00:15:00Z").unwrap(), july_4);
        assert_eq!(parse_target_date("2024-07-04T12:00").unwrap(), july_4);
        assert_eq!(parse_target_date("2024-07-04T12:00:00.250").unwrap(), july_4);
    }

    #[test]
    fn test_parse_target_date_rejects_garbage() {
        assert!(parse_target_date("July 4th").is_err());
        assert!(parse_target_date("2023-02-29").is_err());
        assert!(parse_target_date("").is_err());
    }

    #[test]
    fn test_resolve_default_window() {
        let resolved = CalendarResolver::default()
            .resolve("2024-01-15", 2025)
            .unwrap();

        assert_eq!(resolved.day, CalendarDay::new(1, 15).unwrap());
        assert_eq!(resolved.window.start_year, 2005);
        assert_eq!(resolved.window.end_year, 2024);
    }

    #[test]
    fn test_resolve_leap_day() {
        let resolved = CalendarResolver::new(10).resolve("2024-02-29", 2026).unwrap();

        assert!(resolved.day.is_leap_day());
        assert_eq!(resolved.window, YearWindow::new(2016, 2025).unwrap());
    }

    #[test]
    fn test_resolve_rejects_extreme_reference_year() {
        let resolver = CalendarResolver::default();

        assert!(resolver.resolve("2024-07-04", i32::MIN).is_err());
        assert!(resolver
            .resolve_date(NaiveDate::from_ymd_opt(2024, 7, 4).unwrap(), i32::MIN + 5)
            .is_err());
    }

    #[test]
    fn test_resolve_at_uses_reference_instant() {
        let now = Utc.with_ymd_and_hms(2030, 3, 1, 12, 0, 0).unwrap();
        let resolved = CalendarResolver::new(20).resolve_at("1999-12-31", now).unwrap();

        assert_eq!(resolved.day, CalendarDay::new(12, 31).unwrap());
        assert_eq!(resolved.window.start_year, 2010);
        assert_eq!(resolved.window.end_year, 2029);
    }
}
