use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{ProcessingError, Result};

/// Gregorian leap-year rule
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// A day of the year, independent of any particular year
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CalendarDay {
    pub month: u32,
    pub day: u32,
}

/// How a `CalendarDay` maps onto a concrete year
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayResolution {
    Exact(NaiveDate),
    /// Feb 29 in a non-leap year, stood in for by Feb 28
    LeapFallback(NaiveDate),
    Invalid,
}

impl CalendarDay {
    pub fn new(month: u32, day: u32) -> Result<Self> {
        // 2000 is a leap year, so Feb 29 is accepted here
        if NaiveDate::from_ymd_opt(2000, month, day).is_none() {
            return Err(ProcessingError::InvalidFormat(format!(
                "No such calendar day: month {}, day {}",
                month, day
            )));
        }
        Ok(Self { month, day })
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            month: date.month(),
            day: date.day(),
        }
    }

    pub fn is_leap_day(&self) -> bool {
        self.month == 2 && self.day == 29
    }

    pub fn matches(&self, date: NaiveDate) -> bool {
        date.month() == self.month && date.day() == self.day
    }

    pub fn resolve_in(&self, year: i32) -> DayResolution {
        if let Some(date) = NaiveDate::from_ymd_opt(year, self.month, self.day) {
            return DayResolution::Exact(date);
        }
        if self.is_leap_day() && !is_leap_year(year) {
            if let Some(feb_28) = NaiveDate::from_ymd_opt(year, 2, 28) {
                return DayResolution::LeapFallback(feb_28);
            }
        }
        DayResolution::Invalid
    }

    pub fn month_abbr(&self) -> &'static str {
        const MONTHS: [&str; 12] = [
            "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
        ];
        (self.month as usize)
            .checked_sub(1)
            .and_then(|i| MONTHS.get(i))
            .copied()
            .unwrap_or("Unknown")
    }

    pub fn season(&self) -> Season {
        match self.month {
            3..=5 => Season::Spring,
            6..=8 => Season::Summer,
            9..=11 => Season::Fall,
            _ => Season::Winter,
        }
    }
}

impl std::fmt::Display for CalendarDay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.month_abbr(), self.day)
    }
}

/// Meteorological season (northern hemisphere naming)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    Winter, // Dec-Feb
    Spring, // Mar-May
    Summer, // Jun-Aug
    Fall,   // Sep-Nov
}

impl Season {
    pub fn display_name(&self) -> &'static str {
        match self {
            Season::Winter => "Winter",
            Season::Spring => "Spring",
            Season::Summer => "Summer",
            Season::Fall => "Fall",
        }
    }
}

/// Closed range of full calendar years
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearWindow {
    pub start_year: i32,
    pub end_year: i32,
}

impl YearWindow {
    pub fn new(start_year: i32, end_year: i32) -> Result<Self> {
        if start_year > end_year {
            return Err(ProcessingError::InvalidFormat(format!(
                "Year window start {} is after end {}",
                start_year, end_year
            )));
        }
        Ok(Self {
            start_year,
            end_year,
        })
    }

    /// The `years` full years before `reference_year`: [ref - years, ref - 1]
    pub fn trailing(reference_year: i32, years: u32) -> Result<Self> {
        let years = i32::try_from(years.max(1)).unwrap_or(i32::MAX);
        match (
            reference_year.checked_sub(years),
            reference_year.checked_sub(1),
        ) {
            (Some(start_year), Some(end_year)) => Ok(Self {
                start_year,
                end_year,
            }),
            _ => Err(ProcessingError::InvalidFormat(format!(
                "Reference year {} is too small for a {}-year window",
                reference_year, years
            ))),
        }
    }

    /// Number of years covered; 0 for an inverted window
    pub fn len(&self) -> usize {
        let span = i64::from(self.end_year) - i64::from(self.start_year) + 1;
        usize::try_from(span).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, year: i32) -> bool {
        (self.start_year..=self.end_year).contains(&year)
    }

    pub fn years(&self) -> impl Iterator<Item = i32> {
        self.start_year..=self.end_year
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leap_years() {
        assert!(is_leap_year(2024));
        assert!(is_leap_year(2000));
        assert!(!is_leap_year(1900));
        assert!(!is_leap_year(2023));
    }

    #[test]
    fn test_calendar_day_validation() {
        assert!(CalendarDay::new(2, 29).is_ok());
        assert!(CalendarDay::new(2, 30).is_err());
        assert!(CalendarDay::new(13, 1).is_err());
        assert!(CalendarDay::new(4, 31).is_err());
    }

    #[test]
    fn test_resolve_leap_day() {
        let leap_day = CalendarDay::new(2, 29).unwrap();

        assert_eq!(
            leap_day.resolve_in(2024),
            DayResolution::Exact(NaiveDate::from_ymd_opt(2024, 2, 29).unwrap())
        );
        assert_eq!(
            leap_day.resolve_in(2023),
            DayResolution::LeapFallback(NaiveDate::from_ymd_opt(2023, 2, 28).unwrap())
        );
    }

    #[test]
    fn test_month_abbr_and_season() {
        let day = CalendarDay::new(7, 4).unwrap();
        assert_eq!(day.month_abbr(), "Jul");
        assert_eq!(day.season(), Season::Summer);
        assert_eq!(day.to_string(), "Jul 4");

        assert_eq!(CalendarDay::new(12, 25).unwrap().season(), Season::Winter);
        assert_eq!(CalendarDay::new(10, 1).unwrap().season(), Season::Fall);
    }

    #[test]
    fn test_trailing_window() {
        let window = YearWindow::trailing(2025, 20).unwrap();

        assert_eq!(window.start_year, 2005);
        assert_eq!(window.end_year, 2024);
        assert_eq!(window.len(), 20);
        assert!(window.contains(2005));
        assert!(!window.contains(2025));
        assert_eq!(window.years().count(), 20);
    }

    #[test]
    fn test_explicit_window() {
        assert!(YearWindow::new(2010, 2029).is_ok());
        assert!(YearWindow::new(2030, 2029).is_err());
    }

    #[test]
    fn test_trailing_window_rejects_overflow() {
        assert!(YearWindow::trailing(i32::MIN, 20).is_err());
        assert!(YearWindow::trailing(i32::MIN, 1).is_err());
        assert!(YearWindow::trailing(i32::MIN + 20, 20).is_ok());
    }

    #[test]
    fn test_inverted_window_is_empty() {
        // Fields are public, so an inverted window can bypass `new`
        let window = YearWindow {
            start_year: 2030,
            end_year: 2000,
        };

        assert_eq!(window.len(), 0);
        assert!(window.is_empty());
        assert_eq!(window.years().count(), 0);
    }
}
