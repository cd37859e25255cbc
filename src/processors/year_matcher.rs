use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};

use crate::error::{ProcessingError, Result};
use crate::models::{CalendarDay, DailyRecord, DayResolution, YearWindow, YearlySample};

/// One sample per matched year, ascending, with gap bookkeeping
#[derive(Debug, Clone, PartialEq)]
pub struct MatchedSeries {
    pub day: CalendarDay,
    pub window: YearWindow,
    pub samples: Vec<YearlySample>,
    pub missing_years: usize,
    pub leap_handled: bool,
}

impl MatchedSeries {
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn records(&self) -> impl Iterator<Item = &DailyRecord> {
        self.samples.iter().map(|s| &s.record)
    }

    /// Rewrite every sample's record, keeping years and coverage untouched
    pub fn map_records<F>(mut self, mut f: F) -> Self
    where
        F: FnMut(&DailyRecord) -> DailyRecord,
    {
        for sample in &mut self.samples {
            sample.record = f(&sample.record);
        }
        self
    }
}

pub struct YearSeriesMatcher;

impl YearSeriesMatcher {
    pub fn new() -> Self {
        Self
    }

    /// Pick the record for `day` in every year of `window`.
    ///
    /// Years without a match are counted, never fatal. Only a window with no
    /// match at all is an error.
    pub fn match_years(
        &self,
        records: &[DailyRecord],
        day: CalendarDay,
        window: YearWindow,
    ) -> Result<MatchedSeries> {
        if window.is_empty() {
            return Err(ProcessingError::InvalidFormat(format!(
                "Year window start {} is after end {}",
                window.start_year, window.end_year
            )));
        }

        // Group records by year, keeping only the window
        let mut by_year: HashMap<i32, Vec<&DailyRecord>> = HashMap::new();
        for record in records {
            let year = record.date.year();
            if window.contains(year) {
                by_year.entry(year).or_default().push(record);
            }
        }

        // At most one sample per year that has records
        let mut samples = Vec::with_capacity(by_year.len());
        let mut missing_years = 0;
        let mut leap_handled = false;

        for year in window.years() {
            let year_records = by_year.get(&year).map(Vec::as_slice).unwrap_or(&[]);

            let found = match day.resolve_in(year) {
                DayResolution::Exact(date) => {
                    find_on(year_records, date).map(|record| (record, false))
                }
                DayResolution::LeapFallback(feb_28) => {
                    find_on(year_records, feb_28).map(|record| (record, true))
                }
                DayResolution::Invalid => None,
            };

            match found {
                Some((record, leap_substitute)) => {
                    leap_handled |= leap_substitute;
                    samples.push(YearlySample {
                        year,
                        record: record.clone(),
                        leap_substitute,
                    });
                }
                None => {
                    tracing::debug!(year, day = %day, "No record for target day");
                    missing_years += 1;
                }
            }
        }

        if samples.is_empty() {
            return Err(ProcessingError::NoData(format!(
                "no records for {} in {}-{}",
                day, window.start_year, window.end_year
            )));
        }

        tracing::debug!(
            matched = samples.len(),
            missing_years,
            leap_handled,
            "Matched target day across window"
        );

        Ok(MatchedSeries {
            day,
            window,
            samples,
            missing_years,
            leap_handled,
        })
    }
}

impl Default for YearSeriesMatcher {
    fn default() -> Self {
        Self::new()
    }
}

// First record wins when the archive repeats a date
fn find_on<'a>(records: &[&'a DailyRecord], date: NaiveDate) -> Option<&'a DailyRecord> {
    records.iter().copied().find(|r| r.date == date)
}
