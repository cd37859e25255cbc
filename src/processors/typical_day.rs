use crate::error::{ProcessingError, Result};
use crate::models::{Averages, Coordinate, Coverage, DailyRecord, Period, TypicalDaySummary, Units};
use crate::processors::year_matcher::MatchedSeries;
use crate::utils::round_half_up;

/// Averages a matched series into a "typical day". Expects imperial units.
pub struct TypicalDayAverager;

impl TypicalDayAverager {
    pub fn new() -> Self {
        Self
    }

    /// Mean of the present values of one metric; `None` when none are present
    pub fn mean_of<'a, I, F>(records: I, metric: F) -> Option<f64>
    where
        I: IntoIterator<Item = &'a DailyRecord>,
        F: Fn(&DailyRecord) -> Option<f64>,
    {
        let (sum, count) = records
            .into_iter()
            .filter_map(|r| metric(r))
            .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));

        if count == 0 {
            None
        } else {
            Some(sum / count as f64)
        }
    }

    pub fn averages(&self, series: &MatchedSeries) -> Averages {
        let rounded = |metric: fn(&DailyRecord) -> Option<f64>, decimals: u32| {
            Self::mean_of(series.records(), metric).map(|v| round_half_up(v, decimals))
        };

        Averages {
            high_f: rounded(|r| r.temperature_max, 0),
            low_f: rounded(|r| r.temperature_min, 0),
            precip_in: rounded(|r| r.precipitation, 2),
            wind_mph: rounded(|r| r.windspeed_max, 0),
            humidity_pct: rounded(|r| r.relative_humidity, 0),
        }
    }

    pub fn summarize(&self, series: &MatchedSeries, location: Coordinate) -> Result<TypicalDaySummary> {
        if series.is_empty() {
            return Err(ProcessingError::NoData(format!(
                "no samples for {} in {}-{}",
                series.day, series.window.start_year, series.window.end_year
            )));
        }

        let averages = self.averages(series);
        tracing::debug!(
            day = %series.day,
            years = series.len(),
            missing_years = series.missing_years,
            "Averaged typical day"
        );

        Ok(TypicalDaySummary {
            location,
            date_of_year: series.day,
            period: Period {
                start: series.window.start_year,
                end: series.window.end_year,
                years: series.len(),
            },
            averages,
            units: Units::default(),
            coverage: Coverage {
                missing_years: series.missing_years,
                leap_handled: series.leap_handled,
            },
        })
    }
}

impl Default for TypicalDayAverager {
    fn default() -> Self {
        Self::new()
    }
}
