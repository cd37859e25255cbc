use chrono::NaiveDate;

use crate::config::AnalysisConfig;
use crate::error::Result;
use crate::models::{Coordinate, TypicalDaySummary, WeatherAnalysisResponse};
use crate::processors::{
    parse_target_date, CalendarResolver, MatchedSeries, ProbabilityAggregator, ResolvedCalendar,
    ThresholdClassifier, TypicalDayAverager, UnitNormalizer, YearSeriesMatcher,
};
use crate::readers::{ArchiveQuery, ArchiveSeries};

/// Where and when to look
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalysisRequest {
    pub coordinate: Coordinate,
    pub date: NaiveDate,
    /// The window covers the full years before this one
    pub reference_year: i32,
}

impl AnalysisRequest {
    /// Out-of-range coordinates are clamped, not rejected
    pub fn new(lat: f64, lon: f64, date: NaiveDate, reference_year: i32) -> Self {
        if Coordinate::was_clamped(lat, lon) {
            tracing::warn!(lat, lon, "Coordinate out of range, clamping");
        }

        Self {
            coordinate: Coordinate::new(lat, lon),
            date,
            reference_year,
        }
    }

    pub fn parse(lat: f64, lon: f64, date: &str, reference_year: i32) -> Result<Self> {
        Ok(Self::new(lat, lon, parse_target_date(date)?, reference_year))
    }
}

/// Runs the resolve, match, normalize, classify pipeline over an archive series
pub struct WeatherAnalyzer {
    config: AnalysisConfig,
}

impl WeatherAnalyzer {
    pub fn new() -> Self {
        Self {
            config: AnalysisConfig::default(),
        }
    }

    pub fn with_config(config: AnalysisConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    pub fn resolve(&self, request: &AnalysisRequest) -> Result<ResolvedCalendar> {
        CalendarResolver::new(self.config.window_years)
            .resolve_date(request.date, request.reference_year)
    }

    /// The archive request that covers `request`
    pub fn query(&self, request: &AnalysisRequest) -> Result<ArchiveQuery> {
        let resolved = self.resolve(request)?;
        Ok(ArchiveQuery::new(request.coordinate, resolved.window)
            .with_timezone(&self.config.timezone))
    }

    /// One imperial-unit sample per year in the window
    pub fn matched_series(
        &self,
        request: &AnalysisRequest,
        series: &ArchiveSeries,
    ) -> Result<MatchedSeries> {
        let resolved = self.resolve(request)?;
        let matched =
            YearSeriesMatcher::new().match_years(&series.records, resolved.day, resolved.window)?;

        tracing::debug!(
            day = %resolved.day,
            start_year = resolved.window.start_year,
            end_year = resolved.window.end_year,
            matched = matched.len(),
            missing_years = matched.missing_years,
            "Matched archive records"
        );

        Ok(UnitNormalizer::new(&series.units).normalize_series(matched))
    }

    pub fn analyze(
        &self,
        request: &AnalysisRequest,
        series: &ArchiveSeries,
    ) -> Result<WeatherAnalysisResponse> {
        let matched = self.matched_series(request, series)?;

        let classified =
            ThresholdClassifier::new(self.config.thresholds.clone()).classify_series(&matched);
        let response =
            ProbabilityAggregator::new(self.config.thresholds.clone()).aggregate(classified)?;

        tracing::info!(
            location = %request.coordinate,
            day = %matched.day,
            data_points = response.data_points,
            missing_years = matched.missing_years,
            "Analysis complete"
        );

        Ok(response)
    }

    pub fn typical_day(
        &self,
        request: &AnalysisRequest,
        series: &ArchiveSeries,
    ) -> Result<TypicalDaySummary> {
        let matched = self.matched_series(request, series)?;
        let summary = TypicalDayAverager::new().summarize(&matched, request.coordinate)?;

        tracing::info!(
            location = %request.coordinate,
            day = %summary.date_of_year,
            years = summary.period.years,
            "Typical day complete"
        );

        Ok(summary)
    }
}

impl Default for WeatherAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Thresholds;
    use crate::models::{Category, DailyRecord};
    use crate::readers::ArchiveUnits;
    use pretty_assertions::assert_eq;

    fn imperial_series(years: std::ops::Range<i32>, tmax: f64) -> ArchiveSeries {
        let records = years
            .map(|year| {
                DailyRecord::builder(NaiveDate::from_ymd_opt(year, 7, 4).unwrap())
                    .temperatures(65.0, tmax)
                    .precipitation(0.0)
                    .windspeed_max(8.0)
                    .relative_humidity(50.0)
                    .build()
            })
            .collect();
        ArchiveSeries::new(records, ArchiveUnits::imperial())
    }

    fn july_fourth_request() -> AnalysisRequest {
        AnalysisRequest::parse(40.0, -105.0, "2025-07-04", 2025).unwrap()
    }

    #[test]
    fn test_request_clamps_coordinates() {
        let request =
            AnalysisRequest::new(95.0, -200.0, NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(), 2025);
        assert_eq!(request.coordinate.lat, 90.0);
        assert_eq!(request.coordinate.lon, -180.0);
    }

    #[test]
    fn test_request_rejects_bad_date() {
        assert!(AnalysisRequest::parse(0.0, 0.0, "July 4th", 2025).is_err());
    }

    #[test]
    fn test_analyze_default_window() {
        let analyzer = WeatherAnalyzer::new();
        let response = analyzer
            .analyze(&july_fourth_request(), &imperial_series(2005..2025, 95.0))
            .unwrap();

        assert_eq!(response.data_points, 20);
        assert_eq!(response.percentage(Category::VeryHot), Some(100.0));
        assert_eq!(response.percentage(Category::VeryCold), Some(0.0));
    }

    #[test]
    fn test_analyze_with_custom_thresholds() {
        let config = AnalysisConfig::default().with_thresholds(Thresholds {
            hot_f: 100.0,
            ..Thresholds::default()
        });
        let response = WeatherAnalyzer::with_config(config)
            .analyze(&july_fourth_request(), &imperial_series(2005..2025, 95.0))
            .unwrap();

        assert_eq!(response.percentage(Category::VeryHot), Some(0.0));
        assert_eq!(response.detail(Category::VeryHot).unwrap().threshold, "> 100°F");
    }

    #[test]
    fn test_analyze_outside_window_is_no_data() {
        let err = WeatherAnalyzer::new()
            .analyze(&july_fourth_request(), &imperial_series(1980..1990, 95.0))
            .unwrap_err();
        assert!(err.is_no_data());
    }

    #[test]
    fn test_query_covers_window() {
        let analyzer = WeatherAnalyzer::with_config(AnalysisConfig::default().with_window_years(5));
        let query = analyzer.query(&july_fourth_request()).unwrap();

        assert_eq!(query.window.start_year, 2020);
        assert_eq!(query.window.end_year, 2024);
        assert_eq!(query.timezone, "UTC");
    }

    #[test]
    fn test_extreme_reference_year_is_an_error() {
        let request = AnalysisRequest::parse(40.0, -105.0, "2025-07-04", i32::MIN).unwrap();
        let analyzer = WeatherAnalyzer::new();

        assert!(analyzer.query(&request).is_err());
        assert!(analyzer
            .analyze(&request, &imperial_series(2005..2025, 95.0))
            .is_err());
    }

    #[test]
    fn test_typical_day_from_metric_archive() {
        let records = (2015..2025)
            .map(|year| {
                DailyRecord::builder(NaiveDate::from_ymd_opt(year, 7, 4).unwrap())
                    .temperatures(20.0, 30.0)
                    .precipitation(2.54)
                    .windspeed_max(16.0934)
                    .relative_humidity(55.0)
                    .build()
            })
            .collect();
        let series = ArchiveSeries::new(records, ArchiveUnits::default());

        let summary = WeatherAnalyzer::with_config(AnalysisConfig::default().with_window_years(10))
            .typical_day(&july_fourth_request(), &series)
            .unwrap();

        assert_eq!(summary.period.years, 10);
        assert_eq!(summary.averages.high_f, Some(86.0));
        assert_eq!(summary.averages.low_f, Some(68.0));
        assert_eq!(summary.averages.precip_in, Some(0.1));
        assert_eq!(summary.averages.wind_mph, Some(10.0));
        assert_eq!(summary.averages.humidity_pct, Some(55.0));
        assert_eq!(summary.coverage.missing_years, 0);
    }
}
