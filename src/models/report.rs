use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{ProcessingError, Result};
use crate::models::{CalendarDay, Category, ClassifiedRecord, Coordinate};
use crate::utils::constants::{
    TREND_STABLE_BAND, UNIT_FAHRENHEIT, UNIT_INCHES, UNIT_MPH, UNIT_PERCENT,
};

/// Exceedance odds for one condition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProbabilityDetail {
    pub percentage: f64,
    pub count: usize,
    pub total: usize,
    pub threshold: String,
}

impl ProbabilityDetail {
    /// `percentage = 100 * count / total`; a zero total has no odds to report
    pub fn from_counts(count: usize, total: usize, threshold: String) -> Result<Self> {
        if total == 0 {
            return Err(ProcessingError::NoData(format!(
                "no usable samples for threshold {}",
                threshold
            )));
        }
        if count > total {
            return Err(ProcessingError::InvalidFormat(format!(
                "count {} exceeds total {}",
                count, total
            )));
        }

        Ok(Self {
            percentage: 100.0 * count as f64 / total as f64,
            count,
            total,
            threshold,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Increasing,
    Decreasing,
    Stable,
}

impl TrendDirection {
    /// Classify a percentage-point change; anything inside the stable band is noise
    pub fn classify(change_percent: f64) -> Self {
        if change_percent.abs() < TREND_STABLE_BAND {
            TrendDirection::Stable
        } else if change_percent > 0.0 {
            TrendDirection::Increasing
        } else {
            TrendDirection::Decreasing
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            TrendDirection::Increasing => "↑",
            TrendDirection::Decreasing => "↓",
            TrendDirection::Stable => "→",
        }
    }
}

/// Second-half odds minus first-half odds for one condition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendEntry {
    pub category: Category,
    pub trend: TrendDirection,
    pub change_percent: f64,
}

/// Per-condition percentages inside a single year, for charting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearlyTrend {
    pub year: i32,
    #[serde(flatten)]
    pub percentages: BTreeMap<Category, f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherAnalysisResponse {
    pub probability: BTreeMap<Category, f64>,
    pub probability_details: BTreeMap<Category, ProbabilityDetail>,
    pub trend_analysis: Vec<TrendEntry>,
    pub yearly_trends: Vec<YearlyTrend>,
    pub historical_data: Vec<ClassifiedRecord>,
    pub data_points: usize,
}

impl WeatherAnalysisResponse {
    /// Odds for a condition, `None` when no year could decide it
    pub fn percentage(&self, category: Category) -> Option<f64> {
        self.probability.get(&category).copied()
    }

    pub fn detail(&self, category: Category) -> Option<&ProbabilityDetail> {
        self.probability_details.get(&category)
    }

    pub fn trend(&self, category: Category) -> Option<&TrendEntry> {
        self.trend_analysis.iter().find(|t| t.category == category)
    }

    pub fn summary(&self) -> String {
        let mut summary = String::new();

        summary.push_str(&format!(
            "Historical Odds ({} years of data)\n",
            self.data_points
        ));
        for category in Category::ALL {
            match self.detail(category) {
                Some(detail) => summary.push_str(&format!(
                    "- {:<19} {:>5.1}%  ({}/{} years, {})\n",
                    category.label(),
                    detail.percentage,
                    detail.count,
                    detail.total,
                    detail.threshold
                )),
                None => summary.push_str(&format!(
                    "- {:<19} no data\n",
                    category.label()
                )),
            }
        }

        if !self.trend_analysis.is_empty() {
            summary.push_str("\nTrend (second half vs first half):\n");
            for entry in &self.trend_analysis {
                summary.push_str(&format!(
                    "- {:<19} {} {:+.1} pts ({:?})\n",
                    entry.category.label(),
                    entry.trend.symbol(),
                    entry.change_percent,
                    entry.trend
                ));
            }
        }

        summary
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    pub start: i32,
    pub end: i32,
    /// Years that contributed a sample
    pub years: usize,
}

/// Mean values for the typical day; `None` means no year had a reading
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Averages {
    pub high_f: Option<f64>,
    pub low_f: Option<f64>,
    pub precip_in: Option<f64>,
    pub wind_mph: Option<f64>,
    pub humidity_pct: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Units {
    pub high: String,
    pub low: String,
    pub precip: String,
    pub wind: String,
    pub humidity: String,
}

impl Default for Units {
    fn default() -> Self {
        Self {
            high: UNIT_FAHRENHEIT.to_string(),
            low: UNIT_FAHRENHEIT.to_string(),
            precip: UNIT_INCHES.to_string(),
            wind: UNIT_MPH.to_string(),
            humidity: UNIT_PERCENT.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coverage {
    pub missing_years: usize,
    pub leap_handled: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypicalDaySummary {
    pub location: Coordinate,
    pub date_of_year: CalendarDay,
    pub period: Period,
    pub averages: Averages,
    pub units: Units,
    pub coverage: Coverage,
}

impl TypicalDaySummary {
    pub fn summary(&self) -> String {
        let show = |value: Option<f64>, unit: &str, decimals: usize| match value {
            Some(v) => format!("{:.*}{}", decimals, v, unit),
            None => "No valid measurements".to_string(),
        };

        let mut notes = Vec::new();
        if self.coverage.missing_years > 0 {
            notes.push(format!("{} years missing", self.coverage.missing_years));
        }
        if self.coverage.leap_handled {
            notes.push("Feb 28 used for non-leap years".to_string());
        }
        let coverage = if notes.is_empty() {
            "complete".to_string()
        } else {
            notes.join(", ")
        };

        format!(
            "Typical {} ({})\n\
            Location: {}\n\
            Period: {} to {} ({} years sampled)\n\
            - High: {}\n\
            - Low: {}\n\
            - Precipitation: {}\n\
            - Wind: {}\n\
            - Humidity: {}\n\
            Coverage: {}",
            self.date_of_year,
            self.date_of_year.season().display_name(),
            self.location,
            self.period.start,
            self.period.end,
            self.period.years,
            show(self.averages.high_f, &self.units.high, 0),
            show(self.averages.low_f, &self.units.low, 0),
            show(self.averages.precip_in, &format!(" {}", self.units.precip), 2),
            show(self.averages.wind_mph, &format!(" {}", self.units.wind), 0),
            show(self.averages.humidity_pct, &self.units.humidity, 0),
            coverage
        )
    }
}
