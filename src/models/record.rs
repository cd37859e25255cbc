use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::models::Category;

/// One day of archive observations. Any measurement may be missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyRecord {
    pub year: i32,
    pub date: NaiveDate,
    pub temperature_max: Option<f64>,
    pub temperature_min: Option<f64>,
    pub precipitation: Option<f64>,
    pub windspeed_max: Option<f64>,
    pub relative_humidity: Option<f64>,
}

impl DailyRecord {
    /// A record with no measurements; fill it in through `builder` or field access
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            date,
            temperature_max: None,
            temperature_min: None,
            precipitation: None,
            windspeed_max: None,
            relative_humidity: None,
        }
    }

    pub fn builder(date: NaiveDate) -> DailyRecordBuilder {
        DailyRecordBuilder::new(date)
    }
}

pub struct DailyRecordBuilder {
    record: DailyRecord,
}

impl DailyRecordBuilder {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            record: DailyRecord::empty(date),
        }
    }

    pub fn temperature_max(mut self, value: f64) -> Self {
        self.record.temperature_max = finite(Some(value));
        self
    }

    pub fn temperature_min(mut self, value: f64) -> Self {
        self.record.temperature_min = finite(Some(value));
        self
    }

    pub fn temperatures(self, min: f64, max: f64) -> Self {
        self.temperature_min(min).temperature_max(max)
    }

    pub fn precipitation(mut self, value: f64) -> Self {
        self.record.precipitation = finite(Some(value));
        self
    }

    pub fn windspeed_max(mut self, value: f64) -> Self {
        self.record.windspeed_max = finite(Some(value));
        self
    }

    pub fn relative_humidity(mut self, value: f64) -> Self {
        self.record.relative_humidity = finite(Some(value));
        self
    }

    pub fn build(self) -> DailyRecord {
        self.record
    }
}

/// Drop NaN and infinities; they count as missing readings
pub fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

/// A daily record tagged with the conditions it meets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifiedRecord {
    #[serde(flatten)]
    pub record: DailyRecord,
    pub meets_hot: bool,
    pub meets_cold: bool,
    pub meets_windy: bool,
    pub meets_wet: bool,
    pub meets_uncomfortable: bool,
}

impl ClassifiedRecord {
    pub fn year(&self) -> i32 {
        self.record.year
    }

    pub fn meets(&self, category: Category) -> bool {
        match category {
            Category::VeryHot => self.meets_hot,
            Category::VeryCold => self.meets_cold,
            Category::VeryWindy => self.meets_windy,
            Category::VeryWet => self.meets_wet,
            Category::VeryUncomfortable => self.meets_uncomfortable,
        }
    }

    /// Whether the record carries the readings needed to judge `category`
    pub fn is_decidable(&self, category: Category) -> bool {
        category.is_decidable(&self.record)
    }
}

/// The record picked for one year of the window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearlySample {
    pub year: i32,
    pub record: DailyRecord,
    /// Feb 28 standing in for Feb 29 in a non-leap year
    pub leap_substitute: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_builder_pattern() {
        let record = DailyRecord::builder(date(2023, 7, 15))
            .temperatures(68.0, 91.0)
            .precipitation(0.1)
            .windspeed_max(12.0)
            .relative_humidity(55.0)
            .build();

        assert_eq!(record.year, 2023);
        assert_eq!(record.temperature_max, Some(91.0));
        assert_eq!(record.temperature_min, Some(68.0));
        assert_eq!(record.relative_humidity, Some(55.0));
    }

    #[test]
    fn test_non_finite_values_are_missing() {
        let record = DailyRecord::builder(date(2023, 7, 15))
            .temperature_max(f64::NAN)
            .windspeed_max(f64::INFINITY)
            .build();

        assert_eq!(record.temperature_max, None);
        assert_eq!(record.windspeed_max, None);
    }

    #[test]
    fn test_classified_record_serializes_flat() {
        let classified = ClassifiedRecord {
            record: DailyRecord::builder(date(2020, 1, 15))
                .temperature_max(40.0)
                .build(),
            meets_hot: false,
            meets_cold: true,
            meets_windy: false,
            meets_wet: false,
            meets_uncomfortable: false,
        };

        let json = serde_json::to_value(&classified).unwrap();
        assert_eq!(json["year"], 2020);
        assert_eq!(json["date"], "2020-01-15");
        assert_eq!(json["temperature_max"], 40.0);
        assert!(json["precipitation"].is_null());
        assert_eq!(json["meetsCold"], true);
        assert_eq!(json["meetsHot"], false);
    }
}
