use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{ProcessingError, Result};
use crate::models::record::finite;
use crate::models::DailyRecord;

/// Per-field unit declarations as sent by the archive
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArchiveUnits {
    pub temperature_2m_max: String,
    pub temperature_2m_min: String,
    pub precipitation_sum: String,
    #[serde(alias = "windspeed_10m_max")]
    pub wind_speed_10m_max: String,
    pub relative_humidity_2m_mean: String,
}

impl Default for ArchiveUnits {
    // What the archive sends when no unit parameters are requested
    fn default() -> Self {
        Self {
            temperature_2m_max: "°C".to_string(),
            temperature_2m_min: "°C".to_string(),
            precipitation_sum: "mm".to_string(),
            wind_speed_10m_max: "km/h".to_string(),
            relative_humidity_2m_mean: "%".to_string(),
        }
    }
}

impl ArchiveUnits {
    pub fn imperial() -> Self {
        Self {
            temperature_2m_max: "°F".to_string(),
            temperature_2m_min: "°F".to_string(),
            precipitation_sum: "inch".to_string(),
            wind_speed_10m_max: "mph".to_string(),
            relative_humidity_2m_mean: "%".to_string(),
        }
    }
}

/// Column-oriented daily block; every array is indexed like `time`
#[derive(Debug, Clone, Default, Deserialize)]
struct DailyColumns {
    #[serde(default)]
    time: Vec<String>,
    #[serde(default)]
    temperature_2m_max: Vec<Option<f64>>,
    #[serde(default)]
    temperature_2m_min: Vec<Option<f64>>,
    #[serde(default)]
    precipitation_sum: Vec<Option<f64>>,
    #[serde(default, alias = "windspeed_10m_max")]
    wind_speed_10m_max: Vec<Option<f64>>,
    #[serde(default)]
    relative_humidity_2m_mean: Vec<Option<f64>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ArchiveResponse {
    #[serde(default)]
    daily: Option<DailyColumns>,
    #[serde(default)]
    daily_units: Option<ArchiveUnits>,
}

/// Flattened archive series: one record per day plus the declared units
#[derive(Debug, Clone, PartialEq)]
pub struct ArchiveSeries {
    pub records: Vec<DailyRecord>,
    pub units: ArchiveUnits,
}

impl ArchiveSeries {
    pub fn new(records: Vec<DailyRecord>, units: ArchiveUnits) -> Self {
        Self { records, units }
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }
}

pub struct ArchiveReader {
    skip_bad_dates: bool,
}

impl ArchiveReader {
    pub fn new() -> Self {
        Self {
            skip_bad_dates: true,
        }
    }

    pub fn with_skip_bad_dates(skip_bad_dates: bool) -> Self {
        Self { skip_bad_dates }
    }

    /// Read an archive response saved to disk
    pub fn read_file(&self, path: &Path) -> Result<ArchiveSeries> {
        let file = File::open(path)?;
        let mut content = String::new();
        BufReader::new(file).read_to_string(&mut content)?;
        self.read_str(&content)
    }

    pub fn read_str(&self, json: &str) -> Result<ArchiveSeries> {
        let response: ArchiveResponse = serde_json::from_str(json)?;
        self.into_series(response)
    }

    fn into_series(&self, response: ArchiveResponse) -> Result<ArchiveSeries> {
        let units = response.daily_units.unwrap_or_default();
        let daily = response.daily.unwrap_or_default();

        let mut records = Vec::with_capacity(daily.time.len());
        let mut skipped = 0usize;

        for (index, time) in daily.time.iter().enumerate() {
            let date = match parse_archive_date(time) {
                Ok(date) => date,
                Err(_) if self.skip_bad_dates => {
                    tracing::warn!(index, time = %time, "Skipping archive row with bad date");
                    skipped += 1;
                    continue;
                }
                Err(e) => return Err(e),
            };

            let mut record = DailyRecord::empty(date);
            record.temperature_max = column_value(&daily.temperature_2m_max, index);
            record.temperature_min = column_value(&daily.temperature_2m_min, index);
            record.precipitation = column_value(&daily.precipitation_sum, index);
            record.windspeed_max = column_value(&daily.wind_speed_10m_max, index);
            record.relative_humidity = column_value(&daily.relative_humidity_2m_mean, index);
            records.push(record);
        }

        tracing::debug!(
            records = records.len(),
            skipped,
            "Read archive daily series"
        );

        Ok(ArchiveSeries::new(records, units))
    }
}

impl Default for ArchiveReader {
    fn default() -> Self {
        Self::new()
    }
}

/// A short or missing column reads as a sensor gap
fn column_value(column: &[Option<f64>], index: usize) -> Option<f64> {
    finite(column.get(index).copied().flatten())
}

/// Archive dates are `YYYY-MM-DD`; hourly-style `YYYY-MM-DDTHH:MM` is tolerated
fn parse_archive_date(time: &str) -> Result<NaiveDate> {
    let day_part = time.trim().split('T').next().unwrap_or_default();
    NaiveDate::parse_from_str(day_part, "%Y-%m-%d").map_err(|_| {
        ProcessingError::InvalidFormat(format!("Invalid archive date: '{}'", time))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SAMPLE: &str = r#"{
        "latitude": 40.0,
        "longitude": -105.0,
        "daily_units": {
            "time": "iso8601",
            "temperature_2m_max": "°C",
            "temperature_2m_min": "°C",
            "precipitation_sum": "mm",
            "wind_speed_10m_max": "km/h",
            "relative_humidity_2m_mean": "%"
        },
        "daily": {
            "time": ["2020-07-03", "2020-07-04", "2020-07-05"],
            "temperature_2m_max": [30.1, 32.5, null],
            "temperature_2m_min": [15.0, 16.2, 14.9],
            "precipitation_sum": [0.0, 2.4, 0.3],
            "wind_speed_10m_max": [10.0, null, 22.1],
            "relative_humidity_2m_mean": [40, 45, 50]
        }
    }"#;

    #[test]
    fn test_read_sample() {
        let series = ArchiveReader::new().read_str(SAMPLE).unwrap();

        assert_eq!(series.len(), 3);
        assert_eq!(series.units.wind_speed_10m_max, "km/h");

        let july_4 = &series.records[1];
        assert_eq!(july_4.date, NaiveDate::from_ymd_opt(2020, 7, 4).unwrap());
        assert_eq!(july_4.year, 2020);
        assert_eq!(july_4.temperature_max, Some(32.5));
        assert_eq!(july_4.windspeed_max, None);
        assert_eq!(july_4.relative_humidity, Some(45.0));

        assert_eq!(series.records[2].temperature_max, None);
    }

    #[test]
    fn test_legacy_wind_field_name() {
        let json = r#"{
            "daily_units": {"windspeed_10m_max": "mph"},
            "daily": {"time": ["2021-01-01"], "windspeed_10m_max": [31.0]}
        }"#;
        let series = ArchiveReader::new().read_str(json).unwrap();

        assert_eq!(series.records[0].windspeed_max, Some(31.0));
        assert_eq!(series.units.wind_speed_10m_max, "mph");
        // Undeclared fields fall back to archive defaults
        assert_eq!(series.units.temperature_2m_max, "°C");
    }

    #[test]
    fn test_short_columns_are_gaps() {
        let json = r#"{
            "daily": {
                "time": ["2021-01-01", "2021-01-02"],
                "temperature_2m_max": [5.0]
            }
        }"#;
        let series = ArchiveReader::new().read_str(json).unwrap();

        assert_eq!(series.records[0].temperature_max, Some(5.0));
        assert_eq!(series.records[1].temperature_max, None);
        assert_eq!(series.records[1].precipitation, None);
    }

    #[test]
    fn test_missing_daily_block_is_empty() {
        let series = ArchiveReader::new().read_str("{}").unwrap();
        assert!(series.is_empty());
    }

    #[test]
    fn test_bad_dates() {
        let json = r#"{"daily": {"time": ["2021-01-01", "not-a-date"]}}"#;

        let series = ArchiveReader::new().read_str(json).unwrap();
        assert_eq!(series.len(), 1);

        let strict = ArchiveReader::with_skip_bad_dates(false);
        assert!(strict.read_str(json).is_err());
    }

    #[test]
    fn test_malformed_json() {
        assert!(ArchiveReader::new().read_str("{\"daily\": [").is_err());
    }

    #[test]
    fn test_read_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "{}", SAMPLE).unwrap();

        let series = ArchiveReader::new().read_file(temp_file.path()).unwrap();
        assert_eq!(series.len(), 3);
    }
}
