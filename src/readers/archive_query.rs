use url::Url;

use crate::error::Result;
use crate::models::{Coordinate, YearWindow};
use crate::utils::constants::{
    ARCHIVE_BASE_URL, DEFAULT_TIMEZONE, FIELD_HUMIDITY_MEAN, FIELD_PRECIPITATION, FIELD_TEMP_MAX,
    FIELD_TEMP_MIN, FIELD_WIND_MAX,
};

/// The daily series request handed to whatever fetches archive data
#[derive(Debug, Clone, PartialEq)]
pub struct ArchiveQuery {
    pub coordinate: Coordinate,
    pub window: YearWindow,
    pub timezone: String,
    /// Ask the archive for °F / inch / mph instead of its metric defaults
    pub imperial_units: bool,
}

impl ArchiveQuery {
    pub fn new(coordinate: Coordinate, window: YearWindow) -> Self {
        Self {
            coordinate,
            window,
            timezone: DEFAULT_TIMEZONE.to_string(),
            imperial_units: false,
        }
    }

    pub fn with_timezone(mut self, timezone: &str) -> Self {
        self.timezone = timezone.to_string();
        self
    }

    pub fn with_imperial_units(mut self, imperial_units: bool) -> Self {
        self.imperial_units = imperial_units;
        self
    }

    pub fn daily_fields() -> [&'static str; 5] {
        [
            FIELD_TEMP_MAX,
            FIELD_TEMP_MIN,
            FIELD_PRECIPITATION,
            FIELD_WIND_MAX,
            FIELD_HUMIDITY_MEAN,
        ]
    }

    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("latitude", self.coordinate.lat.to_string()),
            ("longitude", self.coordinate.lon.to_string()),
            ("start_date", format!("{}-01-01", self.window.start_year)),
            ("end_date", format!("{}-12-31", self.window.end_year)),
            ("daily", Self::daily_fields().join(",")),
            ("timezone", self.timezone.clone()),
        ];

        if self.imperial_units {
            pairs.push(("temperature_unit", "fahrenheit".to_string()));
            pairs.push(("wind_speed_unit", "mph".to_string()));
            pairs.push(("precipitation_unit", "inch".to_string()));
        }

        pairs
    }

    /// Full archive URL with every query pair form-encoded
    pub fn url(&self) -> Result<Url> {
        let mut url = Url::parse(ARCHIVE_BASE_URL)?;
        url.query_pairs_mut()
            .extend_pairs(self.query_pairs().iter().map(|(key, value)| (*key, value.as_str())));
        Ok(url)
    }
}
