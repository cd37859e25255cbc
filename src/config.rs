//! Analysis settings
//!
//! Layered in priority order (highest last):
//! 1. Built-in defaults
//! 2. Optional config file (TOML, JSON or YAML, picked by extension)
//! 3. Environment variables, e.g. `WEATHER_ODDS_WINDOW_YEARS=30` or
//!    `WEATHER_ODDS_THRESHOLDS__HOT_F=95`

use std::path::Path;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{ProcessingError, Result};
use crate::utils::constants::{
    CONFIG_ENV_PREFIX, DEFAULT_TIMEZONE, DEFAULT_WINDOW_YEARS, UNCOMFORTABLE_HUMIDITY_PCT,
    UNCOMFORTABLE_TEMP_F, VERY_COLD_F, VERY_HOT_F, VERY_WET_IN, VERY_WINDY_MPH,
};

/// Condition thresholds, all in imperial units
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct Thresholds {
    #[validate(range(min = -100.0, max = 150.0))]
    pub hot_f: f64,

    #[validate(range(min = -100.0, max = 150.0))]
    pub cold_f: f64,

    #[validate(range(min = 0.0, max = 300.0))]
    pub windy_mph: f64,

    #[validate(range(min = 0.0, max = 100.0))]
    pub wet_in: f64,

    #[validate(range(min = -100.0, max = 150.0))]
    pub uncomfortable_temp_f: f64,

    #[validate(range(min = 0.0, max = 100.0))]
    pub uncomfortable_humidity_pct: f64,
}

impl Thresholds {
    /// Names of thresholds holding NaN or an infinity. Range validation
    /// cannot see NaN, so this runs alongside it.
    pub fn non_finite_fields(&self) -> Vec<&'static str> {
        [
            ("hot_f", self.hot_f),
            ("cold_f", self.cold_f),
            ("windy_mph", self.windy_mph),
            ("wet_in", self.wet_in),
            ("uncomfortable_temp_f", self.uncomfortable_temp_f),
            ("uncomfortable_humidity_pct", self.uncomfortable_humidity_pct),
        ]
        .into_iter()
        .filter(|(_, value)| !value.is_finite())
        .map(|(name, _)| name)
        .collect()
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            hot_f: VERY_HOT_F,
            cold_f: VERY_COLD_F,
            windy_mph: VERY_WINDY_MPH,
            wet_in: VERY_WET_IN,
            uncomfortable_temp_f: UNCOMFORTABLE_TEMP_F,
            uncomfortable_humidity_pct: UNCOMFORTABLE_HUMIDITY_PCT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct AnalysisConfig {
    #[validate(range(min = 1, max = 100))]
    pub window_years: u32,

    #[validate(length(min = 1))]
    pub timezone: String,

    #[validate(nested)]
    pub thresholds: Thresholds,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            window_years: DEFAULT_WINDOW_YEARS,
            timezone: DEFAULT_TIMEZONE.to_string(),
            thresholds: Thresholds::default(),
        }
    }
}

impl AnalysisConfig {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_prefix(path, CONFIG_ENV_PREFIX)
    }

    /// `load` with a custom environment prefix
    pub fn load_with_prefix(path: Option<&Path>, env_prefix: &str) -> Result<Self> {
        let mut builder =
            config::Config::builder().add_source(config::Config::try_from(&Self::default())?);

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        }

        let settings = builder
            .add_source(
                config::Environment::with_prefix(env_prefix)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let loaded: AnalysisConfig = settings.try_deserialize()?;
        loaded.check()?;

        tracing::debug!(
            window_years = loaded.window_years,
            timezone = %loaded.timezone,
            "Loaded analysis configuration"
        );

        Ok(loaded)
    }

    /// Range checks plus finiteness of every threshold
    pub fn check(&self) -> Result<()> {
        self.validate()?;

        let non_finite = self.thresholds.non_finite_fields();
        if !non_finite.is_empty() {
            return Err(ProcessingError::Config(format!(
                "thresholds must be finite numbers: {}",
                non_finite.join(", ")
            )));
        }

        Ok(())
    }

    pub fn with_window_years(mut self, window_years: u32) -> Self {
        self.window_years = window_years;
        self
    }

    pub fn with_thresholds(mut self, thresholds: Thresholds) -> Self {
        self.thresholds = thresholds;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    #[test]
    fn test_default_config_is_valid() {
        let config = AnalysisConfig::default();

        assert!(config.validate().is_ok());
        assert_eq!(config.window_years, 20);
        assert_eq!(config.thresholds.hot_f, 90.0);
        assert_eq!(config.thresholds.wet_in, 0.5);
    }

    #[test]
    fn test_invalid_window_rejected() {
        let config = AnalysisConfig::default().with_window_years(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_thresholds_rejected() {
        let thresholds = Thresholds {
            uncomfortable_humidity_pct: 140.0,
            ..Thresholds::default()
        };
        let config = AnalysisConfig::default().with_thresholds(thresholds);

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_nan_threshold_rejected() {
        let thresholds = Thresholds {
            hot_f: f64::NAN,
            wet_in: f64::INFINITY,
            ..Thresholds::default()
        };
        let config = AnalysisConfig::default().with_thresholds(thresholds);

        let err = config.check().unwrap_err();
        assert!(err.to_string().contains("hot_f"));
        assert!(err.to_string().contains("wet_in"));
        assert!(AnalysisConfig::default().check().is_ok());
    }

    #[test]
    fn test_env_overrides_file() {
        let mut file = Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "window_years = 10").unwrap();

        // Prefixes are unique per test so parallel tests do not see each other's variables
        std::env::set_var("WEATHER_ODDS_ENV_LAYER_WINDOW_YEARS", "30");
        std::env::set_var("WEATHER_ODDS_ENV_LAYER_THRESHOLDS__WINDY_MPH", "40");
        let loaded = AnalysisConfig::load_with_prefix(Some(file.path()), "WEATHER_ODDS_ENV_LAYER");
        std::env::remove_var("WEATHER_ODDS_ENV_LAYER_WINDOW_YEARS");
        std::env::remove_var("WEATHER_ODDS_ENV_LAYER_THRESHOLDS__WINDY_MPH");

        let config = loaded.unwrap();
        assert_eq!(config.window_years, 30);
        assert_eq!(config.thresholds.windy_mph, 40.0);
        assert_eq!(config.thresholds.hot_f, 90.0);
    }

    #[test]
    fn test_env_nan_threshold_rejected() {
        std::env::set_var("WEATHER_ODDS_ENV_NAN_THRESHOLDS__HOT_F", "NaN");
        let loaded = AnalysisConfig::load_with_prefix(None, "WEATHER_ODDS_ENV_NAN");
        std::env::remove_var("WEATHER_ODDS_ENV_NAN_THRESHOLDS__HOT_F");

        assert!(loaded.is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "window_years = 10").unwrap();
        writeln!(file, "[thresholds]").unwrap();
        writeln!(file, "hot_f = 95.0").unwrap();

        let config = AnalysisConfig::load(Some(file.path())).unwrap();

        assert_eq!(config.window_years, 10);
        assert_eq!(config.thresholds.hot_f, 95.0);
        // Untouched keys keep their defaults
        assert_eq!(config.thresholds.cold_f, 32.0);
        assert_eq!(config.timezone, "UTC");
    }

    #[test]
    fn test_load_rejects_invalid_file() {
        let mut file = Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "window_years = 500").unwrap();

        assert!(AnalysisConfig::load(Some(file.path())).is_err());
    }
}
