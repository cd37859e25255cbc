/// Trailing window length, in full calendar years
pub const DEFAULT_WINDOW_YEARS: u32 = 20;
pub const MAX_WINDOW_YEARS: u32 = 100;

/// Default condition thresholds (imperial units)
pub const VERY_HOT_F: f64 = 90.0;
pub const VERY_COLD_F: f64 = 32.0;
pub const VERY_WINDY_MPH: f64 = 25.0;
pub const VERY_WET_IN: f64 = 0.5;
pub const UNCOMFORTABLE_TEMP_F: f64 = 85.0;
pub const UNCOMFORTABLE_HUMIDITY_PCT: f64 = 70.0;

/// Percentage-point band inside which a split-half change counts as stable
pub const TREND_STABLE_BAND: f64 = 5.0;

/// Unit conversion factors
pub const MM_PER_INCH: f64 = 25.4;
pub const MPH_PER_MS: f64 = 2.237;
pub const MPH_PER_KMH: f64 = 0.621371;
pub const MPH_PER_KNOT: f64 = 1.150779;

/// Geographic bounds
pub const MIN_LAT: f64 = -90.0;
pub const MAX_LAT: f64 = 90.0;
pub const MIN_LON: f64 = -180.0;
pub const MAX_LON: f64 = 180.0;

/// Climate archive request defaults
pub const ARCHIVE_BASE_URL: &str = "https://archive-api.open-meteo.com/v1/archive";
pub const DEFAULT_TIMEZONE: &str = "UTC";

/// Archive daily field names
pub const FIELD_TEMP_MAX: &str = "temperature_2m_max";
pub const FIELD_TEMP_MIN: &str = "temperature_2m_min";
pub const FIELD_PRECIPITATION: &str = "precipitation_sum";
pub const FIELD_WIND_MAX: &str = "wind_speed_10m_max";
pub const FIELD_HUMIDITY_MEAN: &str = "relative_humidity_2m_mean";

/// Imperial output unit labels
pub const UNIT_FAHRENHEIT: &str = "°F";
pub const UNIT_INCHES: &str = "in";
pub const UNIT_MPH: &str = "mph";
pub const UNIT_PERCENT: &str = "%";

/// Environment prefix for configuration overrides
pub const CONFIG_ENV_PREFIX: &str = "WEATHER_ODDS";
