use crate::models::record::finite;
use crate::models::DailyRecord;
use crate::processors::year_matcher::MatchedSeries;
use crate::readers::ArchiveUnits;
use crate::utils::units::{celsius_to_fahrenheit, kmh_to_mph, knots_to_mph, mm_to_inches, ms_to_mph};

/// Which physical quantity a value measures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conversion {
    Temperature,
    Precipitation,
    Wind,
    Humidity,
}

/// Unit labels the archive is known to emit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceUnit {
    Celsius,
    Fahrenheit,
    Millimetres,
    Inches,
    MetresPerSecond,
    KilometresPerHour,
    Knots,
    MilesPerHour,
    Percent,
}

impl SourceUnit {
    pub fn parse(unit: &str) -> Option<Self> {
        match unit.trim().to_lowercase().as_str() {
            "°c" | "c" | "celsius" | "degc" => Some(SourceUnit::Celsius),
            "°f" | "f" | "fahrenheit" | "degf" => Some(SourceUnit::Fahrenheit),
            "mm" | "millimeter" | "millimetre" => Some(SourceUnit::Millimetres),
            "inch" | "inches" | "in" => Some(SourceUnit::Inches),
            "m/s" | "ms⁻¹" | "ms-1" | "mps" => Some(SourceUnit::MetresPerSecond),
            "km/h" | "kmh" | "kph" => Some(SourceUnit::KilometresPerHour),
            "kn" | "kt" | "knots" => Some(SourceUnit::Knots),
            "mph" => Some(SourceUnit::MilesPerHour),
            "%" | "percent" => Some(SourceUnit::Percent),
            _ => None,
        }
    }

    /// Whether values in this unit can be converted for `kind`
    pub fn fits(&self, kind: Conversion) -> bool {
        matches!(
            (kind, self),
            (
                Conversion::Temperature,
                SourceUnit::Celsius | SourceUnit::Fahrenheit
            ) | (
                Conversion::Precipitation,
                SourceUnit::Millimetres | SourceUnit::Inches
            ) | (
                Conversion::Wind,
                SourceUnit::MetresPerSecond
                    | SourceUnit::KilometresPerHour
                    | SourceUnit::Knots
                    | SourceUnit::MilesPerHour
            ) | (Conversion::Humidity, _)
        )
    }
}

/// Convert an archive value to °F / inches / mph.
///
/// Values already in the target unit, and values in a unit that does not
/// fit `kind`, pass through unchanged. Humidity always passes through.
/// Missing and non-finite values stay missing.
pub fn convert_to_imperial(value: Option<f64>, unit: &str, kind: Conversion) -> Option<f64> {
    let value = finite(value)?;

    let converted = match (kind, SourceUnit::parse(unit)) {
        (Conversion::Humidity, _) => value,
        (Conversion::Temperature, Some(SourceUnit::Celsius)) => celsius_to_fahrenheit(value),
        (Conversion::Precipitation, Some(SourceUnit::Millimetres)) => mm_to_inches(value),
        (Conversion::Wind, Some(SourceUnit::MetresPerSecond)) => ms_to_mph(value),
        (Conversion::Wind, Some(SourceUnit::KilometresPerHour)) => kmh_to_mph(value),
        (Conversion::Wind, Some(SourceUnit::Knots)) => knots_to_mph(value),
        _ => value,
    };

    Some(converted)
}

/// Converts whole records using the units an archive response declared
pub struct UnitNormalizer {
    units: ArchiveUnits,
}

impl UnitNormalizer {
    pub fn new(units: &ArchiveUnits) -> Self {
        let declared = [
            (units.temperature_2m_max.as_str(), Conversion::Temperature),
            (units.temperature_2m_min.as_str(), Conversion::Temperature),
            (units.precipitation_sum.as_str(), Conversion::Precipitation),
            (units.wind_speed_10m_max.as_str(), Conversion::Wind),
        ];
        for (unit, kind) in declared {
            if !SourceUnit::parse(unit).is_some_and(|u| u.fits(kind)) {
                tracing::warn!(unit, ?kind, "Unrecognised unit, values passed through as-is");
            }
        }

        Self {
            units: units.clone(),
        }
    }

    pub fn normalize(&self, record: &DailyRecord) -> DailyRecord {
        let units = &self.units;
        DailyRecord {
            year: record.year,
            date: record.date,
            temperature_max: convert_to_imperial(
                record.temperature_max,
                &units.temperature_2m_max,
                Conversion::Temperature,
            ),
            temperature_min: convert_to_imperial(
                record.temperature_min,
                &units.temperature_2m_min,
                Conversion::Temperature,
            ),
            precipitation: convert_to_imperial(
                record.precipitation,
                &units.precipitation_sum,
                Conversion::Precipitation,
            ),
            windspeed_max: convert_to_imperial(
                record.windspeed_max,
                &units.wind_speed_10m_max,
                Conversion::Wind,
            ),
            relative_humidity: convert_to_imperial(
                record.relative_humidity,
                &units.relative_humidity_2m_mean,
                Conversion::Humidity,
            ),
        }
    }

    pub fn normalize_series(&self, series: MatchedSeries) -> MatchedSeries {
        series.map_records(|record| self.normalize(record))
    }
}
