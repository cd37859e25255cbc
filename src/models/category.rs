use serde::{Deserialize, Serialize};

use crate::config::Thresholds;
use crate::models::record::{finite, DailyRecord};

/// The weather conditions whose historical odds are reported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Category {
    VeryHot,
    VeryCold,
    VeryWindy,
    VeryWet,
    VeryUncomfortable,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::VeryHot,
        Category::VeryCold,
        Category::VeryWindy,
        Category::VeryWet,
        Category::VeryUncomfortable,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Category::VeryHot => "veryHot",
            Category::VeryCold => "veryCold",
            Category::VeryWindy => "veryWindy",
            Category::VeryWet => "veryWet",
            Category::VeryUncomfortable => "veryUncomfortable",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::VeryHot => "Very Hot",
            Category::VeryCold => "Very Cold",
            Category::VeryWindy => "Very Windy",
            Category::VeryWet => "Very Wet",
            Category::VeryUncomfortable => "Very Uncomfortable",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            Category::VeryHot | Category::VeryCold => "°F",
            Category::VeryWindy => "mph",
            Category::VeryWet => "in",
            Category::VeryUncomfortable => "index",
        }
    }

    pub fn source(&self) -> &'static str {
        match self {
            Category::VeryHot => "NOAA Heat Index Guidelines",
            Category::VeryCold => "NOAA Freeze Warning Criteria",
            Category::VeryWindy => "National Weather Service Wind Advisory",
            Category::VeryWet => "NOAA Heavy Rain Criteria",
            Category::VeryUncomfortable => "NOAA Heat Index & Comfort Guidelines",
        }
    }

    /// Short threshold label, e.g. "> 90°F"
    pub fn threshold_description(&self, thresholds: &Thresholds) -> String {
        match self {
            Category::VeryHot => format!("> {}{}", thresholds.hot_f, self.unit()),
            Category::VeryCold => format!("< {}{}", thresholds.cold_f, self.unit()),
            Category::VeryWindy => format!("> {}{}", thresholds.windy_mph, self.unit()),
            Category::VeryWet => format!("> {}{}", thresholds.wet_in, self.unit()),
            Category::VeryUncomfortable => "Multiple criteria".to_string(),
        }
    }

    pub fn description(&self, thresholds: &Thresholds) -> String {
        match self {
            Category::VeryHot => format!(
                "Days where daily max temperature exceeds {}°F",
                thresholds.hot_f
            ),
            Category::VeryCold => format!(
                "Days where daily min temperature falls below {}°F",
                thresholds.cold_f
            ),
            Category::VeryWindy => format!(
                "Days where max wind speed exceeds {} mph",
                thresholds.windy_mph
            ),
            Category::VeryWet => format!(
                "Days with total precipitation exceeding {} inches",
                thresholds.wet_in
            ),
            Category::VeryUncomfortable => format!(
                "Days with max temp > {}°F and humidity > {}%, or wind > {} mph with rain > {} in",
                thresholds.uncomfortable_temp_f,
                thresholds.uncomfortable_humidity_pct,
                thresholds.windy_mph,
                thresholds.wet_in
            ),
        }
    }

    /// Whether `record` has the readings this condition is judged on.
    /// The composite needs at least one complete heat/humidity or wind/rain pair.
    pub fn is_decidable(&self, record: &DailyRecord) -> bool {
        let has = |v: Option<f64>| finite(v).is_some();
        match self {
            Category::VeryHot => has(record.temperature_max),
            Category::VeryCold => has(record.temperature_min),
            Category::VeryWindy => has(record.windspeed_max),
            Category::VeryWet => has(record.precipitation),
            Category::VeryUncomfortable => {
                (has(record.temperature_max) && has(record.relative_humidity))
                    || (has(record.windspeed_max) && has(record.precipitation))
            }
        }
    }

    /// Evaluate the condition; `None` when the record cannot decide it
    pub fn evaluate(&self, record: &DailyRecord, thresholds: &Thresholds) -> Option<bool> {
        let above = |v: Option<f64>, limit: f64| finite(v).map(|v| v > limit);
        let below = |v: Option<f64>, limit: f64| finite(v).map(|v| v < limit);

        match self {
            Category::VeryHot => above(record.temperature_max, thresholds.hot_f),
            Category::VeryCold => below(record.temperature_min, thresholds.cold_f),
            Category::VeryWindy => above(record.windspeed_max, thresholds.windy_mph),
            Category::VeryWet => above(record.precipitation, thresholds.wet_in),
            Category::VeryUncomfortable => {
                let muggy = both(
                    above(record.temperature_max, thresholds.uncomfortable_temp_f),
                    above(
                        record.relative_humidity,
                        thresholds.uncomfortable_humidity_pct,
                    ),
                );
                let stormy = both(
                    above(record.windspeed_max, thresholds.windy_mph),
                    above(record.precipitation, thresholds.wet_in),
                );
                match (muggy, stormy) {
                    (None, None) => None,
                    (muggy, stormy) => Some(muggy.unwrap_or(false) || stormy.unwrap_or(false)),
                }
            }
        }
    }

    /// Evaluate with missing readings counting as "not met"
    pub fn meets(&self, record: &DailyRecord, thresholds: &Thresholds) -> bool {
        self.evaluate(record, thresholds).unwrap_or(false)
    }
}

// A pair is only judged when both readings are present
fn both(a: Option<bool>, b: Option<bool>) -> Option<bool> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a && b),
        _ => None,
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
