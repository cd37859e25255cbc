use crate::utils::constants::{MM_PER_INCH, MPH_PER_KMH, MPH_PER_KNOT, MPH_PER_MS};

/// Convert Celsius to Fahrenheit
///
/// # Examples
/// ```
/// use weather_odds::utils::units::celsius_to_fahrenheit;
///
/// assert_eq!(celsius_to_fahrenheit(100.0), 212.0);
/// ```
pub fn celsius_to_fahrenheit(celsius: f64) -> f64 {
    celsius * 9.0 / 5.0 + 32.0
}

pub fn fahrenheit_to_celsius(fahrenheit: f64) -> f64 {
    (fahrenheit - 32.0) * 5.0 / 9.0
}

pub fn mm_to_inches(mm: f64) -> f64 {
    mm / MM_PER_INCH
}

pub fn inches_to_mm(inches: f64) -> f64 {
    inches * MM_PER_INCH
}

pub fn ms_to_mph(metres_per_second: f64) -> f64 {
    metres_per_second * MPH_PER_MS
}

pub fn mph_to_ms(mph: f64) -> f64 {
    mph / MPH_PER_MS
}

pub fn kmh_to_mph(kmh: f64) -> f64 {
    kmh * MPH_PER_KMH
}

pub fn mph_to_kmh(mph: f64) -> f64 {
    mph / MPH_PER_KMH
}

pub fn knots_to_mph(knots: f64) -> f64 {
    knots * MPH_PER_KNOT
}

/// Round to `decimals` places, halves rounding towards positive infinity
///
/// `f64::round` sends -2.5 to -3; averages of sub-zero temperatures should
/// land on -2 instead.
pub fn round_half_up(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor + 0.5).floor() / factor
}
