use crate::utils::constants::{MAX_LAT, MAX_LON, MIN_LAT, MIN_LON};

/// Clamp a latitude into [-90, 90]; NaN becomes 0
pub fn clamp_latitude(latitude: f64) -> f64 {
    clamp_finite(latitude, MIN_LAT, MAX_LAT)
}

/// Clamp a longitude into [-180, 180]; NaN becomes 0
pub fn clamp_longitude(longitude: f64) -> f64 {
    clamp_finite(longitude, MIN_LON, MAX_LON)
}

fn clamp_finite(value: f64, min: f64, max: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(min, max)
}
