use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::utils::coordinates::{clamp_latitude, clamp_longitude};

/// A geographic point, always held inside the valid lat/lon range
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
pub struct Coordinate {
    #[validate(range(min = -90.0, max = 90.0))]
    pub lat: f64,

    #[validate(range(min = -180.0, max = 180.0))]
    pub lon: f64,
}

impl Coordinate {
    /// Build a coordinate, clamping out-of-range values instead of rejecting them
    pub fn new(lat: f64, lon: f64) -> Self {
        Self {
            lat: clamp_latitude(lat),
            lon: clamp_longitude(lon),
        }
    }

    pub fn was_clamped(lat: f64, lon: f64) -> bool {
        let clamped = Self::new(lat, lon);
        clamped.lat != lat || clamped.lon != lon
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let ns = if self.lat < 0.0 { 'S' } else { 'N' };
        let ew = if self.lon < 0.0 { 'W' } else { 'E' };
        write!(
            f,
            "{:.4}°{}, {:.4}°{}",
            self.lat.abs(),
            ns,
            self.lon.abs(),
            ew
        )
    }
}
