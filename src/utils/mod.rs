pub mod constants;
pub mod coordinates;
pub mod units;

pub use constants::*;
pub use coordinates::{clamp_latitude, clamp_longitude};
pub use units::round_half_up;
