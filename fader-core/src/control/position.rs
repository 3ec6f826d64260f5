//! Position sensing transform
//!
//! Raw wiper readings are clamped to the calibrated range and rescaled
//! onto the 0-127 logical scale used for targets.

use super::mapping::{constrain, map_range};
use crate::config::AdcRange;

/// Highest logical position
pub const POSITION_MAX: u8 = 127;

/// Convert a raw ADC sample to a logical position
///
/// A degenerate range (`max <= min`) cannot be rescaled and reads as 0.
pub fn sense_position(raw: i16, range: AdcRange) -> u8 {
    if !range.is_valid() {
        return 0;
    }
    let (min, max) = (range.min as i32, range.max as i32);
    let clamped = constrain(raw as i32, min, max);
    map_range(clamped, min, max, 0, POSITION_MAX as i32) as u8
}
