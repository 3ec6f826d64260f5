//! Speed and software PWM timing
//!
//! Position error is turned into a drive speed (0-255), and the speed
//! into the on/off durations of one software PWM period.

use super::mapping::{constrain, map_range};
use crate::config::{PwmConfig, SpeedConfig};

/// Drive speed for a given position error
///
/// Linear between `min_speed` at zero error and `max_speed` at
/// `ramp_distance`, clamped to that band outside it.
pub fn speed_for_distance(distance: u8, config: &SpeedConfig) -> u8 {
    let min = config.min_speed as i32;
    let max = config.max_speed as i32;
    let mapped = map_range(distance as i32, 0, config.ramp_distance as i32, min, max);
    constrain(mapped, min, max) as u8
}

/// On/off durations of one software PWM period
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PwmTiming {
    /// Enable-high time (µs)
    pub on_us: u32,
    /// Enable-low time (µs)
    pub off_us: u32,
}

impl PwmTiming {
    /// Create a timing pair
    pub const fn new(on_us: u32, off_us: u32) -> Self {
        Self { on_us, off_us }
    }

    /// Timing applied before any speed has been set
    pub const fn initial(config: &PwmConfig) -> Self {
        Self {
            on_us: config.initial_on_us,
            off_us: config.initial_off_us,
        }
    }

    /// Timing for a speed in 0-255
    ///
    /// Higher speed gives a longer on-time and a shorter off-time.
    pub fn for_speed(speed: u8, config: &PwmConfig) -> Self {
        let speed = speed as i32;
        let on = map_range(speed, 0, 255, config.on_min_us as i32, config.on_max_us as i32);
        let off = map_range(
            speed,
            0,
            255,
            config.off_at_zero_us as i32,
            config.off_at_full_us as i32,
        );
        Self {
            on_us: on.max(0) as u32,
            off_us: off.max(0) as u32,
        }
    }

    /// Length of one full period (µs)
    pub fn period_us(&self) -> u32 {
        self.on_us.saturating_add(self.off_us)
    }
}
