//! Configuration type definitions
//!
//! Every constant the control loop depends on lives here with its
//! default, so a different fader or motor driver only needs a new
//! `FaderConfig` rather than changes to the control code.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::calibration::AdcRange;

/// Default dead zone around the target (logical units)
pub const DEFAULT_DEAD_ZONE: u8 = 2;

/// Errors found while validating configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Configuration text could not be parsed
    Parse,
    /// Calibration must run at least one pass
    ZeroPasses,
    /// Minimum drive speed is above the maximum
    SpeedRange,
    /// Speed ramp distance must be non-zero
    RampDistance,
    /// Default ADC range is empty or inverted
    EmptyRange,
    /// PWM on-time range is inverted
    PwmRange,
    /// Two outputs or sense channels share the same number
    PinConflict,
}

/// Distance-to-speed ramp
///
/// Speed is a linear function of position error between zero and
/// `ramp_distance`, so the fader decelerates as it approaches the target
/// while `min_speed` keeps enough drive to overcome static friction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SpeedConfig {
    /// Error (logical units) at which full speed is reached
    pub ramp_distance: u8,
    /// Speed applied at zero error
    pub min_speed: u8,
    /// Speed applied at or beyond `ramp_distance`
    pub max_speed: u8,
    /// Speeds at or below this do not pulse the motor
    pub noise_floor: u8,
}

impl Default for SpeedConfig {
    fn default() -> Self {
        Self {
            ramp_distance: 50,
            min_speed: 60,
            max_speed: 255,
            noise_floor: 5,
        }
    }
}

impl SpeedConfig {
    /// Check if a speed is high enough to produce motion
    pub fn drives_motor(&self, speed: u8) -> bool {
        speed > self.noise_floor
    }
}

/// Software PWM timing derived from motor speed
///
/// On-time grows and off-time shrinks with speed, approaching
/// continuous drive at full speed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PwmConfig {
    /// On-time at speed 0 (µs)
    pub on_min_us: u32,
    /// On-time at speed 255 (µs)
    pub on_max_us: u32,
    /// Off-time at speed 0 (µs)
    pub off_at_zero_us: u32,
    /// Off-time at speed 255 (µs)
    pub off_at_full_us: u32,
    /// On-time before the first speed is applied (µs)
    pub initial_on_us: u32,
    /// Off-time before the first speed is applied (µs)
    pub initial_off_us: u32,
}

impl Default for PwmConfig {
    fn default() -> Self {
        Self {
            on_min_us: 200,
            on_max_us: 6000,
            off_at_zero_us: 4000,
            off_at_full_us: 50,
            initial_on_us: 500,
            initial_off_us: 500,
        }
    }
}

/// Endpoint calibration procedure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CalibrationConfig {
    /// Number of full-travel excursions to average
    pub passes: u8,
    /// Time the motor is driven toward each end-stop (ms)
    ///
    /// The fader must reach the end-stop within this window; there is
    /// no stall detection.
    pub settle_ms: u32,
}

impl Default for CalibrationConfig {
    fn default() -> Self {
        Self {
            passes: 5,
            settle_ms: 2000,
        }
    }
}

/// Per-fader control configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FaderConfig {
    /// Hysteresis band around the target where the motor is held stopped
    pub dead_zone: u8,
    /// Distance-to-speed ramp
    pub speed: SpeedConfig,
    /// Software PWM timing
    pub pwm: PwmConfig,
    /// Endpoint calibration
    pub calibration: CalibrationConfig,
    /// ADC range used until calibration runs
    pub default_range: AdcRange,
    /// Swap forward and reverse outputs (motor wired backwards)
    pub reverse_polarity: bool,
}

impl Default for FaderConfig {
    fn default() -> Self {
        Self {
            dead_zone: DEFAULT_DEAD_ZONE,
            speed: SpeedConfig::default(),
            pwm: PwmConfig::default(),
            calibration: CalibrationConfig::default(),
            default_range: AdcRange::UNCALIBRATED,
            reverse_polarity: false,
        }
    }
}

impl FaderConfig {
    /// Check the configuration for values the control loop cannot use
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.calibration.passes == 0 {
            return Err(ConfigError::ZeroPasses);
        }
        if self.speed.min_speed > self.speed.max_speed {
            return Err(ConfigError::SpeedRange);
        }
        if self.speed.ramp_distance == 0 {
            return Err(ConfigError::RampDistance);
        }
        if !self.default_range.is_valid() {
            return Err(ConfigError::EmptyRange);
        }
        if self.pwm.on_min_us > self.pwm.on_max_us {
            return Err(ConfigError::PwmRange);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = FaderConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.dead_zone, 2);
        assert_eq!(config.speed.min_speed, 60);
        assert_eq!(config.speed.max_speed, 255);
        assert_eq!(config.pwm.on_max_us, 6000);
        assert_eq!(config.calibration.passes, 5);
        assert_eq!(config.default_range, AdcRange::new(10, 1024));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = FaderConfig::default();
        config.calibration.passes = 0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroPasses));

        let mut config = FaderConfig::default();
        config.speed.min_speed = 200;
        config.speed.max_speed = 100;
        assert_eq!(config.validate(), Err(ConfigError::SpeedRange));

        let mut config = FaderConfig::default();
        config.speed.ramp_distance = 0;
        assert_eq!(config.validate(), Err(ConfigError::RampDistance));

        let mut config = FaderConfig::default();
        config.default_range = AdcRange::new(500, 500);
        assert_eq!(config.validate(), Err(ConfigError::EmptyRange));

        let mut config = FaderConfig::default();
        config.pwm.on_min_us = 7000;
        assert_eq!(config.validate(), Err(ConfigError::PwmRange));
    }

    #[test]
    fn test_noise_floor() {
        let speed = SpeedConfig::default();
        assert!(!speed.drives_motor(0));
        assert!(!speed.drives_motor(5));
        assert!(speed.drives_motor(6));
    }
}
