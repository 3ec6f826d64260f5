//! ADC range calibration data
//!
//! The logical position is a rescale of the raw wiper reading from the
//! calibrated `[min, max]` range. Calibration drives the fader into each
//! end-stop several times and averages the readings.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Errors from calibration validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CalibrationError {
    /// Measured maximum is not above the measured minimum
    InvalidRange { min: i16, max: i16 },
    /// No complete pass was recorded
    NoSamples,
}

/// Raw ADC readings at the two ends of travel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AdcRange {
    /// Reading at the minimum end-stop
    pub min: i16,
    /// Reading at the maximum end-stop
    pub max: i16,
}

impl Default for AdcRange {
    fn default() -> Self {
        Self::UNCALIBRATED
    }
}

impl AdcRange {
    /// Range assumed before calibration (10-bit scale with a small floor)
    pub const UNCALIBRATED: Self = Self { min: 10, max: 1024 };

    /// Create a new range
    pub const fn new(min: i16, max: i16) -> Self {
        Self { min, max }
    }

    /// Check that the range can be used as a rescale domain
    pub const fn is_valid(&self) -> bool {
        self.min < self.max
    }

    /// Reject ranges where `max <= min`
    pub fn validate(&self) -> Result<(), CalibrationError> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(CalibrationError::InvalidRange {
                min: self.min,
                max: self.max,
            })
        }
    }

    /// Width of the range in ADC counts
    pub fn span(&self) -> i32 {
        self.max as i32 - self.min as i32
    }
}

/// Running sums for the end-stop readings of a calibration
///
/// Averages use truncating integer division.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CalibrationAccumulator {
    min_sum: i32,
    max_sum: i32,
    min_count: u8,
    max_count: u8,
}

impl CalibrationAccumulator {
    /// Create an empty accumulator
    pub const fn new() -> Self {
        Self {
            min_sum: 0,
            max_sum: 0,
            min_count: 0,
            max_count: 0,
        }
    }

    /// Record a reading taken at the maximum end-stop
    pub fn add_max(&mut self, sample: i16) {
        self.max_sum += sample as i32;
        self.max_count = self.max_count.saturating_add(1);
    }

    /// Record a reading taken at the minimum end-stop
    pub fn add_min(&mut self, sample: i16) {
        self.min_sum += sample as i32;
        self.min_count = self.min_count.saturating_add(1);
    }

    /// Number of complete passes (one reading at each end)
    pub fn passes(&self) -> u8 {
        self.min_count.min(self.max_count)
    }

    /// Average the recorded readings into a range
    ///
    /// The result is not validated; an end-stop that was never reached
    /// yields a narrow or inverted range.
    pub fn finish(&self) -> Result<AdcRange, CalibrationError> {
        if self.min_count == 0 || self.max_count == 0 {
            return Err(CalibrationError::NoSamples);
        }
        Ok(AdcRange {
            min: (self.min_sum / self.min_count as i32) as i16,
            max: (self.max_sum / self.max_count as i32) as i16,
        })
    }
}
