//! Tick-driven software PWM
//!
//! The blocking controller emits one pulse per update by sleeping
//! through the on and off times. Where blocking the caller is not
//! acceptable, this generator produces the same waveform from a
//! free-running microsecond timestamp: poll it as often as possible and
//! write the enable pin whenever the returned level changes.
//!
//! ```ignore
//! let level = generator.poll(now_us, timing, speed_above_floor);
//! expander.write_pin(enable, level)?;
//! ```

use fader_core::control::PwmTiming;
use fader_hal::Level;

/// Current phase of the generated waveform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PulsePhase {
    /// Not pulsing; enable held low
    #[default]
    Off,
    /// Enable high since the given timestamp (µs)
    High { since_us: u32 },
    /// Enable low since the given timestamp (µs)
    Low { since_us: u32 },
}

/// Non-blocking software PWM state machine
#[derive(Debug, Clone, Default)]
pub struct PulseGenerator {
    phase: PulsePhase,
}

impl PulseGenerator {
    /// Create an idle generator
    pub const fn new() -> Self {
        Self {
            phase: PulsePhase::Off,
        }
    }

    /// Get the current phase
    pub fn phase(&self) -> PulsePhase {
        self.phase
    }

    /// Level the enable pin should currently have
    pub fn level(&self) -> Level {
        match self.phase {
            PulsePhase::High { .. } => Level::High,
            PulsePhase::Off | PulsePhase::Low { .. } => Level::Low,
        }
    }

    /// Stop pulsing
    pub fn reset(&mut self) {
        self.phase = PulsePhase::Off;
    }

    /// Advance the waveform to `now_us`
    ///
    /// `active` is false when the motor should not be driven (speed at
    /// or below the noise floor). Timestamps may wrap.
    pub fn poll(&mut self, now_us: u32, timing: PwmTiming, active: bool) -> Level {
        if !active {
            self.phase = PulsePhase::Off;
            return Level::Low;
        }

        self.phase = match self.phase {
            PulsePhase::Off => PulsePhase::High { since_us: now_us },
            PulsePhase::High { since_us } => {
                if now_us.wrapping_sub(since_us) >= timing.on_us {
                    PulsePhase::Low { since_us: now_us }
                } else {
                    PulsePhase::High { since_us }
                }
            }
            PulsePhase::Low { since_us } => {
                if now_us.wrapping_sub(since_us) >= timing.off_us {
                    PulsePhase::High { since_us: now_us }
                } else {
                    PulsePhase::Low { since_us }
                }
            }
        };

        self.level()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let generator = PulseGenerator::new();
        assert_eq!(generator.phase(), PulsePhase::Off);
        assert_eq!(generator.level(), Level::Low);
    }

    #[test]
    fn test_waveform() {
        let timing = PwmTiming::new(100, 50);
        let mut generator = PulseGenerator::new();

        assert_eq!(generator.poll(1000, timing, true), Level::High);
        assert_eq!(generator.poll(1050, timing, true), Level::High);
        assert_eq!(generator.poll(1100, timing, true), Level::Low);
        assert_eq!(generator.poll(1120, timing, true), Level::Low);
        assert_eq!(generator.poll(1150, timing, true), Level::High);
        assert_eq!(generator.phase(), PulsePhase::High { since_us: 1150 });
    }

    #[test]
    fn test_inactive_forces_low() {
        let timing = PwmTiming::new(100, 50);
        let mut generator = PulseGenerator::new();

        generator.poll(0, timing, true);
        assert_eq!(generator.poll(10, timing, false), Level::Low);
        assert_eq!(generator.phase(), PulsePhase::Off);

        // Restart begins with a fresh high phase
        assert_eq!(generator.poll(20, timing, true), Level::High);
        assert_eq!(generator.phase(), PulsePhase::High { since_us: 20 });
    }

    #[test]
    fn test_timestamp_wrap() {
        let timing = PwmTiming::new(100, 50);
        let mut generator = PulseGenerator::new();

        generator.poll(u32::MAX - 40, timing, true);
        assert_eq!(generator.poll(30, timing, true), Level::High);
        assert_eq!(generator.poll(60, timing, true), Level::Low);
    }

    #[test]
    fn test_reset() {
        let mut generator = PulseGenerator::new();
        generator.poll(0, PwmTiming::new(10, 10), true);
        generator.reset();
        assert_eq!(generator.level(), Level::Low);
    }
}
