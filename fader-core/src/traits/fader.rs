//! Fader controller trait

use crate::config::AdcRange;

/// Closed-loop position controller for one motorized fader
///
/// Positions are on the 0-127 logical scale. Implementations own the
/// per-fader state and are driven by the caller's loop.
pub trait FaderController {
    /// Error raised by the underlying pin or ADC driver
    type Error;

    /// Configure the motor driver outputs
    ///
    /// Idempotent. Does not calibrate.
    fn initialize(&mut self) -> Result<(), Self::Error>;

    /// Discover the ADC range of the physical travel limits
    ///
    /// Blocks for the whole procedure and leaves the motor stopped.
    fn calibrate(&mut self) -> Result<AdcRange, Self::Error>;

    /// Command a new target position
    ///
    /// Out-of-range values are clamped to 0-127. No motion occurs until
    /// the next [`update`](Self::update).
    fn set_target_position(&mut self, position: i32);

    /// Get the commanded target position
    fn target_position(&self) -> u8;

    /// Get the position sensed during the last update
    fn current_position(&self) -> u8;

    /// Check if the fader has reached its target (or was stopped)
    fn is_at_target(&self) -> bool;

    /// Run one control step
    ///
    /// This should be called on a steady cadence that is short relative
    /// to the desired settle time.
    fn update(&mut self) -> Result<(), Self::Error>;
}
