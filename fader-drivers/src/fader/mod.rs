//! Motorized fader controller
//!
//! - [`motorized`]: position sensing, motion decision and software PWM
//! - [`calibration`]: timed end-stop excursions to find the ADC range

pub mod calibration;
pub mod motorized;
#[cfg(test)]
mod test_support;

pub use motorized::{ErrorOf, FaderError, MotorizedFader};
