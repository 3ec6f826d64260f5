//! Configuration types
//!
//! Tuning constants, wiring and calibration data for one or more faders.

pub mod calibration;
pub mod hardware;
#[cfg(feature = "toml")]
pub mod loader;
pub mod types;

pub use calibration::*;
pub use hardware::*;
pub use types::*;
