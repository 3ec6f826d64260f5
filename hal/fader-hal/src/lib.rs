//! Faderbot Hardware Abstraction Layer
//!
//! This crate defines the capabilities a fader controller consumes from
//! the board: an addressable digital-output driver (typically an I2C I/O
//! expander such as a PCF8575) and an ADC that samples the fader wiper.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  fader-drivers (MotorizedFader, ...)    │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  fader-hal (this crate - traits)        │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │  I/O expander │       │   ADS1x15 /   │
//! │   (PCF8575)   │       │  on-chip ADC  │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Sharing
//!
//! Both traits are implemented for `&mut T` and `&RefCell<T>`, so one
//! expander or ADC chip can serve several faders in single-threaded code.
//! Each call borrows the device for the duration of one pin transaction.
//!
//! # Traits
//!
//! - [`gpio::DigitalOutput`] - Pin-addressed digital outputs
//! - [`adc::AdcReader`] - Channel-addressed analog sampling

#![no_std]
#![deny(unsafe_code)]

pub mod adc;
pub mod gpio;

// Re-export key traits at crate root for convenience
pub use adc::AdcReader;
pub use gpio::{DigitalOutput, Level, PinMode};
