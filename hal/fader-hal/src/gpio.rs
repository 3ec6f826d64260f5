//! Digital output abstractions
//!
//! Unlike per-pin HAL types, fader boards usually route the H-bridge
//! lines through an I/O expander where pins are addressed by number.

use core::cell::RefCell;

/// Pin direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinMode {
    /// Push-pull or quasi-bidirectional output
    Output,
    /// High-impedance input
    Input,
}

/// Logic level of a digital line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Level {
    /// Logic 0
    #[default]
    Low,
    /// Logic 1
    High,
}

impl Level {
    /// Check if this is logic 1
    pub fn is_high(self) -> bool {
        self == Level::High
    }
}

impl From<bool> for Level {
    fn from(high: bool) -> Self {
        if high {
            Level::High
        } else {
            Level::Low
        }
    }
}

/// Pin-addressed digital output driver
///
/// Implementations perform the bus transaction (or register write)
/// needed to change a single pin. Errors are passed through untouched
/// by the fader controller.
pub trait DigitalOutput {
    /// Error type for pin operations
    type Error;

    /// Configure the direction of a pin
    fn configure_pin(&mut self, pin: u8, mode: PinMode) -> Result<(), Self::Error>;

    /// Drive a pin to the given level
    fn write_pin(&mut self, pin: u8, level: Level) -> Result<(), Self::Error>;

    /// Drive a pin high
    fn set_high(&mut self, pin: u8) -> Result<(), Self::Error> {
        self.write_pin(pin, Level::High)
    }

    /// Drive a pin low
    fn set_low(&mut self, pin: u8) -> Result<(), Self::Error> {
        self.write_pin(pin, Level::Low)
    }
}

impl<T: DigitalOutput + ?Sized> DigitalOutput for &mut T {
    type Error = T::Error;

    fn configure_pin(&mut self, pin: u8, mode: PinMode) -> Result<(), Self::Error> {
        T::configure_pin(self, pin, mode)
    }

    fn write_pin(&mut self, pin: u8, level: Level) -> Result<(), Self::Error> {
        T::write_pin(self, pin, level)
    }
}

/// Shared driver for several faders on one expander
///
/// Panics if the driver is already borrowed, which cannot happen in
/// single-threaded use because every call completes its transaction
/// before returning.
impl<T: DigitalOutput> DigitalOutput for &RefCell<T> {
    type Error = T::Error;

    fn configure_pin(&mut self, pin: u8, mode: PinMode) -> Result<(), Self::Error> {
        self.borrow_mut().configure_pin(pin, mode)
    }

    fn write_pin(&mut self, pin: u8, level: Level) -> Result<(), Self::Error> {
        self.borrow_mut().write_pin(pin, level)
    }
}
