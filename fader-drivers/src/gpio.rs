//! embedded-hal output pin adapter
//!
//! Boards that wire the H-bridge straight to MCU GPIOs (instead of an
//! I/O expander) can group their `embedded_hal` output pins into a
//! [`PinBank`]; the pin number is the index into the bank.

use embedded_hal::digital::OutputPin;
use fader_hal::{DigitalOutput, Level, PinMode};

/// Errors from a pin bank
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinBankError<E> {
    /// Pin number is outside the bank
    UnknownPin(u8),
    /// Pins in a bank are typed as outputs and cannot be reconfigured
    UnsupportedMode,
    /// Error from the underlying pin
    Pin(E),
}

/// Fixed set of output pins addressed by index
pub struct PinBank<P, const N: usize> {
    pins: [P; N],
}

impl<P: OutputPin, const N: usize> PinBank<P, N> {
    /// Create a bank from an array of output pins
    pub fn new(pins: [P; N]) -> Self {
        Self { pins }
    }

    /// Give back the pins
    pub fn release(self) -> [P; N] {
        self.pins
    }

    fn pin_mut(&mut self, pin: u8) -> Result<&mut P, PinBankError<P::Error>> {
        self.pins
            .get_mut(pin as usize)
            .ok_or(PinBankError::UnknownPin(pin))
    }
}

impl<P: OutputPin, const N: usize> DigitalOutput for PinBank<P, N> {
    type Error = PinBankError<P::Error>;

    fn configure_pin(&mut self, pin: u8, mode: PinMode) -> Result<(), Self::Error> {
        self.pin_mut(pin)?;
        match mode {
            PinMode::Output => Ok(()),
            PinMode::Input => Err(PinBankError::UnsupportedMode),
        }
    }

    fn write_pin(&mut self, pin: u8, level: Level) -> Result<(), Self::Error> {
        let out = self.pin_mut(pin)?;
        let result = match level {
            Level::High => out.set_high(),
            Level::Low => out.set_low(),
        };
        result.map_err(PinBankError::Pin)
    }
}
