//! ADC channel abstraction
//!
//! The fader wiper is sampled through a multi-channel converter such as
//! an ADS1015 (12-bit, 0 to ~1024 at the default gain used for faders).

use core::cell::RefCell;

/// Channel-addressed ADC
pub trait AdcReader {
    /// Error type for conversions
    type Error;

    /// Perform a single-ended conversion on a channel
    ///
    /// Returns the raw sample in converter counts.
    fn read_channel(&mut self, channel: u8) -> Result<i16, Self::Error>;
}

impl<T: AdcReader + ?Sized> AdcReader for &mut T {
    type Error = T::Error;

    fn read_channel(&mut self, channel: u8) -> Result<i16, Self::Error> {
        T::read_channel(self, channel)
    }
}

impl<T: AdcReader> AdcReader for &RefCell<T> {
    type Error = T::Error;

    fn read_channel(&mut self, channel: u8) -> Result<i16, Self::Error> {
        self.borrow_mut().read_channel(channel)
    }
}
