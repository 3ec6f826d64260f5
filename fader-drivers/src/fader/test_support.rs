//! Mock drivers shared by the fader tests

use core::cell::RefCell;
use std::collections::VecDeque;

use embedded_hal::delay::DelayNs;
use fader_core::config::FaderPins;
use fader_hal::{AdcReader, DigitalOutput, Level, PinMode};

/// enable=0, forward=1, reverse=2, sense channel 0
pub const PINS: FaderPins = FaderPins::new(0, 1, 2, 0);

/// Mock 16-pin expander recording every write
#[derive(Default)]
pub struct MockOutput {
    pub levels: [Level; 16],
    pub outputs: u16,
    pub writes: Vec<(u8, Level)>,
    pub fail: bool,
}

impl MockOutput {
    pub fn level(&self, pin: u8) -> Level {
        self.levels[pin as usize]
    }
}

impl DigitalOutput for MockOutput {
    type Error = ();

    fn configure_pin(&mut self, pin: u8, mode: PinMode) -> Result<(), ()> {
        if self.fail {
            return Err(());
        }
        if mode == PinMode::Output {
            self.outputs |= 1 << pin;
        }
        Ok(())
    }

    fn write_pin(&mut self, pin: u8, level: Level) -> Result<(), ()> {
        if self.fail {
            return Err(());
        }
        self.levels[pin as usize] = level;
        self.writes.push((pin, level));
        Ok(())
    }
}

/// Mock ADC replaying scripted samples per channel
///
/// Once a channel's script runs out, its last sample repeats.
#[derive(Default)]
pub struct MockAdc {
    scripts: [VecDeque<i16>; 4],
    last: [i16; 4],
    pub fail: bool,
}

impl MockAdc {
    pub fn push(&mut self, channel: u8, samples: &[i16]) {
        self.scripts[channel as usize].extend(samples.iter().copied());
    }
}

impl AdcReader for MockAdc {
    type Error = ();

    fn read_channel(&mut self, channel: u8) -> Result<i16, ()> {
        if self.fail {
            return Err(());
        }
        let ch = channel as usize;
        if let Some(sample) = self.scripts[ch].pop_front() {
            self.last[ch] = sample;
        }
        Ok(self.last[ch])
    }
}

/// Delay that records each requested duration in microseconds
pub struct MockDelay<'a>(pub &'a RefCell<Vec<u32>>);

impl DelayNs for MockDelay<'_> {
    fn delay_ns(&mut self, ns: u32) {
        self.0.borrow_mut().push(ns / 1000);
    }

    fn delay_us(&mut self, us: u32) {
        self.0.borrow_mut().push(us);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.0.borrow_mut().push(ms * 1000);
    }
}
