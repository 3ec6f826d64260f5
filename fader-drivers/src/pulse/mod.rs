//! Software PWM pulse generation

pub mod generator;

pub use generator::{PulseGenerator, PulsePhase};
