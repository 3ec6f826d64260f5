//! Motorized fader drivers
//!
//! This crate provides the concrete fader controller built on the
//! capability traits in `fader-hal` and the control math in `fader-core`:
//!
//! - [`fader::MotorizedFader`] - closed-loop positioning and calibration
//! - [`pulse::PulseGenerator`] - tick-driven software PWM for callers
//!   that cannot block
//! - [`gpio::PinBank`] - adapts embedded-hal output pins to the
//!   pin-addressed output capability

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

#[macro_use]
mod fmt;

pub mod fader;
pub mod gpio;
pub mod pulse;

pub use fader::{FaderError, MotorizedFader};
