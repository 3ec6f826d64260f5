//! Board-agnostic core logic for motorized faders
//!
//! This crate contains all control logic that does not depend on
//! specific hardware implementations:
//!
//! - Configuration types (tuning constants, pin wiring, calibrated range)
//! - Integer mapping math (position sensing, speed and PWM timing)
//! - Motion decision and state classification
//! - The fader controller trait

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod control;
pub mod state;
pub mod traits;
