//! Controller traits
//!
//! These traits define the interface between the caller's loop (or a
//! control-surface layer) and a fader implementation.

pub mod fader;

pub use fader::FaderController;
