//! Control-loop math
//!
//! Pure integer functions shared by the blocking and tick-driven
//! controllers: range mapping, the position-sensing transform and the
//! speed / PWM-timing derivation.

pub mod mapping;
pub mod position;
pub mod speed;

pub use mapping::{constrain, map_range};
pub use position::{sense_position, POSITION_MAX};
pub use speed::{speed_for_distance, PwmTiming};
