//! Motion state for position control
//!
//! Every control step is a pure function of the sensed position, the
//! target and whether the target has already been reached.

pub mod machine;

pub use machine::{decide, Direction, MotionCommand, MotionState};
