//! Motion decision and state classification

use crate::config::SpeedConfig;
use crate::control::speed_for_distance;

/// Motor drive direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Toward the maximum end (increasing position)
    Forward,
    /// Toward the minimum end (decreasing position)
    Reverse,
}

impl Direction {
    /// Get the opposite direction
    pub fn opposite(self) -> Self {
        match self {
            Direction::Forward => Direction::Reverse,
            Direction::Reverse => Direction::Forward,
        }
    }

    /// Direction that moves `position` toward `target`
    pub fn toward(position: u8, target: u8) -> Self {
        if position < target {
            Direction::Forward
        } else {
            Direction::Reverse
        }
    }
}

/// Per-fader motion states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MotionState {
    /// Target reached or motor stopped
    Idle,
    /// Moving toward a target outside the dead zone
    Seeking,
    /// New target already inside the dead zone; the next step goes idle
    Arriving,
}

impl MotionState {
    /// Classify the current state
    pub fn classify(reached_target: bool, distance: u8, dead_zone: u8) -> Self {
        if reached_target {
            MotionState::Idle
        } else if distance > dead_zone {
            MotionState::Seeking
        } else {
            MotionState::Arriving
        }
    }

    /// Check if the motor may be driven in this state
    pub fn is_moving(&self) -> bool {
        matches!(self, MotionState::Seeking)
    }
}

/// Output of one control step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MotionCommand {
    /// Drive the motor
    Drive { direction: Direction, speed: u8 },
    /// Release both direction lines and mark the target reached
    Stop,
}

/// Decide what the motor should do this step
///
/// Motion happens only while the target has not been reached and the
/// error is outside the dead zone. Once stopped, the fader stays
/// stopped until a new target is set, even if it drifts.
pub fn decide(
    position: u8,
    target: u8,
    reached_target: bool,
    dead_zone: u8,
    speed: &SpeedConfig,
) -> MotionCommand {
    let distance = position.abs_diff(target);

    if distance > dead_zone && !reached_target {
        MotionCommand::Drive {
            direction: Direction::toward(position, target),
            speed: speed_for_distance(distance, speed),
        }
    } else {
        MotionCommand::Stop
    }
}
