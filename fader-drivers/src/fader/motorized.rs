//! Closed-loop motorized fader
//!
//! Each control step:
//! - samples the wiper and rescales it to a 0-127 position
//! - compares it to the target and picks a direction and speed, or stops
//!   inside the dead zone
//! - emits one software PWM period on the H-bridge enable line
//!
//! The blocking [`update`](MotorizedFader::update) sleeps through the
//! pulse using the injected delay, so its duty cycle depends on how often
//! the caller's loop invokes it. [`update_nonblocking`](MotorizedFader::update_nonblocking)
//! produces the same waveform from a timestamp instead.
//!
//! # Usage
//!
//! ```ignore
//! let mut fader = MotorizedFader::new(&expander, &adc, delay, FaderPins::new(0, 1, 2, 0));
//! fader.initialize()?;
//! fader.calibrate()?;
//! fader.set_target_position(100);
//!
//! loop {
//!     fader.update()?;
//! }
//! ```

use embedded_hal::delay::DelayNs;
use fader_core::config::{AdcRange, CalibrationError, FaderConfig, FaderPins};
use fader_core::control::{constrain, sense_position, PwmTiming, POSITION_MAX};
use fader_core::state::{decide, Direction, MotionCommand, MotionState};
use fader_core::traits::FaderController;
use fader_hal::{AdcReader, DigitalOutput, Level, PinMode};

use crate::pulse::PulseGenerator;

/// Errors from fader operations
///
/// Driver errors are passed through without interpretation; there is
/// no retry path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FaderError<P, A> {
    /// Digital output driver failed
    Pin(P),
    /// ADC read failed
    Adc(A),
    /// Calibration result rejected
    Calibration(CalibrationError),
}

/// [`FaderError`] for a given output driver and ADC
pub type ErrorOf<O, A> = FaderError<<O as DigitalOutput>::Error, <A as AdcReader>::Error>;

/// Motorized fader controller
///
/// Owns the per-fader state. The output driver and ADC may be shared
/// with other faders by passing `&RefCell<_>` handles.
pub struct MotorizedFader<O, A, D> {
    pub(super) output: O,
    pub(super) adc: A,
    pub(super) delay: D,
    pub(super) pins: FaderPins,
    pub(super) config: FaderConfig,
    /// Rescale domain for position sensing
    pub(super) range: AdcRange,
    /// Commanded position (0-127)
    target: u8,
    /// Position sensed during the last step (0-127)
    position: u8,
    /// Set on arrival or stop, cleared by a new target
    reached_target: bool,
    /// Current drive speed (0-255)
    speed: u8,
    /// PWM timing for `speed`
    timing: PwmTiming,
    /// Direction lines currently asserted
    direction: Option<Direction>,
    /// Waveform state for non-blocking updates
    pulse: PulseGenerator,
    /// Last level written to the enable line
    enable_level: Level,
}

impl<O, A, D> MotorizedFader<O, A, D>
where
    O: DigitalOutput,
    A: AdcReader,
    D: DelayNs,
{
    /// Create a fader with the default configuration
    pub fn new(output: O, adc: A, delay: D, pins: FaderPins) -> Self {
        Self::with_config(output, adc, delay, pins, FaderConfig::default())
    }

    /// Create a fader with a custom configuration
    ///
    /// Starts uncalibrated (using `config.default_range`), idle, with a
    /// target of 0.
    pub fn with_config(output: O, adc: A, delay: D, pins: FaderPins, config: FaderConfig) -> Self {
        Self {
            output,
            adc,
            delay,
            pins,
            range: config.default_range,
            timing: PwmTiming::initial(&config.pwm),
            config,
            target: 0,
            position: 0,
            reached_target: true,
            speed: 0,
            direction: None,
            pulse: PulseGenerator::new(),
            enable_level: Level::Low,
        }
    }

    /// Configure the enable and direction lines as outputs
    pub fn initialize(&mut self) -> Result<(), ErrorOf<O, A>> {
        for pin in self.pins.outputs() {
            self.output
                .configure_pin(pin, PinMode::Output)
                .map_err(FaderError::Pin)?;
        }
        debug!(
            "Fader outputs configured: enable={}, forward={}, reverse={}",
            self.pins.enable,
            self.pins.forward,
            self.pins.reverse
        );
        Ok(())
    }

    /// Command a new target, clamped to 0-127
    pub fn set_target_position(&mut self, position: i32) {
        self.target = constrain(position, 0, POSITION_MAX as i32) as u8;
        self.reached_target = false;
        trace!("Fader target set to {}", self.target);
    }

    /// Get the commanded target
    pub fn target_position(&self) -> u8 {
        self.target
    }

    /// Get the position sensed during the last step
    pub fn current_position(&self) -> u8 {
        self.position
    }

    /// Check if the target has been reached (or the fader was stopped)
    pub fn is_at_target(&self) -> bool {
        self.reached_target
    }

    /// Get the current drive speed (0-255)
    pub fn motor_speed(&self) -> u8 {
        self.speed
    }

    /// Get the PWM timing for the current speed
    pub fn pwm_timing(&self) -> PwmTiming {
        self.timing
    }

    /// Get the direction lines currently asserted
    pub fn direction(&self) -> Option<Direction> {
        self.direction
    }

    /// Classify the current motion state
    pub fn motion_state(&self) -> MotionState {
        MotionState::classify(
            self.reached_target,
            self.position.abs_diff(self.target),
            self.config.dead_zone,
        )
    }

    /// Get the configuration
    pub fn config(&self) -> &FaderConfig {
        &self.config
    }

    /// Get the pin assignment
    pub fn pins(&self) -> FaderPins {
        self.pins
    }

    /// Get the ADC range used for position sensing
    pub fn calibration(&self) -> AdcRange {
        self.range
    }

    /// Replace the ADC range (e.g. one measured earlier this session)
    pub fn set_calibration(&mut self, range: AdcRange) {
        self.range = range;
    }

    /// Get access to the output driver
    pub fn output(&self) -> &O {
        &self.output
    }

    /// Get access to the ADC
    pub fn adc(&self) -> &A {
        &self.adc
    }

    /// Give back the drivers
    pub fn release(self) -> (O, A, D) {
        (self.output, self.adc, self.delay)
    }

    /// Run one control step, blocking for one PWM period while driving
    pub fn update(&mut self) -> Result<(), ErrorOf<O, A>> {
        self.control_step()?;
        self.pulse_motor()
    }

    /// Run one control step without blocking
    ///
    /// `now_us` is a free-running microsecond timestamp. The enable line
    /// is written only when the generated waveform changes level, so this
    /// should be polled much faster than the PWM period.
    pub fn update_nonblocking(&mut self, now_us: u32) -> Result<(), ErrorOf<O, A>> {
        self.control_step()?;
        let active = self.config.speed.drives_motor(self.speed);
        let level = self.pulse.poll(now_us, self.timing, active);
        if level != self.enable_level {
            self.write_enable(level)?;
        }
        Ok(())
    }

    /// Stop the motor and hold it until a new target is set
    pub fn stop(&mut self) -> Result<(), ErrorOf<O, A>> {
        self.release_bridge()?;
        self.set_motor_speed(0);
        self.reached_target = true;
        Ok(())
    }

    /// Sample the wiper and update the sensed position
    pub(super) fn sense(&mut self) -> Result<u8, ErrorOf<O, A>> {
        let raw = self.read_raw()?;
        self.position = sense_position(raw, self.range);
        Ok(self.position)
    }

    pub(super) fn read_raw(&mut self) -> Result<i16, ErrorOf<O, A>> {
        self.adc
            .read_channel(self.pins.sense_channel)
            .map_err(FaderError::Adc)
    }

    /// Sense, decide and apply direction and speed
    fn control_step(&mut self) -> Result<(), ErrorOf<O, A>> {
        let position = self.sense()?;

        match decide(
            position,
            self.target,
            self.reached_target,
            self.config.dead_zone,
            &self.config.speed,
        ) {
            MotionCommand::Drive { direction, speed } => {
                self.set_direction(Some(direction))?;
                self.set_motor_speed(speed);
                trace!(
                    "Fader drive: position={}, target={}, speed={}",
                    position,
                    self.target,
                    speed
                );
            }
            MotionCommand::Stop => {
                self.set_direction(None)?;
                self.set_motor_speed(0);
                if !self.reached_target {
                    debug!("Fader reached target {} at {}", self.target, position);
                }
                self.reached_target = true;
            }
        }

        Ok(())
    }

    /// Assert the direction lines, or release both for `None`
    pub(super) fn set_direction(&mut self, direction: Option<Direction>) -> Result<(), ErrorOf<O, A>> {
        let wired = match direction {
            Some(dir) if self.config.reverse_polarity => Some(dir.opposite()),
            other => other,
        };
        let (forward, reverse) = match wired {
            Some(Direction::Forward) => (Level::High, Level::Low),
            Some(Direction::Reverse) => (Level::Low, Level::High),
            None => (Level::Low, Level::Low),
        };

        self.output
            .write_pin(self.pins.forward, forward)
            .map_err(FaderError::Pin)?;
        self.output
            .write_pin(self.pins.reverse, reverse)
            .map_err(FaderError::Pin)?;
        self.direction = direction;
        Ok(())
    }

    /// Store the speed and derive its PWM timing
    fn set_motor_speed(&mut self, speed: u8) {
        self.speed = speed;
        self.timing = PwmTiming::for_speed(speed, &self.config.pwm);
    }

    pub(super) fn write_enable(&mut self, level: Level) -> Result<(), ErrorOf<O, A>> {
        self.output
            .write_pin(self.pins.enable, level)
            .map_err(FaderError::Pin)?;
        self.enable_level = level;
        Ok(())
    }

    /// Emit one blocking PWM period if the speed is above the noise floor
    fn pulse_motor(&mut self) -> Result<(), ErrorOf<O, A>> {
        if !self.config.speed.drives_motor(self.speed) {
            return Ok(());
        }
        self.write_enable(Level::High)?;
        self.delay.delay_us(self.timing.on_us);
        self.write_enable(Level::Low)?;
        self.delay.delay_us(self.timing.off_us);
        Ok(())
    }

    /// Drive both direction lines and the enable line low
    pub(super) fn release_bridge(&mut self) -> Result<(), ErrorOf<O, A>> {
        self.set_direction(None)?;
        self.write_enable(Level::Low)?;
        self.pulse.reset();
        Ok(())
    }
}

impl<O, A, D> FaderController for MotorizedFader<O, A, D>
where
    O: DigitalOutput,
    A: AdcReader,
    D: DelayNs,
{
    type Error = ErrorOf<O, A>;

    fn initialize(&mut self) -> Result<(), Self::Error> {
        MotorizedFader::initialize(self)
    }

    fn calibrate(&mut self) -> Result<AdcRange, Self::Error> {
        MotorizedFader::calibrate(self)
    }

    fn set_target_position(&mut self, position: i32) {
        MotorizedFader::set_target_position(self, position)
    }

    fn target_position(&self) -> u8 {
        MotorizedFader::target_position(self)
    }

    fn current_position(&self) -> u8 {
        MotorizedFader::current_position(self)
    }

    fn is_at_target(&self) -> bool {
        MotorizedFader::is_at_target(self)
    }

    fn update(&mut self) -> Result<(), Self::Error> {
        MotorizedFader::update(self)
    }
}
