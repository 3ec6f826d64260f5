//! End-stop calibration
//!
//! There is no end-stop or stall signal, so calibration drives the motor
//! at full power toward each limit for a fixed settle time and samples the
//! wiper once it has (presumably) stopped. Averaging several passes damps
//! sensor noise and mechanical variance. A fader that cannot reach a limit
//! within the settle time silently yields a narrower range.

use embedded_hal::delay::DelayNs;
use fader_core::config::{AdcRange, CalibrationAccumulator};
use fader_core::state::Direction;
use fader_hal::{AdcReader, DigitalOutput, Level};

use super::motorized::{ErrorOf, FaderError, MotorizedFader};

impl<O, A, D> MotorizedFader<O, A, D>
where
    O: DigitalOutput,
    A: AdcReader,
    D: DelayNs,
{
    /// Measure the ADC range of the physical travel limits
    ///
    /// Blocks for `passes × 2 × settle_ms` and leaves the motor stopped
    /// with all three lines low. The averaged range is applied without
    /// validation; see [`calibrate_checked`](Self::calibrate_checked).
    pub fn calibrate(&mut self) -> Result<AdcRange, ErrorOf<O, A>> {
        info!("Calibrating fader...");

        let passes = self.config.calibration.passes;
        let mut totals = CalibrationAccumulator::new();

        for pass in 0..passes {
            info!("Calibration pass {}", pass + 1);

            let max_reading = self.excursion(Direction::Forward)?;
            info!("Max reading: {}", max_reading);
            totals.add_max(max_reading);

            let min_reading = self.excursion(Direction::Reverse)?;
            info!("Min reading: {}", min_reading);
            totals.add_min(min_reading);
        }

        let result = totals.finish();
        self.release_bridge()?;

        let range = result.map_err(FaderError::Calibration)?;
        self.range = range;
        info!("Final max position: {}", range.max);
        info!("Final min position: {}", range.min);
        info!("Calibration complete!");

        Ok(range)
    }

    /// Calibrate, rejecting a range where `max <= min`
    ///
    /// A rejected range is not applied; the previous range stays in
    /// force. The motor is left stopped either way.
    pub fn calibrate_checked(&mut self) -> Result<AdcRange, ErrorOf<O, A>> {
        let previous = self.range;
        let range = self.calibrate()?;

        if let Err(e) = range.validate() {
            warn!(
                "Rejecting calibration: min={}, max={}",
                range.min,
                range.max
            );
            self.range = previous;
            return Err(FaderError::Calibration(e));
        }

        Ok(range)
    }

    /// Drive full power toward one limit, let it settle, then sample
    fn excursion(&mut self, direction: Direction) -> Result<i16, ErrorOf<O, A>> {
        self.set_direction(Some(direction))?;
        self.write_enable(Level::High)?;
        self.delay.delay_ms(self.config.calibration.settle_ms);
        self.write_enable(Level::Low)?;
        self.read_raw()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fader::test_support::{MockAdc, MockDelay, MockOutput, PINS};
    use core::cell::RefCell;
    use fader_core::config::{CalibrationConfig, CalibrationError, FaderConfig};

    /// Max/min reading pairs for five passes
    const READINGS: [i16; 10] = [1000, 12, 1010, 8, 990, 10, 1005, 9, 995, 11];

    #[test]
    fn test_calibration_averages_passes() {
        let out = RefCell::new(MockOutput::default());
        let adc = RefCell::new(MockAdc::default());
        let log = RefCell::new(Vec::new());
        adc.borrow_mut().push(0, &READINGS);

        let mut fader = MotorizedFader::new(&out, &adc, MockDelay(&log), PINS);
        let range = fader.calibrate().unwrap();

        assert_eq!(range, AdcRange::new(10, 1000));
        assert_eq!(fader.calibration(), range);

        // Motor ends stopped
        let out = out.borrow();
        assert_eq!(out.level(0), Level::Low);
        assert_eq!(out.level(1), Level::Low);
        assert_eq!(out.level(2), Level::Low);
        assert_eq!(fader.direction(), None);

        // Two 2 s excursions per pass
        assert_eq!(*log.borrow(), vec![2_000_000; 10]);
    }

    #[test]
    fn test_calibration_pin_sequence() {
        let out = RefCell::new(MockOutput::default());
        let adc = RefCell::new(MockAdc::default());
        let log = RefCell::new(Vec::new());
        adc.borrow_mut().push(0, &[1000, 10]);

        let config = FaderConfig {
            calibration: CalibrationConfig {
                passes: 1,
                settle_ms: 500,
            },
            ..Default::default()
        };
        let mut fader = MotorizedFader::with_config(&out, &adc, MockDelay(&log), PINS, config);
        fader.calibrate().unwrap();

        assert_eq!(
            out.borrow().writes,
            vec![
                // toward max
                (1, Level::High),
                (2, Level::Low),
                (0, Level::High),
                (0, Level::Low),
                // toward min
                (1, Level::Low),
                (2, Level::High),
                (0, Level::High),
                (0, Level::Low),
                // stop
                (1, Level::Low),
                (2, Level::Low),
                (0, Level::Low),
            ]
        );
        assert_eq!(*log.borrow(), vec![500_000, 500_000]);
    }

    #[test]
    fn test_unreached_end_stop_is_applied_silently() {
        let out = RefCell::new(MockOutput::default());
        let adc = RefCell::new(MockAdc::default());
        let log = RefCell::new(Vec::new());
        // Fader stuck mid-travel
        adc.borrow_mut().push(0, &[500]);

        let mut fader = MotorizedFader::new(&out, &adc, MockDelay(&log), PINS);
        let range = fader.calibrate().unwrap();

        assert_eq!(range, AdcRange::new(500, 500));
        assert_eq!(fader.calibration(), range);
    }

    #[test]
    fn test_checked_calibration_rejects_empty_range() {
        let out = RefCell::new(MockOutput::default());
        let adc = RefCell::new(MockAdc::default());
        let log = RefCell::new(Vec::new());
        adc.borrow_mut().push(0, &[500]);

        let mut fader = MotorizedFader::new(&out, &adc, MockDelay(&log), PINS);
        let result = fader.calibrate_checked();

        assert_eq!(
            result,
            Err(FaderError::Calibration(CalibrationError::InvalidRange {
                min: 500,
                max: 500
            }))
        );
        assert_eq!(fader.calibration(), AdcRange::UNCALIBRATED);
        assert_eq!(out.borrow().level(0), Level::Low);
    }

    #[test]
    fn test_checked_calibration_accepts_valid_range() {
        let out = RefCell::new(MockOutput::default());
        let adc = RefCell::new(MockAdc::default());
        let log = RefCell::new(Vec::new());
        adc.borrow_mut().push(0, &READINGS);

        let mut fader = MotorizedFader::new(&out, &adc, MockDelay(&log), PINS);
        assert_eq!(fader.calibrate_checked(), Ok(AdcRange::new(10, 1000)));
    }

    #[test]
    fn test_zero_passes_keeps_range() {
        let out = RefCell::new(MockOutput::default());
        let adc = RefCell::new(MockAdc::default());
        let log = RefCell::new(Vec::new());

        let config = FaderConfig {
            calibration: CalibrationConfig {
                passes: 0,
                settle_ms: 2000,
            },
            ..Default::default()
        };
        let mut fader = MotorizedFader::with_config(&out, &adc, MockDelay(&log), PINS, config);

        assert_eq!(
            fader.calibrate(),
            Err(FaderError::Calibration(CalibrationError::NoSamples))
        );
        assert_eq!(fader.calibration(), AdcRange::UNCALIBRATED);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_calibrated_range_drives_sensing() {
        let out = RefCell::new(MockOutput::default());
        let adc = RefCell::new(MockAdc::default());
        let log = RefCell::new(Vec::new());
        adc.borrow_mut().push(0, &READINGS);
        adc.borrow_mut().push(0, &[1000]);

        let mut fader = MotorizedFader::new(&out, &adc, MockDelay(&log), PINS);
        fader.calibrate().unwrap();
        fader.update().unwrap();

        assert_eq!(fader.current_position(), 127);
    }
}
