//! Hardware configuration types
//!
//! Pin wiring for one fader and the layout of a bank of faders sharing
//! the same expander and ADC.

use heapless::{String, Vec};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::types::{ConfigError, FaderConfig};

/// Maximum faders per bank
pub const MAX_FADERS: usize = 8;

/// Maximum label length
pub const MAX_LABEL_LEN: usize = 16;

/// H-bridge and sense wiring of a single fader
///
/// Output pins are expander pin numbers; the sense channel is an ADC
/// channel number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FaderPins {
    /// H-bridge enable (pulsed for PWM)
    pub enable: u8,
    /// H-bridge input driving toward the maximum end
    pub forward: u8,
    /// H-bridge input driving toward the minimum end
    pub reverse: u8,
    /// ADC channel sampling the wiper
    pub sense_channel: u8,
}

impl FaderPins {
    /// Create a new pin assignment
    pub const fn new(enable: u8, forward: u8, reverse: u8, sense_channel: u8) -> Self {
        Self {
            enable,
            forward,
            reverse,
            sense_channel,
        }
    }

    /// Output pins in configuration order
    pub const fn outputs(&self) -> [u8; 3] {
        [self.enable, self.forward, self.reverse]
    }

    /// Check that the three outputs are distinct
    pub fn outputs_distinct(&self) -> bool {
        self.enable != self.forward && self.enable != self.reverse && self.forward != self.reverse
    }
}

/// A named fader in a bank
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FaderHwConfig {
    /// Fader name (e.g., "ch1", "master")
    pub name: String<MAX_LABEL_LEN>,
    /// Wiring
    pub pins: FaderPins,
}

/// A bank of faders sharing one expander and one ADC
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FaderBankConfig {
    /// Control tuning shared by every fader in the bank
    #[cfg_attr(feature = "serde", serde(default))]
    pub fader: FaderConfig,
    /// Fader wiring
    pub faders: Vec<FaderHwConfig, MAX_FADERS>,
}

impl FaderBankConfig {
    /// Find a fader by name
    pub fn find(&self, name: &str) -> Option<&FaderHwConfig> {
        self.faders.iter().find(|f| f.name.as_str() == name)
    }

    /// Validate tuning and check that no two faders share a pin or channel
    ///
    /// Faders on a shared expander must address disjoint pins, otherwise
    /// one fader's pulse would drive another's H-bridge.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.fader.validate()?;

        let mut used_outputs: u32 = 0;
        let mut used_channels: u32 = 0;

        for hw in &self.faders {
            let pins = &hw.pins;
            if !pins.outputs_distinct() {
                return Err(ConfigError::PinConflict);
            }
            for pin in pins.outputs() {
                let bit = 1u32.checked_shl(pin as u32).ok_or(ConfigError::PinConflict)?;
                if used_outputs & bit != 0 {
                    return Err(ConfigError::PinConflict);
                }
                used_outputs |= bit;
            }
            let bit = 1u32
                .checked_shl(pins.sense_channel as u32)
                .ok_or(ConfigError::PinConflict)?;
            if used_channels & bit != 0 {
                return Err(ConfigError::PinConflict);
            }
            used_channels |= bit;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(name: &str, pins: FaderPins) -> FaderHwConfig {
        let mut label = String::new();
        label.push_str(name).unwrap();
        FaderHwConfig { name: label, pins }
    }

    #[test]
    fn test_pin_helpers() {
        let pins = FaderPins::new(0, 1, 2, 0);
        assert_eq!(pins.outputs(), [0, 1, 2]);
        assert!(pins.outputs_distinct());
        assert!(!FaderPins::new(3, 3, 4, 0).outputs_distinct());
    }

    #[test]
    fn test_bank_validate_disjoint() {
        let mut bank = FaderBankConfig::default();
        bank.faders.push(named("ch1", FaderPins::new(0, 1, 2, 0))).unwrap();
        bank.faders.push(named("ch2", FaderPins::new(3, 4, 5, 1))).unwrap();
        assert_eq!(bank.validate(), Ok(()));
        assert_eq!(bank.find("ch2").map(|f| f.pins.enable), Some(3));
        assert!(bank.find("ch3").is_none());
    }

    #[test]
    fn test_bank_validate_conflicts() {
        let mut bank = FaderBankConfig::default();
        bank.faders.push(named("ch1", FaderPins::new(0, 1, 2, 0))).unwrap();
        bank.faders.push(named("ch2", FaderPins::new(2, 4, 5, 1))).unwrap();
        assert_eq!(bank.validate(), Err(ConfigError::PinConflict));

        let mut bank = FaderBankConfig::default();
        bank.faders.push(named("ch1", FaderPins::new(0, 1, 2, 0))).unwrap();
        bank.faders.push(named("ch2", FaderPins::new(3, 4, 5, 0))).unwrap();
        assert_eq!(bank.validate(), Err(ConfigError::PinConflict));

        let mut bank = FaderBankConfig::default();
        bank.faders.push(named("ch1", FaderPins::new(0, 40, 2, 0))).unwrap();
        assert_eq!(bank.validate(), Err(ConfigError::PinConflict));
    }
}
