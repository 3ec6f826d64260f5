//! TOML configuration loading
//!
//! ```toml
//! [fader]
//! dead_zone = 2
//!
//! [fader.calibration]
//! passes = 5
//! settle_ms = 2000
//!
//! [[faders]]
//! name = "ch1"
//! pins = { enable = 0, forward = 1, reverse = 2, sense_channel = 0 }
//! ```
//!
//! Missing tuning fields fall back to their defaults.

use super::hardware::FaderBankConfig;
use super::types::{ConfigError, FaderConfig};

/// Parse and validate the tuning for a single fader
pub fn parse_config(input: &str) -> Result<FaderConfig, ConfigError> {
    let config: FaderConfig = toml::from_str(input).map_err(|_| ConfigError::Parse)?;
    config.validate()?;
    Ok(config)
}

/// Parse and validate a bank of faders
pub fn parse_bank_config(input: &str) -> Result<FaderBankConfig, ConfigError> {
    let bank: FaderBankConfig = toml::from_str(input).map_err(|_| ConfigError::Parse)?;
    bank.validate()?;
    Ok(bank)
}
