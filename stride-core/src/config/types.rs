//! Configuration type definitions
//!
//! Every default matches the constants the board has always run with, so a
//! missing or partial `stride.toml` behaves like the stock firmware.

use stride_hal::bus::BusConfig;
use stride_hal::uart::UartConfig;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::ConfigError;

/// Accelerometer full-scale range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Range {
    /// ±2 g
    #[default]
    G2,
    /// ±4 g
    G4,
    /// ±8 g
    G8,
}

impl Range {
    /// Value for the range field of the data configuration register
    pub fn register_value(self) -> u8 {
        match self {
            Range::G2 => 0x00,
            Range::G4 => 0x01,
            Range::G8 => 0x02,
        }
    }

    /// Sensitivity in 14-bit counts per g
    pub fn counts_per_g(self) -> f32 {
        match self {
            Range::G2 => 4096.0,
            Range::G4 => 2048.0,
            Range::G8 => 1024.0,
        }
    }

    /// Parse "2g", "4g" or "8g"
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "2g" => Some(Range::G2),
            "4g" => Some(Range::G4),
            "8g" => Some(Range::G8),
            _ => None,
        }
    }
}

/// Accelerometer configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SensorConfig {
    /// 7-bit bus address
    pub address: u8,
    /// Full-scale range
    pub range: Range,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            address: 0x1D,
            range: Range::G2,
        }
    }
}

/// Step classifier thresholds (g)
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ClassifierConfig {
    /// Magnitude drop that counts as a run step
    pub run_threshold: f32,
    /// Magnitude drop that counts as a walk step
    pub walk_threshold: f32,
    /// Magnitude assumed before the first sample
    pub initial_magnitude: f32,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            run_threshold: 0.7,
            walk_threshold: 0.2,
            initial_magnitude: 1.0,
        }
    }
}

/// Sampling cadence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SamplingConfig {
    /// Time between samples (ms)
    pub period_ms: u32,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self { period_ms: 100 }
    }
}

/// Reset button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ButtonConfig {
    /// Time the input must stay low before a press counts (ms)
    pub debounce_ms: u32,
}

impl Default for ButtonConfig {
    fn default() -> Self {
        Self { debounce_ms: 20 }
    }
}

/// Character display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DisplayConfig {
    /// Expander address tried first
    pub address: u8,
    /// Expander address tried if the first does not answer
    pub alt_address: u8,
    /// How long the reset banner stays up (ms)
    pub reset_banner_ms: u32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            address: 0x27,
            alt_address: 0x3F,
            reset_banner_ms: 1000,
        }
    }
}

/// Complete device configuration
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StrideConfig {
    pub bus: BusConfig,
    pub serial: UartConfig,
    pub sensor: SensorConfig,
    pub classifier: ClassifierConfig,
    pub sampling: SamplingConfig,
    pub button: ButtonConfig,
    pub display: DisplayConfig,
}

impl StrideConfig {
    /// Check cross-field constraints
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bus.poll_limit == 0 || self.serial.baudrate == 0 || self.sampling.period_ms == 0 {
            return Err(ConfigError::OutOfRange);
        }

        for address in [
            self.sensor.address,
            self.display.address,
            self.display.alt_address,
        ] {
            if address > 0x7F {
                return Err(ConfigError::OutOfRange);
            }
        }

        let c = &self.classifier;
        let walk_ok = c.walk_threshold > 0.0 && c.walk_threshold < c.run_threshold;
        let initial_ok = c.initial_magnitude >= 0.0;
        if !walk_ok || !initial_ok {
            return Err(ConfigError::OutOfRange);
        }

        Ok(())
    }
}
