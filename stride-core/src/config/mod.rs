//! Configuration
//!
//! Device settings with defaults, validation and a small parser for the
//! `stride.toml` text embedded in the firmware image.

pub mod parse;
pub mod types;

pub use parse::parse_config;
pub use types::*;

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Unknown `[section]`
    InvalidSection,
    /// Unknown key for its section
    InvalidKey,
    /// Value has the wrong type or syntax
    InvalidValue,
    /// Value parsed but is outside the accepted range
    OutOfRange,
}
