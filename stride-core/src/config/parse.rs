//! Minimal TOML parser for `stride.toml`
//!
//! Handles only the subset the configuration file uses:
//! - `[section]` headers
//! - `key = value` pairs with integer (decimal or `0x` hex), float, boolean
//!   and double-quoted string values
//! - Comments (`# ...`), whole-line and trailing
//!
//! Keys that are not given keep their defaults. The result is validated
//! before it is returned.

use super::types::{Range, StrideConfig};
use super::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Bus,
    Serial,
    Sensor,
    Classifier,
    Sampling,
    Button,
    Display,
}

/// Parse TOML text on top of the default configuration
pub fn parse_config(input: &str) -> Result<StrideConfig, ConfigError> {
    let mut config = StrideConfig::default();
    let mut section = Section::Root;

    for line in input.lines() {
        let line = strip_comment(line).trim();

        if line.is_empty() {
            continue;
        }

        if line.starts_with('[') && line.ends_with(']') {
            section = parse_section_header(&line[1..line.len() - 1])?;
            continue;
        }

        let (key, value) = parse_key_value(line).ok_or(ConfigError::InvalidValue)?;
        apply_value(&mut config, section, key, value)?;
    }

    config.validate()?;
    Ok(config)
}

fn parse_section_header(header: &str) -> Result<Section, ConfigError> {
    match header.trim() {
        "bus" => Ok(Section::Bus),
        "serial" => Ok(Section::Serial),
        "sensor" => Ok(Section::Sensor),
        "classifier" => Ok(Section::Classifier),
        "sampling" => Ok(Section::Sampling),
        "button" => Ok(Section::Button),
        "display" => Ok(Section::Display),
        _ => Err(ConfigError::InvalidSection),
    }
}

/// Drop a trailing comment unless the `#` sits inside a string
fn strip_comment(line: &str) -> &str {
    let mut in_string = false;
    for (i, c) in line.char_indices() {
        match c {
            '"' => in_string = !in_string,
            '#' if !in_string => return &line[..i],
            _ => {}
        }
    }
    line
}

fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once('=')?;
    let key = key.trim();
    let value = value.trim();

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

fn apply_value(
    config: &mut StrideConfig,
    section: Section,
    key: &str,
    value: &str,
) -> Result<(), ConfigError> {
    match (section, key) {
        (Section::Bus, "poll_limit") => config.bus.poll_limit = parse_int(value)?,
        (Section::Bus, "check_nack") => config.bus.check_nack = parse_bool(value)?,
        (Section::Serial, "baudrate") => config.serial.baudrate = parse_int(value)?,
        (Section::Sensor, "address") => config.sensor.address = parse_int(value)?,
        (Section::Sensor, "range") => {
            config.sensor.range =
                Range::from_name(parse_string(value)?).ok_or(ConfigError::InvalidValue)?
        }
        (Section::Classifier, "run_threshold") => {
            config.classifier.run_threshold = parse_float(value)?
        }
        (Section::Classifier, "walk_threshold") => {
            config.classifier.walk_threshold = parse_float(value)?
        }
        (Section::Classifier, "initial_magnitude") => {
            config.classifier.initial_magnitude = parse_float(value)?
        }
        (Section::Sampling, "period_ms") => config.sampling.period_ms = parse_int(value)?,
        (Section::Button, "debounce_ms") => config.button.debounce_ms = parse_int(value)?,
        (Section::Display, "address") => config.display.address = parse_int(value)?,
        (Section::Display, "alt_address") => config.display.alt_address = parse_int(value)?,
        (Section::Display, "reset_banner_ms") => {
            config.display.reset_banner_ms = parse_int(value)?
        }
        _ => return Err(ConfigError::InvalidKey),
    }
    Ok(())
}

fn parse_string(value: &str) -> Result<&str, ConfigError> {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .ok_or(ConfigError::InvalidValue)
}

/// Decimal or `0x`-prefixed hex with optional `_` separators,
/// range-checked against `T`
fn parse_int<T: TryFrom<u32>>(value: &str) -> Result<T, ConfigError> {
    let (digits, radix) = match value.strip_prefix("0x") {
        Some(hex) => (hex, 16),
        None => (value, 10),
    };

    let mut wide: u32 = 0;
    let mut seen = false;
    for c in digits.chars().filter(|&c| c != '_') {
        let digit = c.to_digit(radix).ok_or(ConfigError::InvalidValue)?;
        wide = wide
            .checked_mul(radix)
            .and_then(|w| w.checked_add(digit))
            .ok_or(ConfigError::OutOfRange)?;
        seen = true;
    }
    if !seen {
        return Err(ConfigError::InvalidValue);
    }

    T::try_from(wide).map_err(|_| ConfigError::OutOfRange)
}

fn parse_float(value: &str) -> Result<f32, ConfigError> {
    value.parse().map_err(|_| ConfigError::InvalidValue)
}

fn parse_bool(value: &str) -> Result<bool, ConfigError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ConfigError::InvalidValue),
    }
}
