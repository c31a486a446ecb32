//! Build script for stride-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates stride.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Accepted keys per section, with the expected value kind
const SCHEMA: &[(&str, &[(&str, Kind)])] = &[
    ("bus", &[("poll_limit", Kind::Int(1, 65_535)), ("check_nack", Kind::Bool)]),
    ("serial", &[("baudrate", Kind::Int(300, 1_000_000))]),
    ("sensor", &[("address", Kind::Int(0, 0x7F)), ("range", Kind::Range)]),
    (
        "classifier",
        &[
            ("run_threshold", Kind::Float),
            ("walk_threshold", Kind::Float),
            ("initial_magnitude", Kind::Float),
        ],
    ),
    ("sampling", &[("period_ms", Kind::Int(1, 60_000))]),
    ("button", &[("debounce_ms", Kind::Int(0, 1_000))]),
    (
        "display",
        &[
            ("address", Kind::Int(0, 0x7F)),
            ("alt_address", Kind::Int(0, 0x7F)),
            ("reset_banner_ms", Kind::Int(0, 60_000)),
        ],
    ),
];

#[derive(Clone, Copy)]
enum Kind {
    Int(i64, i64),
    Float,
    Bool,
    Range,
}

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate stride.toml at compile time
fn validate_config() {
    println!("cargo:rerun-if-changed=stride.toml");

    let config_path = Path::new("stride.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: stride.toml not found!                                   ║\n\
            ║                                                                  ║\n\
            ║  The firmware embeds stride.toml at build time. Create one in    ║\n\
            ║  the stride-firmware directory (an empty file uses defaults).    ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read stride.toml                               ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in stride.toml                       ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    let mut errors = Vec::new();
    validate_schema(&config, &mut errors);
    validate_thresholds(&config, &mut errors);

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid configuration in stride.toml                     ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            errors
                .iter()
                .map(|e| format!("║  • {:<62} ║", e))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    println!("cargo:warning=stride.toml validated successfully");
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Every section and key must be known and carry the right kind of value.
/// The on-device parser rejects anything else and falls back to defaults.
fn validate_schema(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(root) = config.as_table() else {
        return;
    };

    for (section, value) in root {
        let Some(keys) = SCHEMA.iter().find(|(name, _)| *name == section.as_str()).map(|(_, k)| *k) else {
            errors.push(format!("unknown section [{}]", section));
            continue;
        };
        let Some(table) = value.as_table() else {
            errors.push(format!("[{}] must be a table", section));
            continue;
        };

        for (key, value) in table {
            let Some(kind) = keys.iter().find(|(name, _)| *name == key.as_str()).map(|(_, k)| *k) else {
                errors.push(format!("[{}] unknown key '{}'", section, key));
                continue;
            };
            if let Err(e) = check_kind(value, kind) {
                errors.push(format!("[{}] {} {}", section, key, e));
            }
        }
    }
}

fn check_kind(value: &toml::Value, kind: Kind) -> Result<(), String> {
    match (kind, value) {
        (Kind::Int(min, max), toml::Value::Integer(v)) => {
            if *v < min || *v > max {
                Err(format!("must be {}-{}", min, max))
            } else {
                Ok(())
            }
        }
        (Kind::Float, toml::Value::Float(v)) => {
            if v.is_finite() && *v >= 0.0 {
                Ok(())
            } else {
                Err("must be a non-negative number".to_string())
            }
        }
        (Kind::Bool, toml::Value::Boolean(_)) => Ok(()),
        (Kind::Range, toml::Value::String(s)) => {
            if ["2g", "4g", "8g"].contains(&s.as_str()) {
                Ok(())
            } else {
                Err("must be '2g', '4g', or '8g'".to_string())
            }
        }
        (Kind::Int(..), _) => Err("must be an integer".to_string()),
        (Kind::Float, _) => Err("must be a decimal number (e.g. 0.5)".to_string()),
        (Kind::Bool, _) => Err("must be true or false".to_string()),
        (Kind::Range, _) => Err("must be a string".to_string()),
    }
}

/// Walk threshold must sit strictly between zero and the run threshold
fn validate_thresholds(config: &toml::Value, errors: &mut Vec<String>) {
    let classifier = config.get("classifier");
    let get = |key: &str, default: f64| {
        classifier
            .and_then(|c| c.get(key))
            .and_then(|v| v.as_float())
            .unwrap_or(default)
    };

    let run = get("run_threshold", 0.7);
    let walk = get("walk_threshold", 0.2);
    if !(walk > 0.0 && walk < run) {
        errors.push(format!(
            "[classifier] walk_threshold ({}) must be above 0 and below run_threshold ({})",
            walk, run
        ));
    }
}
