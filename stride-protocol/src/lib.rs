//! Stride Serial Line Protocol
//!
//! This crate defines the human-readable ASCII protocol spoken over the
//! step counter's serial link.
//!
//! # Protocol Overview
//!
//! Both directions are line oriented. Lines end with `\n`; a preceding `\r`
//! is tolerated.
//!
//! ```text
//! device -> host    "   X       Y       Z"            (header, once)
//!                   " 0.0123   0.9981  -0.0044"      (one line per sample)
//! host -> device    "WALK++" | "RUN++" | "RESET"     (commands)
//! ```
//!
//! Sample values are acceleration in g, right-aligned in seven columns with
//! four decimals. Commands are matched exactly; anything else is ignored.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod command;
pub mod line;
pub mod sample;

pub use command::{Command, CommandError};
pub use line::{CarriageReturn, Line, LineError, LineFramer, Overflow};
pub use sample::{format_sample, SampleLine, SAMPLE_HEADER, SAMPLE_LINE_CAPACITY};
