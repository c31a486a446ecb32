//! Board-agnostic core logic for the step counter firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Bus transaction engine (start/restart/stop framing, byte timeouts)
//! - Serial transport and received-line handoff
//! - Command dispatch
//! - Shared step counters
//! - Motion conversion and step classification
//! - Status screens for the character display
//! - Configuration types and parser

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod bus;
pub mod config;
pub mod counters;
pub mod dispatch;
pub mod motion;
pub mod screen;
pub mod serial;
pub mod traits;
