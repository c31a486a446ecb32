//! Stride Hardware Abstraction Layer
//!
//! This crate defines the hardware traits the step counter core is written
//! against. Chip-specific code (the RP2040 firmware, host test doubles)
//! implements them so the same transaction and framing logic runs on the
//! target and under `cargo test`.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (stride-firmware)          │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  stride-core / stride-drivers           │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  stride-hal (this crate - traits)       │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`bus::BusController`] - Register-level 2-wire bus master
//! - [`uart::UartTx`] - Blocking serial transmitter
//! - [`gpio::OpenDrainPin`] - Open-drain line for a bit-banged bus

#![no_std]
#![deny(unsafe_code)]

pub mod bus;
pub mod gpio;
pub mod uart;

// Re-export key traits at crate root for convenience
pub use bus::{Ack, BusConfig, BusController};
pub use gpio::{InputPin, OpenDrainPin};
pub use uart::{UartConfig, UartTx};
