//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in stride-core for the devices on the step counter's bus:
//!
//! - Bit-banged 2-wire bus master on two open-drain pins
//! - MMA8451Q 3-axis accelerometer
//! - HD44780 16x2 character LCD behind a PCF8574 I/O expander

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod bus;
pub mod display;
pub mod sensor;

#[cfg(test)]
mod mock;
