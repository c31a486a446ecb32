//! 2-wire bus abstractions
//!
//! The step counter drives its bus at the level of individual framing
//! operations (start, repeated start, stop, one byte at a time) rather than
//! whole transfers, so that the transaction engine in `stride-core` owns
//! the protocol sequence and its timeout handling.

/// Acknowledge answer given by the master after clocking in a byte
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Ack {
    /// Pull SDA low: the peripheral should send another byte
    Ack,
    /// Leave SDA high: this is the last byte of the read
    Nack,
}

/// Register-level 2-wire bus master
///
/// Mirrors the control/status register model of a typical MCU bus
/// peripheral. None of these calls block; completion of a byte transfer is
/// observed by polling [`BusController::transfer_complete`].
pub trait BusController {
    /// Power up the bus module
    fn enable(&mut self);

    /// Power down the bus module
    fn disable(&mut self);

    /// Enter master transmit mode and generate a start condition
    fn start(&mut self);

    /// Generate a repeated start condition
    fn restart(&mut self);

    /// Generate a stop condition and leave master mode
    fn stop(&mut self);

    /// Load a byte into the data register and begin shifting it out
    fn transmit(&mut self, byte: u8);

    /// Switch to receive mode and begin clocking in one byte
    ///
    /// `ack` is the answer driven on the ninth clock.
    fn receive(&mut self, ack: Ack);

    /// Read the last byte clocked in
    fn read_data(&mut self) -> u8;

    /// Byte-complete flag
    fn transfer_complete(&self) -> bool;

    /// Clear the byte-complete flag
    fn clear_complete(&mut self);

    /// True if the peripheral left the last transmitted byte unacknowledged
    fn nack_received(&self) -> bool;
}

/// Bus timing and error-checking configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BusConfig {
    /// Number of completion-flag polls before a byte is declared timed out
    pub poll_limit: u16,
    /// Check the acknowledge bit after every byte of register transfers
    ///
    /// Raw byte writes always check it.
    pub check_nack: bool,
}

impl Default for BusConfig {
    fn default() -> Self {
        Self {
            poll_limit: 10_000,
            check_nack: false,
        }
    }
}
