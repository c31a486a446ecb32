//! Bit-banged 2-wire bus master
//!
//! Drives SCL and SDA as open-drain GPIO lines at roughly 100 kHz. Every
//! framing call completes synchronously, so the completion flag is set as
//! soon as a byte has been clocked. If SCL cannot be released (a device or
//! a short holds it low) the byte is abandoned with the flag still clear,
//! and the transaction engine reports a timeout after its poll budget.

use embedded_hal::delay::DelayNs;
use stride_hal::bus::{Ack, BusController};
use stride_hal::gpio::OpenDrainPin;

/// Half of one SCL period (µs)
const HALF_PERIOD_US: u32 = 5;

/// Bus master on two open-drain lines
pub struct BitBangBus<P, D> {
    scl: P,
    sda: P,
    delay: D,
    complete: bool,
    nack: bool,
    data: u8,
}

impl<P: OpenDrainPin, D: DelayNs> BitBangBus<P, D> {
    pub fn new(scl: P, sda: P, delay: D) -> Self {
        Self {
            scl,
            sda,
            delay,
            complete: false,
            nack: false,
            data: 0,
        }
    }

    fn half(&mut self) {
        self.delay.delay_us(HALF_PERIOD_US);
    }

    fn set_sda(&mut self, high: bool) {
        if high {
            self.sda.release();
        } else {
            self.sda.drive_low();
        }
    }

    /// Release SCL and report whether it actually went high
    fn scl_high(&mut self) -> bool {
        self.scl.release();
        self.half();
        self.scl.is_high()
    }

    fn scl_low(&mut self) {
        self.scl.drive_low();
        self.half();
    }

    /// One clock pulse with SDA set to `bit`; returns the sampled SDA level
    fn clock_bit(&mut self, bit: bool) -> Option<bool> {
        self.set_sda(bit);
        if !self.scl_high() {
            return None;
        }
        let level = self.sda.is_high();
        self.scl_low();
        Some(level)
    }
}

impl<P: OpenDrainPin, D: DelayNs> BusController for BitBangBus<P, D> {
    fn enable(&mut self) {
        self.sda.release();
        self.scl.release();
        self.complete = false;
        self.nack = false;
    }

    fn disable(&mut self) {
        self.sda.release();
        self.scl.release();
    }

    /// SDA falls while SCL is high
    fn start(&mut self) {
        self.sda.release();
        self.scl.release();
        self.half();
        self.sda.drive_low();
        self.half();
        self.scl_low();
    }

    fn restart(&mut self) {
        self.sda.release();
        self.half();
        self.start();
    }

    /// SDA rises while SCL is high
    fn stop(&mut self) {
        self.sda.drive_low();
        self.half();
        self.scl.release();
        self.half();
        self.sda.release();
        self.half();
    }

    fn transmit(&mut self, byte: u8) {
        self.complete = false;
        for i in (0..8).rev() {
            if self.clock_bit(byte & (1 << i) != 0).is_none() {
                return;
            }
        }
        // Ninth clock: the device pulls SDA low to acknowledge
        if let Some(level) = self.clock_bit(true) {
            self.nack = level;
            self.complete = true;
        }
    }

    fn receive(&mut self, ack: Ack) {
        self.complete = false;
        let mut data = 0u8;
        for _ in 0..8 {
            match self.clock_bit(true) {
                Some(level) => data = (data << 1) | level as u8,
                None => return,
            }
        }
        if self.clock_bit(ack == Ack::Nack).is_none() {
            return;
        }
        self.sda.release();
        self.data = data;
        self.complete = true;
    }

    fn read_data(&mut self) -> u8 {
        self.data
    }

    fn transfer_complete(&self) -> bool {
        self.complete
    }

    fn clear_complete(&mut self) {
        self.complete = false;
    }

    fn nack_received(&self) -> bool {
        self.nack
    }
}
