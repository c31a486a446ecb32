//! Simulated bus with a register-mapped device and plain byte devices

use std::vec::Vec;

use embedded_hal::delay::DelayNs;
use stride_hal::bus::{Ack, BusController};

/// One completed write transaction: target address and the bytes after the
/// address byte
pub type Write = (u8, Vec<u8>);

/// Devices answer at `present`. The device at `register_device` has a
/// 256-byte register file with an auto-incrementing pointer; every other
/// device just logs what it is sent.
pub struct FakeBus {
    pub present: Vec<u8>,
    pub register_device: u8,
    pub registers: [u8; 256],
    pub writes: Vec<Write>,
    /// Fail every byte transfer with a stuck completion flag
    pub stalled: bool,
    target: Option<(u8, bool)>,
    bytes: Vec<u8>,
    pointer: u8,
    complete: bool,
    nack: bool,
    data: u8,
}

impl FakeBus {
    pub fn new(present: &[u8], register_device: u8) -> Self {
        Self {
            present: present.to_vec(),
            register_device,
            registers: [0; 256],
            writes: Vec::new(),
            stalled: false,
            target: None,
            bytes: Vec::new(),
            pointer: 0,
            complete: false,
            nack: false,
            data: 0,
        }
    }

    /// Bytes written to a plain device, flattened across transactions
    pub fn bytes_to(&self, address: u8) -> Vec<u8> {
        self.writes
            .iter()
            .filter(|(a, _)| *a == address)
            .flat_map(|(_, bytes)| bytes.iter().copied())
            .collect()
    }

    fn finish(&mut self) {
        if let Some((address, false)) = self.target.take() {
            if !self.bytes.is_empty() {
                self.writes.push((address, std::mem::take(&mut self.bytes)));
            }
        }
        self.bytes.clear();
    }
}

impl BusController for FakeBus {
    fn enable(&mut self) {}

    fn disable(&mut self) {}

    fn start(&mut self) {
        self.target = None;
    }

    fn restart(&mut self) {
        self.finish();
    }

    fn stop(&mut self) {
        self.finish();
    }

    fn transmit(&mut self, byte: u8) {
        self.complete = !self.stalled;
        match self.target {
            None => {
                let address = byte >> 1;
                let read = byte & 1 == 1;
                self.nack = !self.present.contains(&address);
                self.target = Some((address, read));
            }
            Some((address, false)) => {
                self.nack = false;
                if address == self.register_device {
                    if self.bytes.is_empty() {
                        self.pointer = byte;
                    } else {
                        self.registers[self.pointer as usize] = byte;
                        self.pointer = self.pointer.wrapping_add(1);
                    }
                }
                self.bytes.push(byte);
            }
            Some((_, true)) => {}
        }
    }

    fn receive(&mut self, _ack: Ack) {
        self.complete = !self.stalled;
        self.data = match self.target {
            Some((address, _))
                if address == self.register_device && self.present.contains(&address) =>
            {
                let value = self.registers[self.pointer as usize];
                self.pointer = self.pointer.wrapping_add(1);
                value
            }
            // Released bus reads as all ones
            _ => 0xFF,
        };
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

/// Delay that returns immediately and totals what was asked for
#[derive(Default)]
pub struct NoDelay {
    pub total_ns: u64,
}

impl DelayNs for NoDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns += ns as u64;
    }
}
