//! Transaction engine over a register-level bus controller

use stride_hal::bus::{Ack, BusConfig, BusController};

use super::transaction::{Address, BusError, Direction, Phase, PollCounter};

/// Single-owner 2-wire bus master
///
/// Every operation is a complete transaction: the bus is enabled, framed
/// with start/stop and disabled again before the call returns, whether it
/// succeeded or not. A failed byte aborts the rest of the sequence.
pub struct BusEngine<C> {
    controller: C,
    config: BusConfig,
    phase: Phase,
}

impl<C: BusController> BusEngine<C> {
    /// Create a new engine around a bus controller
    pub fn new(controller: C, config: BusConfig) -> Self {
        Self {
            controller,
            config,
            phase: Phase::Idle,
        }
    }

    pub fn config(&self) -> BusConfig {
        self.config
    }

    /// Current transaction phase
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Borrow the underlying controller
    pub fn controller(&self) -> &C {
        &self.controller
    }

    /// Mutably borrow the underlying controller
    pub fn controller_mut(&mut self) -> &mut C {
        &mut self.controller
    }

    /// Write one register
    ///
    /// `start, addr+W, reg, value, stop`
    pub fn write_register(&mut self, address: u8, register: u8, value: u8) -> Result<(), BusError> {
        let address = Address::new(address)?;
        let check = self.config.check_nack;

        self.transaction(|bus| {
            bus.header(address, register, check)?;
            bus.phase = Phase::DataPhase;
            bus.send(value, check)
        })
    }

    /// Read one register
    ///
    /// Equivalent to a one-byte block read: the single byte is answered
    /// with a nack.
    pub fn read_register(&mut self, address: u8, register: u8) -> Result<u8, BusError> {
        let mut buf = [0u8; 1];
        self.read_block(address, register, &mut buf)?;
        Ok(buf[0])
    }

    /// Read consecutive registers starting at `register`
    ///
    /// `start, addr+W, reg, restart, addr+R, data[0] ACK .. data[n-1] NACK, stop`
    ///
    /// Every byte but the last is acknowledged; the final nack tells the
    /// peripheral to release the bus before the stop.
    pub fn read_block(
        &mut self,
        address: u8,
        register: u8,
        buf: &mut [u8],
    ) -> Result<(), BusError> {
        let address = Address::new(address)?;
        if buf.is_empty() {
            return Err(BusError::EmptyTransfer);
        }
        let check = self.config.check_nack;

        self.transaction(|bus| {
            bus.header(address, register, check)?;

            bus.phase = Phase::Restart;
            bus.controller.restart();
            bus.send(address.header(Direction::Read), check)?;

            bus.phase = Phase::ReadPhase;
            let last = buf.len() - 1;
            for (i, slot) in buf.iter_mut().enumerate() {
                let ack = if i == last { Ack::Nack } else { Ack::Ack };
                bus.controller.receive(ack);
                bus.wait()?;
                *slot = bus.controller.read_data();
            }
            Ok(())
        })
    }

    /// Write a single byte to a device that has no register map
    ///
    /// The acknowledge bit is always checked on this path.
    pub fn write_byte(&mut self, address: u8, value: u8) -> Result<(), BusError> {
        let address = Address::new(address)?;

        self.transaction(|bus| {
            bus.phase = Phase::AddressPhase;
            bus.send(address.header(Direction::Write), true)?;
            bus.phase = Phase::DataPhase;
            bus.send(value, true)
        })
    }

    /// Check whether a device acknowledges its address
    pub fn probe(&mut self, address: u8) -> Result<(), BusError> {
        let address = Address::new(address)?;

        self.transaction(|bus| {
            bus.phase = Phase::AddressPhase;
            bus.send(address.header(Direction::Write), true)
        })
    }

    /// Frame `body` with enable/start and stop/disable
    ///
    /// Stop is issued even when `body` fails part way through.
    fn transaction<T>(
        &mut self,
        body: impl FnOnce(&mut Self) -> Result<T, BusError>,
    ) -> Result<T, BusError> {
        self.controller.enable();
        self.phase = Phase::Start;
        self.controller.start();

        let result = body(self);

        self.phase = Phase::Stop;
        self.controller.stop();
        self.controller.disable();
        self.phase = Phase::Idle;

        result
    }

    /// Address and register phases shared by every register transfer
    fn header(&mut self, address: Address, register: u8, check: bool) -> Result<(), BusError> {
        self.phase = Phase::AddressPhase;
        self.send(address.header(Direction::Write), check)?;
        self.phase = Phase::RegisterPhase;
        self.send(register, check)
    }

    /// Shift one byte out and wait for it to complete
    fn send(&mut self, byte: u8, check_nack: bool) -> Result<(), BusError> {
        self.controller.transmit(byte);
        self.wait()?;

        if check_nack && self.controller.nack_received() {
            return Err(BusError::Nack);
        }
        Ok(())
    }

    /// Busy-poll the byte-complete flag
    ///
    /// The flag is polled exactly `poll_limit` times before giving up and is
    /// cleared in both outcomes.
    fn wait(&mut self) -> Result<(), BusError> {
        let mut counter = PollCounter::new(self.config.poll_limit);

        while counter.tick() {
            if self.controller.transfer_complete() {
                self.controller.clear_complete();
                return Ok(());
            }
        }

        self.controller.clear_complete();
        Err(BusError::Timeout)
    }
}

#[cfg(test)]
pub(crate) mod mock {
    use core::cell::Cell;
    use std::collections::VecDeque;
    use std::vec::Vec;

    use stride_hal::bus::{Ack, BusController};

    /// Operations observed on the mock bus
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum Op {
        Enable,
        Disable,
        Start,
        Restart,
        Stop,
        Tx(u8),
        Rx(Ack),
        Read(u8),
    }

    /// Recording bus controller
    ///
    /// Byte transfers are numbered from zero in the order they are started.
    #[derive(Default)]
    pub struct MockController {
        pub ops: Vec<Op>,
        pub rx_data: VecDeque<u8>,
        /// Transfer index whose completion flag never rises
        pub stall_transfer: Option<usize>,
        /// Transfer index the peripheral does not acknowledge
        pub nack_transfer: Option<usize>,
        pub polls: Cell<u32>,
        transfers: usize,
        complete: bool,
        nack: bool,
    }

    impl MockController {
        pub fn with_rx(data: &[u8]) -> Self {
            Self {
                rx_data: data.iter().copied().collect(),
                ..Default::default()
            }
        }

        pub fn acks(&self) -> Vec<Ack> {
            self.ops
                .iter()
                .filter_map(|op| match op {
                    Op::Rx(ack) => Some(*ack),
                    _ => None,
                })
                .collect()
        }

        fn begin_transfer(&mut self, nack: bool) {
            let index = self.transfers;
            self.transfers += 1;
            self.complete = self.stall_transfer != Some(index);
            self.nack = nack && self.nack_transfer == Some(index);
        }
    }

    impl BusController for MockController {
        fn enable(&mut self) {
            self.ops.push(Op::Enable);
        }

        fn disable(&mut self) {
            self.ops.push(Op::Disable);
        }

        fn start(&mut self) {
            self.ops.push(Op::Start);
        }

        fn restart(&mut self) {
            self.ops.push(Op::Restart);
        }

        fn stop(&mut self) {
            self.ops.push(Op::Stop);
        }

        fn transmit(&mut self, byte: u8) {
            self.ops.push(Op::Tx(byte));
            self.begin_transfer(true);
        }

        fn receive(&mut self, ack: Ack) {
            self.ops.push(Op::Rx(ack));
            self.begin_transfer(false);
        }

        fn read_data(&mut self) -> u8 {
            let byte = self.rx_data.pop_front().unwrap_or(0);
            self.ops.push(Op::Read(byte));
            byte
        }

        fn transfer_complete(&self) -> bool {
            self.polls.set(self.polls.get() + 1);
            self.complete
        }

        fn clear_complete(&mut self) {
            self.complete = false;
        }

        fn nack_received(&self) -> bool {
            self.nack
        }
    }
}
