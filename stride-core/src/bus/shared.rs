//! Bus sharing between drivers on the owning task
//!
//! The sensor and the display sit on the same bus. Both drivers hold a
//! [`SharedBus`] handle to one engine; each call borrows the engine for a
//! single transaction. A call made while another transaction holds the
//! engine fails with [`BusError::Busy`] instead of interleaving bytes.

use core::cell::RefCell;

use stride_hal::bus::BusController;

use super::engine::BusEngine;
use super::transaction::BusError;

/// Copyable handle to an engine shared within one execution context
pub struct SharedBus<'a, C> {
    engine: &'a RefCell<BusEngine<C>>,
}

impl<C> Clone for SharedBus<'_, C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C> Copy for SharedBus<'_, C> {}

impl<'a, C: BusController> SharedBus<'a, C> {
    pub fn new(engine: &'a RefCell<BusEngine<C>>) -> Self {
        Self { engine }
    }

    fn with<T>(
        &self,
        f: impl FnOnce(&mut BusEngine<C>) -> Result<T, BusError>,
    ) -> Result<T, BusError> {
        let mut engine = self.engine.try_borrow_mut().map_err(|_| BusError::Busy)?;
        f(&mut engine)
    }

    /// See [`BusEngine::write_register`]
    pub fn write_register(&self, address: u8, register: u8, value: u8) -> Result<(), BusError> {
        self.with(|bus| bus.write_register(address, register, value))
    }

    /// See [`BusEngine::read_register`]
    pub fn read_register(&self, address: u8, register: u8) -> Result<u8, BusError> {
        self.with(|bus| bus.read_register(address, register))
    }

    /// See [`BusEngine::read_block`]
    pub fn read_block(&self, address: u8, register: u8, buf: &mut [u8]) -> Result<(), BusError> {
        self.with(|bus| bus.read_block(address, register, buf))
    }

    /// See [`BusEngine::write_byte`]
    pub fn write_byte(&self, address: u8, value: u8) -> Result<(), BusError> {
        self.with(|bus| bus.write_byte(address, value))
    }

    /// See [`BusEngine::probe`]
    pub fn probe(&self, address: u8) -> Result<(), BusError> {
        self.with(|bus| bus.probe(address))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::engine::mock::{MockController, Op};
    use stride_hal::bus::BusConfig;

    #[test]
    fn test_handles_share_one_engine() {
        let engine = RefCell::new(BusEngine::new(
            MockController::with_rx(&[0x1A]),
            BusConfig::default(),
        ));
        let sensor = SharedBus::new(&engine);
        let display = sensor;

        assert_eq!(sensor.read_register(0x1D, 0x0D), Ok(0x1A));
        display.write_byte(0x27, 0x08).unwrap();

        let engine = engine.borrow();
        let ops = &engine.controller().ops;
        assert_eq!(ops.iter().filter(|op| **op == Op::Start).count(), 2);
        assert!(ops.contains(&Op::Tx(0x4E)));
    }

    #[test]
    fn test_reentrant_call_is_busy() {
        let engine = RefCell::new(BusEngine::new(MockController::default(), BusConfig::default()));
        let bus = SharedBus::new(&engine);

        let _held = engine.borrow_mut();
        assert_eq!(bus.probe(0x27), Err(BusError::Busy));
    }
}
