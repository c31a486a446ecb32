//! MMA8451Q 14-bit 3-axis accelerometer
//!
//! Register-mapped device on the 2-wire bus. Samples are read as one
//! six-byte burst starting at `OUT_X_MSB`.

use stride_core::bus::SharedBus;
use stride_core::config::{Range, SensorConfig};
use stride_core::motion::{RawSample, SAMPLE_BYTES};
use stride_core::traits::{Accelerometer, SensorError};
use stride_hal::bus::BusController;

/// MMA8451Q register addresses
pub mod reg {
    /// Data ready / overrun flags
    pub const STATUS: u8 = 0x00;
    /// First of six output registers (X MSB, X LSB, Y MSB, ...)
    pub const OUT_X_MSB: u8 = 0x01;
    /// Device identification
    pub const WHO_AM_I: u8 = 0x0D;
    /// Full-scale range selection
    pub const XYZ_DATA_CFG: u8 = 0x0E;
    /// System control: active bit and output data rate
    pub const CTRL_REG1: u8 = 0x2A;
}

/// `WHO_AM_I` value of the MMA8451Q
pub const DEVICE_ID: u8 = 0x1A;

/// `CTRL_REG1` active bit
const ACTIVE: u8 = 0x01;

/// MMA8451Q on a shared bus
pub struct Mma8451<'a, C> {
    bus: SharedBus<'a, C>,
    address: u8,
    range: Range,
}

impl<'a, C: BusController> Mma8451<'a, C> {
    pub fn new(bus: SharedBus<'a, C>, config: &SensorConfig) -> Self {
        Self {
            bus,
            address: config.address,
            range: config.range,
        }
    }

    pub fn range(&self) -> Range {
        self.range
    }

    /// Read the identification register
    pub fn who_am_i(&mut self) -> Result<u8, SensorError> {
        Ok(self.bus.read_register(self.address, reg::WHO_AM_I)?)
    }
}

impl<C: BusController> Accelerometer for Mma8451<'_, C> {
    /// Range can only change in standby, so the device is put in standby,
    /// configured and then activated.
    fn init(&mut self) -> Result<(), SensorError> {
        if self.who_am_i()? != DEVICE_ID {
            return Err(SensorError::NotPresent);
        }

        self.bus.write_register(self.address, reg::CTRL_REG1, 0x00)?;
        self.bus
            .write_register(self.address, reg::XYZ_DATA_CFG, self.range.register_value())?;
        self.bus.write_register(self.address, reg::CTRL_REG1, ACTIVE)?;
        Ok(())
    }

    fn read_raw(&mut self) -> Result<RawSample, SensorError> {
        let mut buf = [0u8; SAMPLE_BYTES];
        self.bus.read_block(self.address, reg::OUT_X_MSB, &mut buf)?;
        Ok(RawSample::from_bytes(buf))
    }

    fn counts_per_g(&self) -> f32 {
        self.range.counts_per_g()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::FakeBus;
    use core::cell::RefCell;
    use stride_core::bus::{BusEngine, BusError};
    use stride_hal::bus::BusConfig;

    const ADDR: u8 = 0x1D;

    fn sensor_bus() -> RefCell<BusEngine<FakeBus>> {
        let mut fake = FakeBus::new(&[ADDR], ADDR);
        fake.registers[reg::WHO_AM_I as usize] = DEVICE_ID;
        RefCell::new(BusEngine::new(fake, BusConfig::default()))
    }

    #[test]
    fn test_init_sequence() {
        let engine = sensor_bus();
        let config = SensorConfig {
            address: ADDR,
            range: Range::G4,
        };
        let mut sensor = Mma8451::new(SharedBus::new(&engine), &config);
        sensor.init().unwrap();

        let engine = engine.borrow();
        let fake = engine.controller();
        assert_eq!(fake.registers[reg::CTRL_REG1 as usize], ACTIVE);
        assert_eq!(fake.registers[reg::XYZ_DATA_CFG as usize], 0x01);

        let writes: std::vec::Vec<_> = fake
            .writes
            .iter()
            .filter(|(_, bytes)| bytes.len() == 2)
            .map(|(_, bytes)| (bytes[0], bytes[1]))
            .collect();
        assert_eq!(
            writes,
            [
                (reg::CTRL_REG1, 0x00),
                (reg::XYZ_DATA_CFG, 0x01),
                (reg::CTRL_REG1, ACTIVE)
            ]
        );
    }

    #[test]
    fn test_wrong_identity() {
        let engine = sensor_bus();
        engine.borrow_mut().controller_mut().registers[reg::WHO_AM_I as usize] = 0x2A;
        let mut sensor = Mma8451::new(SharedBus::new(&engine), &SensorConfig::default());

        assert_eq!(sensor.init(), Err(SensorError::NotPresent));
    }

    #[test]
    fn test_read_sample() {
        let engine = sensor_bus();
        {
            let mut engine = engine.borrow_mut();
            let regs = &mut engine.controller_mut().registers;
            // X = 1023 counts, Y = -4096 counts, Z = 4096 counts
            regs[1..7].copy_from_slice(&[0x0F, 0xFC, 0xC0, 0x00, 0x40, 0x00]);
        }
        let mut sensor = Mma8451::new(SharedBus::new(&engine), &SensorConfig::default());

        let raw = sensor.read_raw().unwrap();
        assert_eq!(raw, RawSample { x: 1023, y: -4096, z: 4096 });

        let g = sensor.read_g().unwrap();
        assert_eq!(g.y, -1.0);
        assert_eq!(g.z, 1.0);
    }

    #[test]
    fn test_bus_failure_surfaces() {
        let engine = sensor_bus();
        engine.borrow_mut().controller_mut().stalled = true;
        let mut sensor = Mma8451::new(SharedBus::new(&engine), &SensorConfig::default());

        assert_eq!(
            sensor.read_raw(),
            Err(SensorError::Bus(BusError::Timeout))
        );
    }
}
