//! Accelerometer trait

use crate::bus::BusError;
use crate::motion::{MotionSample, RawSample};

/// Errors that can occur while sampling the accelerometer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorError {
    /// Bus transaction failed
    Bus(BusError),
    /// Device answered with an unexpected identity
    NotPresent,
}

impl From<BusError> for SensorError {
    fn from(e: BusError) -> Self {
        SensorError::Bus(e)
    }
}

/// Trait for 3-axis accelerometers
///
/// Implementations own the register map of one device; the bus they talk
/// through is shared with other peripherals.
pub trait Accelerometer {
    /// Put the device into active mode with the configured range
    fn init(&mut self) -> Result<(), SensorError>;

    /// Read one raw sample of all three axes
    fn read_raw(&mut self) -> Result<RawSample, SensorError>;

    /// Sensitivity of the configured range in counts per g
    fn counts_per_g(&self) -> f32;

    /// Read one sample converted to g
    fn read_g(&mut self) -> Result<MotionSample, SensorError> {
        let raw = self.read_raw()?;
        Ok(MotionSample::from_raw(raw, self.counts_per_g()))
    }
}
