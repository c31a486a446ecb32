//! Hardware abstraction traits
//!
//! These traits define the interface between the application logic
//! and device drivers.

pub mod display;
pub mod sensor;

pub use display::{CharacterDisplay, DisplayError};
pub use sensor::{Accelerometer, SensorError};
