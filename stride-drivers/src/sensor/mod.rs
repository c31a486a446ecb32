//! Accelerometers

pub mod mma8451;

pub use mma8451::Mma8451;
