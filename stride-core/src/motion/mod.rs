//! Motion acquisition
//!
//! Conversion of raw accelerometer output to g and classification of
//! consecutive magnitudes into walk and run steps.

pub mod acquisition;
pub mod classifier;
pub mod sample;

pub use acquisition::{Acquisition, Cycle};
pub use classifier::StepClassifier;
pub use sample::{MotionSample, RawSample, SAMPLE_BYTES};
