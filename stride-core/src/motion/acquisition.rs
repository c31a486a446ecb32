//! One acquisition cycle: read, convert, classify, count

use crate::counters::{StepCounters, StepCounts, StepKind};
use crate::traits::{Accelerometer, SensorError};

use super::classifier::StepClassifier;
use super::sample::MotionSample;

/// Outcome of a successful cycle
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Cycle {
    /// Converted sample
    pub sample: MotionSample,
    /// Magnitude of `sample`
    pub magnitude: f32,
    /// Step detected in this cycle
    pub step: Option<StepKind>,
    /// Counters after any increment
    pub counts: StepCounts,
}

/// Sampling loop state
pub struct Acquisition {
    classifier: StepClassifier,
}

impl Acquisition {
    pub fn new(classifier: StepClassifier) -> Self {
        Self { classifier }
    }

    pub fn classifier(&self) -> &StepClassifier {
        &self.classifier
    }

    /// Run one cycle against `sensor`
    ///
    /// A failed read is returned as-is and the sample is skipped: the
    /// classifier keeps its previous magnitude and no counter changes.
    pub fn run_cycle<A: Accelerometer>(
        &mut self,
        sensor: &mut A,
        counters: &StepCounters,
    ) -> Result<Cycle, SensorError> {
        let sample = sensor.read_g()?;
        let magnitude = sample.magnitude();
        let step = self.classifier.classify(magnitude);

        let counts = match step {
            Some(kind) => counters.increment(kind),
            None => counters.snapshot(),
        };

        Ok(Cycle {
            sample,
            magnitude,
            step,
            counts,
        })
    }
}
