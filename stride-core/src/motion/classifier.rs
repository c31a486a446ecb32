//! Step classification from consecutive magnitudes
//!
//! A footfall shows up as a sudden drop in acceleration magnitude between
//! two samples. A large drop counts as a run step, a smaller one as a walk
//! step. The two bands overlap by construction, so the run threshold is
//! always tested first.

use crate::config::ClassifierConfig;
use crate::counters::StepKind;

/// Single-slot magnitude history with walk/run thresholds
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StepClassifier {
    previous: f32,
    walk_threshold: f32,
    run_threshold: f32,
}

impl Default for StepClassifier {
    fn default() -> Self {
        Self::new(&ClassifierConfig::default())
    }
}

impl StepClassifier {
    pub fn new(config: &ClassifierConfig) -> Self {
        Self {
            previous: config.initial_magnitude,
            walk_threshold: config.walk_threshold,
            run_threshold: config.run_threshold,
        }
    }

    /// Magnitude the next sample is compared against
    pub fn previous(&self) -> f32 {
        self.previous
    }

    /// Classify the drop from the previous magnitude to `current`
    ///
    /// `current` becomes the new previous magnitude whatever the outcome.
    pub fn classify(&mut self, current: f32) -> Option<StepKind> {
        let drop = self.previous - current;
        self.previous = current;

        if drop >= self.run_threshold {
            Some(StepKind::Run)
        } else if drop >= self.walk_threshold {
            Some(StepKind::Walk)
        } else {
            None
        }
    }
}
