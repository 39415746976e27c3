//! Calibration Engine

use crate::average::moving_average;
use crate::error::CalibrationError;
use crate::range::CalibrationRange;
use sample_buffer::RawSample;
use tracing::{debug, info};

/// Holds the latest calibrated measurement
#[derive(Debug, Clone)]
pub struct CalibrationEngine {
    range: CalibrationRange,
    measured: f32,
}

impl CalibrationEngine {
    /// Create an engine for a validated range
    pub fn new(range: CalibrationRange) -> Result<Self, CalibrationError> {
        range.validate()?;
        info!("Creating calibration engine with range: {:?}", range);
        Ok(Self {
            range,
            measured: range.out_min,
        })
    }

    /// Average the window, calibrate it and store the result
    pub fn compute(&mut self, samples: &[RawSample]) -> f32 {
        let average = moving_average(samples);
        self.measured = self.range.map(average as f32);
        debug!(average, weight = self.measured, "Calibrated load cell window");
        self.measured
    }

    /// Latest calibrated measurement
    pub fn measured(&self) -> f32 {
        self.measured
    }
}

impl Default for CalibrationEngine {
    fn default() -> Self {
        let range = CalibrationRange::default();
        Self {
            range,
            measured: range.out_min,
        }
    }
}
