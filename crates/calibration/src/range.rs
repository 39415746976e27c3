//! Affine Calibration Range

use crate::error::CalibrationError;
use serde::{Deserialize, Serialize};

/// Expected ADC range and the weight range it maps onto
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalibrationRange {
    /// ADC reading at zero load
    pub raw_min: u32,
    /// ADC reading at full load
    pub raw_max: u32,
    /// Weight reported at `raw_min` (kg)
    pub out_min: f32,
    /// Weight reported at `raw_max` (kg)
    pub out_max: f32,
}

impl Default for CalibrationRange {
    fn default() -> Self {
        Self {
            raw_min: 100,
            raw_max: 4000,
            out_min: 0.0,
            out_max: 7.5,
        }
    }
}

impl CalibrationRange {
    /// Check that both ranges are non-empty and increasing
    pub fn validate(&self) -> Result<(), CalibrationError> {
        if self.raw_max <= self.raw_min {
            return Err(CalibrationError::InvalidRawRange {
                min: self.raw_min,
                max: self.raw_max,
            });
        }
        if !(self.out_max > self.out_min) {
            return Err(CalibrationError::InvalidOutputRange {
                min: self.out_min,
                max: self.out_max,
            });
        }
        Ok(())
    }

    /// Map an averaged reading onto the weight range.
    ///
    /// Results below `out_min` are clamped to it. Results above `out_max`
    /// are passed through so over-range loads stay visible downstream.
    pub fn map(&self, average: f32) -> f32 {
        let raw_min = f64::from(self.raw_min);
        let raw_span = f64::from(self.raw_max) - raw_min;
        let out_min = f64::from(self.out_min);
        let out_span = f64::from(self.out_max) - out_min;

        let weight = ((f64::from(average) - raw_min) * out_span / raw_span + out_min) as f32;

        if weight < self.out_min {
            self.out_min
        } else {
            weight
        }
    }
}
