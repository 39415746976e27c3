//! Calibration Error Types

use thiserror::Error;

/// Errors raised while validating a calibration range
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalibrationError {
    /// Raw range is empty or inverted
    #[error("Raw range [{min}, {max}] is empty or inverted")]
    InvalidRawRange { min: u32, max: u32 },

    /// Output range is empty or inverted
    #[error("Output range [{min}, {max}] is empty or inverted")]
    InvalidOutputRange { min: f32, max: f32 },
}
