//! Load Cell Calibration
//!
//! Turns the raw sample window into a calibrated weight: a moving average
//! followed by an affine map from the ADC range onto the physical range.

mod average;
mod engine;
mod error;
mod range;

pub use average::moving_average;
pub use engine::CalibrationEngine;
pub use error::CalibrationError;
pub use range::CalibrationRange;
