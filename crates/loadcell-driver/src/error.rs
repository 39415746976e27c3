//! Analog Front-End Error Types

use thiserror::Error;

/// Failures during ADC bring-up
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FrontEndError {
    /// Peripheral or DMA configuration failed
    #[error("ADC configuration failed: {0}")]
    Configure(String),

    /// Self-calibration did not complete
    #[error("ADC calibration failed: {0}")]
    Calibration(String),

    /// Continuous conversion could not be started
    #[error("ADC continuous conversion start failed: {0}")]
    Start(String),
}
