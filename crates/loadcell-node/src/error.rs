//! Node Error Types

use calibration::CalibrationError;
use driver_host::HostError;
use thiserror::Error;

/// Errors while configuring or starting the node
#[derive(Debug, Error)]
pub enum NodeError {
    /// Configuration could not be read or deserialized
    #[error("Failed to load configuration: {0}")]
    Config(#[from] config::ConfigError),

    /// Calibration range rejected
    #[error("Invalid calibration: {0}")]
    Calibration(#[from] CalibrationError),

    /// Host configuration rejected or host stopped on a fatal error
    #[error(transparent)]
    Host(#[from] HostError),

    /// Simulator settings rejected
    #[error("Invalid simulator settings: {0}")]
    Simulator(String),

    /// Log level string not recognised
    #[error("Invalid log level: {0}")]
    LogLevel(String),

    /// A global tracing subscriber was already installed
    #[error("Failed to install tracing subscriber: {0}")]
    Logging(#[from] tracing::subscriber::SetGlobalDefaultError),
}
