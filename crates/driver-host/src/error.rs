//! Driver Host Error Types

use crate::fatal::FatalError;
use thiserror::Error;

/// Reasons the host loop stops before shutdown is requested
#[derive(Debug, Clone, Error)]
pub enum HostError {
    /// A driver escalated an unrecoverable condition
    #[error("Fatal error escalated by driver: {0}")]
    Fatal(#[from] FatalError),

    /// A rate period of zero was configured
    #[error("Invalid period for {0} hook: must be non-zero")]
    InvalidPeriod(&'static str),
}
