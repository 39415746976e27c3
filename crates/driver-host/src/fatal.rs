//! Fatal Error Channel

use std::sync::{Arc, OnceLock};
use thiserror::Error;
use tracing::error;

/// Unrecoverable condition reported by a driver
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{driver}: {reason}")]
pub struct FatalError {
    /// Driver that raised the error
    pub driver: &'static str,
    /// What went wrong
    pub reason: String,
}

/// Shared handle to the node's global error handler.
///
/// Raising does not return control to a degraded mode: the host stops
/// dispatching after the current hook and exits its loop. Only the first
/// error raised is kept.
#[derive(Debug, Clone, Default)]
pub struct FatalSignal {
    inner: Arc<OnceLock<FatalError>>,
}

impl FatalSignal {
    /// Create an unraised signal
    pub fn new() -> Self {
        Self::default()
    }

    /// Escalate an unrecoverable error
    pub fn raise(&self, driver: &'static str, reason: impl Into<String>) {
        let fatal = FatalError {
            driver,
            reason: reason.into(),
        };
        match self.inner.set(fatal.clone()) {
            Ok(()) => error!(driver, reason = %fatal.reason, "Fatal error raised, halting node"),
            Err(_) => error!(driver, reason = %fatal.reason, "Fatal error raised while already halting"),
        }
    }

    /// The first error raised, if any
    pub fn raised(&self) -> Option<FatalError> {
        self.inner.get().cloned()
    }

    /// Whether any error has been raised
    pub fn is_raised(&self) -> bool {
        self.inner.get().is_some()
    }
}
