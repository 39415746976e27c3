//! Driver lifecycle state

use std::fmt;
use tracing::info;

/// Lifecycle state of a driver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DriverState {
    /// Just constructed, or recovering from an unrecognized state
    #[default]
    Unknown,
    /// Peripheral bring-up in progress
    Initializing,
    /// Acquiring and publishing
    Operating,
    /// Stopped on a detected fault, bring-up is retried
    Faulted,
}

impl fmt::Display for DriverState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DriverState::Unknown => "unknown",
            DriverState::Initializing => "initializing",
            DriverState::Operating => "operating",
            DriverState::Faulted => "faulted",
        };
        f.write_str(name)
    }
}

/// Current and previous state, updated once per slow tick
#[derive(Debug, Clone, Default)]
pub struct Lifecycle {
    current: DriverState,
    previous: DriverState,
}

impl Lifecycle {
    /// Start in `Unknown`
    pub fn new() -> Self {
        Self::default()
    }

    /// Active state
    pub fn current(&self) -> DriverState {
        self.current
    }

    /// State before the last step
    pub fn previous(&self) -> DriverState {
        self.previous
    }

    /// Record one step. `previous` is updated even when the state stays put.
    pub fn step(&mut self, next: DriverState) {
        if next != self.current {
            info!("Driver state {} -> {}", self.current, next);
        }
        self.previous = self.current;
        self.current = next;
    }
}
