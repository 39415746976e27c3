//! Driver Host for Multi-Rate Firmware Drivers
//!
//! Runs registered drivers from four fixed-rate hooks on a single
//! cooperative context, routes inbound CAN transfers to them, and carries
//! the fatal-error channel drivers use to halt the node.

mod error;
mod fatal;
mod host;
mod module;

pub use error::HostError;
pub use fatal::{FatalError, FatalSignal};
pub use host::{DriverHost, HostConfig};
pub use module::{DriverModule, Rate};
