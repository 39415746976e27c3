//! Load Cell Telemetry
//!
//! Defines the `LoadcellInfo` broadcast message and the narrow interfaces a
//! driver uses to reach the outside world: the CAN transport that frames and
//! sends encoded payloads, and the parameter store that supplies
//! configuration values by id.

mod error;
mod message;
mod params;
mod transport;

pub use error::{TelemetryError, TransportError};
pub use message::{LoadcellInfo, LOADCELL_INFO, LOADCELL_INFO_MAX_SIZE};
pub use params::{ParamId, ParamStore, ParamValue, StaticParamStore};
pub use transport::{DataType, Priority, RxTransfer, TransferId, Transport};
