//! Load Cell Driver
//!
//! Single-channel load cell driver for the driver host. The ADC converts
//! continuously into a shared register; each conversion-complete interrupt
//! pushes the reading into a ten-sample window. At 10 Hz the driver averages
//! and calibrates the window and broadcasts a `LoadcellInfo` message. At
//! 1 Hz it runs its lifecycle state machine, which brings the ADC up and
//! gates the faster hooks.

mod driver;
mod error;
mod frontend;
mod state;

pub use driver::{LoadcellAcquisition, LoadcellDriver, LoadcellWindow, DRIVER_NAME};
pub use error::FrontEndError;
pub use frontend::AnalogFrontEnd;
pub use state::{DriverState, Lifecycle};
