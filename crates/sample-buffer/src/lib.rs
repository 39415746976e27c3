//! Lock-Free Sample Window
//!
//! Provides the fixed-size window of raw ADC readings shared between the
//! conversion-complete interrupt (single producer) and the driver's
//! cooperative ticks (single consumer), plus the acquisition callback that
//! feeds it.

mod acquisition;
mod buffer;

pub use acquisition::{AcquisitionHandle, ConversionRegister};
pub use buffer::SampleBuffer;

/// Raw, unscaled reading from the analog front end
pub type RawSample = u32;

/// Number of readings averaged together by the load cell driver
pub const MOVING_AVERAGE_WINDOW: usize = 10;
