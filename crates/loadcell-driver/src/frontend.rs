//! Analog Front-End Interface

use crate::driver::LoadcellAcquisition;
use crate::error::FrontEndError;

/// ADC channel the load cell is wired to.
///
/// Each call is synchronous and fails immediately. Any error is fatal to
/// the driver.
pub trait AnalogFrontEnd {
    /// Configure the DMA channel and the ADC peripheral
    fn configure(&mut self) -> Result<(), FrontEndError>;

    /// Run the ADC's offset self-calibration
    fn calibrate(&mut self) -> Result<(), FrontEndError>;

    /// Start continuous conversion into `acquisition`'s register, invoking
    /// its callback after every completed conversion.
    ///
    /// Called again after a fault; must replace any earlier conversion run.
    fn start_continuous(&mut self, acquisition: LoadcellAcquisition) -> Result<(), FrontEndError>;
}
