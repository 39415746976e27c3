//! Simulated ADC front end
//!
//! Stands in for the ADC + DMA pair when running the node off-target: a
//! tokio task plays the part of the continuous conversion, latching a
//! triangular ramp into the conversion register and raising the
//! conversion-complete callback.

use crate::error::NodeError;
use loadcell_driver::{AnalogFrontEnd, FrontEndError, LoadcellAcquisition};
use sample_buffer::RawSample;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// Largest value a 12-bit ADC can report
pub const ADC_FULL_SCALE: RawSample = 4095;

/// Simulated ADC settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatorConfig {
    /// Time between conversions in microseconds
    pub sample_interval_us: u64,
    /// Lowest reading of the ramp
    pub raw_low: RawSample,
    /// Highest reading of the ramp
    pub raw_high: RawSample,
    /// Change between consecutive readings
    pub ramp_step: RawSample,
    /// Make ADC self-calibration fail (exercises the fatal path)
    pub fail_calibration: bool,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            sample_interval_us: 1000,
            raw_low: 100,
            raw_high: 4000,
            ramp_step: 1,
            fail_calibration: false,
        }
    }
}

impl SimulatorConfig {
    /// Check the ramp fits the ADC and actually moves
    pub fn validate(&self) -> Result<(), NodeError> {
        if self.sample_interval_us == 0 {
            return Err(NodeError::Simulator("sample_interval_us must be non-zero".to_string()));
        }
        if self.raw_low > self.raw_high || self.raw_high > ADC_FULL_SCALE {
            return Err(NodeError::Simulator(format!(
                "ramp [{}, {}] must lie within [0, {}]",
                self.raw_low, self.raw_high, ADC_FULL_SCALE
            )));
        }
        if self.ramp_step == 0 {
            return Err(NodeError::Simulator("ramp_step must be non-zero".to_string()));
        }
        Ok(())
    }
}

/// Triangle wave bouncing between two readings
#[derive(Debug, Clone)]
pub struct Ramp {
    low: RawSample,
    high: RawSample,
    step: RawSample,
    value: RawSample,
    rising: bool,
}

impl Ramp {
    /// Start at `low`, rising
    pub fn new(low: RawSample, high: RawSample, step: RawSample) -> Self {
        Self {
            low,
            high,
            step,
            value: low,
            rising: true,
        }
    }

    /// Produce the next reading
    pub fn next_sample(&mut self) -> RawSample {
        let sample = self.value;

        if self.rising {
            self.value = self.value.saturating_add(self.step).min(self.high);
            if self.value == self.high {
                self.rising = false;
            }
        } else {
            self.value = self.value.saturating_sub(self.step).max(self.low);
            if self.value == self.low {
                self.rising = true;
            }
        }

        sample
    }
}

/// ADC front end backed by a tokio task
#[derive(Debug)]
pub struct SimulatedFrontEnd {
    config: SimulatorConfig,
    configured: bool,
    conversion: Option<JoinHandle<()>>,
}

impl SimulatedFrontEnd {
    /// Create an unconfigured front end
    pub fn new(config: SimulatorConfig) -> Self {
        Self {
            config,
            configured: false,
            conversion: None,
        }
    }

    /// Whether a conversion task is running
    pub fn is_converting(&self) -> bool {
        self.conversion
            .as_ref()
            .map(|task| !task.is_finished())
            .unwrap_or(false)
    }

    fn stop(&mut self) {
        if let Some(task) = self.conversion.take() {
            debug!("Stopping simulated conversion");
            task.abort();
        }
    }
}

impl AnalogFrontEnd for SimulatedFrontEnd {
    fn configure(&mut self) -> Result<(), FrontEndError> {
        self.stop();
        self.configured = true;
        debug!("Simulated ADC configured: {:?}", self.config);
        Ok(())
    }

    fn calibrate(&mut self) -> Result<(), FrontEndError> {
        if !self.configured {
            return Err(FrontEndError::Calibration("ADC not configured".to_string()));
        }
        if self.config.fail_calibration {
            return Err(FrontEndError::Calibration("simulated calibration timeout".to_string()));
        }
        Ok(())
    }

    fn start_continuous(&mut self, acquisition: LoadcellAcquisition) -> Result<(), FrontEndError> {
        if !self.configured {
            return Err(FrontEndError::Start("ADC not configured".to_string()));
        }
        let runtime = tokio::runtime::Handle::try_current()
            .map_err(|e| FrontEndError::Start(e.to_string()))?;

        self.stop();

        let period = Duration::from_micros(self.config.sample_interval_us);
        let mut ramp = Ramp::new(self.config.raw_low, self.config.raw_high, self.config.ramp_step);

        self.conversion = Some(runtime.spawn(async move {
            let mut ticker = tokio::time::interval(period);
            loop {
                ticker.tick().await;
                acquisition.register().store(ramp.next_sample());
                acquisition.on_conversion_complete();
            }
        }));

        info!("Simulated ADC converting every {:?}", period);
        Ok(())
    }
}

impl Drop for SimulatedFrontEnd {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use loadcell_driver::LoadcellWindow;
    use sample_buffer::{AcquisitionHandle, ConversionRegister};
    use std::sync::Arc;

    fn acquisition() -> (LoadcellAcquisition, Arc<LoadcellWindow>) {
        let window = Arc::new(LoadcellWindow::new());
        let handle = AcquisitionHandle::new(Arc::new(ConversionRegister::new()), Arc::clone(&window));
        (handle, window)
    }

    #[test]
    fn test_ramp_bounces() {
        let mut ramp = Ramp::new(10, 14, 2);
        let samples: Vec<_> = (0..7).map(|_| ramp.next_sample()).collect();
        assert_eq!(samples, vec![10, 12, 14, 12, 10, 12, 14]);
    }

    #[test]
    fn test_flat_ramp() {
        let mut ramp = Ramp::new(2050, 2050, 1);
        assert!((0..5).all(|_| ramp.next_sample() == 2050));
    }

    #[test]
    fn test_validate() {
        assert!(SimulatorConfig::default().validate().is_ok());

        let too_high = SimulatorConfig {
            raw_high: 5000,
            ..Default::default()
        };
        assert!(too_high.validate().is_err());

        let stalled = SimulatorConfig {
            ramp_step: 0,
            ..Default::default()
        };
        assert!(stalled.validate().is_err());
    }

    #[test]
    fn test_calibration_requires_configure() {
        let mut front_end = SimulatedFrontEnd::new(SimulatorConfig::default());
        assert!(front_end.calibrate().is_err());
        front_end.configure().unwrap();
        assert!(front_end.calibrate().is_ok());
    }

    #[test]
    fn test_start_outside_runtime_fails() {
        let mut front_end = SimulatedFrontEnd::new(SimulatorConfig::default());
        front_end.configure().unwrap();
        let (handle, _) = acquisition();
        assert!(matches!(
            front_end.start_continuous(handle),
            Err(FrontEndError::Start(_))
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_conversions_fill_window() {
        let config = SimulatorConfig {
            raw_low: 2050,
            raw_high: 2050,
            ..Default::default()
        };
        let mut front_end = SimulatedFrontEnd::new(config);
        front_end.configure().unwrap();
        front_end.calibrate().unwrap();

        let (handle, window) = acquisition();
        front_end.start_continuous(handle).unwrap();
        assert!(front_end.is_converting());

        tokio::time::sleep(Duration::from_millis(20)).await;

        assert!(window.is_warm());
        assert_eq!(window.snapshot(), [2050; 10]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_restart_replaces_conversion() {
        let mut front_end = SimulatedFrontEnd::new(SimulatorConfig::default());
        front_end.configure().unwrap();

        let (first, _) = acquisition();
        front_end.start_continuous(first).unwrap();
        front_end.configure().unwrap();
        assert!(!front_end.is_converting());

        let (second, window) = acquisition();
        front_end.start_continuous(second).unwrap();
        tokio::time::sleep(Duration::from_millis(5)).await;

        assert!(front_end.is_converting());
        assert!(window.samples_received() > 0);
    }
}
