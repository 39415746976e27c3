//! Load Cell Driver Implementation

use crate::error::FrontEndError;
use crate::frontend::AnalogFrontEnd;
use crate::state::{DriverState, Lifecycle};
use calibration::{CalibrationEngine, CalibrationError, CalibrationRange};
use driver_host::{DriverModule, FatalSignal};
use sample_buffer::{AcquisitionHandle, ConversionRegister, SampleBuffer, MOVING_AVERAGE_WINDOW};
use std::sync::Arc;
use telemetry::{
    LoadcellInfo, ParamId, ParamStore, Priority, RxTransfer, TransferId, Transport,
    LOADCELL_INFO, LOADCELL_INFO_MAX_SIZE,
};
use tracing::{debug, info, warn};

/// Name the driver registers and broadcasts under
pub const DRIVER_NAME: &str = "loadcell";

/// Sample window averaged by the driver
pub type LoadcellWindow = SampleBuffer<MOVING_AVERAGE_WINDOW>;

/// Interrupt-side handle feeding [`LoadcellWindow`]
pub type LoadcellAcquisition = AcquisitionHandle<MOVING_AVERAGE_WINDOW>;

/// Load cell driver.
///
/// Constructed once by the node and registered with the driver host. The
/// conversion-complete interrupt is bound to [`LoadcellDriver::acquisition_handle`].
pub struct LoadcellDriver<F, T, P> {
    /// Lifecycle state machine
    lifecycle: Lifecycle,
    /// Externally requested fault, applied at the next slow tick
    fault_pending: bool,
    /// ADC the load cell is wired to
    front_end: F,
    /// CAN transport used for telemetry
    transport: T,
    /// Node parameters
    params: P,
    /// Averaging and calibration
    engine: CalibrationEngine,
    /// Window shared with the interrupt
    window: Arc<LoadcellWindow>,
    /// Handle given to the front end on bring-up
    acquisition: LoadcellAcquisition,
    /// Transfer counter for LoadcellInfo broadcasts
    transfer_id: TransferId,
    /// Global error handler
    fatal: FatalSignal,
    /// Broadcasts accepted by the transport
    published: u64,
}

impl<F, T, P> LoadcellDriver<F, T, P>
where
    F: AnalogFrontEnd,
    T: Transport,
    P: ParamStore,
{
    /// Create the driver in the `Unknown` state
    pub fn new(
        front_end: F,
        transport: T,
        params: P,
        range: CalibrationRange,
        fatal: FatalSignal,
    ) -> Result<Self, CalibrationError> {
        let engine = CalibrationEngine::new(range)?;
        let window = Arc::new(LoadcellWindow::new());
        let acquisition =
            AcquisitionHandle::new(Arc::new(ConversionRegister::new()), Arc::clone(&window));

        info!("Creating load cell driver ({} sample window)", window.capacity());

        Ok(Self {
            lifecycle: Lifecycle::new(),
            fault_pending: false,
            front_end,
            transport,
            params,
            engine,
            window,
            acquisition,
            transfer_id: TransferId::default(),
            fatal,
            published: 0,
        })
    }

    /// Run one step of the lifecycle state machine (1 Hz).
    ///
    /// Does nothing once a fatal error has been escalated: a failed
    /// bring-up is never retried.
    pub fn advance(&mut self) {
        if self.fatal.is_raised() {
            return;
        }

        let fault_requested = std::mem::take(&mut self.fault_pending);

        let next = match self.lifecycle.current() {
            DriverState::Unknown => DriverState::Initializing,
            DriverState::Initializing => match self.bring_up() {
                Ok(()) => {
                    info!("Load cell driver initialized");
                    DriverState::Operating
                }
                Err(e) => {
                    self.fatal.raise(DRIVER_NAME, e.to_string());
                    DriverState::Initializing
                }
            },
            DriverState::Operating if fault_requested => {
                warn!("Load cell driver faulted, stopping telemetry");
                DriverState::Faulted
            }
            DriverState::Operating => DriverState::Operating,
            // Retry bring-up on every slow tick, no backoff
            DriverState::Faulted => DriverState::Initializing,
        };

        self.lifecycle.step(next);
    }

    /// Average and calibrate the current window
    pub fn compute(&mut self) -> f32 {
        let window = self.window.snapshot();
        let weight = self.engine.compute(&window);
        metrics::gauge!("loadcell_measured_weight").set(f64::from(weight));
        weight
    }

    /// Broadcast the latest measurement as `LoadcellInfo`
    pub fn publish(&mut self) {
        let info = LoadcellInfo {
            sensor_id: self.sensor_id(),
            weight: self.engine.measured(),
        };

        let mut payload = [0u8; LOADCELL_INFO_MAX_SIZE];
        let len = match info.encode(&mut payload) {
            Ok(len) => len,
            Err(e) => {
                warn!("Dropping telemetry: {}", e);
                return;
            }
        };

        match self.transport.broadcast(
            &LOADCELL_INFO,
            &mut self.transfer_id,
            Priority::Medium,
            &payload[..len],
            DRIVER_NAME,
        ) {
            Ok(()) => {
                self.published += 1;
                metrics::counter!("loadcell_telemetry_published_total").increment(1);
                debug!(
                    sensor_id = info.sensor_id,
                    weight = info.weight,
                    "Published LoadcellInfo"
                );
            }
            Err(e) => warn!("LoadcellInfo broadcast not accepted: {}", e),
        }
    }

    /// Ask the driver to fault at the next slow tick.
    ///
    /// Nothing inside the driver detects faults; this is the entry point for
    /// an external monitor. Ignored unless the driver is operating by then.
    pub fn request_fault(&mut self) {
        self.fault_pending = true;
    }

    /// Handle to bind to the ADC conversion-complete interrupt
    pub fn acquisition_handle(&self) -> LoadcellAcquisition {
        self.acquisition.clone()
    }

    /// Current lifecycle state
    pub fn state(&self) -> DriverState {
        self.lifecycle.current()
    }

    /// Lifecycle state before the last slow tick
    pub fn previous_state(&self) -> DriverState {
        self.lifecycle.previous()
    }

    /// Latest calibrated weight (kg)
    pub fn measured_value(&self) -> f32 {
        self.engine.measured()
    }

    /// Broadcasts accepted by the transport so far
    pub fn published_count(&self) -> u64 {
        self.published
    }

    /// Front end the driver owns
    pub fn front_end(&self) -> &F {
        &self.front_end
    }

    /// Transport the driver owns
    pub fn transport(&self) -> &T {
        &self.transport
    }

    fn is_operating(&self) -> bool {
        self.lifecycle.current() == DriverState::Operating
    }

    fn bring_up(&mut self) -> Result<(), FrontEndError> {
        self.front_end.configure()?;
        self.front_end.calibrate()?;
        self.front_end.start_continuous(self.acquisition.clone())?;
        Ok(())
    }

    fn sensor_id(&self) -> u32 {
        let value = self.params.get_param_by_id(ParamId::SensorId);
        value
            .as_integer()
            .and_then(|id| u32::try_from(id).ok())
            .unwrap_or_else(|| {
                warn!("{} parameter {:?} is not a valid sensor id", ParamId::SensorId.name(), value);
                0
            })
    }
}

impl<F, T, P> DriverModule for LoadcellDriver<F, T, P>
where
    F: AnalogFrontEnd,
    T: Transport,
    P: ParamStore,
{
    fn name(&self) -> &'static str {
        DRIVER_NAME
    }

    fn sync_update_unthrottled(&mut self) {
        // Nothing runs at this rate yet
    }

    fn sync_update_100hz(&mut self) {
        // Nothing runs at this rate yet
    }

    fn sync_update_10hz(&mut self) {
        if !self.is_operating() {
            return;
        }

        self.compute();
        self.publish();
    }

    fn sync_update_1hz(&mut self) {
        self.advance();
    }

    fn handle_rx_transfer(&mut self, _transfer: &RxTransfer<'_>) {
        // The load cell subscribes to no inbound messages
    }
}
