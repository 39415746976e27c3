//! Load Cell Controller Node
//!
//! Wires the load cell driver into a driver host together with a simulated
//! ADC, a logging loopback transport and a static parameter table, so the
//! full acquisition → calibration → telemetry path can run off-target.

mod config;
mod error;
mod logging;
mod simulator;
mod transport;

pub use config::{LoggingConfig, NodeConfig};
pub use error::NodeError;
pub use logging::init_logging;
pub use simulator::{Ramp, SimulatedFrontEnd, SimulatorConfig};
pub use transport::LoggingTransport;

use driver_host::{DriverHost, FatalSignal};
use loadcell_driver::LoadcellDriver;
use telemetry::{ParamId, ParamValue, StaticParamStore};
use tracing::info;

/// Driver as instantiated on this node
pub type NodeDriver = LoadcellDriver<SimulatedFrontEnd, LoggingTransport, StaticParamStore>;

/// Build the driver host with the load cell driver registered
pub fn build_host(config: &NodeConfig, transport: LoggingTransport) -> Result<DriverHost, NodeError> {
    config.validate()?;

    let mut params = StaticParamStore::new();
    params.set(ParamId::SensorId, ParamValue::Integer(config.sensor_id));

    let fatal = FatalSignal::new();
    let driver: NodeDriver = LoadcellDriver::new(
        SimulatedFrontEnd::new(config.simulator.clone()),
        transport,
        params,
        config.calibration,
        fatal.clone(),
    )?;

    let mut host = DriverHost::new(config.host.clone(), fatal)?;
    host.register(Box::new(driver));

    info!("Node {} (id {}) ready", config.node_name, config.node_id);
    Ok(host)
}
