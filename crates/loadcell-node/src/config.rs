//! Node configuration

use crate::error::NodeError;
use crate::simulator::SimulatorConfig;
use calibration::CalibrationRange;
use driver_host::HostConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Maximum level (`trace`, `debug`, `info`, `warn`, `error`)
    pub level: String,
    /// Emit JSON lines instead of human readable output
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

/// Load cell node configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeConfig {
    /// Name shown in CAN node info
    pub node_name: String,

    /// Firmware version reported at start-up
    pub firmware_version: String,

    /// CAN node id
    pub node_id: u8,

    /// Value of the SENSOR_ID parameter
    pub sensor_id: i64,

    /// Logging
    pub logging: LoggingConfig,

    /// Hook periods
    pub host: HostConfig,

    /// ADC to weight mapping
    pub calibration: CalibrationRange,

    /// Simulated ADC
    pub simulator: SimulatorConfig,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            node_name: "com.aeronavics.loadcellctrl".to_string(),
            firmware_version: "1.0".to_string(),
            node_id: 100,
            sensor_id: 0,
            logging: LoggingConfig::default(),
            host: HostConfig::default(),
            calibration: CalibrationRange::default(),
            simulator: SimulatorConfig::default(),
        }
    }
}

impl NodeConfig {
    /// Load from an optional TOML file, then apply `LOADCELL_*` environment
    /// overrides (nested keys separated by `__`, e.g.
    /// `LOADCELL_HOST__SLOW_PERIOD_MS`).
    pub fn load(path: Option<&Path>) -> Result<Self, NodeError> {
        Self::load_with_env(path, None)
    }

    /// Same as [`NodeConfig::load`], reading overrides from `env` instead of
    /// the process environment when it is given
    pub fn load_with_env(
        path: Option<&Path>,
        env: Option<config::Map<String, String>>,
    ) -> Result<Self, NodeError> {
        let mut builder = config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        }
        builder = builder.add_source(
            config::Environment::with_prefix("LOADCELL")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .source(env),
        );

        let node: NodeConfig = builder.build()?.try_deserialize()?;
        node.validate()?;
        Ok(node)
    }

    /// Check every section
    pub fn validate(&self) -> Result<(), NodeError> {
        self.calibration.validate()?;
        self.host.validate()?;
        self.simulator.validate()?;
        Ok(())
    }
}
