//! LoadcellInfo Message
//!
//! Broadcast periodically by the load cell driver. The payload is the
//! postcard encoding of [`LoadcellInfo`]: the sensor id as a varint followed
//! by the weight as a little-endian `f32`.

use crate::error::TelemetryError;
use crate::transport::DataType;
use serde::{Deserialize, Serialize};

/// Data type descriptor for `com.aeronavics.LoadcellInfo`
pub const LOADCELL_INFO: DataType = DataType {
    signature: 0x6E2A_07C4_B1F3_59D8,
    id: 20_100,
    name: "com.aeronavics.LoadcellInfo",
};

/// Largest possible encoded payload (5-byte varint + 4-byte float)
pub const LOADCELL_INFO_MAX_SIZE: usize = 9;

/// Load cell status telemetry
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LoadcellInfo {
    /// Configured id distinguishing load cells on the same bus
    pub sensor_id: u32,
    /// Calibrated weight (kg)
    pub weight: f32,
}

impl LoadcellInfo {
    /// Encode into `buffer`, returning the payload length
    pub fn encode(&self, buffer: &mut [u8; LOADCELL_INFO_MAX_SIZE]) -> Result<usize, TelemetryError> {
        let used = postcard::to_slice(self, buffer).map_err(|source| TelemetryError::Encode {
            message: LOADCELL_INFO.name,
            source,
        })?;
        Ok(used.len())
    }

    /// Decode a received payload
    pub fn decode(payload: &[u8]) -> Result<Self, TelemetryError> {
        postcard::from_bytes(payload).map_err(|source| TelemetryError::Decode {
            message: LOADCELL_INFO.name,
            source,
        })
    }
}
