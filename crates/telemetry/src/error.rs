//! Telemetry Error Types

use thiserror::Error;

/// Errors while encoding or decoding telemetry payloads
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// Payload could not be serialized into the fixed buffer
    #[error("Failed to encode {message}: {source}")]
    Encode {
        message: &'static str,
        #[source]
        source: postcard::Error,
    },

    /// Payload bytes do not form a valid message
    #[error("Failed to decode {message}: {source}")]
    Decode {
        message: &'static str,
        #[source]
        source: postcard::Error,
    },
}

/// Errors reported by a CAN transport
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// Transmit queue has no room for the transfer
    #[error("Transmit queue full ({0} frames pending)")]
    QueueFull(usize),

    /// Payload exceeds what the transport can frame
    #[error("Payload of {len} bytes exceeds transport limit of {max}")]
    PayloadTooLarge { len: usize, max: usize },
}
