//! Loopback transport that logs every broadcast

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use telemetry::{DataType, LoadcellInfo, Priority, TransferId, Transport, TransportError, LOADCELL_INFO};
use tracing::{debug, info, warn};

/// Largest payload a multi-frame CAN transfer carries here
pub const MAX_TRANSFER_PAYLOAD: usize = 256;

/// Transport that decodes and logs broadcasts instead of sending them
#[derive(Debug, Clone)]
pub struct LoggingTransport {
    node_id: u8,
    accepted: Arc<AtomicU64>,
}

impl LoggingTransport {
    /// Create a transport for `node_id`
    pub fn new(node_id: u8) -> Self {
        Self {
            node_id,
            accepted: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Shared count of accepted broadcasts
    pub fn accepted_counter(&self) -> Arc<AtomicU64> {
        Arc::clone(&self.accepted)
    }
}

impl Transport for LoggingTransport {
    fn broadcast(
        &mut self,
        data_type: &DataType,
        transfer_id: &mut TransferId,
        priority: Priority,
        payload: &[u8],
        origin: &'static str,
    ) -> Result<(), TransportError> {
        if payload.len() > MAX_TRANSFER_PAYLOAD {
            return Err(TransportError::PayloadTooLarge {
                len: payload.len(),
                max: MAX_TRANSFER_PAYLOAD,
            });
        }

        if data_type.id == LOADCELL_INFO.id {
            match LoadcellInfo::decode(payload) {
                Ok(message) => info!(
                    node_id = self.node_id,
                    transfer_id = transfer_id.value(),
                    priority = priority.as_u8(),
                    origin,
                    sensor_id = message.sensor_id,
                    weight = message.weight,
                    "{}",
                    data_type.name
                ),
                Err(e) => warn!("Broadcast from {} is not decodable: {}", origin, e),
            }
        } else {
            debug!(
                data_type_id = data_type.id,
                len = payload.len(),
                origin,
                "Broadcast {}",
                data_type.name
            );
        }

        transfer_id.increment();
        self.accepted.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use telemetry::LOADCELL_INFO_MAX_SIZE;

    #[test]
    fn test_broadcast_advances_transfer_id() {
        let mut transport = LoggingTransport::new(100);
        let accepted = transport.accepted_counter();
        let mut transfer_id = TransferId::default();

        let mut payload = [0u8; LOADCELL_INFO_MAX_SIZE];
        let len = LoadcellInfo {
            sensor_id: 1,
            weight: 2.5,
        }
        .encode(&mut payload)
        .unwrap();

        for _ in 0..2 {
            transport
                .broadcast(&LOADCELL_INFO, &mut transfer_id, Priority::Medium, &payload[..len], "test")
                .unwrap();
        }

        assert_eq!(transfer_id.value(), 2);
        assert_eq!(accepted.load(Ordering::Relaxed), 2);
    }

    #[test]
    fn test_oversized_payload_rejected() {
        let mut transport = LoggingTransport::new(100);
        let mut transfer_id = TransferId::default();
        let payload = vec![0u8; MAX_TRANSFER_PAYLOAD + 1];

        let result = transport.broadcast(&LOADCELL_INFO, &mut transfer_id, Priority::Low, &payload, "test");

        assert_eq!(
            result,
            Err(TransportError::PayloadTooLarge {
                len: MAX_TRANSFER_PAYLOAD + 1,
                max: MAX_TRANSFER_PAYLOAD
            })
        );
        assert_eq!(transfer_id.value(), 0);
    }
}
