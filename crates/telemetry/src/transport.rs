//! CAN Transport Interface
//!
//! The transport owns framing, addressing and retransmission; drivers only
//! hand it a data type, a priority and an encoded payload.

use crate::error::TransportError;
use serde::{Deserialize, Serialize};

/// Transfer priority on the bus (lower value wins arbitration)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Priority {
    Highest = 0,
    High = 8,
    Medium = 16,
    Low = 24,
    Lowest = 31,
}

impl Priority {
    /// Raw 5-bit priority field
    pub fn as_u8(&self) -> u8 {
        *self as u8
    }
}

impl Default for Priority {
    fn default() -> Self {
        Priority::Medium
    }
}

/// Message type descriptor: data type signature plus numeric id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DataType {
    /// Signature used to seed the transfer CRC
    pub signature: u64,
    /// Message data type id
    pub id: u16,
    /// Human readable full name
    pub name: &'static str,
}

/// Per-message-type transfer counter.
///
/// Owned by the sender and advanced by the transport on each broadcast;
/// wraps at 32 like the 5-bit field it occupies on the wire.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct TransferId(u8);

impl TransferId {
    /// Wire width of the field
    pub const MODULO: u8 = 32;

    /// Create a transfer id, reduced to the 5-bit range
    pub fn new(value: u8) -> Self {
        Self(value % Self::MODULO)
    }

    /// Current value
    pub fn value(&self) -> u8 {
        self.0
    }

    /// Advance to the next id, wrapping
    pub fn increment(&mut self) {
        self.0 = (self.0 + 1) % Self::MODULO;
    }
}

/// Inbound transfer handed to drivers by the host
#[derive(Debug, Clone)]
pub struct RxTransfer<'a> {
    /// Decoded data type id
    pub data_type_id: u16,
    /// Transfer id assigned by the sender
    pub transfer_id: TransferId,
    /// Transfer priority
    pub priority: Priority,
    /// Node id of the sender
    pub source_node_id: u8,
    /// Reassembled payload
    pub payload: &'a [u8],
}

/// Broadcast side of the CAN transport.
///
/// Fire-and-forget: the transport queues the transfer and returns; delivery
/// and retransmission are its own concern.
pub trait Transport {
    /// Queue `payload` as a broadcast of `data_type`.
    ///
    /// Implementations advance `transfer_id` once the transfer is accepted.
    /// `origin` names the sending driver so the host can skip echoing the
    /// transfer back to it.
    fn broadcast(
        &mut self,
        data_type: &DataType,
        transfer_id: &mut TransferId,
        priority: Priority,
        payload: &[u8],
        origin: &'static str,
    ) -> Result<(), TransportError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_values() {
        assert_eq!(Priority::Highest.as_u8(), 0);
        assert_eq!(Priority::Medium.as_u8(), 16);
        assert_eq!(Priority::Lowest.as_u8(), 31);
        assert!(Priority::High < Priority::Low);
        assert_eq!(Priority::default(), Priority::Medium);
    }

    #[test]
    fn test_transfer_id_wraps() {
        let mut id = TransferId::new(30);
        id.increment();
        assert_eq!(id.value(), 31);
        id.increment();
        assert_eq!(id.value(), 0);
    }

    #[test]
    fn test_transfer_id_reduced_on_creation() {
        assert_eq!(TransferId::new(33).value(), 1);
    }
}
