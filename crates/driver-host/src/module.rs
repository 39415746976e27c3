//! Driver Capability Interface

use telemetry::RxTransfer;

/// Scheduling rates offered by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rate {
    /// Every pass of the host loop
    Unthrottled,
    /// 100 Hz
    Hz100,
    /// 10 Hz
    Hz10,
    /// 1 Hz, housekeeping
    Hz1,
}

impl Rate {
    /// All rates, slowest first (the order hooks fire when due together)
    pub const ALL: [Rate; 4] = [Rate::Hz1, Rate::Hz10, Rate::Hz100, Rate::Unthrottled];

    /// Short name used in logs
    pub fn name(&self) -> &'static str {
        match self {
            Rate::Unthrottled => "unthrottled",
            Rate::Hz100 => "100Hz",
            Rate::Hz10 => "10Hz",
            Rate::Hz1 => "1Hz",
        }
    }
}

/// A driver the host can schedule.
///
/// Hooks are never called concurrently with each other or re-entered.
pub trait DriverModule {
    /// Driver name, used as the origin of its broadcasts
    fn name(&self) -> &'static str;

    /// Called on every pass of the host loop
    fn sync_update_unthrottled(&mut self);

    /// Called at 100 Hz
    fn sync_update_100hz(&mut self);

    /// Called at 10 Hz
    fn sync_update_10hz(&mut self);

    /// Called at 1 Hz
    fn sync_update_1hz(&mut self);

    /// Called for every inbound transfer
    fn handle_rx_transfer(&mut self, transfer: &RxTransfer<'_>);

    /// Dispatch the hook for `rate`
    fn sync_update(&mut self, rate: Rate) {
        match rate {
            Rate::Unthrottled => self.sync_update_unthrottled(),
            Rate::Hz100 => self.sync_update_100hz(),
            Rate::Hz10 => self.sync_update_10hz(),
            Rate::Hz1 => self.sync_update_1hz(),
        }
    }
}
