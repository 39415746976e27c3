//! Multi-Rate Host Loop

use crate::error::HostError;
use crate::fatal::FatalSignal;
use crate::module::{DriverModule, Rate};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::Duration;
use telemetry::RxTransfer;
use tokio::time::{interval, Interval, MissedTickBehavior};
use tracing::{debug, info, warn};

/// Periods of the four scheduling hooks
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    /// Pacing of the unthrottled hook in milliseconds
    pub unthrottled_period_ms: u64,
    /// Period of the 100 Hz hook in milliseconds
    pub fast_period_ms: u64,
    /// Period of the 10 Hz hook in milliseconds
    pub medium_period_ms: u64,
    /// Period of the 1 Hz hook in milliseconds
    pub slow_period_ms: u64,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            unthrottled_period_ms: 1,
            fast_period_ms: 10,
            medium_period_ms: 100,
            slow_period_ms: 1000,
        }
    }
}

impl HostConfig {
    /// Period configured for `rate`
    pub fn period(&self, rate: Rate) -> Duration {
        let ms = match rate {
            Rate::Unthrottled => self.unthrottled_period_ms,
            Rate::Hz100 => self.fast_period_ms,
            Rate::Hz10 => self.medium_period_ms,
            Rate::Hz1 => self.slow_period_ms,
        };
        Duration::from_millis(ms)
    }

    /// Reject zero periods, which `tokio::time::interval` cannot represent
    pub fn validate(&self) -> Result<(), HostError> {
        for rate in Rate::ALL {
            if self.period(rate).is_zero() {
                return Err(HostError::InvalidPeriod(rate.name()));
            }
        }
        Ok(())
    }
}

/// Host that owns the registered drivers and drives their hooks
pub struct DriverHost {
    /// Registered drivers, in dispatch order
    drivers: Vec<Box<dyn DriverModule>>,
    /// Configuration
    config: HostConfig,
    /// Global error handler shared with drivers
    fatal: FatalSignal,
    /// Hook invocations since start, for diagnostics
    ticks: u64,
}

impl DriverHost {
    /// Create a host with no drivers
    pub fn new(config: HostConfig, fatal: FatalSignal) -> Result<Self, HostError> {
        config.validate()?;
        info!("Driver host created with config: {:?}", config);

        Ok(Self {
            drivers: Vec::new(),
            config,
            fatal,
            ticks: 0,
        })
    }

    /// Register a driver; hooks run in registration order
    pub fn register(&mut self, driver: Box<dyn DriverModule>) {
        info!("Registering driver {}", driver.name());
        self.drivers.push(driver);
    }

    /// Run one hook on every driver. No-op once a fatal error is raised.
    pub fn tick(&mut self, rate: Rate) {
        if self.fatal.is_raised() {
            return;
        }
        self.ticks += 1;
        for driver in &mut self.drivers {
            driver.sync_update(rate);
        }
    }

    /// Deliver an inbound transfer to every driver
    pub fn dispatch_rx(&mut self, transfer: &RxTransfer<'_>) {
        debug!(
            data_type_id = transfer.data_type_id,
            source = transfer.source_node_id,
            "Dispatching inbound transfer"
        );
        for driver in &mut self.drivers {
            driver.handle_rx_transfer(transfer);
        }
    }

    /// Drive all hooks until `shutdown` resolves or a driver escalates a
    /// fatal error.
    ///
    /// When several hooks are due together the slowest runs first.
    pub async fn run<S>(&mut self, shutdown: S) -> Result<(), HostError>
    where
        S: Future<Output = ()>,
    {
        info!("Starting driver host with {} drivers", self.drivers.len());

        let mut slow = self.interval(Rate::Hz1);
        let mut medium = self.interval(Rate::Hz10);
        let mut fast = self.interval(Rate::Hz100);
        let mut unthrottled = self.interval(Rate::Unthrottled);

        tokio::pin!(shutdown);

        loop {
            let rate = tokio::select! {
                biased;
                _ = &mut shutdown => {
                    info!("Driver host stopped after {} hook invocations", self.ticks);
                    return Ok(());
                }
                _ = slow.tick() => Rate::Hz1,
                _ = medium.tick() => Rate::Hz10,
                _ = fast.tick() => Rate::Hz100,
                _ = unthrottled.tick() => Rate::Unthrottled,
            };

            self.tick(rate);

            if let Some(fatal) = self.fatal.raised() {
                warn!("Driver host halting on fatal error from {}", fatal.driver);
                return Err(HostError::Fatal(fatal));
            }
        }
    }

    /// Number of registered drivers
    pub fn driver_count(&self) -> usize {
        self.drivers.len()
    }

    /// Hook invocations so far
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    fn interval(&self, rate: Rate) -> Interval {
        let mut interval = interval(self.config.period(rate));
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        interval
    }
}
