//! Monitor pipeline with centralized update routing.
//!
//! This module provides the `MonitorManager` struct for feeding a
//! [`DeltaThresholdMonitor`] from many producers through a unified update
//! channel.

use super::monitor::DeltaThresholdMonitor;
use super::store::ThresholdStore;
use super::types::MarketDataUpdate;
use std::sync::Arc;
use std::sync::mpsc;
use std::thread;
use tracing::{error, info};

/// Feeds a shared delta threshold monitor from an update channel.
///
/// Producers clone the sender and submit updates from any thread; a single
/// processor thread drains the channel and runs each update through the
/// monitor. Per-symbol atomicity is the monitor's own guarantee, so
/// embedders that need more throughput can run several managers over
/// disjoint symbol partitions.
pub struct MonitorManager<S>
where
    S: ThresholdStore + 'static,
{
    /// Shared monitor processing the updates.
    monitor: Arc<DeltaThresholdMonitor<S>>,
    /// Sender for market data updates.
    update_sender: mpsc::Sender<MarketDataUpdate>,
    /// Receiver for market data updates (taken when the processor starts).
    update_receiver: Option<mpsc::Receiver<MarketDataUpdate>>,
}

impl<S> MonitorManager<S>
where
    S: ThresholdStore + 'static,
{
    /// Creates a new manager wrapping the given monitor.
    pub fn new(monitor: DeltaThresholdMonitor<S>) -> Self {
        let (sender, receiver) = mpsc::channel();

        Self {
            monitor: Arc::new(monitor),
            update_sender: sender,
            update_receiver: Some(receiver),
        }
    }

    /// Returns a shared handle to the underlying monitor.
    pub fn monitor(&self) -> Arc<DeltaThresholdMonitor<S>> {
        Arc::clone(&self.monitor)
    }

    /// Returns a sender that producer threads can submit updates through.
    pub fn update_sender(&self) -> mpsc::Sender<MarketDataUpdate> {
        self.update_sender.clone()
    }

    /// Submits a single update for processing.
    pub fn submit(&self, update: MarketDataUpdate) {
        if let Err(e) = self.update_sender.send(update) {
            error!("Failed to enqueue market data update: {}", e);
        }
    }

    /// Starts the update processor in a separate thread.
    ///
    /// The thread runs until every sender, including the manager itself, has
    /// been dropped. Alerts flow through the monitor's listener.
    pub fn start_processor(&mut self) -> thread::JoinHandle<()> {
        let receiver = self
            .update_receiver
            .take()
            .expect("Update processor already started");
        let monitor = Arc::clone(&self.monitor);

        thread::spawn(move || {
            info!("Delta monitor processor started");

            while let Ok(update) = receiver.recv() {
                if let Some(alert) = monitor.process(&update) {
                    info!(
                        "Alert {} emitted for {} with priority {}",
                        alert.id, alert.symbol, alert.priority
                    );
                }
            }

            info!("Delta monitor processor stopped");
        })
    }
}
