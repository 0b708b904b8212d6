//! Delta threshold monitoring with cooldown and alert priorities.
//!
//! This module tracks one scalar per symbol, the option delta, against
//! per-symbol thresholds resolved from an external store. A breach emits an
//! [`AlertEvent`] classified into a priority tier; a per-symbol cooldown
//! window suppresses alert storms between breaches.
//!
//! # Overview
//!
//! A breach happens when the absolute delta exceeds the absolute threshold,
//! or when the delta moved by more than 0.05 since the previous observation
//! for the same symbol. Either way the stored last delta is refreshed, so
//! suppressed events still advance the per-symbol state.
//!
//! Per-symbol state is held in sharded concurrent maps and each event's
//! read-modify-write runs under the symbol's own entry guard; events for
//! independent symbols never serialize against each other.
//!
//! # Example
//!
//! ```ignore
//! use deltawatch_rs::monitor::{
//!     DeltaThresholdMonitor, InMemoryThresholdStore, MarketDataUpdate, MonitorConfig,
//! };
//!
//! let monitor = DeltaThresholdMonitor::new(
//!     InMemoryThresholdStore::new(),
//!     MonitorConfig::default(),
//! );
//! monitor.set_threshold("AAPL 240119C150", 0.2)?;
//!
//! if let Some(alert) = monitor.process(&MarketDataUpdate::with_delta("AAPL 240119C150", 0.45)) {
//!     println!("{}", alert.message);
//! }
//! ```

mod classifier;
mod manager;
#[allow(clippy::module_inception)]
mod monitor;
mod store;
mod types;

pub use classifier::classify_priority;
pub use manager::MonitorManager;
pub use monitor::DeltaThresholdMonitor;
pub use store::{InMemoryThresholdStore, ThresholdStore, ThresholdStoreError};
pub use types::{AlertEvent, AlertListener, AlertPriority, MarketDataUpdate, MonitorConfig};
