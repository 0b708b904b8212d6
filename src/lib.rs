//! Option Greeks analytics and delta exposure monitoring.
//!
//! This library provides two tightly coupled pieces for risk desks that need
//! low-latency, deterministic risk analytics on top of a market-data feed:
//!
//! - A closed-form Black-Scholes-Merton pricing engine producing option
//!   Greeks, together with a Newton-Raphson implied volatility solver built
//!   on top of it ([`greeks`]).
//! - A stateful, concurrently-accessed per-symbol delta threshold monitor
//!   with cooldown suppression, adaptive thresholds and alert priority
//!   classification ([`monitor`]).
//!
//! # Overview
//!
//! Market-data updates arrive per symbol, either already carrying a delta or
//! carrying the raw option parameters to be priced. The monitor refreshes the
//! delta through the Greeks engine when needed, updates its per-symbol state,
//! decides whether the configured threshold is breached, classifies the alert
//! priority and hands an [`monitor::AlertEvent`] to the registered listener.
//! Delivery (SMS, email, push, WebSocket) is the job of an external alert
//! sink; this crate only produces the events.
//!
//! Per-symbol state lives in sharded concurrent maps, so events for
//! independent symbols never contend on a shared lock and the monitor scales
//! with the number of active symbols.
//!
//! # Example
//!
//! ```ignore
//! use deltawatch_rs::prelude::*;
//!
//! let params = OptionParameters::call(152.50, 150.0, 0.0548, 0.05, 0.25, 0.02);
//! let greeks = GreeksEngine::compute(&params)?;
//!
//! let monitor = DeltaThresholdMonitor::new(
//!     InMemoryThresholdStore::new(),
//!     MonitorConfig::default(),
//! );
//! let update = MarketDataUpdate::with_delta("AAPL 240119C150", greeks.delta);
//! if let Some(alert) = monitor.process(&update) {
//!     println!("{}: {}", alert.priority, alert.message);
//! }
//! ```

/// Black-Scholes pricing engine, Greeks and implied volatility solver.
pub mod greeks;
/// Per-symbol delta threshold monitoring with cooldown and alert priorities.
pub mod monitor;
/// Convenience re-exports of the most commonly used types.
pub mod prelude;
pub(crate) mod utils;

pub use greeks::{GreeksEngine, GreeksError, GreeksResult, OptionParameters, OptionType};
pub use monitor::{AlertEvent, AlertPriority, DeltaThresholdMonitor, MarketDataUpdate};
