//! Per-symbol delta threshold monitoring.

use super::classifier::classify_priority;
use super::store::{ThresholdStore, ThresholdStoreError};
use super::types::{AlertEvent, AlertListener, MarketDataUpdate, MonitorConfig};
use crate::greeks::GreeksEngine;
use crate::utils::current_time_millis;
use dashmap::DashMap;
use tracing::{debug, error, info, warn};

/// Delta movement between two consecutive observations that triggers a
/// breach even below the configured threshold.
// TODO: confirm with the risk desk whether this belongs in MonitorConfig;
// today it is fixed and independent of the per-symbol threshold.
const DELTA_MOVEMENT_SENSITIVITY: f64 = 0.05;

/// Fraction of the last observed delta magnitude added to the base threshold
/// when adaptive thresholds are requested.
const ADAPTIVE_ADJUSTMENT_FACTOR: f64 = 0.1;

/// Upper cap for adaptive thresholds.
const ADAPTIVE_THRESHOLD_CAP: f64 = 0.3;

/// Mutable per-symbol monitoring state.
#[derive(Debug, Clone, Copy, Default)]
struct SymbolState {
    /// Delta seen in the previous observation for this symbol.
    last_delta: Option<f64>,
    /// Time of the last emitted alert, milliseconds since the Unix epoch.
    last_alert_at: Option<u64>,
}

/// Stateful per-symbol delta threshold monitor.
///
/// Consumes per-symbol market data updates, keeps the last observed delta
/// and last alert time per symbol, decides breach and cooldown, and emits
/// prioritized [`AlertEvent`]s to the registered listener.
///
/// # Concurrency
///
/// Per-symbol state lives in a sharded concurrent map. The read-modify-write
/// sequence for one event (read previous delta, store the new delta, check
/// breach and cooldown, stamp the alert time) runs under a single per-key
/// entry guard, so two concurrent events for the same symbol can neither
/// both pass the cooldown check nor lose a delta update. Events for
/// different symbols never contend on a common lock.
///
/// # Failure isolation
///
/// Malformed updates are dropped silently, threshold store failures fall
/// back to the default threshold, and pricing failures only drop the single
/// affected update. No condition raised while processing one symbol can
/// stop monitoring of the others.
pub struct DeltaThresholdMonitor<S> {
    /// External threshold store collaborator.
    store: S,
    /// Monitor configuration.
    config: MonitorConfig,
    /// Per-symbol state, keyed by symbol, created lazily on first
    /// observation.
    states: DashMap<String, SymbolState>,
    /// Listens to emitted alerts; hand-off point to the external alert sink.
    alert_listener: Option<AlertListener>,
}

impl<S> DeltaThresholdMonitor<S>
where
    S: ThresholdStore,
{
    /// Creates a new monitor over the given threshold store.
    pub fn new(store: S, config: MonitorConfig) -> Self {
        Self {
            store,
            config,
            states: DashMap::new(),
            alert_listener: None,
        }
    }

    /// Creates a new monitor with an alert listener.
    pub fn with_alert_listener(store: S, config: MonitorConfig, listener: AlertListener) -> Self {
        Self {
            store,
            config,
            states: DashMap::new(),
            alert_listener: Some(listener),
        }
    }

    /// Sets the alert listener for this monitor.
    pub fn set_alert_listener(&mut self, listener: AlertListener) {
        self.alert_listener = Some(listener);
    }

    /// Processes one market data update using wall-clock time.
    ///
    /// Returns the emitted alert, if any. The same event is also handed to
    /// the configured listener before this method returns.
    pub fn process(&self, update: &MarketDataUpdate) -> Option<AlertEvent> {
        self.process_at(update, current_time_millis())
    }

    /// Processes one market data update at an explicit timestamp.
    ///
    /// Exists for deterministic replay of recorded event streams; `process`
    /// is the wall-clock entry point. Semantics are identical.
    pub fn process_at(&self, update: &MarketDataUpdate, now_ms: u64) -> Option<AlertEvent> {
        if update.symbol.is_empty() {
            debug!("Dropping update without symbol");
            return None;
        }

        let delta = self.resolve_delta(update)?;
        if !delta.is_finite() {
            debug!("Dropping update for {} with non-finite delta", update.symbol);
            return None;
        }

        // Resolve the threshold before entering the per-symbol critical
        // section; the store may be network-bound.
        let threshold = self.threshold(&update.symbol);

        let mut state = self.states.entry(update.symbol.clone()).or_default();
        let previous_delta = state.last_delta;

        // The delta update sticks regardless of the breach outcome
        state.last_delta = Some(delta);

        let breached = delta.abs() > threshold.abs()
            || previous_delta.is_some_and(|p| (delta - p).abs() > DELTA_MOVEMENT_SENSITIVITY);
        if !breached {
            return None;
        }

        if let Some(last_alert_at) = state.last_alert_at {
            let cooldown_ms = self.config.cooldown.as_millis() as u64;
            if now_ms.saturating_sub(last_alert_at) < cooldown_ms {
                debug!(
                    "Suppressing alert for {} - still in cooldown window",
                    update.symbol
                );
                return None;
            }
        }
        state.last_alert_at = Some(now_ms);
        drop(state);

        let priority = classify_priority(delta, threshold);
        let event = AlertEvent::new(
            &update.symbol,
            delta,
            threshold,
            previous_delta,
            priority,
            now_ms,
        );

        info!(
            "Delta threshold alert for {}: delta={}, threshold={}, priority={}",
            event.symbol, event.current_delta, event.threshold, event.priority
        );

        if let Some(listener) = &self.alert_listener {
            listener(&event);
        }

        Some(event)
    }

    /// Resolves the delta for an update, pricing it through the Greeks
    /// engine when the feed supplied raw parameters instead of a delta.
    fn resolve_delta(&self, update: &MarketDataUpdate) -> Option<f64> {
        if let Some(delta) = update.delta {
            return Some(delta);
        }

        let params = update.pricing_parameters().or_else(|| {
            debug!(
                "Dropping update for {} without delta or complete pricing parameters",
                update.symbol
            );
            None
        })?;

        match GreeksEngine::compute(&params) {
            Ok(greeks) => {
                debug!(
                    "Refreshed delta for {} via pricing engine: {}",
                    update.symbol, greeks.delta
                );
                Some(greeks.delta)
            }
            Err(e) => {
                error!("Error pricing update for {}: {}", update.symbol, e);
                None
            }
        }
    }

    /// Returns the threshold in effect for a symbol.
    ///
    /// Store misses and store failures both resolve to the process-wide
    /// default; a failing store degrades thresholds, never event processing.
    pub fn threshold(&self, symbol: &str) -> f64 {
        match self.store.get(symbol) {
            Ok(Some(threshold)) => threshold,
            Ok(None) => self.config.default_threshold,
            Err(e) => {
                warn!(
                    "Threshold lookup failed for {}: {} - using default {}",
                    symbol, e, self.config.default_threshold
                );
                self.config.default_threshold
            }
        }
    }

    /// Sets the threshold for a symbol in the store.
    pub fn set_threshold(&self, symbol: &str, threshold: f64) -> Result<(), ThresholdStoreError> {
        self.store.set(symbol, threshold)?;
        info!("Set delta threshold for {}: {}", symbol, threshold);
        Ok(())
    }

    /// Returns the last observed delta for a symbol, if any.
    pub fn last_delta(&self, symbol: &str) -> Option<f64> {
        self.states.get(symbol).and_then(|state| state.last_delta)
    }

    /// Recomputes the threshold for a symbol from its recent delta magnitude
    /// and writes it back to the store.
    ///
    /// The new threshold is `min(default + |last_delta| * 0.1, 0.3)`. This is
    /// an explicit opt-in operation; thresholds never adapt on their own.
    pub fn enable_adaptive_threshold(&self, symbol: &str) -> Result<f64, ThresholdStoreError> {
        let base = self.config.default_threshold;
        let adjustment = self
            .last_delta(symbol)
            .map_or(0.0, |delta| delta.abs() * ADAPTIVE_ADJUSTMENT_FACTOR);
        let adaptive = (base + adjustment).min(ADAPTIVE_THRESHOLD_CAP);

        self.store.set(symbol, adaptive)?;
        info!(
            "Enabled adaptive threshold for {}: {}",
            symbol, adaptive
        );
        Ok(adaptive)
    }

    /// Symbols the monitor has seen at least one valid update for.
    pub fn tracked_symbols(&self) -> Vec<String> {
        self.states.iter().map(|entry| entry.key().clone()).collect()
    }

    /// Number of symbols currently tracked.
    pub fn symbol_count(&self) -> usize {
        self.states.len()
    }
}
