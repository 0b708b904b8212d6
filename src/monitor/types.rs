//! Value types for delta threshold monitoring.

use crate::greeks::{OptionParameters, OptionType};
use crate::utils::current_time_millis;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

/// Priority tier assigned to a delta breach alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AlertPriority {
    /// Delta is at or just past the threshold.
    Low,
    /// Delta exceeds 1.5x the threshold.
    Medium,
    /// Delta exceeds 2x the threshold.
    High,
    /// Delta exceeds 3x the threshold.
    Critical,
}

impl fmt::Display for AlertPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlertPriority::Low => write!(f, "LOW"),
            AlertPriority::Medium => write!(f, "MEDIUM"),
            AlertPriority::High => write!(f, "HIGH"),
            AlertPriority::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// A per-symbol market data snapshot consumed by the monitor.
///
/// Produced by an external market-data collaborator. The monitor reads only
/// the fields it needs: the symbol and the delta, or the full parameter set
/// when the delta has to be (re)computed through the pricing engine. Updates
/// without a symbol, and updates whose delta is absent and cannot be priced,
/// are dropped silently.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MarketDataUpdate {
    /// Symbol the snapshot refers to. An empty symbol marks the update as
    /// malformed.
    pub symbol: String,
    /// Current delta, if the feed already computed it.
    pub delta: Option<f64>,
    /// Current gamma, if available.
    pub gamma: Option<f64>,
    /// Current theta, if available.
    pub theta: Option<f64>,
    /// Current vega, if available.
    pub vega: Option<f64>,
    /// Current rho, if available.
    pub rho: Option<f64>,
    /// Underlying spot price, if available.
    pub underlying_price: Option<f64>,
    /// Option strike price, if available.
    pub strike_price: Option<f64>,
    /// Time to expiration in years, if available.
    pub time_to_expiry: Option<f64>,
    /// Risk-free rate, if available.
    pub risk_free_rate: Option<f64>,
    /// Implied volatility, if available.
    pub implied_volatility: Option<f64>,
    /// Option type, if available.
    pub option_type: Option<OptionType>,
    /// Snapshot timestamp in milliseconds since the Unix epoch.
    pub timestamp: u64,
}

impl MarketDataUpdate {
    /// Creates an update carrying a precomputed delta.
    #[must_use]
    pub fn with_delta(symbol: &str, delta: f64) -> Self {
        Self {
            symbol: symbol.to_string(),
            delta: Some(delta),
            timestamp: current_time_millis(),
            ..Self::default()
        }
    }

    /// Creates an update carrying raw option parameters instead of a delta.
    ///
    /// The monitor prices such updates through the Greeks engine before
    /// checking thresholds.
    #[must_use]
    pub fn from_parameters(symbol: &str, params: &OptionParameters) -> Self {
        Self {
            symbol: symbol.to_string(),
            underlying_price: Some(params.underlying_price),
            strike_price: Some(params.strike_price),
            time_to_expiry: Some(params.time_to_expiry),
            risk_free_rate: Some(params.risk_free_rate),
            implied_volatility: Some(params.volatility),
            option_type: Some(params.option_type),
            timestamp: current_time_millis(),
            ..Self::default()
        }
    }

    /// Assembles pricing parameters when the update carries a complete set.
    ///
    /// The feed carries no dividend yield, so repricing assumes zero yield.
    #[must_use]
    pub fn pricing_parameters(&self) -> Option<OptionParameters> {
        Some(OptionParameters::new(
            self.underlying_price?,
            self.strike_price?,
            self.time_to_expiry?,
            self.risk_free_rate?,
            self.implied_volatility?,
            0.0,
            self.option_type?,
        ))
    }
}

/// An alert produced on a delta threshold breach.
///
/// Created transiently and handed once to the external alert sink; the
/// monitor keeps no copy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertEvent {
    /// Unique alert identifier.
    pub id: Uuid,
    /// Symbol that breached its threshold.
    pub symbol: String,
    /// Delta observed when the breach was detected.
    pub current_delta: f64,
    /// Threshold in effect at detection time.
    pub threshold: f64,
    /// Previously observed delta, if any.
    pub previous_delta: Option<f64>,
    /// Priority tier assigned by the classifier.
    pub priority: AlertPriority,
    /// Detection timestamp in milliseconds since the Unix epoch.
    pub timestamp: u64,
    /// Human-readable alert message for downstream delivery channels.
    pub message: String,
}

impl AlertEvent {
    /// Creates a new alert event with a fresh identifier and a formatted
    /// message.
    #[must_use]
    pub fn new(
        symbol: &str,
        current_delta: f64,
        threshold: f64,
        previous_delta: Option<f64>,
        priority: AlertPriority,
        timestamp: u64,
    ) -> Self {
        let previous = previous_delta.map_or_else(|| "n/a".to_string(), |p| format!("{p:.6}"));
        let message = format!(
            "Delta threshold breach detected for {symbol}. Current delta: {current_delta:.6}, \
             threshold: {threshold:.6}, previous delta: {previous}."
        );

        Self {
            id: Uuid::new_v4(),
            symbol: symbol.to_string(),
            current_delta,
            threshold,
            previous_delta,
            priority,
            timestamp,
            message,
        }
    }
}

/// Callback invoked once per emitted alert.
///
/// The listener is the hand-off point to the external alert sink, which owns
/// delivery (SMS, email, push, WebSocket) and routing metadata.
pub type AlertListener = Arc<dyn Fn(&AlertEvent) + Send + Sync>;

/// Configuration for the delta threshold monitor.
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    /// Threshold applied when the store has no entry for a symbol
    /// (default: 0.1).
    pub default_threshold: f64,
    /// Minimum time between two alerts for the same symbol
    /// (default: 300 seconds).
    pub cooldown: Duration,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            default_threshold: 0.1,
            cooldown: Duration::from_secs(300),
        }
    }
}
