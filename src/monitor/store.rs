//! Threshold store collaborator.
//!
//! Per-symbol thresholds live in an external key-value service owned outside
//! this crate. The monitor talks to it through the [`ThresholdStore`] trait
//! and treats every failure as transient: a lookup error never fails the
//! event being processed, it only forces the process-wide default threshold.

use dashmap::DashMap;
use std::fmt;

/// Errors reported by a threshold store implementation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThresholdStoreError {
    /// The store could not be reached.
    Unavailable {
        /// Description of the failure.
        message: String,
    },
    /// The store did not answer within the allotted time.
    Timeout {
        /// Time spent waiting, in milliseconds.
        elapsed_ms: u64,
    },
}

impl fmt::Display for ThresholdStoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThresholdStoreError::Unavailable { message } => {
                write!(f, "threshold store unavailable: {message}")
            }
            ThresholdStoreError::Timeout { elapsed_ms } => {
                write!(f, "threshold store timed out after {elapsed_ms} ms")
            }
        }
    }
}

impl std::error::Error for ThresholdStoreError {}

/// External key-value store holding per-symbol delta thresholds.
///
/// Implementations may be network-bound; they must bound their own blocking
/// so a slow store degrades a single lookup, not the monitor.
pub trait ThresholdStore: Send + Sync {
    /// Returns the threshold configured for a symbol, if any.
    fn get(&self, symbol: &str) -> Result<Option<f64>, ThresholdStoreError>;

    /// Sets the threshold for a symbol.
    fn set(&self, symbol: &str, threshold: f64) -> Result<(), ThresholdStoreError>;
}

/// In-process threshold store backed by a concurrent map.
///
/// Useful for embedders that keep thresholds locally and as a test double
/// for the external service.
#[derive(Debug, Default)]
pub struct InMemoryThresholdStore {
    thresholds: DashMap<String, f64>,
}

impl InMemoryThresholdStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of symbols with a configured threshold.
    #[must_use]
    pub fn len(&self) -> usize {
        self.thresholds.len()
    }

    /// Returns true if no thresholds are configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.thresholds.is_empty()
    }
}

impl ThresholdStore for InMemoryThresholdStore {
    fn get(&self, symbol: &str) -> Result<Option<f64>, ThresholdStoreError> {
        Ok(self.thresholds.get(symbol).map(|entry| *entry.value()))
    }

    fn set(&self, symbol: &str, threshold: f64) -> Result<(), ThresholdStoreError> {
        self.thresholds.insert(symbol.to_string(), threshold);
        Ok(())
    }
}
