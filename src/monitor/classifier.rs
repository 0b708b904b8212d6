//! Alert priority classification.

use super::types::AlertPriority;

/// Classifies a breach into a priority tier from the delta/threshold ratio.
///
/// ratio = |current_delta| / |threshold|; ratio ≥ 3.0 is Critical, ≥ 2.0 is
/// High, ≥ 1.5 is Medium, anything below is Low. A zero or non-finite
/// threshold yields Low rather than an undefined ratio.
#[must_use]
pub fn classify_priority(current_delta: f64, threshold: f64) -> AlertPriority {
    if threshold == 0.0 || !threshold.is_finite() || !current_delta.is_finite() {
        return AlertPriority::Low;
    }

    let ratio = current_delta.abs() / threshold.abs();

    if ratio >= 3.0 {
        AlertPriority::Critical
    } else if ratio >= 2.0 {
        AlertPriority::High
    } else if ratio >= 1.5 {
        AlertPriority::Medium
    } else {
        AlertPriority::Low
    }
}
