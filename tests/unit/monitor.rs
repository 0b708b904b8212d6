//! Monitor behavior: breach detection, cooldown, store degradation and
//! priority classification.

use deltawatch_rs::prelude::*;

/// Threshold store test double that fails every call.
struct FailingStore;

impl ThresholdStore for FailingStore {
    fn get(&self, _symbol: &str) -> Result<Option<f64>, ThresholdStoreError> {
        Err(ThresholdStoreError::Unavailable {
            message: "store offline".to_string(),
        })
    }

    fn set(&self, _symbol: &str, _threshold: f64) -> Result<(), ThresholdStoreError> {
        Err(ThresholdStoreError::Unavailable {
            message: "store offline".to_string(),
        })
    }
}

fn monitor() -> DeltaThresholdMonitor<InMemoryThresholdStore> {
    DeltaThresholdMonitor::new(InMemoryThresholdStore::new(), MonitorConfig::default())
}

#[test]
fn quiet_stream_never_alerts() {
    let m = monitor();
    // Every delta below the 0.1 default and every move at most 0.02
    let deltas = [0.01, 0.03, 0.05, 0.07, 0.09, 0.08, 0.06];
    for (i, delta) in deltas.iter().enumerate() {
        let now = 1_000 + i as u64 * 1_000;
        assert!(
            m.process_at(&MarketDataUpdate::with_delta("AAPL", *delta), now)
                .is_none(),
            "unexpected alert at delta {delta}"
        );
    }
    assert_eq!(m.last_delta("AAPL"), Some(0.06));
}

#[test]
fn cooldown_emits_exactly_once_per_window() {
    crate::init_tracing();
    let m = monitor();
    let mut emitted = 0;

    // A breach every 10 seconds for 10 minutes: one alert at the start and
    // one after the 300 s window expires.
    for second in (0..600u64).step_by(10) {
        let update = MarketDataUpdate::with_delta("AAPL", 0.35);
        if m.process_at(&update, second * 1_000).is_some() {
            emitted += 1;
        }
    }
    assert_eq!(emitted, 2);
}

#[test]
fn store_failure_falls_back_to_default_threshold() {
    // Exercises the degraded-store warning path under a live subscriber
    crate::init_tracing();
    let m = DeltaThresholdMonitor::new(FailingStore, MonitorConfig::default());

    // Event processing survives the failing store and uses the 0.1 default
    let alert = m
        .process_at(&MarketDataUpdate::with_delta("AAPL", 0.35), 1_000)
        .unwrap();
    assert!((alert.threshold - 0.1).abs() < 1e-12);
    assert_eq!(alert.priority, AlertPriority::Critical);

    // The store keeps failing but processing continues: the next breach is
    // suppressed by the cooldown window, not by a store error
    assert!(
        m.process_at(&MarketDataUpdate::with_delta("AAPL", 0.05), 200_000)
            .is_none()
    );
    // After the window, a small delta near the previous one stays quiet
    assert!(
        m.process_at(&MarketDataUpdate::with_delta("AAPL", 0.06), 400_000)
            .is_none()
    );
}

#[test]
fn store_failure_surfaces_on_writes() {
    let m = DeltaThresholdMonitor::new(FailingStore, MonitorConfig::default());
    assert!(matches!(
        m.set_threshold("AAPL", 0.2),
        Err(ThresholdStoreError::Unavailable { .. })
    ));
    assert!(matches!(
        m.enable_adaptive_threshold("AAPL"),
        Err(ThresholdStoreError::Unavailable { .. })
    ));
}

#[test]
fn priority_tiers() {
    // Ratio of |delta| to |threshold| picks the tier
    assert_eq!(classify_priority(0.35, 0.1), AlertPriority::Critical);
    assert_eq!(classify_priority(0.75, 0.25), AlertPriority::Critical);
    assert_eq!(classify_priority(0.625, 0.25), AlertPriority::High);
    assert_eq!(classify_priority(0.4375, 0.25), AlertPriority::Medium);
    assert_eq!(classify_priority(0.3125, 0.25), AlertPriority::Low);
    // Sign of either side is irrelevant
    assert_eq!(classify_priority(-0.75, -0.25), AlertPriority::Critical);
    // Degenerate thresholds never escalate
    assert_eq!(classify_priority(0.9, 0.0), AlertPriority::Low);
    assert_eq!(classify_priority(0.9, f64::NAN), AlertPriority::Low);
}

#[test]
fn alert_event_carries_context() {
    let m = monitor();
    m.process_at(&MarketDataUpdate::with_delta("AAPL", 0.05), 1_000);
    let alert = m
        .process_at(&MarketDataUpdate::with_delta("AAPL", 0.35), 2_000)
        .unwrap();

    assert_eq!(alert.symbol, "AAPL");
    assert_eq!(alert.previous_delta, Some(0.05));
    assert_eq!(alert.timestamp, 2_000);
    assert!(alert.message.contains("AAPL"));
    assert!(alert.message.contains("0.350000"));

    // Distinct alerts get distinct ids
    let other = m
        .process_at(&MarketDataUpdate::with_delta("TSLA", 0.35), 2_000)
        .unwrap();
    assert_ne!(alert.id, other.id);
}

#[test]
fn threshold_updates_take_effect_immediately() {
    let m = monitor();
    assert!(
        m.process_at(&MarketDataUpdate::with_delta("AAPL", 0.15), 1_000)
            .is_some()
    );

    // Raising the threshold above the delta quiets the symbol even after
    // the cooldown window has passed.
    m.set_threshold("AAPL", 0.5).unwrap();
    assert!(
        m.process_at(&MarketDataUpdate::with_delta("AAPL", 0.16), 400_000)
            .is_none()
    );
}
