//! Concurrency guarantees: per-symbol atomicity and cross-symbol
//! independence under contention.

use deltawatch_rs::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;

#[test]
fn concurrent_same_symbol_breaches_alert_exactly_once() {
    crate::init_tracing();
    let alert_count = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&alert_count);
    let listener: AlertListener = Arc::new(move |_alert: &AlertEvent| {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    let monitor = Arc::new(DeltaThresholdMonitor::with_alert_listener(
        InMemoryThresholdStore::new(),
        MonitorConfig::default(),
        listener,
    ));

    let threads = 8;
    let barrier = Arc::new(Barrier::new(threads));
    let mut handles = Vec::new();

    for _ in 0..threads {
        let monitor = Arc::clone(&monitor);
        let barrier = Arc::clone(&barrier);
        handles.push(thread::spawn(move || {
            barrier.wait();
            // All events land at the same instant, well inside one cooldown
            // window, so at most one thread may emit.
            monitor
                .process_at(&MarketDataUpdate::with_delta("AAPL", 0.35), 1_000)
                .is_some()
        }));
    }

    let emitted: usize = handles
        .into_iter()
        .map(|h| usize::from(h.join().unwrap()))
        .sum();

    assert_eq!(emitted, 1);
    assert_eq!(alert_count.load(Ordering::SeqCst), 1);
    assert_eq!(monitor.last_delta("AAPL"), Some(0.35));
}

#[test]
fn concurrent_distinct_symbols_alert_independently() {
    let alert_count = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&alert_count);
    let listener: AlertListener = Arc::new(move |_alert: &AlertEvent| {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    let monitor = Arc::new(DeltaThresholdMonitor::with_alert_listener(
        InMemoryThresholdStore::new(),
        MonitorConfig::default(),
        listener,
    ));

    let threads = 8;
    let barrier = Arc::new(Barrier::new(threads));
    let mut handles = Vec::new();

    for i in 0..threads {
        let monitor = Arc::clone(&monitor);
        let barrier = Arc::clone(&barrier);
        handles.push(thread::spawn(move || {
            let symbol = format!("SYM{i}");
            barrier.wait();
            // One breach plus a stream of suppressed follow-ups per symbol
            for step in 0..20u64 {
                monitor.process_at(
                    &MarketDataUpdate::with_delta(&symbol, 0.35),
                    1_000 + step,
                );
            }
        }));
    }
    for handle in handles {
        handle.join().unwrap();
    }

    // Cooldown is per symbol, so every symbol alerted exactly once
    assert_eq!(alert_count.load(Ordering::SeqCst), threads);
    assert_eq!(monitor.symbol_count(), threads);
}

#[test]
fn concurrent_updates_never_lose_state() {
    let monitor = Arc::new(DeltaThresholdMonitor::new(
        InMemoryThresholdStore::new(),
        MonitorConfig::default(),
    ));

    let threads = 4;
    let per_thread = 100;
    let mut handles = Vec::new();

    for t in 0..threads {
        let monitor = Arc::clone(&monitor);
        handles.push(thread::spawn(move || {
            for i in 0..per_thread {
                let symbol = format!("SYM{}", (t * per_thread + i) % 16);
                monitor.process_at(&MarketDataUpdate::with_delta(&symbol, 0.01), 1_000);
            }
        }));
    }
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(monitor.symbol_count(), 16);
    for i in 0..16 {
        assert_eq!(monitor.last_delta(&format!("SYM{i}")), Some(0.01));
    }
}
