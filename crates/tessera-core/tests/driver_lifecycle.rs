//! End-to-end driver lifecycle tests: bounded runs, growth and mutation
//! regimes, tap interaction, and snapshot projection working together.

// Integration tests use unwrap extensively for clarity -- panicking on
// failure is the correct behavior in test code.
#![allow(clippy::unwrap_used)]

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tessera_core::config::SimulationConfig;
use tessera_core::driver::{Driver, EndReason, TapOutcome, TickCallback};
use tessera_core::engine::StepOutcome;
use tessera_types::BoardSnapshot;
use tokio::time::timeout;

/// Counts callback invocations so callback delivery is observable.
struct CountingCallback {
    ticks_seen: Arc<AtomicU64>,
}

impl TickCallback for CountingCallback {
    fn on_tick(&mut self, _outcome: &StepOutcome, snapshot: &BoardSnapshot) {
        self.ticks_seen.store(snapshot.tick, Ordering::Release);
    }
}

fn fast_config(max_ticks: u64) -> SimulationConfig {
    let mut config = SimulationConfig::default();
    config.driver.tick_interval_ms = 1;
    config.driver.max_ticks = max_ticks;
    config
}

#[tokio::test]
async fn bounded_run_grows_then_mutates_and_reports_each_tick() {
    let ticks_seen = Arc::new(AtomicU64::new(0));
    let callback = CountingCallback {
        ticks_seen: Arc::clone(&ticks_seen),
    };
    let config = fast_config(25);
    config.validate().unwrap();
    let driver = Driver::with_callback(&config, Box::new(callback));

    assert!(driver.start());
    timeout(Duration::from_secs(10), driver.wait_until_stopped())
        .await
        .unwrap();

    assert_eq!(driver.end_reason().await, Some(EndReason::TickLimitReached));
    assert_eq!(ticks_seen.load(Ordering::Acquire), 25);

    let snapshot = driver.snapshot().await;
    assert_eq!(snapshot.tick, 25);
    // Growth stops at the threshold; deletions may have shrunk the board.
    assert!(snapshot.cells.len() <= 5);
    assert!(!snapshot.cells.is_empty());

    // Exactly the final cell carries the is_last flag.
    let last_flags = snapshot
        .cells
        .iter()
        .filter(|view| view.is_last)
        .count();
    assert_eq!(last_flags, 1);
    assert!(snapshot.cells.last().unwrap().is_last);
}

#[tokio::test]
async fn tap_is_guarded_by_run_state() {
    let driver = Driver::new(&fast_config(2));

    assert!(driver.start());
    timeout(Duration::from_secs(10), driver.wait_until_stopped())
        .await
        .unwrap();

    // Stopped: a tap on the second cell applies the absorb.
    let before = driver.snapshot().await;
    let expected = before
        .cells
        .first()
        .unwrap()
        .value
        .saturating_add(before.cells.get(1).unwrap().value);
    assert_eq!(driver.tap(1).await.unwrap(), TapOutcome::Applied);
    let after = driver.snapshot().await;
    assert_eq!(after.cells.get(1).unwrap().value, expected);

    // Running again: taps are ignored.
    let mut config = fast_config(0);
    config.driver.tick_interval_ms = 60_000;
    let idle_driver = Driver::new(&config);
    assert!(idle_driver.start());
    assert_eq!(
        idle_driver.tap(1).await.unwrap(),
        TapOutcome::IgnoredWhileRunning
    );
    assert!(idle_driver.stop());
    timeout(Duration::from_secs(5), idle_driver.wait_until_stopped())
        .await
        .unwrap();
}
