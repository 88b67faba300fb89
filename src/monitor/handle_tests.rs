//! Tests for the background monitoring lifecycle.
//!
//! All tests run with a paused tokio clock, so sweeps and sleeps are
//! deterministic: the runtime advances time only when every task is idle.

use super::*;
use crate::api::{ApiError, ChargerId};
use crate::monitor::test_fixtures::MockClient;
use crate::monitor::{BackoffPolicy, ChangeMonitor};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Lets the spawned loop run its current sweep and reach its sleep.
async fn settle() {
    tokio::time::sleep(Duration::from_millis(1)).await;
}

#[tokio::test(start_paused = true)]
async fn first_sweep_runs_immediately_on_start() {
    let client = MockClient::new();
    client.script_statuses("C1", &["IDLE"]);
    let monitor = ChangeMonitor::new(client.clone());

    let handle = monitor.start(vec![ChargerId::new("C1")], Duration::from_secs(1000));
    settle().await;

    // Far less than the interval has elapsed, yet the charger was polled.
    assert_eq!(client.call_count(), 1);
    handle.stop().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn stop_after_start_completes_exactly_one_sweep() {
    // Two chargers, 1000ms interval, stop right after start: one full
    // sweep finishes, then the loop exits without a second sweep.
    let client = MockClient::new();
    client.script_statuses("C1", &["IDLE"]);
    client.script_statuses("C2", &["CHARGING"]);
    let monitor = ChangeMonitor::new(client.clone());
    let chargers = vec![ChargerId::new("C1"), ChargerId::new("C2")];

    let handle = monitor.start(chargers.clone(), Duration::from_millis(1000));
    settle().await;
    let monitor = handle.stop().await.unwrap();

    assert_eq!(client.calls(), chargers);
    assert!(monitor.last_seen(&chargers[0]).is_some());
    assert!(monitor.last_seen(&chargers[1]).is_some());
}

#[tokio::test(start_paused = true)]
async fn no_poll_starts_after_stop_returns() {
    let client = MockClient::new();
    let monitor = ChangeMonitor::new(client.clone());

    let handle = monitor.start(vec![ChargerId::new("C1")], Duration::from_secs(1));
    settle().await;
    let _ = handle.stop().await.unwrap();
    let polls_at_stop = client.call_count();

    // Even after many intervals pass, no further poll happens.
    tokio::time::sleep(Duration::from_secs(30)).await;
    assert_eq!(client.call_count(), polls_at_stop);
}

#[tokio::test(start_paused = true)]
async fn loop_sweeps_once_per_interval() {
    let client = MockClient::new();
    client.script_statuses("C1", &["IDLE", "IDLE", "CHARGING"]);
    let (tx, seen) = {
        let seen = Arc::new(Mutex::new(Vec::new()));
        (Arc::clone(&seen), seen)
    };
    let mut monitor = ChangeMonitor::new(client.clone());
    monitor.subscribe(move |change| {
        tx.lock()
            .unwrap()
            .push((change.new.status.clone(), change.old.status.clone()));
    });

    let handle = monitor.start(vec![ChargerId::new("C1")], Duration::from_secs(1));
    // Sweeps land at t=0s, 1s, 2s; stop at t=2.5s.
    tokio::time::sleep(Duration::from_millis(2500)).await;
    handle.stop().await.unwrap();

    assert_eq!(client.call_count(), 3);
    assert_eq!(
        *seen.lock().unwrap(),
        vec![("CHARGING".to_string(), "IDLE".to_string())]
    );
}

#[tokio::test(start_paused = true)]
async fn throttled_sweep_stretches_the_next_delay() {
    let client = MockClient::new();
    client.script("C1", vec![Err(ApiError::RateLimited)]);
    let monitor = ChangeMonitor::new(client.clone())
        .with_backoff(BackoffPolicy::new().with_multiplier(2.0));

    let handle = monitor.start(vec![ChargerId::new("C1")], Duration::from_secs(1));

    // First sweep at t=0 is throttled, so the next runs at t=2s, not t=1s.
    tokio::time::sleep(Duration::from_millis(1500)).await;
    assert_eq!(client.call_count(), 1);

    tokio::time::sleep(Duration::from_millis(1000)).await;
    assert_eq!(client.call_count(), 2);

    handle.stop().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn clean_sweep_resets_the_backoff() {
    let client = MockClient::new();
    client.script(
        "C1",
        vec![
            Err(ApiError::RateLimited),
            Ok(crate::api::StatusRecord::new("C1", "IDLE")),
        ],
    );
    let monitor = ChangeMonitor::new(client.clone());

    let handle = monitor.start(vec![ChargerId::new("C1")], Duration::from_secs(1));

    // t=0 throttled; t=2 clean; next sweep back on the base interval at t=3.
    tokio::time::sleep(Duration::from_millis(3500)).await;
    assert_eq!(client.call_count(), 3);

    handle.stop().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn dropping_the_handle_terminates_the_loop() {
    let client = MockClient::new();
    let monitor = ChangeMonitor::new(client.clone());

    let handle = monitor.start(vec![ChargerId::new("C1")], Duration::from_secs(1));
    settle().await;
    drop(handle);
    settle().await;

    let polls_at_drop = client.call_count();
    tokio::time::sleep(Duration::from_secs(30)).await;
    assert_eq!(client.call_count(), polls_at_drop);
}

#[tokio::test(start_paused = true)]
async fn stopped_monitor_can_resume_with_state_intact() {
    let client = MockClient::new();
    client.script_statuses("C1", &["IDLE", "CHARGING"]);
    let (tx, seen) = {
        let seen = Arc::new(Mutex::new(Vec::new()));
        (Arc::clone(&seen), seen)
    };
    let mut monitor = ChangeMonitor::new(client.clone());
    monitor.subscribe(move |change| {
        tx.lock().unwrap().push(change.new.status.clone());
    });
    let chargers = vec![ChargerId::new("C1")];

    let handle = monitor.start(chargers.clone(), Duration::from_secs(1));
    settle().await;
    let monitor = handle.stop().await.unwrap();

    // Restart with the same monitor: the IDLE baseline survives, so the
    // CHARGING poll fires a notification on the very first sweep.
    let handle = monitor.start(chargers, Duration::from_secs(1));
    settle().await;
    handle.stop().await.unwrap();

    assert_eq!(*seen.lock().unwrap(), vec!["CHARGING".to_string()]);
}
