//! Tests for LapLedger
//!
//! Verifies lap numbering, FIFO stopping and completed-list ordering.

use super::LapLedger;

fn numbers(ledger: &LapLedger) -> Vec<u32> {
    ledger.active().map(|lap| lap.lap_number).collect()
}

fn labels(ledger: &LapLedger) -> Vec<String> {
    ledger.completed().map(|lap| lap.label().to_string()).collect()
}

#[test]
fn test_start_assigns_sequential_numbers() {
    let mut ledger = LapLedger::new();
    for i in 0..5 {
        let lap = ledger.start_lap(i * 100);
        assert_eq!(lap.elapsed_ms, 0);
    }
    assert_eq!(numbers(&ledger), vec![1, 2, 3, 4, 5]);
    assert_eq!(ledger.latest_active().map(|l| l.lap_number), Some(5));
}

#[test]
fn test_stop_removes_oldest_lap() {
    let mut ledger = LapLedger::new();
    ledger.start_lap(1_000); // A
    ledger.start_lap(3_000); // B

    let stopped = ledger.stop_oldest(6_000).expect("lap A should stop");
    assert_eq!(stopped.lap_number(), 1);
    assert_eq!(stopped.completed.duration_ms(), 5_000);
    assert_eq!(stopped.completed.label(), "[Lap 1] 0:05.000");
    assert!(stopped.laps_remaining);

    // B is still running
    assert_eq!(numbers(&ledger), vec![2]);
}

#[test]
fn test_stop_when_idle_changes_nothing() {
    let mut ledger = LapLedger::new();
    assert!(ledger.stop_oldest(500).is_none());

    ledger.start_lap(0);
    ledger.stop_oldest(1_234);
    let before = labels(&ledger);

    assert!(ledger.stop_oldest(9_999).is_none());
    assert_eq!(labels(&ledger), before);
    assert!(ledger.is_idle());
}

#[test]
fn test_completed_list_is_newest_first() {
    let mut ledger = LapLedger::new();
    ledger.start_lap(0); // X
    ledger.start_lap(0); // Y

    ledger.stop_oldest(1_000);
    let last = ledger.stop_oldest(2_500).unwrap();
    assert!(!last.laps_remaining);

    assert_eq!(
        labels(&ledger),
        vec!["[Lap 2] 0:02.500".to_string(), "[Lap 1] 0:01.000".to_string()]
    );
}

#[test]
fn test_numbers_count_completed_and_active() {
    let mut ledger = LapLedger::new();
    ledger.start_lap(0);
    ledger.start_lap(0);
    ledger.stop_oldest(10);

    // one completed + one active + 1
    assert_eq!(ledger.start_lap(20).lap_number, 3);
    ledger.stop_oldest(30);
    ledger.stop_oldest(40);

    assert_eq!(ledger.start_lap(50).lap_number, 4);
}

#[test]
fn test_tick_updates_every_active_lap() {
    let mut ledger = LapLedger::new();
    ledger.start_lap(0);
    ledger.start_lap(400);

    assert!(ledger.tick(1_000));
    let elapsed: Vec<u64> = ledger.active().map(|l| l.elapsed_ms).collect();
    assert_eq!(elapsed, vec![1_000, 600]);
}

#[test]
fn test_tick_never_decreases_elapsed() {
    let mut ledger = LapLedger::new();
    ledger.start_lap(100);

    let mut last = 0;
    for now in [150, 300, 250, 300, 900] {
        ledger.tick(now);
        let elapsed = ledger.latest_active().unwrap().elapsed_ms;
        assert!(elapsed >= last, "elapsed went from {last} to {elapsed}");
        last = elapsed;
    }
    assert_eq!(last, 800);
}

#[test]
fn test_tick_reports_idle() {
    let mut ledger = LapLedger::new();
    assert!(!ledger.tick(10));

    ledger.start_lap(0);
    assert!(ledger.tick(10));
    ledger.stop_oldest(20);
    assert!(!ledger.tick(30));
}
