//! Lap ledger
//!
//! Owns the active laps (start order) and the completed laps (newest first).
//! Stopping always takes the oldest active lap, so overlapping laps finish
//! in the order they were started.

use std::collections::VecDeque;

use super::active::{ActiveLap, CompletedLap};

/// Result of stopping the oldest active lap
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoppedLap {
    /// The record that was prepended to the completed list
    pub completed: CompletedLap,

    /// Whether other laps are still being timed
    pub laps_remaining: bool,
}

impl StoppedLap {
    /// Number of the lap that was freed
    pub fn lap_number(&self) -> u32 {
        self.completed.lap_number()
    }
}

#[derive(Debug, Default)]
pub struct LapLedger {
    active: VecDeque<ActiveLap>,
    completed: VecDeque<CompletedLap>,
}

impl LapLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new lap at `now_ms` and return it.
    pub fn start_lap(&mut self, now_ms: u64) -> &ActiveLap {
        let lap_number = (self.completed.len() + self.active.len() + 1) as u32;
        self.active.push_back(ActiveLap::new(lap_number, now_ms));
        tracing::debug!(lap_number, now_ms, active = self.active.len(), "Lap started");
        &self.active[self.active.len() - 1]
    }

    /// Recompute elapsed time for every active lap.
    ///
    /// Returns false when nothing is active, signalling that the refresh
    /// loop should stop.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        if self.active.is_empty() {
            return false;
        }
        for lap in self.active.iter_mut() {
            lap.update(now_ms);
        }
        true
    }

    /// Stop the oldest active lap. `None` (and no change) when idle.
    pub fn stop_oldest(&mut self, now_ms: u64) -> Option<StoppedLap> {
        let mut lap = self.active.pop_front()?;
        lap.update(now_ms);

        let completed = CompletedLap::new(lap.lap_number, lap.elapsed_ms);
        self.completed.push_front(completed.clone());

        tracing::debug!(
            lap_number = lap.lap_number,
            duration_ms = lap.elapsed_ms,
            remaining = self.active.len(),
            "Lap stopped"
        );

        Some(StoppedLap {
            completed,
            laps_remaining: !self.active.is_empty(),
        })
    }

    /// The most recently started lap, which is the one the display follows
    pub fn latest_active(&self) -> Option<&ActiveLap> {
        self.active.back()
    }

    /// Active laps, oldest first
    pub fn active(&self) -> impl ExactSizeIterator<Item = &ActiveLap> {
        self.active.iter()
    }

    /// Completed laps, newest first
    pub fn completed(&self) -> impl ExactSizeIterator<Item = &CompletedLap> {
        self.completed.iter()
    }

    pub fn completed_count(&self) -> usize {
        self.completed.len()
    }

    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    /// True when no lap is being timed
    pub fn is_idle(&self) -> bool {
        self.active.is_empty()
    }
}
