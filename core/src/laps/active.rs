//! Active and completed lap records

use crate::format::format_lap_label;

/// A lap that has started but not stopped yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveLap {
    /// Session timestamp the lap started at
    pub start_ms: u64,

    /// Time since start as of the last tick
    pub elapsed_ms: u64,

    pub lap_number: u32,
}

impl ActiveLap {
    pub fn new(lap_number: u32, start_ms: u64) -> Self {
        Self {
            start_ms,
            elapsed_ms: 0,
            lap_number,
        }
    }

    /// Recompute elapsed time. The clock is monotonic, so this never decreases;
    /// an out-of-order `now` keeps the previous value.
    pub fn update(&mut self, now_ms: u64) {
        self.elapsed_ms = self.elapsed_ms.max(now_ms.saturating_sub(self.start_ms));
    }

    /// "[Lap N] M:SS.mmm" for the current elapsed time
    pub fn label(&self) -> String {
        format_lap_label(self.lap_number, self.elapsed_ms)
    }
}

/// Snapshot of a stopped lap. Never changes after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletedLap {
    lap_number: u32,
    duration_ms: u64,
    label: String,
}

impl CompletedLap {
    pub fn new(lap_number: u32, duration_ms: u64) -> Self {
        Self {
            lap_number,
            duration_ms,
            label: format_lap_label(lap_number, duration_ms),
        }
    }

    pub fn lap_number(&self) -> u32 {
        self.lap_number
    }

    pub fn duration_ms(&self) -> u64 {
        self.duration_ms
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}
