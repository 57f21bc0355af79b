//! Lap tracking
//!
//! This module provides:
//! - **Active laps**: laps that have started and are being timed
//! - **Completed laps**: immutable records produced when a lap stops
//! - **Ledger**: owns both collections and assigns lap numbers
//!
//! # Lifecycle
//!
//! 1. Start action → `ActiveLap` appended (numbered completed + active + 1)
//! 2. Each refresh tick recomputes every active lap's elapsed time
//! 3. Stop action → oldest `ActiveLap` removed → `CompletedLap` prepended

mod active;
mod ledger;

#[cfg(test)]
mod ledger_tests;

pub use active::{ActiveLap, CompletedLap};
pub use ledger::{LapLedger, StoppedLap};
