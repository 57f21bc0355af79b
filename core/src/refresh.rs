//! Display refresh loop
//!
//! While laps are running the display is redrawn on a fixed period. The loop
//! is a tokio task that only sends `RefreshTick` messages; the owner of the
//! lap state handles them on its own event loop, so state is never touched
//! from the task.
//!
//! At most one loop exists at a time. Starting a new one aborts the previous
//! task, and every start bumps a generation number so a tick that was already
//! queued by an aborted loop can be recognized and dropped.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Refresh period used when none is configured
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_millis(10);

/// One firing of the refresh loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshTick {
    pub generation: u64,
}

/// Scheduling seam between the controller and the refresh loop
pub trait TickScheduler {
    /// Cancel any pending loop, start a new one and return its generation
    fn start(&mut self) -> u64;

    /// Stop the loop; pending ticks become stale
    fn cancel(&mut self);

    fn is_running(&self) -> bool;

    /// True if `tick` came from the loop that is currently running
    fn is_current(&self, tick: RefreshTick) -> bool;
}

/// Tokio implementation of [`TickScheduler`]
pub struct RefreshLoop {
    period: Duration,
    tick_tx: mpsc::Sender<RefreshTick>,
    handle: Option<JoinHandle<()>>,
    generation: u64,
}

impl RefreshLoop {
    /// Create the loop and the receiver its ticks arrive on
    pub fn new(period: Duration) -> (Self, mpsc::Receiver<RefreshTick>) {
        // Small buffer: if the consumer falls behind, the interval skips
        // missed ticks instead of piling them up
        let (tick_tx, tick_rx) = mpsc::channel(4);
        let refresh = Self {
            period: period.max(Duration::from_millis(1)),
            tick_tx,
            handle: None,
            generation: 0,
        };
        (refresh, tick_rx)
    }

    pub fn period(&self) -> Duration {
        self.period
    }
}

impl TickScheduler for RefreshLoop {
    fn start(&mut self) -> u64 {
        self.cancel();
        self.generation += 1;

        let generation = self.generation;
        let period = self.period;
        let tx = self.tick_tx.clone();

        self.handle = Some(tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                // First tick completes immediately
                interval.tick().await;
                if tx.send(RefreshTick { generation }).await.is_err() {
                    break;
                }
            }
        }));

        tracing::trace!(generation, period_ms = period.as_millis() as u64, "Refresh loop started");
        generation
    }

    fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
            tracing::trace!(generation = self.generation, "Refresh loop cancelled");
        }
    }

    fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    fn is_current(&self, tick: RefreshTick) -> bool {
        self.handle.is_some() && tick.generation == self.generation
    }
}

impl Drop for RefreshLoop {
    fn drop(&mut self) {
        self.cancel();
    }
}
