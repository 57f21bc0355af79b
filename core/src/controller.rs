//! Lap controller
//!
//! Single owner of the lap state. Input actions and refresh ticks all go
//! through `&mut self` on one event loop, so no locking is involved.
//!
//! # Display rules
//!
//! - Laps running: show the most recently started lap, refreshed every tick
//! - Nothing recorded yet: show `0:00.000` with no lap number
//! - Last running lap stopped: freeze on that lap's final label

use crate::audio::SpeechAnnouncer;
use crate::clock::Clock;
use crate::format::format_display;
use crate::laps::{LapLedger, StoppedLap};
use crate::presenter::{DisplaySurface, HistoryView, LapHistoryPresenter};
use crate::refresh::{RefreshTick, TickScheduler};

pub struct LapController {
    ledger: LapLedger,
    clock: Box<dyn Clock>,
    refresh: Box<dyn TickScheduler>,
    display: Box<dyn DisplaySurface>,
    history: LapHistoryPresenter,
    announcer: SpeechAnnouncer,
}

impl LapController {
    /// Build the controller and draw the idle display
    pub fn new(
        clock: Box<dyn Clock>,
        refresh: Box<dyn TickScheduler>,
        display: Box<dyn DisplaySurface>,
        history: Box<dyn HistoryView>,
        announcer: SpeechAnnouncer,
    ) -> Self {
        let mut controller = Self {
            ledger: LapLedger::new(),
            clock,
            refresh,
            display,
            history: LapHistoryPresenter::new(history),
            announcer,
        };
        controller.render();
        controller
    }

    /// Start a new lap and (re)start the refresh loop. Returns the lap number.
    pub fn start_lap(&mut self) -> u32 {
        let now = self.clock.now_ms();
        let lap_number = self.ledger.start_lap(now).lap_number;

        self.refresh.start();
        self.render();

        tracing::info!(lap_number, active = self.ledger.active_count(), "Lap started");
        lap_number
    }

    /// Stop the oldest running lap, record it and announce it.
    /// Does nothing when no lap is running.
    pub fn stop_oldest(&mut self) -> Option<StoppedLap> {
        let now = self.clock.now_ms();
        let Some(stopped) = self.ledger.stop_oldest(now) else {
            tracing::debug!("Stop requested with no active lap");
            return None;
        };

        self.history.lap_completed(&stopped.completed);
        self.announcer.announce(stopped.completed.duration_ms());

        self.refresh.cancel();
        if stopped.laps_remaining {
            self.ledger.tick(now);
            self.render();
            self.refresh.start();
        } else {
            self.display.show(stopped.completed.label());
        }

        tracing::info!(
            lap_number = stopped.lap_number(),
            duration_ms = stopped.completed.duration_ms(),
            remaining = self.ledger.active_count(),
            "Lap completed"
        );
        Some(stopped)
    }

    /// Handle one refresh tick. Stale ticks from a cancelled loop are ignored;
    /// the loop is cancelled once nothing is running.
    pub fn on_tick(&mut self, tick: RefreshTick) {
        if !self.refresh.is_current(tick) {
            return;
        }
        if !self.ledger.tick(self.clock.now_ms()) {
            self.refresh.cancel();
            return;
        }
        self.render();
    }

    /// Stop the refresh loop and ask the speech engine to shut down
    pub fn shutdown(&mut self) {
        self.refresh.cancel();
        self.announcer.shutdown();
        tracing::info!(
            completed = self.ledger.completed_count(),
            abandoned = self.ledger.active_count(),
            "Lap session ended"
        );
    }

    pub fn ledger(&self) -> &LapLedger {
        &self.ledger
    }

    /// Session clock reading, for callers that report elapsed times
    pub fn now_ms(&self) -> u64 {
        self.clock.now_ms()
    }

    pub fn is_refreshing(&self) -> bool {
        self.refresh.is_running()
    }

    fn render(&mut self) {
        match self.ledger.latest_active() {
            Some(lap) => {
                let label = lap.label();
                self.display.show(&label);
            }
            // The final stop already froze the display on its label
            None if self.ledger.completed_count() > 0 => {}
            None => self.display.show(&format_display(0)),
        }
    }
}
