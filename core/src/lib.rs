//! Lap timing core
//!
//! Overlapping lap timing with a refreshing display, a newest-first history
//! and spoken readouts. Rendering and input are left to the front-end, which
//! supplies `DisplaySurface`/`HistoryView` sinks and feeds actions into
//! `LapController`.

pub mod audio;
pub mod clock;
pub mod context;
pub mod controller;
pub mod format;
pub mod laps;
pub mod presenter;
pub mod refresh;


// Re-exports for convenience
pub use audio::{AudioEvent, AudioHandle, AudioService, SpeechAnnouncer, SpeechReadiness};
pub use clock::{Clock, ManualClock, SystemClock};
pub use context::{AppConfig, AppConfigExt};
pub use controller::LapController;
pub use format::{SpeechLocale, format_display, format_lap_label, format_speech};
pub use laps::{ActiveLap, CompletedLap, LapLedger, StoppedLap};
pub use presenter::{DisplaySurface, HistoryView, LapHistoryPresenter};
pub use refresh::{RefreshLoop, RefreshTick, TickScheduler};
