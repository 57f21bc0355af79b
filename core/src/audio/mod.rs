//! Audio subsystem for spoken lap readouts
//!
//! Completed laps are announced through a speech engine that runs on its own
//! thread, receiving `AudioEvent`s via channel. Each new announcement cuts off
//! the one still playing.

mod announcer;
mod engine;
mod error;
mod events;
mod service;

pub use announcer::SpeechAnnouncer;
pub use engine::{EspeakEngine, SpeechEngine, default_engine};
#[cfg(not(target_os = "linux"))]
pub use engine::TtsEngine;
pub use error::AudioError;
pub use events::{AudioEvent, SpeechReadiness};
pub use service::{AudioHandle, AudioSender, AudioService, create_audio_channel};
