//! Audio playback service
//!
//! Runs on a dedicated thread, receiving AudioEvents via channel. The engine
//! is created on that thread, so platform TTS handles never cross threads.
//! Initialization outcome is reported once through a oneshot channel.

use std::thread::JoinHandle;

use laptrack_types::AudioSettings;
use tokio::sync::{mpsc, oneshot};

use super::engine::{SpeechEngine, default_engine};
use super::error::AudioError;
use super::events::{AudioEvent, SpeechReadiness};
use crate::format::SpeechLocale;

/// Sender handle for sending audio events
pub type AudioSender = mpsc::Sender<AudioEvent>;

/// Create a new audio channel
pub fn create_audio_channel() -> (AudioSender, mpsc::Receiver<AudioEvent>) {
    // One announcement per stopped lap; 64 is far more than a user can queue
    mpsc::channel(64)
}

/// Handle to a running audio service thread
pub struct AudioHandle {
    pub sender: AudioSender,
    thread: JoinHandle<()>,
}

impl AudioHandle {
    /// Wait for the service thread to exit. It exits after a `Shutdown`
    /// event or once every other sender has been dropped.
    pub fn join(self) {
        drop(self.sender);
        if self.thread.join().is_err() {
            tracing::error!("Audio thread panicked");
        }
    }
}

/// Audio service that owns the speech engine
pub struct AudioService {
    event_rx: mpsc::Receiver<AudioEvent>,

    /// None if disabled, unavailable on this host, or failed to initialize
    engine: Option<Box<dyn SpeechEngine>>,
}

impl AudioService {
    pub fn new(event_rx: mpsc::Receiver<AudioEvent>, engine: Option<Box<dyn SpeechEngine>>) -> Self {
        Self { event_rx, engine }
    }

    /// Start the service thread with the platform engine.
    ///
    /// The returned receiver resolves once the engine has been initialized
    /// (or failed to).
    pub fn spawn(
        settings: AudioSettings,
        locale: SpeechLocale,
    ) -> Result<(AudioHandle, oneshot::Receiver<SpeechReadiness>), AudioError> {
        let (sender, event_rx) = create_audio_channel();
        let (ready_tx, ready) = oneshot::channel();

        let thread = std::thread::Builder::new()
            .name("laptrack-audio".to_string())
            .spawn(move || {
                let (engine, readiness) = if !settings.enabled {
                    (None, SpeechReadiness::Disabled)
                } else {
                    match default_engine(locale, settings.volume) {
                        Ok(engine) => (Some(engine), SpeechReadiness::Ready),
                        Err(e) => (None, SpeechReadiness::Unavailable(e.to_string())),
                    }
                };
                // The receiver may already be gone if the app quit during init
                let _ = ready_tx.send(readiness);

                AudioService::new(event_rx, engine).run();
            })
            .map_err(AudioError::SpawnThread)?;

        Ok((AudioHandle { sender, thread }, ready))
    }

    /// Process events until `Shutdown` or until every sender is dropped.
    /// Blocks the calling thread.
    pub fn run(mut self) {
        while let Some(event) = self.event_rx.blocking_recv() {
            match event {
                AudioEvent::Speak { text } => self.speak(&text),
                AudioEvent::Shutdown => break,
            }
        }

        if let Some(engine) = self.engine.as_mut() {
            if let Err(e) = engine.stop() {
                tracing::warn!(error = %e, "Failed to stop speech on shutdown");
            }
        }
        // Engine is released when self drops
        tracing::debug!("Audio service stopped");
    }

    /// Cut off the current utterance and speak `text`
    fn speak(&mut self, text: &str) {
        let Some(engine) = self.engine.as_mut() else {
            return;
        };
        if text.is_empty() {
            return;
        }

        if engine.is_speaking() {
            if let Err(e) = engine.stop() {
                tracing::warn!(error = %e, "Failed to stop previous utterance");
            }
        }
        if let Err(e) = engine.speak(text) {
            tracing::warn!(error = %e, text, "Speech failed");
        }
    }
}
