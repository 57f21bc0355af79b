//! Spoken lap readout
//!
//! Formats a completed lap for speech and hands it to the audio service
//! without waiting. Speech is best-effort; nothing here can fail the caller.

use tokio::sync::mpsc::error::TrySendError;

use super::events::AudioEvent;
use super::service::AudioSender;
use crate::format::{SpeechLocale, format_speech};

pub struct SpeechAnnouncer {
    /// None when running without speech
    sender: Option<AudioSender>,
    locale: SpeechLocale,
}

impl SpeechAnnouncer {
    pub fn new(sender: AudioSender, locale: SpeechLocale) -> Self {
        Self {
            sender: Some(sender),
            locale,
        }
    }

    /// Announcer that drops every request
    pub fn silent() -> Self {
        Self {
            sender: None,
            locale: SpeechLocale::default(),
        }
    }

    pub fn locale(&self) -> SpeechLocale {
        self.locale
    }

    /// Queue a readout of `duration_ms`. Returns true if a request was sent.
    pub fn announce(&self, duration_ms: u64) -> bool {
        let text = format_speech(i64::try_from(duration_ms).unwrap_or(i64::MAX), self.locale);
        if text.is_empty() {
            return false;
        }
        self.send(AudioEvent::Speak { text })
    }

    /// Ask the audio service to stop speaking and release its engine
    pub fn shutdown(&self) {
        self.send(AudioEvent::Shutdown);
    }

    fn send(&self, event: AudioEvent) -> bool {
        let Some(sender) = self.sender.as_ref() else {
            return false;
        };
        match sender.try_send(event) {
            Ok(()) => true,
            Err(TrySendError::Full(event)) => {
                tracing::warn!(?event, "Audio queue full, dropping event");
                false
            }
            Err(TrySendError::Closed(_)) => {
                tracing::debug!("Audio service gone, dropping event");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::create_audio_channel;

    #[test]
    fn announce_sends_formatted_speech() {
        let (tx, mut rx) = create_audio_channel();
        let announcer = SpeechAnnouncer::new(tx, SpeechLocale::English);

        assert!(announcer.announce(61_230));
        assert_eq!(
            rx.try_recv().unwrap(),
            AudioEvent::Speak {
                text: "1 minute 1 second 2 3 0".to_string()
            }
        );
    }

    #[test]
    fn silent_announcer_sends_nothing() {
        let announcer = SpeechAnnouncer::silent();
        assert!(!announcer.announce(1_000));
        announcer.shutdown();
    }

    #[test]
    fn closed_service_is_ignored() {
        let (tx, rx) = create_audio_channel();
        drop(rx);
        let announcer = SpeechAnnouncer::new(tx, SpeechLocale::Japanese);
        assert!(!announcer.announce(5_000));
    }
}
