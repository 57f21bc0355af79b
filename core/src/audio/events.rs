//! Audio event types

/// Events consumed by the audio service
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AudioEvent {
    /// Stop whatever is playing and speak this text
    Speak { text: String },

    /// Stop playback and release the engine
    Shutdown,
}

/// One-shot result of speech engine initialization
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpeechReadiness {
    Ready,
    /// Turned off in settings
    Disabled,
    /// Engine could not be initialized; announcements are dropped
    Unavailable(String),
}
