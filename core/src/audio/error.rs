//! Error types for audio operations

use thiserror::Error;

/// Errors from the speech engine
#[derive(Debug, Error)]
pub enum AudioError {
    #[error("speech engine initialization failed: {0}")]
    Init(String),

    #[error("failed to launch {program}")]
    Launch {
        program: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("speech engine error: {0}")]
    Engine(String),

    #[error("failed to spawn audio thread")]
    SpawnThread(#[source] std::io::Error),
}
