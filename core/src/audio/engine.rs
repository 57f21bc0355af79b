//! Speech engines
//!
//! TTS is only available on Windows/macOS through the `tts` crate. Linux
//! shells out to `espeak`, keeping the child process so a new utterance can
//! kill the previous one.

use std::process::{Child, Command, Stdio};

use super::error::AudioError;
use crate::format::SpeechLocale;

/// Minimal contract the audio service needs from a synthesizer
pub trait SpeechEngine {
    fn is_speaking(&mut self) -> bool;
    fn stop(&mut self) -> Result<(), AudioError>;
    /// Start speaking `text` without waiting for it to finish
    fn speak(&mut self, text: &str) -> Result<(), AudioError>;
}

/// Create the platform's engine. Uses the host's default voice.
#[cfg(not(target_os = "linux"))]
pub fn default_engine(
    _locale: SpeechLocale,
    volume: u8,
) -> Result<Box<dyn SpeechEngine>, AudioError> {
    Ok(Box::new(TtsEngine::new(volume)?))
}

/// Create the platform's engine, picking the espeak voice for the host locale.
#[cfg(target_os = "linux")]
pub fn default_engine(
    locale: SpeechLocale,
    volume: u8,
) -> Result<Box<dyn SpeechEngine>, AudioError> {
    Ok(Box::new(EspeakEngine::new(locale, volume)?))
}

// ─────────────────────────────────────────────────────────────────────────────
// tts crate (Windows/macOS)
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(not(target_os = "linux"))]
pub struct TtsEngine {
    tts: tts::Tts,
}

#[cfg(not(target_os = "linux"))]
impl TtsEngine {
    pub fn new(volume: u8) -> Result<Self, AudioError> {
        let mut tts = tts::Tts::default().map_err(|e| AudioError::Init(e.to_string()))?;
        let _ = tts.set_rate(tts.normal_rate());

        let (min, max) = (tts.min_volume(), tts.max_volume());
        let level = min + (max - min) * (f32::from(volume.min(100)) / 100.0);
        let _ = tts.set_volume(level);

        Ok(Self { tts })
    }
}

#[cfg(not(target_os = "linux"))]
impl SpeechEngine for TtsEngine {
    fn is_speaking(&mut self) -> bool {
        self.tts.is_speaking().unwrap_or(false)
    }

    fn stop(&mut self) -> Result<(), AudioError> {
        self.tts
            .stop()
            .map(|_| ())
            .map_err(|e| AudioError::Engine(e.to_string()))
    }

    fn speak(&mut self, text: &str) -> Result<(), AudioError> {
        self.tts
            .speak(text, true)
            .map(|_| ())
            .map_err(|e| AudioError::Engine(e.to_string()))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// espeak (Linux)
// ─────────────────────────────────────────────────────────────────────────────

const ESPEAK: &str = "espeak";

pub struct EspeakEngine {
    voice: &'static str,
    /// espeak amplitude, 0-200 (100 is espeak's default)
    amplitude: u16,
    child: Option<Child>,
}

impl EspeakEngine {
    /// Probe for the `espeak` binary and build an engine for `locale`
    pub fn new(locale: SpeechLocale, volume: u8) -> Result<Self, AudioError> {
        let status = Command::new(ESPEAK)
            .arg("--version")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map_err(|source| AudioError::Launch {
                program: ESPEAK,
                source,
            })?;

        if !status.success() {
            return Err(AudioError::Init(format!("{ESPEAK} exited with {status}")));
        }

        Ok(Self {
            voice: locale.voice(),
            amplitude: u16::from(volume.min(100)) * 2,
            child: None,
        })
    }
}

impl SpeechEngine for EspeakEngine {
    fn is_speaking(&mut self) -> bool {
        match self.child.as_mut() {
            Some(child) => matches!(child.try_wait(), Ok(None)),
            None => false,
        }
    }

    fn stop(&mut self) -> Result<(), AudioError> {
        let Some(mut child) = self.child.take() else {
            return Ok(());
        };
        if matches!(child.try_wait(), Ok(None)) {
            child.kill().map_err(|e| AudioError::Engine(e.to_string()))?;
        }
        // Reap so no zombie is left behind
        let _ = child.wait();
        Ok(())
    }

    fn speak(&mut self, text: &str) -> Result<(), AudioError> {
        self.stop()?;
        let amplitude = self.amplitude.to_string();
        let child = Command::new(ESPEAK)
            .args(["-v", self.voice, "-a", amplitude.as_str()])
            .arg(text)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| AudioError::Launch {
                program: ESPEAK,
                source,
            })?;
        self.child = Some(child);
        Ok(())
    }
}

impl Drop for EspeakEngine {
    fn drop(&mut self) {
        let _ = self.stop();
    }
}
