//! Shared configuration types for laptrack
//!
//! This crate contains the serializable configuration types shared between
//! the timing core (laptrack-core) and the terminal front-end (laptrack-cli).

use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// Audio Settings
// ─────────────────────────────────────────────────────────────────────────────

/// Spoken lap readout settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioSettings {
    /// Master enable for lap announcements
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Volume level (0-100)
    #[serde(default = "default_audio_volume")]
    pub volume: u8,
}

fn default_true() -> bool {
    true
}

fn default_audio_volume() -> u8 {
    80
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            volume: 80,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Hotkey Settings
// ─────────────────────────────────────────────────────────────────────────────

/// Single-key aliases for the two lap actions.
///
/// Each entry is matched against a whole input line, so `"+"` fires on a
/// line containing only `+`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HotkeySettings {
    #[serde(default = "default_start_keys")]
    pub start_lap: Vec<String>,

    #[serde(default = "default_stop_keys")]
    pub stop_lap: Vec<String>,
}

fn default_start_keys() -> Vec<String> {
    vec!["+".to_string()]
}

fn default_stop_keys() -> Vec<String> {
    vec!["-".to_string()]
}

impl Default for HotkeySettings {
    fn default() -> Self {
        Self {
            start_lap: default_start_keys(),
            stop_lap: default_stop_keys(),
        }
    }
}

impl HotkeySettings {
    pub fn is_start(&self, input: &str) -> bool {
        self.start_lap.iter().any(|k| k == input)
    }

    pub fn is_stop(&self, input: &str) -> bool {
        self.stop_lap.iter().any(|k| k == input)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Display Settings
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplaySettings {
    /// Refresh period of the running timer display
    #[serde(default = "default_refresh_interval_ms")]
    pub refresh_interval_ms: u64,

    /// Number of completed laps visible in the history viewport
    #[serde(default = "default_history_rows")]
    pub history_rows: usize,
}

fn default_refresh_interval_ms() -> u64 {
    10
}

fn default_history_rows() -> usize {
    10
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            refresh_interval_ms: default_refresh_interval_ms(),
            history_rows: default_history_rows(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// App Config
// ─────────────────────────────────────────────────────────────────────────────

/// Top-level application configuration.
///
/// Persistence (load/save) is provided by laptrack-core via the
/// `AppConfigExt` trait.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub audio: AudioSettings,
    #[serde(default)]
    pub hotkeys: HotkeySettings,
    #[serde(default)]
    pub display: DisplaySettings,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.display.refresh_interval_ms, 10);
        assert!(config.audio.enabled);
    }

    #[test]
    fn partial_section_keeps_other_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [audio]
            volume = 40

            [hotkeys]
            stop_lap = ["-", "s"]
            "#,
        )
        .unwrap();

        assert!(config.audio.enabled);
        assert_eq!(config.audio.volume, 40);
        assert_eq!(config.hotkeys.start_lap, vec!["+".to_string()]);
        assert!(config.hotkeys.is_stop("s"));
        assert!(!config.hotkeys.is_start("s"));
    }
}
