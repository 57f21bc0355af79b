mod config;
mod error;

pub use config::{AppConfig, AppConfigExt, AudioSettings, DisplaySettings, HotkeySettings};
pub use error::ConfigError;
