use clap::Parser;
use laptrack_core::AppConfig;

/// Process arguments. Flags override the stored configuration for this run.
#[derive(Parser, Debug, Default)]
#[command(version, about = "Overlapping lap timer with spoken lap times")]
pub struct Args {
    /// Do not speak completed lap times
    #[arg(long)]
    pub no_speech: bool,

    /// Display refresh period in milliseconds
    #[arg(long, value_name = "MS")]
    pub refresh_ms: Option<u64>,

    /// Number of completed laps shown in the history
    #[arg(long, value_name = "ROWS")]
    pub history_rows: Option<usize>,
}

impl Args {
    pub fn apply(&self, config: &mut AppConfig) {
        if self.no_speech {
            config.audio.enabled = false;
        }
        if let Some(ms) = self.refresh_ms {
            config.display.refresh_interval_ms = ms;
        }
        if let Some(rows) = self.history_rows {
            config.display.history_rows = rows;
        }
    }
}
