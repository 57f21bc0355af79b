//! Log setup for the `laptrack` binary
//!
//! Stdout belongs to the timer display, so records go to a size-rotated file
//! under the platform config directory (`laptrack/laptrack.log`). Setting
//! `DEBUG_LOGGING` adds a stderr copy and raises laptrack's own crates to
//! DEBUG.

use std::path::{Path, PathBuf};

use rolling_file::{BasicRollingFileAppender, RollingConditionBasic};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const LOG_FILE: &str = "laptrack.log";
const MAX_LOG_BYTES: u64 = 10 * 1024 * 1024;
/// laptrack.log plus one rotated laptrack.log.1
const KEPT_ROTATIONS: usize = 1;
const DEBUG_FILTER: &str = "info,laptrack=debug,laptrack_core=debug,laptrack_cli=debug";

/// Install the global subscriber.
///
/// Keep the returned guard alive until exit; dropping it flushes the file
/// writer. `None` means the log file could not be opened and only stderr
/// (WARN+, or DEBUG with `DEBUG_LOGGING`) is logged.
pub fn init() -> Option<WorkerGuard> {
    let debug_logging = std::env::var("DEBUG_LOGGING").is_ok();

    let (appender, log_path) = match log_dir().and_then(|dir| open_appender(&dir)) {
        Ok(appender) => appender,
        Err(reason) => {
            // No subscriber yet, so this is the only place the reason can go
            eprintln!("laptrack: {reason}; logging to stderr only");
            init_stderr_only(debug_logging);
            return None;
        }
    };
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let file_layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true);
    let stderr_layer = debug_logging.then(|| fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(file_layer)
        .with(stderr_layer)
        .with(filter(debug_logging, "info"))
        .init();

    tracing::info!(log_file = ?log_path, debug_logging, "Logging started");
    Some(guard)
}

fn log_dir() -> Result<PathBuf, String> {
    let dir = dirs::config_dir()
        .ok_or("no config directory on this platform")?
        .join("laptrack");
    std::fs::create_dir_all(&dir)
        .map_err(|e| format!("cannot create log directory {}: {e}", dir.display()))?;
    Ok(dir)
}

fn open_appender(dir: &Path) -> Result<(BasicRollingFileAppender, PathBuf), String> {
    let path = dir.join(LOG_FILE);
    let condition = RollingConditionBasic::new().max_size(MAX_LOG_BYTES);
    BasicRollingFileAppender::new(&path, condition, KEPT_ROTATIONS)
        .map(|appender| (appender, path.clone()))
        .map_err(|e| format!("cannot open log file {}: {e}", path.display()))
}

fn filter(debug_logging: bool, default: &str) -> EnvFilter {
    EnvFilter::new(if debug_logging { DEBUG_FILTER } else { default })
}

fn init_stderr_only(debug_logging: bool) {
    // The display shares the terminal, so only problems get through
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter(debug_logging, "warn"))
        .init();
}
