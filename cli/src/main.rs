use std::io::Write;
use std::time::Duration;

use clap::Parser;
use laptrack_cli::commands;
use laptrack_cli::terminal::{StatusLine, TerminalDisplay, TerminalHistory};
use laptrack_cli::{Args, logging};
use laptrack_core::{
    AppConfig, AppConfigExt, AudioService, LapController, RefreshLoop, SpeechAnnouncer,
    SpeechLocale, SpeechReadiness, SystemClock,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::oneshot;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), String> {
    let args = Args::parse();
    let _log_guard = logging::init();

    let mut config = AppConfig::load();
    args.apply(&mut config);

    let locale = SpeechLocale::detect();
    let (announcer, audio, mut ready) = match AudioService::spawn(config.audio.clone(), locale) {
        Ok((handle, ready)) => (
            SpeechAnnouncer::new(handle.sender.clone(), locale),
            Some(handle),
            ready,
        ),
        Err(e) => {
            let (tx, ready) = oneshot::channel();
            let _ = tx.send(SpeechReadiness::Unavailable(e.to_string()));
            (SpeechAnnouncer::silent(), None, ready)
        }
    };

    let (refresh, mut ticks) =
        RefreshLoop::new(Duration::from_millis(config.display.refresh_interval_ms));

    println!(
        "laptrack: '{}' or 'start' begins a lap, '{}' or 'stop' ends the oldest, 'exit' quits",
        config.hotkeys.start_lap.join("/"),
        config.hotkeys.stop_lap.join("/"),
    );

    let status = StatusLine::default();
    let mut controller = LapController::new(
        Box::new(SystemClock::new()),
        Box::new(refresh),
        Box::new(TerminalDisplay::stdout(status.clone())),
        Box::new(TerminalHistory::stdout(
            config.display.history_rows,
            status.clone(),
        )),
        announcer,
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut ready_seen = false;

    loop {
        tokio::select! {
            readiness = &mut ready, if !ready_seen => {
                ready_seen = true;
                report_readiness(readiness.ok());
            }
            Some(tick) = ticks.recv() => controller.on_tick(tick),
            line = lines.next_line() => {
                let line = match line {
                    Ok(Some(line)) => line,
                    Ok(None) => break,
                    Err(e) => {
                        tracing::error!(error = %e, "Failed to read input");
                        break;
                    }
                };
                if respond(&line, &mut controller, &config)? {
                    break;
                }
                // Command output and the echoed input scrolled the timer away
                status
                    .restore(&mut std::io::stdout())
                    .map_err(|e| e.to_string())?;
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    controller.shutdown();
    drop(controller);
    if let Some(audio) = audio {
        audio.join();
    }

    Ok(())
}

/// Handle one input line. Returns true to quit.
fn respond(line: &str, controller: &mut LapController, config: &AppConfig) -> Result<bool, String> {
    match commands::parse_line(line, &config.hotkeys) {
        Ok(Some(command)) => Ok(commands::execute(command, controller, config)),
        Ok(None) => Ok(false),
        Err(err) => {
            let mut stdout = std::io::stdout();
            writeln!(stdout, "\n{}", err.trim_end()).map_err(|e| e.to_string())?;
            stdout.flush().map_err(|e| e.to_string())?;
            Ok(false)
        }
    }
}

fn report_readiness(readiness: Option<SpeechReadiness>) {
    match readiness {
        Some(SpeechReadiness::Ready) => tracing::info!("Speech engine ready"),
        Some(SpeechReadiness::Disabled) => tracing::info!("Speech disabled"),
        Some(SpeechReadiness::Unavailable(reason)) => {
            tracing::warn!(%reason, "Speech unavailable, lap times will not be spoken")
        }
        None => tracing::warn!("Audio service exited before initializing"),
    }
}
