//! Interactive commands
//!
//! Each input line is either a lap hotkey (`+` / `-` by default) or a
//! command parsed with clap after shlex splitting.

use std::io::Write;

use clap::{Parser, Subcommand};
use laptrack_core::context::{AppConfig, AppConfigExt, HotkeySettings};
use laptrack_core::{LapController, format_lap_label};

#[derive(Parser)]
#[command(about = "laptrack commands", disable_version_flag = true)]
struct LineCli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Start a new lap
    Start,
    /// Stop the oldest running lap
    Stop,
    /// List completed laps, newest first
    Laps,
    /// List running laps
    Active,
    /// Show the configuration in use
    Config,
    /// Quit
    #[command(alias = "quit")]
    Exit,
}

/// Parse one input line. `Ok(None)` for a blank line.
pub fn parse_line(line: &str, hotkeys: &HotkeySettings) -> Result<Option<Command>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    if hotkeys.is_start(line) {
        return Ok(Some(Command::Start));
    }
    if hotkeys.is_stop(line) {
        return Ok(Some(Command::Stop));
    }

    let mut args = shlex::split(line).ok_or("error: Invalid quoting")?;
    args.insert(0, "laptrack".to_string());
    let cli = LineCli::try_parse_from(args).map_err(|e| e.to_string())?;
    Ok(Some(cli.command))
}

/// Run a parsed command. Returns true when the session should end.
pub fn execute(command: Command, controller: &mut LapController, config: &AppConfig) -> bool {
    match command {
        Command::Start => {
            controller.start_lap();
        }
        Command::Stop => stop_lap(controller),
        Command::Laps => list_laps(controller),
        Command::Active => list_active(controller),
        Command::Config => show_config(config),
        Command::Exit => {
            exit();
            return true;
        }
    }
    false
}

fn stop_lap(controller: &mut LapController) {
    if controller.stop_oldest().is_none() {
        println!("\nNo lap is running");
    }
}

pub fn list_laps(controller: &LapController) {
    let ledger = controller.ledger();
    if ledger.completed_count() == 0 {
        println!("\nNo laps recorded");
        return;
    }

    println!();
    for lap in ledger.completed() {
        println!("{}", lap.label());
    }
    println!("Total: {} laps", ledger.completed_count());
}

pub fn list_active(controller: &LapController) {
    let now = controller.now_ms();
    let ledger = controller.ledger();
    if ledger.is_idle() {
        println!("\nNo lap is running");
        return;
    }

    println!();
    for lap in ledger.active() {
        println!(
            "{}",
            format_lap_label(lap.lap_number, now.saturating_sub(lap.start_ms))
        );
    }
}

pub fn show_config(config: &AppConfig) {
    println!();
    match AppConfig::path() {
        Ok(path) => println!("Config file: {}", path.display()),
        Err(e) => println!("Config file: unavailable ({e})"),
    }
    println!("{config:#?}");
}

pub fn exit() {
    print!("\nquitting...\n");
    // Nothing useful to do if stdout is gone at this point
    let _ = std::io::stdout().flush();
}
