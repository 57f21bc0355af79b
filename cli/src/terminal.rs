//! Terminal output surfaces
//!
//! The running timer lives on a single status line that is rewritten in
//! place. The lap history is a fixed-height block printed above it, newest
//! lap first. Anything printed over the status line puts it back afterwards
//! through the shared `StatusLine`.

use std::cell::RefCell;
use std::io::Write;
use std::rc::Rc;

use laptrack_core::{DisplaySurface, HistoryView};

/// Clear the current line and return the cursor to column 0
const CLEAR_LINE: &str = "\r\x1b[2K";

/// Text currently on the status line, shared by every writer on the terminal
#[derive(Clone, Default)]
pub struct StatusLine(Rc<RefCell<String>>);

impl StatusLine {
    pub fn text(&self) -> String {
        self.0.borrow().clone()
    }

    /// Record `text` as the current status. False when it was already shown.
    fn replace(&self, text: &str) -> bool {
        let mut current = self.0.borrow_mut();
        if *current == text {
            return false;
        }
        current.clear();
        current.push_str(text);
        true
    }

    /// Draw the status line again after other output scrolled it away.
    /// The cursor must be at the start of an empty line.
    pub fn restore(&self, out: &mut impl Write) -> std::io::Result<()> {
        write!(out, "{CLEAR_LINE}{}", self.0.borrow())?;
        out.flush()
    }
}

/// Status line showing the current lap label
pub struct TerminalDisplay<W: Write> {
    out: W,
    status: StatusLine,
}

impl TerminalDisplay<std::io::Stdout> {
    pub fn stdout(status: StatusLine) -> Self {
        Self::new(std::io::stdout(), status)
    }
}

impl<W: Write> TerminalDisplay<W> {
    pub fn new(out: W, status: StatusLine) -> Self {
        Self { out, status }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> DisplaySurface for TerminalDisplay<W> {
    fn show(&mut self, text: &str) {
        // Ticks arrive far faster than the millisecond field changes
        if !self.status.replace(text) {
            return;
        }

        let result = write!(self.out, "{CLEAR_LINE}{text}").and_then(|_| self.out.flush());
        if let Err(e) = result {
            tracing::debug!(error = %e, "Failed to draw status line");
        }
    }
}

/// Completed lap list, newest first, showing at most `rows` entries
pub struct TerminalHistory<W: Write> {
    out: W,
    rows: usize,
    labels: Vec<String>,
    status: StatusLine,
}

impl TerminalHistory<std::io::Stdout> {
    pub fn stdout(rows: usize, status: StatusLine) -> Self {
        Self::new(std::io::stdout(), rows, status)
    }
}

impl<W: Write> TerminalHistory<W> {
    pub fn new(out: W, rows: usize, status: StatusLine) -> Self {
        Self {
            out,
            rows: rows.max(1),
            labels: Vec::new(),
            status,
        }
    }

    /// Labels currently shown
    pub fn visible(&self) -> &[String] {
        &self.labels[..self.rows.min(self.labels.len())]
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn draw(&mut self) -> std::io::Result<()> {
        let hidden = self.labels.len().saturating_sub(self.rows);
        let mut block = format!("{CLEAR_LINE}── Laps ──\n");
        for label in self.visible() {
            block.push_str(label);
            block.push('\n');
        }
        if hidden > 0 {
            block.push_str(&format!("   … {hidden} more\n"));
        }
        self.out.write_all(block.as_bytes())?;
        // The block overwrote the status line
        self.status.restore(&mut self.out)
    }
}

impl<W: Write> HistoryView for TerminalHistory<W> {
    fn item_inserted(&mut self, index: usize, label: &str) {
        let index = index.min(self.labels.len());
        self.labels.insert(index, label.to_string());
    }

    fn scroll_to_top(&mut self) {
        if let Err(e) = self.draw() {
            tracing::debug!(error = %e, "Failed to draw lap history");
        }
    }
}

#[cfg(test)]
mod tests {
    use laptrack_core::{LapController, ManualClock, RefreshTick, SpeechAnnouncer, TickScheduler};

    use super::*;

    /// Writer whose clones append to the same buffer, like two handles on stdout
    #[derive(Clone, Default)]
    struct SharedBuf(Rc<RefCell<Vec<u8>>>);

    impl SharedBuf {
        fn contents(&self) -> String {
            String::from_utf8(self.0.borrow().clone()).unwrap()
        }
    }

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.borrow_mut().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[derive(Default)]
    struct ManualScheduler {
        running: bool,
        generation: u64,
    }

    impl TickScheduler for ManualScheduler {
        fn start(&mut self) -> u64 {
            self.running = true;
            self.generation += 1;
            self.generation
        }

        fn cancel(&mut self) {
            self.running = false;
        }

        fn is_running(&self) -> bool {
            self.running
        }

        fn is_current(&self, tick: RefreshTick) -> bool {
            self.running && tick.generation == self.generation
        }
    }

    #[test]
    fn display_skips_unchanged_text() {
        let mut display = TerminalDisplay::new(Vec::new(), StatusLine::default());
        display.show("[Lap 1] 0:00.010");
        display.show("[Lap 1] 0:00.010");
        display.show("[Lap 1] 0:00.020");

        let out = String::from_utf8(display.into_inner()).unwrap();
        assert_eq!(out.matches("[Lap 1]").count(), 2);
        assert!(out.ends_with("[Lap 1] 0:00.020"));
    }

    #[test]
    fn history_shows_newest_first_within_rows() {
        let status = StatusLine::default();
        let mut history = TerminalHistory::new(Vec::new(), 2, status);
        for label in ["[Lap 1] 0:01.000", "[Lap 2] 0:02.000", "[Lap 3] 0:03.000"] {
            history.item_inserted(0, label);
            history.scroll_to_top();
        }

        assert_eq!(
            history.visible(),
            &["[Lap 3] 0:03.000".to_string(), "[Lap 2] 0:02.000".to_string()]
        );

        let out = String::from_utf8(history.into_inner()).unwrap();
        assert!(out.ends_with("[Lap 3] 0:03.000\n[Lap 2] 0:02.000\n   … 1 more\n\r\x1b[2K"));
    }

    #[test]
    fn history_block_redraws_status_line() {
        let buf = SharedBuf::default();
        let status = StatusLine::default();
        let mut display = TerminalDisplay::new(buf.clone(), status.clone());
        let mut history = TerminalHistory::new(buf.clone(), 5, status);

        display.show("[Lap 2] 0:01.500");
        history.item_inserted(0, "[Lap 1] 0:04.000");
        history.scroll_to_top();

        let out = buf.contents();
        let after_block = out.rsplit("── Laps ──\n").next().unwrap();
        assert_eq!(after_block, "[Lap 1] 0:04.000\n\r\x1b[2K[Lap 2] 0:01.500");
    }

    #[test]
    fn final_stop_in_same_millisecond_as_last_tick_keeps_label() {
        let buf = SharedBuf::default();
        let status = StatusLine::default();
        let clock = ManualClock::new(0);
        let mut controller = LapController::new(
            Box::new(clock.clone()),
            Box::new(ManualScheduler::default()),
            Box::new(TerminalDisplay::new(buf.clone(), status.clone())),
            Box::new(TerminalHistory::new(buf.clone(), 5, status.clone())),
            SpeechAnnouncer::silent(),
        );

        controller.start_lap();
        clock.set(5_000);
        controller.on_tick(RefreshTick { generation: 1 });
        controller.stop_oldest();

        let out = buf.contents();
        let after_block = out.rsplit("── Laps ──\n").next().unwrap();
        assert!(after_block.ends_with("[Lap 1] 0:05.000"));
        assert!(!after_block.ends_with('\n'));
        assert_eq!(status.text(), "[Lap 1] 0:05.000");
    }

    #[test]
    fn restore_after_command_output() {
        let status = StatusLine::default();
        let mut display = TerminalDisplay::new(Vec::new(), status.clone());
        display.show("[Lap 3] 0:07.250");

        let mut out = Vec::new();
        writeln!(out, "No laps recorded").unwrap();
        status.restore(&mut out).unwrap();

        let out = String::from_utf8(out).unwrap();
        assert_eq!(out, "No laps recorded\n\r\x1b[2K[Lap 3] 0:07.250");
    }
}
