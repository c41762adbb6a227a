use std::io::Write as _;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use rag_console_core::{Pane, Surface};

const BAR_CHAR: &str = "▎";

/// A surface that prints panes to the terminal and shows a spinner for
/// busy panes.
pub struct TerminalSurface {
    spinner: Mutex<Option<ProgressBar>>,
    style: ProgressStyle,
}

impl TerminalSurface {
    /// Creates a new terminal surface.
    pub fn new() -> Self {
        let style = ProgressStyle::with_template("{spinner} {wide_msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏");
        Self {
            spinner: Mutex::new(None),
            style,
        }
    }

    fn spinner(&self) -> MutexGuard<'_, Option<ProgressBar>> {
        self.spinner.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn finish_spinner(&self) {
        // Finish the spinner before printing anything else.
        if let Some(spinner) = self.spinner().take() {
            spinner.finish_and_clear();
        }
    }
}

impl Default for TerminalSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl Surface for TerminalSurface {
    fn set_text(&self, pane: Pane, text: &str) {
        self.finish_spinner();
        if text.is_empty() {
            return;
        }

        let mut stdout = std::io::stdout().lock();
        if pane == Pane::Status {
            writeln!(stdout, "{}", text.bold()).ok();
            return;
        }
        let bar = match pane {
            Pane::Result => BAR_CHAR.bright_cyan().to_string(),
            Pane::Citations => BAR_CHAR.bright_magenta().to_string(),
            Pane::Graphql => BAR_CHAR.bright_blue().to_string(),
            Pane::Records | Pane::Status => BAR_CHAR.bright_black().to_string(),
        };
        for line in text.lines() {
            writeln!(stdout, "{bar}{}", line.bright_white()).ok();
        }
        writeln!(stdout).ok();
    }

    fn set_busy(&self, _pane: Pane, message: &str) {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(self.style.clone());
        spinner.set_message(message.to_owned());
        spinner.enable_steady_tick(Duration::from_millis(100));
        if let Some(previous) = self.spinner().replace(spinner) {
            previous.finish_and_clear();
        }
    }
}
