//! Text console used by the host binaries.
//!
//! Input is read from stdin one line per frame.  A line lists the buttons
//! pressed in that frame by name, separated by whitespace:
//!
//! ```text
//! left
//! a
//! select start
//! ```
//!
//! An empty line is an idle frame; end of input ends the loop.  Output is
//! plain text rendered from the view models, so the same views a console
//! renderer would draw can be inspected in a terminal.

use std::io::{self, BufRead};

use tracing::warn;

use crate::application::input::{Buttons, InputFrame};
use crate::application::overlay::OverlayView;
use crate::application::ports::InputSource;
use crate::application::settings_screen::{bytes_label, on_off, SettingsView};

/// ANSI sequence that clears the terminal and homes the cursor.
pub const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

const SLIDER_WIDTH: usize = 20;

// ── Input ─────────────────────────────────────────────────────────────────────

/// [`InputSource`] reading button names from a line-based reader.
pub struct StdinInput<R> {
    reader: R,
    line: String,
}

impl StdinInput<io::StdinLock<'static>> {
    /// Reads from the process's standard input.
    pub fn stdin() -> Self {
        Self::new(io::stdin().lock())
    }
}

impl<R: BufRead> StdinInput<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: String::new(),
        }
    }
}

/// Builds the frame for one input line.  Unknown names are logged and
/// ignored.
pub fn parse_frame(line: &str) -> InputFrame {
    let mut buttons = Buttons::NONE;
    for name in line.split_whitespace() {
        match Buttons::mask_for_name(&name.to_ascii_lowercase()) {
            Some(mask) => buttons = buttons.with(mask),
            None => warn!("unknown button {name:?}"),
        }
    }
    InputFrame {
        pressed: buttons,
        held: buttons,
    }
}

impl<R: BufRead> InputSource for StdinInput<R> {
    fn poll(&mut self) -> Option<InputFrame> {
        self.line.clear();
        match self.reader.read_line(&mut self.line) {
            Ok(0) => None,
            Ok(_) => Some(parse_frame(&self.line)),
            Err(e) => {
                warn!("input read failed, ending loop: {e}");
                None
            }
        }
    }
}

// ── Rendering ─────────────────────────────────────────────────────────────────

/// `[#####---------------]  25%`
pub fn slider_bar(value: u8) -> String {
    let value = value.min(100);
    let filled = usize::from(value) * SLIDER_WIDTH / 100;
    format!(
        "[{}{}] {value:>3}%",
        "#".repeat(filled),
        "-".repeat(SLIDER_WIDTH - filled)
    )
}

fn push_line(out: &mut String, text: impl AsRef<str>) {
    out.push_str(text.as_ref());
    out.push('\n');
}

pub fn render_settings(view: &SettingsView) -> String {
    let mut out = String::new();
    push_line(&mut out, view.title);
    push_line(&mut out, &view.page_label);
    out.push('\n');
    push_line(&mut out, view.heading);
    for (index, line) in view.lines.iter().enumerate() {
        let marker = if index == view.cursor { '>' } else { ' ' };
        push_line(&mut out, format!("{marker} {line}"));
    }
    if let Some(value) = view.slider {
        push_line(&mut out, format!("  {}", slider_bar(value)));
    }
    if let Some(help) = &view.help {
        out.push('\n');
        for line in help {
            push_line(&mut out, format!("  {line}"));
        }
    }
    if let Some(status) = &view.status {
        out.push('\n');
        push_line(&mut out, format!("! {status}"));
    }
    out
}

pub fn render_overlay(view: &OverlayView) -> String {
    let mut out = String::new();
    push_line(&mut out, format!("Battery: {}%", view.battery_percent));
    push_line(&mut out, format!("Battery Saver: {}", on_off(view.battery_saver)));
    if let Some(stats) = view.stats {
        push_line(&mut out, format!("Free mem: {}", bytes_label(stats.free_memory_bytes)));
        push_line(&mut out, format!("SD free: {}", bytes_label(stats.free_storage_bytes)));
    }
    if let Some(bar) = view.bar {
        let percent = (bar.fill * 100.0).round() as u8;
        push_line(&mut out, format!("{} ({})", slider_bar(percent), bar.band.label()));
        if view.battery_saver {
            push_line(&mut out, "[SAVER]");
        }
    }
    if let Some(alpha) = view.pulse_alpha {
        let strip = if alpha == u8::MAX { "!!! LOW BATTERY !!!" } else { "    LOW BATTERY    " };
        push_line(&mut out, strip);
    }
    push_line(&mut out, view.hint);
    if let Some(status) = &view.status {
        push_line(&mut out, format!("! {status}"));
    }
    out
}
