//! SettingsScreen: the five-page "Enhanced Settings" menu.
//!
//! All screen state lives in one [`SettingsScreen`] value owned by the
//! session, and the per-frame update is a pure function of that state and the
//! buttons pressed.  The update never touches storage or hardware; it returns
//! [`ScreenCommand`]s that the session carries out.
//!
//! # Pages
//!
//! ```text
//!   Main ⇄ Display ⇄ Power ⇄ Performance ⇄ Advanced ⇄ (back to Main)
//! ```
//!
//! | Page          | A button                               | Other                     |
//! |---------------|----------------------------------------|---------------------------|
//! | `Main`        | open Display                           | Y: request overlay launch |
//! | `Display`     | save                                   | Left/Right: brightness    |
//! | `Power`       | toggle battery saver, apply, save      |                           |
//! | `Performance` | raise the perf-log flag                |                           |
//! | `Advanced`    | back up the config file                |                           |
//!
//! On every page: START exits, L saves, SELECT toggles help, B returns to
//! Main, Up/Down move the cursor.  Left/Right change page everywhere except
//! on Display, where they adjust brightness instead.

use enhancer_core::{step_brightness, BrightnessPolicy, KnownSettings};

use crate::application::input::{Buttons, InputFrame};
use crate::application::ports::{Signal, SystemStats};

/// Highest cursor position on any page.
pub const MAX_CURSOR: usize = 5;

/// Brightness change per Left/Right press on the Display page.
pub const DEFAULT_BRIGHTNESS_STEP: u8 = 10;

/// One page of the settings menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    Main,
    Display,
    Power,
    Performance,
    Advanced,
}

impl Page {
    pub const ALL: [Page; 5] = [
        Page::Main,
        Page::Display,
        Page::Power,
        Page::Performance,
        Page::Advanced,
    ];

    fn index(self) -> usize {
        Self::ALL.iter().position(|p| *p == self).unwrap_or(0)
    }

    /// The page to the right, wrapping from Advanced to Main.
    pub fn next(self) -> Page {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    /// The page to the left, wrapping from Main to Advanced.
    pub fn previous(self) -> Page {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    pub fn name(self) -> &'static str {
        match self {
            Page::Main => "Main",
            Page::Display => "Display",
            Page::Power => "Power",
            Page::Performance => "Performance",
            Page::Advanced => "Advanced",
        }
    }
}

/// Side effect requested by [`SettingsScreen::handle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenCommand {
    /// Leave the application.
    Exit,
    /// Write the current [`KnownSettings`] to storage.
    Persist,
    /// Set both screens to this brightness level.
    ApplyBrightness(u8),
    /// Raise a cross-process flag.
    Raise(Signal),
    /// Copy the config file to its backup location.
    BackupConfig,
}

/// Tunables taken from the launcher configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenOptions {
    pub brightness_step: u8,
    pub policy: BrightnessPolicy,
}

impl Default for ScreenOptions {
    fn default() -> Self {
        Self {
            brightness_step: DEFAULT_BRIGHTNESS_STEP,
            policy: BrightnessPolicy::default(),
        }
    }
}

/// Everything a renderer needs to draw one frame of the settings menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsView {
    pub title: &'static str,
    pub page_label: String,
    pub heading: &'static str,
    pub lines: Vec<String>,
    /// Value (0–100) of the page's slider, if it has one.
    pub slider: Option<u8>,
    pub cursor: usize,
    pub help: Option<Vec<&'static str>>,
    /// Last storage failure, shown until the next successful write.
    pub status: Option<String>,
}

const HELP_LINES: [&str; 7] = [
    "START: exit",
    "SELECT: show/hide this help",
    "Left/Right: change page (Display: brightness)",
    "Up/Down: move cursor",
    "A: activate",
    "B: back to Main",
    "L: quick save",
];

/// State of the settings menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsScreen {
    page: Page,
    cursor: usize,
    show_help: bool,
    settings: KnownSettings,
    options: ScreenOptions,
}

impl SettingsScreen {
    /// Creates the menu on the Main page with the given persisted settings.
    pub fn new(settings: KnownSettings, options: ScreenOptions) -> Self {
        Self {
            page: Page::Main,
            cursor: 0,
            show_help: false,
            settings,
            options,
        }
    }

    pub fn page(&self) -> Page {
        self.page
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn show_help(&self) -> bool {
        self.show_help
    }

    pub fn settings(&self) -> KnownSettings {
        self.settings
    }

    /// Brightness levels to apply at startup: the battery-saver policy level
    /// first, then the stored brightness, which takes precedence.
    pub fn startup_commands(&self) -> Vec<ScreenCommand> {
        vec![
            ScreenCommand::ApplyBrightness(
                self.options.policy.level_for(self.settings.battery_saver),
            ),
            ScreenCommand::ApplyBrightness(self.settings.brightness),
        ]
    }

    /// Processes one frame of input and returns the side effects to perform.
    ///
    /// START short-circuits: when it is pressed nothing else in the frame is
    /// processed.  Page actions run only when the page did not change during
    /// the same frame, so one press never acts on two pages.
    pub fn handle(&mut self, frame: &InputFrame) -> Vec<ScreenCommand> {
        let pressed = frame.pressed;
        if pressed.contains(Buttons::START) {
            return vec![ScreenCommand::Exit];
        }

        let mut commands = Vec::new();

        if pressed.contains(Buttons::L) {
            push_unique(&mut commands, ScreenCommand::Persist);
        }
        if pressed.contains(Buttons::SELECT) {
            self.show_help = !self.show_help;
        }

        let page_before = self.page;
        if pressed.contains(Buttons::B) && self.page != Page::Main {
            self.go_to(Page::Main);
        } else if self.page != Page::Display {
            if pressed.contains(Buttons::RIGHT) {
                self.go_to(self.page.next());
            } else if pressed.contains(Buttons::LEFT) {
                self.go_to(self.page.previous());
            }
        }

        if pressed.contains(Buttons::DOWN) {
            self.cursor = (self.cursor + 1).min(MAX_CURSOR);
        } else if pressed.contains(Buttons::UP) {
            self.cursor = self.cursor.saturating_sub(1);
        }

        if self.page == page_before {
            self.page_action(pressed, &mut commands);
        }
        commands
    }

    fn page_action(&mut self, pressed: Buttons, commands: &mut Vec<ScreenCommand>) {
        match self.page {
            Page::Main => {
                if pressed.contains(Buttons::A) {
                    self.go_to(Page::Display);
                }
                if pressed.contains(Buttons::Y) {
                    commands.push(ScreenCommand::Raise(Signal::LaunchOverlay));
                }
            }
            Page::Display => {
                let step = i16::from(self.options.brightness_step);
                let delta = if pressed.contains(Buttons::LEFT) {
                    -step
                } else if pressed.contains(Buttons::RIGHT) {
                    step
                } else {
                    0
                };
                if delta != 0 {
                    self.settings.brightness = step_brightness(self.settings.brightness, delta);
                    commands.push(ScreenCommand::ApplyBrightness(self.settings.brightness));
                }
                if pressed.contains(Buttons::A) {
                    push_unique(commands, ScreenCommand::Persist);
                }
            }
            Page::Power => {
                if pressed.contains(Buttons::A) {
                    self.settings.battery_saver = !self.settings.battery_saver;
                    commands.push(ScreenCommand::ApplyBrightness(
                        self.options.policy.level_for(self.settings.battery_saver),
                    ));
                    push_unique(commands, ScreenCommand::Persist);
                }
            }
            Page::Performance => {
                if pressed.contains(Buttons::A) {
                    commands.push(ScreenCommand::Raise(Signal::PerfLog));
                }
            }
            Page::Advanced => {
                if pressed.contains(Buttons::A) {
                    commands.push(ScreenCommand::BackupConfig);
                }
            }
        }
    }

    fn go_to(&mut self, page: Page) {
        self.page = page;
        self.cursor = 0;
    }

    /// Builds the view model for the current page.
    pub fn view(&self, battery_percent: u8, stats: SystemStats) -> SettingsView {
        let saver = on_off(self.settings.battery_saver);
        let (heading, lines, slider) = match self.page {
            Page::Main => (
                "Overview",
                vec![
                    format!("Battery: {battery_percent}%"),
                    format!("Battery Saver: {saver}"),
                    format!(
                        "Brightness: {}% (Left/Right to adjust on Display page)",
                        self.settings.brightness
                    ),
                    "Press Y to request overlay launch, A to go to Display.".to_string(),
                ],
                None,
            ),
            Page::Display => (
                "Display Settings",
                vec!["Brightness (Left/Right to change, A to save)".to_string()],
                Some(self.settings.brightness),
            ),
            Page::Power => (
                "Power & Battery",
                vec![format!("Battery Saver: {saver} (A to toggle)")],
                Some(battery_percent.min(100)),
            ),
            Page::Performance => (
                "Performance",
                vec![
                    format!("Free mem: {}", bytes_label(stats.free_memory_bytes)),
                    format!("SD free: {}", bytes_label(stats.free_storage_bytes)),
                    "Press A to mark perf logging flag".to_string(),
                ],
                None,
            ),
            Page::Advanced => (
                "Advanced",
                vec![
                    "A: Backup config to config_backup.txt".to_string(),
                    "L: Quick save to config (writes now)".to_string(),
                ],
                None,
            ),
        };

        let hint = if self.page == Page::Display {
            "(B to go back)"
        } else {
            "(Left/Right to change)"
        };

        SettingsView {
            title: "Enhanced Settings",
            page_label: format!("[{}]  {hint}", self.page.name()),
            heading,
            lines,
            slider,
            cursor: self.cursor,
            help: self.show_help.then(|| HELP_LINES.to_vec()),
            status: None,
        }
    }
}

fn push_unique(commands: &mut Vec<ScreenCommand>, command: ScreenCommand) {
    if !commands.contains(&command) {
        commands.push(command);
    }
}

pub(crate) fn on_off(value: bool) -> &'static str {
    if value {
        "ON"
    } else {
        "OFF"
    }
}

pub(crate) fn bytes_label(bytes: Option<u64>) -> String {
    match bytes {
        Some(n) => format!("{n} bytes"),
        None => "unknown".to_string(),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
