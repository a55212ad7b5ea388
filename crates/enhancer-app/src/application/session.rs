//! Sessions: run a screen against the ports, one frame at a time.
//!
//! A session owns its screen state and the port trait objects.  Each frame the
//! binary calls `step` with the polled input; the session asks the screen what
//! to do and carries out the returned commands.
//!
//! # Error policy
//!
//! Nothing here propagates an error to the caller.  A failed store write is
//! logged at `warn` level and kept as `last_error`, which the view shows as a
//! status line until the next storage operation succeeds.  Reads that fail
//! fall back to defaults.
//!
//! # Read before write
//!
//! The settings screen and the overlay may both be running.  Every persist
//! therefore loads the current file, changes only the keys this screen owns,
//! and writes the whole mapping back, so keys written by the other program
//! (or by a newer build) are never dropped.

use std::sync::Arc;

use enhancer_core::{KnownSettings, Settings, BATTERY_SAVER};
use tracing::{debug, info, warn};

use crate::application::input::InputFrame;
use crate::application::overlay::{OverlayCommand, OverlayMode, OverlayScreen, OverlayView};
use crate::application::ports::{
    BrightnessControl, DisplayScreen, PortError, PowerMonitor, SettingsRepository, SignalSink,
    SystemMonitor,
};
use crate::application::settings_screen::{
    ScreenCommand, ScreenOptions, SettingsScreen, SettingsView,
};

/// Whether the main loop should keep running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// The trait objects a session talks to.
#[derive(Clone)]
pub struct Ports {
    pub repository: Arc<dyn SettingsRepository>,
    pub signals: Arc<dyn SignalSink>,
    pub brightness: Arc<dyn BrightnessControl>,
    pub power: Arc<dyn PowerMonitor>,
    pub system: Arc<dyn SystemMonitor>,
}

/// Loads the stored settings, mutates them with `change`, and saves the
/// complete mapping back.
///
/// # Errors
///
/// Returns [`PortError`] if the load or the save fails.  When the load fails
/// nothing is written, so unreadable keys are never overwritten blindly.
pub fn update_settings(
    repository: &dyn SettingsRepository,
    change: impl FnOnce(&mut Settings) -> Result<(), PortError>,
) -> Result<(), PortError> {
    let mut settings = repository.load()?;
    change(&mut settings)?;
    repository.save(&settings)
}

fn apply_brightness(control: &dyn BrightnessControl, level: u8) {
    for screen in DisplayScreen::BOTH {
        control.set_brightness(screen, level);
    }
}

/// Remembers the most recent storage failure for display.
#[derive(Debug, Default)]
struct StatusLine {
    last_error: Option<String>,
}

impl StatusLine {
    fn record(&mut self, action: &str, result: Result<(), PortError>) {
        match result {
            Ok(()) => {
                debug!("{action} succeeded");
                self.last_error = None;
            }
            Err(e) => {
                warn!("{action} failed: {e}");
                self.last_error = Some(format!("{action} failed: {e}"));
            }
        }
    }
}

// ── Settings session ──────────────────────────────────────────────────────────

/// Runs the [`SettingsScreen`].
pub struct SettingsSession {
    screen: SettingsScreen,
    ports: Ports,
    status: StatusLine,
}

impl SettingsSession {
    /// Loads the persisted settings and applies the startup brightness.
    pub fn start(ports: Ports, options: ScreenOptions) -> Self {
        let mut status = StatusLine::default();
        let known = match ports.repository.load() {
            Ok(settings) => KnownSettings::from_settings(&settings),
            Err(e) => {
                status.record("loading settings", Err(e));
                KnownSettings::default()
            }
        };
        info!(
            battery_saver = known.battery_saver,
            brightness = known.brightness,
            "settings loaded"
        );

        let mut session = Self {
            screen: SettingsScreen::new(known, options),
            ports,
            status,
        };
        for command in session.screen.startup_commands() {
            session.execute(command);
        }
        session
    }

    pub fn screen(&self) -> &SettingsScreen {
        &self.screen
    }

    pub fn last_error(&self) -> Option<&str> {
        self.status.last_error.as_deref()
    }

    /// Processes one frame of input.
    pub fn step(&mut self, frame: &InputFrame) -> Flow {
        let mut flow = Flow::Continue;
        for command in self.screen.handle(frame) {
            if self.execute(command) == Flow::Exit {
                flow = Flow::Exit;
            }
        }
        flow
    }

    /// Builds the view for the current frame.
    pub fn view(&self) -> SettingsView {
        let mut view = self
            .screen
            .view(self.ports.power.battery_percent(), self.ports.system.stats());
        view.status = self.status.last_error.clone();
        view
    }

    fn execute(&mut self, command: ScreenCommand) -> Flow {
        match command {
            ScreenCommand::Exit => {
                info!("exit requested");
                return Flow::Exit;
            }
            ScreenCommand::Persist => {
                let known = self.screen.settings();
                let result = update_settings(self.ports.repository.as_ref(), |settings| {
                    known.write_into(settings);
                    Ok(())
                });
                self.status.record("saving settings", result);
            }
            ScreenCommand::ApplyBrightness(level) => {
                apply_brightness(self.ports.brightness.as_ref(), level);
            }
            ScreenCommand::Raise(signal) => {
                let result = self.ports.signals.raise(signal);
                self.status.record(&format!("raising {signal:?}"), result);
            }
            ScreenCommand::BackupConfig => {
                let result = self.ports.repository.backup();
                self.status.record("backing up config", result);
            }
        }
        Flow::Continue
    }
}

// ── Overlay session ───────────────────────────────────────────────────────────

/// Runs the [`OverlayScreen`].
pub struct OverlaySession {
    screen: OverlayScreen,
    ports: Ports,
    status: StatusLine,
}

impl OverlaySession {
    /// Reads the battery-saver flag and applies its brightness level.
    pub fn start(ports: Ports, mode: OverlayMode, options: ScreenOptions) -> Self {
        let mut status = StatusLine::default();
        let battery_saver = match ports.repository.load() {
            Ok(settings) => settings.get_bool(BATTERY_SAVER, false),
            Err(e) => {
                status.record("loading settings", Err(e));
                false
            }
        };
        info!(?mode, battery_saver, "overlay starting");

        let mut session = Self {
            screen: OverlayScreen::new(mode, battery_saver, options.policy),
            ports,
            status,
        };
        for command in session.screen.startup_commands() {
            session.execute(command);
        }
        session
    }

    pub fn screen(&self) -> &OverlayScreen {
        &self.screen
    }

    pub fn last_error(&self) -> Option<&str> {
        self.status.last_error.as_deref()
    }

    /// Processes one frame of input.
    ///
    /// In [`OverlayMode::Stats`] the saver flag is re-read from storage first,
    /// so a toggle made by the settings screen shows up on the next tick.
    pub fn step(&mut self, frame: &InputFrame) -> Flow {
        if self.screen.reloads_each_tick() {
            match self.ports.repository.load() {
                Ok(settings) => {
                    let current = self.screen.battery_saver();
                    self.screen
                        .sync_battery_saver(settings.get_bool(BATTERY_SAVER, current));
                }
                Err(e) => debug!("refresh read failed, keeping cached value: {e}"),
            }
        }

        let mut flow = Flow::Continue;
        for command in self.screen.handle(frame) {
            if self.execute(command) == Flow::Exit {
                flow = Flow::Exit;
            }
        }
        flow
    }

    /// Builds the view for the current frame.
    pub fn view(&self, elapsed_ms: u64) -> OverlayView {
        let mut view = self.screen.view(
            self.ports.power.battery_percent(),
            self.ports.system.stats(),
            elapsed_ms,
        );
        view.status = self.status.last_error.clone();
        view
    }

    fn execute(&mut self, command: OverlayCommand) -> Flow {
        match command {
            OverlayCommand::Exit => {
                info!("exit requested");
                return Flow::Exit;
            }
            OverlayCommand::ApplyBrightness(level) => {
                apply_brightness(self.ports.brightness.as_ref(), level);
            }
            OverlayCommand::PersistBatterySaver(value) => {
                let result = update_settings(self.ports.repository.as_ref(), |settings| {
                    settings.set(BATTERY_SAVER, value)?;
                    Ok(())
                });
                self.status.record("saving battery saver", result);
            }
        }
        Flow::Continue
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
