//! Mock ports for unit and integration testing.
//!
//! Each mock records what the application asked of it so tests can assert on
//! the calls afterwards.  [`MockRepository`] keeps the "file" as text, which
//! lets a test replace it mid-session to simulate another program writing
//! the config.

use std::collections::VecDeque;
use std::sync::{
    atomic::{AtomicBool, AtomicU32, Ordering},
    Arc, Mutex,
};

use enhancer_core::{encode_settings, ConfigDocument, Settings};

use crate::application::input::InputFrame;
use crate::application::ports::{
    BrightnessControl, DisplayScreen, InputSource, PortError, PowerMonitor, SettingsRepository,
    Signal, SignalSink, SystemMonitor, SystemStats,
};
use crate::application::session::Ports;

// ── Repository ────────────────────────────────────────────────────────────────

/// In-memory [`SettingsRepository`] backed by config-file text.
#[derive(Default)]
pub struct MockRepository {
    text: Mutex<String>,
    fail_loads: AtomicBool,
    fail_saves: AtomicBool,
    saves: AtomicU32,
    backups: AtomicU32,
}

impl MockRepository {
    pub fn with_file(text: &str) -> Self {
        let repository = Self::default();
        repository.replace_file(text);
        repository
    }

    /// Overwrites the stored text, as another program would.
    pub fn replace_file(&self, text: &str) {
        *self.text.lock().expect("lock poisoned") = text.to_string();
    }

    /// Raw text of the stored "file".
    pub fn file_text(&self) -> String {
        self.text.lock().expect("lock poisoned").clone()
    }

    /// The stored settings, parsed.
    pub fn stored(&self) -> Settings {
        ConfigDocument::parse(&self.file_text()).to_settings()
    }

    pub fn fail_loads(&self, fail: bool) {
        self.fail_loads.store(fail, Ordering::SeqCst);
    }

    pub fn fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }

    pub fn save_count(&self) -> u32 {
        self.saves.load(Ordering::SeqCst)
    }

    pub fn backup_count(&self) -> u32 {
        self.backups.load(Ordering::SeqCst)
    }
}

impl SettingsRepository for MockRepository {
    fn load(&self) -> Result<Settings, PortError> {
        if self.fail_loads.load(Ordering::SeqCst) {
            return Err(PortError::Unavailable("mock load failure".to_string()));
        }
        Ok(self.stored())
    }

    fn save(&self, settings: &Settings) -> Result<(), PortError> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(PortError::Unavailable("mock save failure".to_string()));
        }
        self.replace_file(&encode_settings(settings));
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn backup(&self) -> Result<(), PortError> {
        self.backups.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

// ── Signals ───────────────────────────────────────────────────────────────────

/// [`SignalSink`] that records every raised signal in order.
#[derive(Default)]
pub struct MockSignals {
    raised: Mutex<Vec<Signal>>,
}

impl MockSignals {
    pub fn raised(&self) -> Vec<Signal> {
        self.raised.lock().expect("lock poisoned").clone()
    }
}

impl SignalSink for MockSignals {
    fn raise(&self, signal: Signal) -> Result<(), PortError> {
        self.raised.lock().expect("lock poisoned").push(signal);
        Ok(())
    }
}

// ── Brightness ────────────────────────────────────────────────────────────────

/// [`BrightnessControl`] that records every call in order.
#[derive(Default)]
pub struct MockBrightness {
    calls: Mutex<Vec<(DisplayScreen, u8)>>,
}

impl MockBrightness {
    pub fn calls(&self) -> Vec<(DisplayScreen, u8)> {
        self.calls.lock().expect("lock poisoned").clone()
    }

    pub fn last(&self) -> Option<(DisplayScreen, u8)> {
        self.calls.lock().expect("lock poisoned").last().copied()
    }
}

impl BrightnessControl for MockBrightness {
    fn set_brightness(&self, screen: DisplayScreen, level: u8) {
        self.calls.lock().expect("lock poisoned").push((screen, level));
    }
}

// ── Power and system ──────────────────────────────────────────────────────────

/// [`PowerMonitor`] whose reading can be changed between frames.
pub struct MockPower {
    percent: Mutex<u8>,
}

impl MockPower {
    pub fn new(percent: u8) -> Self {
        Self {
            percent: Mutex::new(percent),
        }
    }

    pub fn set_percent(&self, percent: u8) {
        *self.percent.lock().expect("lock poisoned") = percent;
    }
}

impl Default for MockPower {
    fn default() -> Self {
        Self::new(100)
    }
}

impl PowerMonitor for MockPower {
    fn battery_percent(&self) -> u8 {
        *self.percent.lock().expect("lock poisoned")
    }
}

/// [`SystemMonitor`] returning fixed figures.
#[derive(Default)]
pub struct MockSystem {
    pub stats: SystemStats,
}

impl SystemMonitor for MockSystem {
    fn stats(&self) -> SystemStats {
        self.stats
    }
}

// ── Input ─────────────────────────────────────────────────────────────────────

/// [`InputSource`] that replays a fixed list of frames, then ends.
#[derive(Debug, Default)]
pub struct ScriptedInput {
    frames: VecDeque<InputFrame>,
}

impl ScriptedInput {
    pub fn new(frames: impl IntoIterator<Item = InputFrame>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
        }
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self) -> Option<InputFrame> {
        self.frames.pop_front()
    }
}

// ── Bundle ────────────────────────────────────────────────────────────────────

/// All mocks together, with typed handles kept for assertions.
#[derive(Clone, Default)]
pub struct MockPlatform {
    pub repository: Arc<MockRepository>,
    pub signals: Arc<MockSignals>,
    pub brightness: Arc<MockBrightness>,
    pub power: Arc<MockPower>,
    pub system: Arc<MockSystem>,
}

impl MockPlatform {
    /// A platform whose config "file" starts with `text`.
    pub fn with_file(text: &str) -> Self {
        Self {
            repository: Arc::new(MockRepository::with_file(text)),
            ..Self::default()
        }
    }

    /// Port trait objects sharing this platform's mocks.
    pub fn ports(&self) -> Ports {
        Ports {
            repository: self.repository.clone(),
            signals: self.signals.clone(),
            brightness: self.brightness.clone(),
            power: self.power.clone(),
            system: self.system.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::input::Buttons;
    use enhancer_core::BRIGHTNESS;

    #[test]
    fn test_mock_repository_save_replaces_file_text() {
        // Arrange
        let repository = MockRepository::with_file("old=1\n");
        let mut settings = Settings::new();
        settings.set(BRIGHTNESS, 42).unwrap();

        // Act
        repository.save(&settings).expect("save");

        // Assert
        assert_eq!(repository.file_text(), "brightness=42\n");
        assert_eq!(repository.save_count(), 1);
    }

    #[test]
    fn test_mock_repository_failure_switches() {
        let repository = MockRepository::default();
        repository.fail_loads(true);
        repository.fail_saves(true);
        assert!(repository.load().is_err());
        assert!(repository.save(&Settings::new()).is_err());
        assert_eq!(repository.save_count(), 0);
    }

    #[test]
    fn test_scripted_input_replays_then_ends() {
        let mut input = ScriptedInput::new([InputFrame::pressed(Buttons::A), InputFrame::idle()]);
        assert_eq!(input.poll(), Some(InputFrame::pressed(Buttons::A)));
        assert_eq!(input.poll(), Some(InputFrame::idle()));
        assert_eq!(input.poll(), None);
    }

    #[test]
    fn test_mock_power_reading_can_change() {
        let power = MockPower::default();
        assert_eq!(power.battery_percent(), 100);
        power.set_percent(12);
        assert_eq!(power.battery_percent(), 12);
    }
}
