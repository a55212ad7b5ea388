//! OverlayScreen: the battery overlay at three feature levels.
//!
//! `Text` is the base overlay; the other two modes each extend it:
//!
//! | Mode      | Shows on top of the base                                  |
//! |-----------|-----------------------------------------------------------|
//! | `Text`    | (base) battery percentage, battery-saver state            |
//! | `Stats`   | free memory and free storage; re-reads the saver flag from|
//! |           | disk every tick so changes made elsewhere show up         |
//! | `Graphic` | colour-banded battery bar, saver badge, low-battery pulse |
//!
//! In every mode START exits and SELECT toggles battery saver.

use enhancer_core::domain::power::{bar_fill, is_critical, pulse_alpha};
use enhancer_core::{BatteryBand, BrightnessPolicy};
use serde::{Deserialize, Serialize};

use crate::application::input::{Buttons, InputFrame};
use crate::application::ports::SystemStats;

/// Feature level of the overlay.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverlayMode {
    Text,
    Stats,
    #[default]
    Graphic,
}

impl OverlayMode {
    fn shows_stats(self) -> bool {
        matches!(self, OverlayMode::Stats)
    }

    fn shows_graphics(self) -> bool {
        matches!(self, OverlayMode::Graphic)
    }
}

/// Side effect requested by [`OverlayScreen::handle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayCommand {
    Exit,
    /// Set both screens to this brightness level.
    ApplyBrightness(u8),
    /// Store this battery-saver value, keeping every other setting.
    PersistBatterySaver(bool),
}

/// Battery bar drawn in [`OverlayMode::Graphic`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BatteryBar {
    /// Fraction of the bar to fill, `0.0..=1.0`.
    pub fill: f32,
    pub band: BatteryBand,
}

/// Everything a renderer needs to draw one overlay frame.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayView {
    pub battery_percent: u8,
    pub battery_saver: bool,
    pub hint: &'static str,
    pub stats: Option<SystemStats>,
    pub bar: Option<BatteryBar>,
    /// Alpha of the critical-battery strip, when it is visible.
    pub pulse_alpha: Option<u8>,
    /// Last storage failure, if any.
    pub status: Option<String>,
}

/// State of the overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlayScreen {
    mode: OverlayMode,
    battery_saver: bool,
    policy: BrightnessPolicy,
}

impl OverlayScreen {
    pub fn new(mode: OverlayMode, battery_saver: bool, policy: BrightnessPolicy) -> Self {
        Self {
            mode,
            battery_saver,
            policy,
        }
    }

    pub fn mode(&self) -> OverlayMode {
        self.mode
    }

    pub fn battery_saver(&self) -> bool {
        self.battery_saver
    }

    /// Whether the session should re-read the saver flag on every tick.
    pub fn reloads_each_tick(&self) -> bool {
        self.mode.shows_stats()
    }

    /// Adopts a battery-saver value read back from storage.
    pub fn sync_battery_saver(&mut self, battery_saver: bool) {
        self.battery_saver = battery_saver;
    }

    /// Brightness to apply when the overlay starts.
    pub fn startup_commands(&self) -> Vec<OverlayCommand> {
        vec![OverlayCommand::ApplyBrightness(
            self.policy.level_for(self.battery_saver),
        )]
    }

    /// Processes one frame of input.
    pub fn handle(&mut self, frame: &InputFrame) -> Vec<OverlayCommand> {
        if frame.pressed.contains(Buttons::START) {
            return vec![OverlayCommand::Exit];
        }
        if frame.pressed.contains(Buttons::SELECT) {
            self.battery_saver = !self.battery_saver;
            return vec![
                OverlayCommand::ApplyBrightness(self.policy.level_for(self.battery_saver)),
                OverlayCommand::PersistBatterySaver(self.battery_saver),
            ];
        }
        Vec::new()
    }

    /// Builds the view model.  `elapsed_ms` drives the low-battery pulse.
    pub fn view(&self, battery_percent: u8, stats: SystemStats, elapsed_ms: u64) -> OverlayView {
        let battery_percent = battery_percent.min(100);
        let graphic = self.mode.shows_graphics();

        let bar = graphic.then(|| BatteryBar {
            fill: bar_fill(battery_percent),
            band: BatteryBand::for_percent(battery_percent),
        });
        let pulse = (graphic && is_critical(battery_percent)).then(|| pulse_alpha(elapsed_ms));

        OverlayView {
            battery_percent,
            battery_saver: self.battery_saver,
            hint: "Press START to exit overlay, SELECT to toggle battery saver.",
            stats: self.mode.shows_stats().then_some(stats),
            bar,
            pulse_alpha: pulse,
            status: None,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn overlay(mode: OverlayMode) -> OverlayScreen {
        OverlayScreen::new(mode, false, BrightnessPolicy::default())
    }

    #[test]
    fn test_default_mode_is_graphic() {
        assert_eq!(OverlayMode::default(), OverlayMode::Graphic);
    }

    #[test]
    fn test_start_exits() {
        let mut o = overlay(OverlayMode::Text);
        let commands = o.handle(&InputFrame::pressed(Buttons::START | Buttons::SELECT));
        assert_eq!(commands, vec![OverlayCommand::Exit]);
        assert!(!o.battery_saver(), "START must win over SELECT");
    }

    #[test]
    fn test_select_toggles_saver_applies_level_and_persists() {
        // Arrange
        let mut o = overlay(OverlayMode::Graphic);

        // Act
        let commands = o.handle(&InputFrame::pressed(Buttons::SELECT));

        // Assert
        assert!(o.battery_saver());
        assert_eq!(
            commands,
            vec![
                OverlayCommand::ApplyBrightness(80),
                OverlayCommand::PersistBatterySaver(true)
            ]
        );
    }

    #[test]
    fn test_idle_frame_does_nothing() {
        let mut o = overlay(OverlayMode::Stats);
        assert!(o.handle(&InputFrame::idle()).is_empty());
    }

    #[test]
    fn test_only_stats_mode_reloads_each_tick() {
        assert!(!overlay(OverlayMode::Text).reloads_each_tick());
        assert!(overlay(OverlayMode::Stats).reloads_each_tick());
        assert!(!overlay(OverlayMode::Graphic).reloads_each_tick());
    }

    #[test]
    fn test_text_view_has_no_bar_or_stats() {
        let view = overlay(OverlayMode::Text).view(50, SystemStats::default(), 0);
        assert_eq!(view.battery_percent, 50);
        assert!(view.bar.is_none());
        assert!(view.stats.is_none());
        assert!(view.pulse_alpha.is_none());
    }

    #[test]
    fn test_stats_view_includes_system_stats() {
        let stats = SystemStats {
            free_memory_bytes: Some(1024),
            free_storage_bytes: Some(2048),
        };
        let view = overlay(OverlayMode::Stats).view(50, stats, 0);
        assert_eq!(view.stats, Some(stats));
    }

    #[test]
    fn test_graphic_view_bar_uses_band_and_fill() {
        let view = overlay(OverlayMode::Graphic).view(45, SystemStats::default(), 0);
        let bar = view.bar.expect("graphic mode draws a bar");
        assert_eq!(bar.band, BatteryBand::Medium);
        assert!((bar.fill - 0.45).abs() < 1e-6);
        assert!(view.pulse_alpha.is_none(), "45% is not critical");
    }

    #[test]
    fn test_graphic_view_pulses_when_critical() {
        let o = overlay(OverlayMode::Graphic);
        assert_eq!(o.view(15, SystemStats::default(), 100).pulse_alpha, Some(255));
        assert_eq!(o.view(15, SystemStats::default(), 700).pulse_alpha, Some(128));
    }

    #[test]
    fn test_startup_applies_policy_level() {
        let o = OverlayScreen::new(OverlayMode::Text, true, BrightnessPolicy::default());
        assert_eq!(
            o.startup_commands(),
            vec![OverlayCommand::ApplyBrightness(80)]
        );
    }

    #[test]
    fn test_mode_deserializes_from_lowercase_name() {
        #[derive(Deserialize)]
        struct Wrapper {
            mode: OverlayMode,
        }
        let w: Wrapper = toml::from_str("mode = \"stats\"").expect("deserialize");
        assert_eq!(w.mode, OverlayMode::Stats);
    }
}
