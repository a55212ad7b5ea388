//! Power and display rules shared by the overlay and the settings screen.
//!
//! None of these functions talk to hardware.  The caller supplies the
//! battery percentage and elapsed time; the functions decide what the screens
//! should show and which brightness level to request.

use crate::domain::settings::MAX_BRIGHTNESS;

/// Battery percentage at or below which the overlay shows a warning pulse.
pub const CRITICAL_BATTERY_PERCENT: u8 = 20;

/// Length of one full warning-pulse cycle.
pub const PULSE_PERIOD_MS: u64 = 1000;

/// Colour band of the overlay battery bar.
///
/// | Band     | Percentage | Colour |
/// |----------|------------|--------|
/// | `High`   | 61–100     | green  |
/// | `Medium` | 31–60      | yellow |
/// | `Low`    | 0–30       | red    |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatteryBand {
    High,
    Medium,
    Low,
}

impl BatteryBand {
    pub fn for_percent(percent: u8) -> Self {
        if percent > 60 {
            BatteryBand::High
        } else if percent > 30 {
            BatteryBand::Medium
        } else {
            BatteryBand::Low
        }
    }

    /// RGBA colour used to fill the battery bar.
    pub fn rgba(&self) -> [u8; 4] {
        match self {
            BatteryBand::High => [0, 255, 0, 255],
            BatteryBand::Medium => [255, 255, 0, 255],
            BatteryBand::Low => [255, 0, 0, 255],
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BatteryBand::High => "high",
            BatteryBand::Medium => "medium",
            BatteryBand::Low => "low",
        }
    }
}

/// Returns `true` when the battery is low enough to warrant the pulse.
pub fn is_critical(percent: u8) -> bool {
    percent <= CRITICAL_BATTERY_PERCENT
}

/// Alpha of the critical-battery strip at `elapsed_ms`: opaque for the first
/// half of every cycle, half-transparent for the second.
pub fn pulse_alpha(elapsed_ms: u64) -> u8 {
    if elapsed_ms % PULSE_PERIOD_MS < PULSE_PERIOD_MS / 2 {
        255
    } else {
        128
    }
}

/// Fraction of the battery bar to fill, in `0.0..=1.0`.
pub fn bar_fill(percent: u8) -> f32 {
    f32::from(percent.min(100)) / 100.0
}

/// Brightness levels applied when battery saver is toggled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrightnessPolicy {
    /// Level applied to both screens while battery saver is on.
    pub saver_level: u8,
    /// Level applied to both screens while battery saver is off.
    pub normal_level: u8,
}

impl Default for BrightnessPolicy {
    fn default() -> Self {
        Self {
            saver_level: 80,
            normal_level: 100,
        }
    }
}

impl BrightnessPolicy {
    pub fn level_for(&self, battery_saver: bool) -> u8 {
        let level = if battery_saver {
            self.saver_level
        } else {
            self.normal_level
        };
        level.min(MAX_BRIGHTNESS)
    }
}

/// Moves `current` by `delta`, staying within 0–100.
pub fn step_brightness(current: u8, delta: i16) -> u8 {
    (i16::from(current) + delta).clamp(0, i16::from(MAX_BRIGHTNESS)) as u8
}
