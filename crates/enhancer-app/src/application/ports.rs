//! Ports: the traits the application layer needs from the outside world.
//!
//! Each trait is implemented twice in the infrastructure layer: once for the
//! real target (config file, flag files, host power/memory queries) and once
//! as a mock so the screens and sessions can be tested without any of them.
//!
//! | Port                 | Production adapter                     |
//! |----------------------|----------------------------------------|
//! | `SettingsRepository` | `storage::config_store::ConfigStore`   |
//! | `SignalSink`         | `storage::flags::FlagFiles`            |
//! | `BrightnessControl`  | `platform::host::LoggedBrightness`     |
//! | `PowerMonitor`       | `platform::host::HostPower`            |
//! | `SystemMonitor`      | `platform::host::HostSystem`           |
//! | `InputSource`        | `console::StdinInput`                  |

use enhancer_core::{SettingError, Settings};
use thiserror::Error;

use crate::application::input::InputFrame;

/// Error type returned by storage-facing ports.
#[derive(Debug, Error)]
pub enum PortError {
    /// The backing file or directory could not be read or written.
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// A setting could not be represented in the config file.
    #[error(transparent)]
    Invalid(#[from] SettingError),
}

/// Load/save access to the complete settings mapping.
pub trait SettingsRepository: Send + Sync {
    /// Loads every stored setting.  A missing file is an empty mapping, not an
    /// error.
    fn load(&self) -> Result<Settings, PortError>;

    /// Replaces the stored settings with `settings` in one step.
    fn save(&self, settings: &Settings) -> Result<(), PortError>;

    /// Copies the stored settings to the backup location.
    fn backup(&self) -> Result<(), PortError>;
}

/// Cross-process signals carried by flag files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Signal {
    /// Ask the launcher to start the overlay.
    LaunchOverlay,
    /// Ask the performance logger to start recording.
    PerfLog,
}

/// Raises cross-process signals.
pub trait SignalSink: Send + Sync {
    fn raise(&self, signal: Signal) -> Result<(), PortError>;
}

/// The two physical screens of the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DisplayScreen {
    Top,
    Bottom,
}

impl DisplayScreen {
    pub const BOTH: [DisplayScreen; 2] = [DisplayScreen::Top, DisplayScreen::Bottom];
}

/// Sets the backlight level of a screen (0–100).
pub trait BrightnessControl: Send + Sync {
    fn set_brightness(&self, screen: DisplayScreen, level: u8);
}

/// Reports the battery charge.
pub trait PowerMonitor: Send + Sync {
    /// Battery charge in percent, 0–100.
    fn battery_percent(&self) -> u8;
}

/// Free-memory and free-storage figures shown on the Performance page.
///
/// `None` means the figure is not available on this platform.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SystemStats {
    pub free_memory_bytes: Option<u64>,
    pub free_storage_bytes: Option<u64>,
}

/// Reports memory and storage headroom.
pub trait SystemMonitor: Send + Sync {
    fn stats(&self) -> SystemStats;
}

/// Produces one [`InputFrame`] per poll.
pub trait InputSource {
    /// Returns the next frame, or `None` once the platform loop has ended.
    fn poll(&mut self) -> Option<InputFrame>;
}
