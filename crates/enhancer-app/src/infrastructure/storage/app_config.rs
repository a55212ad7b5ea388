//! TOML launcher configuration for the two binaries.
//!
//! This is separate from the console's `config.json` settings file: it tells
//! the host binaries where that file lives and how the screens behave.  It is
//! read from:
//!
//! - `$SYSTEM_ENHANCER_CONFIG` when that variable is set, otherwise
//! - Windows:  `%APPDATA%\SystemEnhancer\enhancer.toml`
//! - Linux:    `~/.config/system_enhancer/enhancer.toml`
//! - macOS:    `~/Library/Application Support/SystemEnhancer/enhancer.toml`
//!
//! Example:
//!
//! ```toml
//! log_level = "debug"
//!
//! [storage]
//! data_dir = "/3ds/system_enhancer"
//!
//! [display]
//! saver_brightness = 60
//!
//! [overlay]
//! mode = "stats"
//! ```
//!
//! # Serde default values
//!
//! Every field is annotated with `#[serde(default = "some_fn")]` or
//! `#[serde(default)]`, so an empty file (or no file at all) yields
//! [`EnhancerConfig::default()`] and any subset of keys may be given.

use std::path::{Path, PathBuf};
use std::time::Duration;

use enhancer_core::BrightnessPolicy;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::application::overlay::OverlayMode;
use crate::application::settings_screen::{ScreenOptions, DEFAULT_BRIGHTNESS_STEP};
use crate::infrastructure::storage::paths::StorePaths;

/// Environment variable that overrides the config file location.
pub const CONFIG_ENV_VAR: &str = "SYSTEM_ENHANCER_CONFIG";

/// File name of the launcher config inside the platform config directory.
pub const CONFIG_FILE_NAME: &str = "enhancer.toml";

/// Error type for launcher configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The platform config directory could not be determined.
    #[error("could not determine platform config directory")]
    NoPlatformConfigDir,

    /// A file system I/O error occurred.
    #[error("I/O error accessing config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// The config could not be serialised to TOML.
    #[error("failed to serialize config TOML: {0}")]
    Serialize(#[from] toml::ser::Error),
}

// ── Config schema types ───────────────────────────────────────────────────────

/// Top-level launcher configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EnhancerConfig {
    /// `tracing` level used when `RUST_LOG` is not set.
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub overlay: OverlayConfig,
    #[serde(default)]
    pub runtime: RuntimeConfig,
}

/// Where the settings and flag files live.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct StorageConfig {
    /// Data directory.  Absent means the platform config directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

/// Brightness behaviour shared by both screens.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DisplayConfig {
    /// Level applied while battery saver is on.
    #[serde(default = "default_saver_brightness")]
    pub saver_brightness: u8,
    /// Level applied while battery saver is off.
    #[serde(default = "default_normal_brightness")]
    pub normal_brightness: u8,
    /// Change per Left/Right press on the Display page.
    #[serde(default = "default_brightness_step")]
    pub brightness_step: u8,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct OverlayConfig {
    #[serde(default)]
    pub mode: OverlayMode,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RuntimeConfig {
    /// Pause between frames of the main loop.
    #[serde(default = "default_frame_interval_ms")]
    pub frame_interval_ms: u64,
}

// ── Default helpers ───────────────────────────────────────────────────────────

fn default_log_level() -> String {
    "info".to_string()
}
fn default_saver_brightness() -> u8 {
    BrightnessPolicy::default().saver_level
}
fn default_normal_brightness() -> u8 {
    BrightnessPolicy::default().normal_level
}
fn default_brightness_step() -> u8 {
    DEFAULT_BRIGHTNESS_STEP
}
fn default_frame_interval_ms() -> u64 {
    16
}

impl Default for EnhancerConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            storage: StorageConfig::default(),
            display: DisplayConfig::default(),
            overlay: OverlayConfig::default(),
            runtime: RuntimeConfig::default(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            saver_brightness: default_saver_brightness(),
            normal_brightness: default_normal_brightness(),
            brightness_step: default_brightness_step(),
        }
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            frame_interval_ms: default_frame_interval_ms(),
        }
    }
}

impl DisplayConfig {
    pub fn policy(&self) -> BrightnessPolicy {
        BrightnessPolicy {
            saver_level: self.saver_brightness,
            normal_level: self.normal_brightness,
        }
    }
}

impl RuntimeConfig {
    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }
}

impl EnhancerConfig {
    pub fn screen_options(&self) -> ScreenOptions {
        ScreenOptions {
            brightness_step: self.display.brightness_step,
            policy: self.display.policy(),
        }
    }

    /// Resolves the data directory and the files inside it.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NoPlatformConfigDir`] when no `data_dir` is
    /// configured and the platform directory cannot be determined.
    pub fn store_paths(&self) -> Result<StorePaths, ConfigError> {
        let data_dir = match &self.storage.data_dir {
            Some(dir) => dir.clone(),
            None => config_dir()?,
        };
        Ok(StorePaths::under(data_dir))
    }
}

// ── Config loading ────────────────────────────────────────────────────────────

/// Determines the platform-appropriate directory for the suite's files.
///
/// # Errors
///
/// Returns [`ConfigError::NoPlatformConfigDir`] when the platform config base
/// directory cannot be determined from the environment.
pub fn config_dir() -> Result<PathBuf, ConfigError> {
    platform_config_dir().ok_or(ConfigError::NoPlatformConfigDir)
}

/// Resolves the launcher config path, honouring [`CONFIG_ENV_VAR`].
///
/// # Errors
///
/// Returns [`ConfigError::NoPlatformConfigDir`] if the variable is unset and
/// the base directory cannot be determined.
pub fn config_file_path() -> Result<PathBuf, ConfigError> {
    match std::env::var_os(CONFIG_ENV_VAR) {
        Some(path) if !path.is_empty() => Ok(PathBuf::from(path)),
        _ => Ok(config_dir()?.join(CONFIG_FILE_NAME)),
    }
}

/// Loads the launcher config from its default location.
///
/// # Errors
///
/// See [`load_config_from`].
pub fn load_config() -> Result<EnhancerConfig, ConfigError> {
    load_config_from(&config_file_path()?)
}

/// Loads the launcher config from `path`, returning
/// `EnhancerConfig::default()` if the file does not exist.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system errors other than "not found",
/// and [`ConfigError::Parse`] if the TOML is malformed.
pub fn load_config_from(path: &Path) -> Result<EnhancerConfig, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(toml::from_str(&content)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(EnhancerConfig::default()),
        Err(e) => Err(ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

/// Saves `config` to its default location, creating the directory if needed.
///
/// # Errors
///
/// See [`save_config_to`].
pub fn save_config(config: &EnhancerConfig) -> Result<(), ConfigError> {
    save_config_to(&config_file_path()?, config)
}

/// Writes `config` to `path` as pretty-printed TOML.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] if the parent directory cannot be created or
/// the file cannot be written, and [`ConfigError::Serialize`] if the config
/// cannot be expressed as TOML.
pub fn save_config_to(path: &Path, config: &EnhancerConfig) -> Result<(), ConfigError> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|source| ConfigError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
    }

    let content = toml::to_string_pretty(config)?;
    std::fs::write(path, content).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Resolves the platform config base directory including the suite's
/// subdirectory.
fn platform_config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        std::env::var_os("APPDATA").map(|p| PathBuf::from(p).join("SystemEnhancer"))
    }

    #[cfg(target_os = "linux")]
    {
        // XDG_CONFIG_HOME or ~/.config
        let base = std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))?;
        Some(base.join("system_enhancer"))
    }

    #[cfg(target_os = "macos")]
    {
        std::env::var_os("HOME").map(|h| {
            PathBuf::from(h)
                .join("Library")
                .join("Application Support")
                .join("SystemEnhancer")
        })
    }

    #[cfg(not(any(target_os = "windows", target_os = "linux", target_os = "macos")))]
    {
        None
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
