//! # enhancer-core
//!
//! Shared library for System Enhancer containing the settings model, the
//! power/brightness rules, and the codec for the flat `key=value` config file.
//!
//! This crate is used by both the settings screen and the battery overlay.
//! It has zero dependencies on the file system, console hardware, or any
//! rendering surface.
//!
//! # Architecture overview (for beginners)
//!
//! System Enhancer is a pair of small handheld-console utilities: a five-page
//! "Enhanced Settings" menu and a battery overlay.  Both read and write the
//! same two settings (`battery_saver` and `brightness`) in a tiny text file
//! that looks like this:
//!
//! ```text
//! battery_saver=1
//! brightness=80
//! ```
//!
//! This crate (`enhancer-core`) is the shared foundation.  It defines:
//!
//! - **`domain`** – Pure rules with no I/O.  The central type is
//!   [`Settings`]: an ordered mapping from setting-name to raw string value
//!   with typed boolean/integer accessors layered on top.  The `power` module
//!   holds the battery colour bands and the brightness policy.
//!
//! - **`format`** – How settings travel to and from disk.  Each line is
//!   parsed with the same tolerant rules the console firmware tools have
//!   always used: malformed lines are skipped, never fatal.

pub mod domain;
pub mod format;

// Re-export the most-used types at the crate root so callers can write
// `enhancer_core::Settings` instead of `enhancer_core::domain::settings::Settings`.
pub use domain::power::{step_brightness, BatteryBand, BrightnessPolicy};
pub use domain::settings::{
    KnownSettings, SettingError, SettingValue, Settings, BATTERY_SAVER, BRIGHTNESS,
};
pub use format::document::{encode_settings, ConfigDocument};
pub use format::line::{encode_line, parse_line, Entry, LineError};
