//! Storage infrastructure: everything the suite keeps on disk.
//!
//! - `config_store` – the `key=value` settings file (read, write, atomic
//!   save, backup).
//! - `flags`        – flag files that signal the launcher and the logger.
//! - `paths`        – names of those files inside the data directory.
//! - `app_config`   – the TOML launcher configuration read by the binaries.

pub mod app_config;
pub mod config_store;
pub mod flags;
pub mod paths;
