//! File names inside the data directory.

use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "config.json";
pub const BACKUP_FILE_NAME: &str = "config_backup.txt";
pub const LAUNCH_OVERLAY_FLAG_NAME: &str = "launch_overlay.flag";
pub const PERF_LOG_FLAG_NAME: &str = "perf_log.flag";

/// Every file the suite reads or writes, resolved against one data directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorePaths {
    pub data_dir: PathBuf,
    /// The settings file.  It is named `.json` on the console but holds
    /// `key=value` lines.
    pub config: PathBuf,
    pub backup: PathBuf,
    pub launch_overlay_flag: PathBuf,
    pub perf_log_flag: PathBuf,
}

impl StorePaths {
    pub fn under(data_dir: impl AsRef<Path>) -> Self {
        let data_dir = data_dir.as_ref();
        Self {
            data_dir: data_dir.to_path_buf(),
            config: data_dir.join(CONFIG_FILE_NAME),
            backup: data_dir.join(BACKUP_FILE_NAME),
            launch_overlay_flag: data_dir.join(LAUNCH_OVERLAY_FLAG_NAME),
            perf_log_flag: data_dir.join(PERF_LOG_FLAG_NAME),
        }
    }
}
