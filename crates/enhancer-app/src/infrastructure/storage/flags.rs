//! Flag files: cross-process signals left in the data directory.
//!
//! A raised flag is a file containing `1\n`.  The launcher (or the
//! performance logger) polls for it, acts, and clears it.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::application::ports::{PortError, Signal, SignalSink};
use crate::infrastructure::storage::paths::StorePaths;

/// Raises, inspects and clears the suite's flag files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagFiles {
    launch_overlay: PathBuf,
    perf_log: PathBuf,
}

impl FlagFiles {
    pub fn from_paths(paths: &StorePaths) -> Self {
        Self {
            launch_overlay: paths.launch_overlay_flag.clone(),
            perf_log: paths.perf_log_flag.clone(),
        }
    }

    pub fn path_for(&self, signal: Signal) -> &Path {
        match signal {
            Signal::LaunchOverlay => &self.launch_overlay,
            Signal::PerfLog => &self.perf_log,
        }
    }

    pub fn is_raised(&self, signal: Signal) -> bool {
        self.path_for(signal).is_file()
    }

    /// Removes the flag.  Clearing a flag that is not raised succeeds.
    ///
    /// # Errors
    ///
    /// Returns the I/O error if the file exists but cannot be removed.
    pub fn clear(&self, signal: Signal) -> io::Result<()> {
        match fs::remove_file(self.path_for(signal)) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
            _ => Ok(()),
        }
    }
}

impl SignalSink for FlagFiles {
    fn raise(&self, signal: Signal) -> Result<(), PortError> {
        let path = self.path_for(signal);
        let unavailable = |e: io::Error| PortError::Unavailable(format!("{}: {e}", path.display()));

        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(unavailable)?;
        }
        fs::write(path, "1\n").map_err(unavailable)?;
        info!("raised {signal:?} at {}", path.display());
        Ok(())
    }
}
