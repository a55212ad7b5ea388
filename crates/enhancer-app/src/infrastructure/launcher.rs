//! Start-up wiring shared by the two binaries.

use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use tracing_subscriber::EnvFilter;

use crate::application::input::InputFrame;
use crate::application::ports::InputSource;
use crate::application::session::{Flow, Ports};
use crate::infrastructure::platform::host::{HostPower, HostSystem, LoggedBrightness};
use crate::infrastructure::storage::config_store::ConfigStore;
use crate::infrastructure::storage::flags::FlagFiles;
use crate::infrastructure::storage::paths::StorePaths;

/// Initialises structured logging on stderr.
///
/// `RUST_LOG` wins when set; otherwise `fallback_level` from the launcher
/// config is used.  Stdout is left to the console view.
pub fn init_tracing(fallback_level: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Ports backed by the files in `paths` and the host adapters.
pub fn host_ports(paths: &StorePaths) -> Ports {
    Ports {
        repository: Arc::new(ConfigStore::from_paths(paths)),
        signals: Arc::new(FlagFiles::from_paths(paths)),
        brightness: Arc::new(LoggedBrightness::default()),
        power: Arc::new(HostPower::new()),
        system: Arc::new(HostSystem::new()),
    }
}

/// Polls `input` until it ends or `frame` returns [`Flow::Exit`], pausing
/// `interval` between frames.
///
/// `frame` receives the input and the milliseconds elapsed since the loop
/// started.  Returns the number of frames processed.
pub fn run_frames<F>(input: &mut dyn InputSource, interval: Duration, mut frame: F) -> u64
where
    F: FnMut(&InputFrame, u64) -> Flow,
{
    let started = Instant::now();
    let mut count = 0;
    while let Some(polled) = input.poll() {
        count += 1;
        let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
        if frame(&polled, elapsed_ms) == Flow::Exit {
            break;
        }
        if !interval.is_zero() {
            thread::sleep(interval);
        }
    }
    count
}
