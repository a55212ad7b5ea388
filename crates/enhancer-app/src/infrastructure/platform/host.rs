//! Host adapters: run the screens on a desktop machine.
//!
//! | Adapter            | Port                | Source                                  |
//! |--------------------|---------------------|-----------------------------------------|
//! | `HostPower`        | `PowerMonitor`      | `/sys/class/power_supply/*/capacity`    |
//! | `HostSystem`       | `SystemMonitor`     | `MemAvailable` in `/proc/meminfo`       |
//! | `LoggedBrightness` | `BrightnessControl` | none; levels are only logged and kept   |
//!
//! Sources that do not exist (non-Linux hosts, desktops without a battery)
//! give the fallbacks documented on each adapter.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::{debug, info};

use crate::application::ports::{
    BrightnessControl, DisplayScreen, PowerMonitor, SystemMonitor, SystemStats,
};

const POWER_SUPPLY_DIR: &str = "/sys/class/power_supply";
const MEMINFO_PATH: &str = "/proc/meminfo";

/// Battery charge reported by the first battery under the power-supply
/// class directory.
///
/// Reports 100 when no battery is found, as on mains power.
#[derive(Debug, Clone)]
pub struct HostPower {
    root: PathBuf,
}

impl HostPower {
    pub fn new() -> Self {
        Self::with_root(POWER_SUPPLY_DIR)
    }

    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn read_capacity(&self) -> Option<u8> {
        let mut supplies: Vec<PathBuf> = fs::read_dir(&self.root)
            .ok()?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .collect();
        supplies.sort();

        supplies.iter().find_map(|supply| {
            let kind = fs::read_to_string(supply.join("type")).ok()?;
            if kind.trim() != "Battery" {
                return None;
            }
            let capacity = fs::read_to_string(supply.join("capacity")).ok()?;
            capacity.trim().parse::<u8>().ok().map(|p| p.min(100))
        })
    }
}

impl Default for HostPower {
    fn default() -> Self {
        Self::new()
    }
}

impl PowerMonitor for HostPower {
    fn battery_percent(&self) -> u8 {
        self.read_capacity().unwrap_or(100)
    }
}

/// Free memory from `/proc/meminfo`.  Free storage is not reported.
#[derive(Debug, Clone)]
pub struct HostSystem {
    meminfo: PathBuf,
}

impl HostSystem {
    pub fn new() -> Self {
        Self::with_meminfo(MEMINFO_PATH)
    }

    pub fn with_meminfo(path: impl Into<PathBuf>) -> Self {
        Self {
            meminfo: path.into(),
        }
    }
}

impl Default for HostSystem {
    fn default() -> Self {
        Self::new()
    }
}

/// Extracts `MemAvailable` (reported in kB) as bytes.
fn parse_mem_available(meminfo: &str) -> Option<u64> {
    meminfo.lines().find_map(|line| {
        let rest = line.strip_prefix("MemAvailable:")?;
        let kib: u64 = rest.split_whitespace().next()?.parse().ok()?;
        kib.checked_mul(1024)
    })
}

fn read_mem_available(path: &Path) -> Option<u64> {
    parse_mem_available(&fs::read_to_string(path).ok()?)
}

impl SystemMonitor for HostSystem {
    fn stats(&self) -> SystemStats {
        SystemStats {
            free_memory_bytes: read_mem_available(&self.meminfo),
            free_storage_bytes: None,
        }
    }
}

/// Brightness control with no backlight behind it.
///
/// Each change is logged at `info`; repeats of the current level at `debug`.
#[derive(Debug, Default)]
pub struct LoggedBrightness {
    levels: Mutex<[Option<u8>; 2]>,
}

impl LoggedBrightness {
    fn slot(screen: DisplayScreen) -> usize {
        match screen {
            DisplayScreen::Top => 0,
            DisplayScreen::Bottom => 1,
        }
    }

    /// The last level set on `screen`, if any.
    pub fn level(&self, screen: DisplayScreen) -> Option<u8> {
        self.levels.lock().ok()?[Self::slot(screen)]
    }
}

impl BrightnessControl for LoggedBrightness {
    fn set_brightness(&self, screen: DisplayScreen, level: u8) {
        let Ok(mut levels) = self.levels.lock() else {
            return;
        };
        let slot = &mut levels[Self::slot(screen)];
        if *slot == Some(level) {
            debug!(?screen, level, "brightness unchanged");
        } else {
            info!(?screen, level, "brightness set");
            *slot = Some(level);
        }
    }
}
