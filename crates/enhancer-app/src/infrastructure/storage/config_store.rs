//! The Config Store: settings persisted to the flat `key=value` file.
//!
//! Two APIs live here.
//!
//! The free functions [`read_bool`], [`read_int`], [`write_bool`] and
//! [`write_all`] keep the scanning semantics the console tools have always
//! had: a missing file or key gives the caller's default, a file that cannot
//! be written is a silent no-op, and lookups stop at the first line with a
//! matching name.  Each one has a `try_` twin that reports the underlying
//! [`StoreError`] instead of absorbing it.
//!
//! [`ConfigStore`] is the handle the sessions use.  It always rewrites the
//! complete mapping, so toggling one setting can never erase another.
//!
//! # Atomic writes
//!
//! Every write goes to a uniquely named sibling temp file
//! (`.config.json.<uuid>.tmp`), is synced, and is then renamed over the
//! target.  A concurrent reader sees either the old file or the new one,
//! never a truncated one.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use enhancer_core::{encode_settings, ConfigDocument, SettingError, SettingValue, Settings};
use thiserror::Error;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::application::ports::{PortError, SettingsRepository};
use crate::infrastructure::storage::paths::StorePaths;

/// Error type for config-file operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A file system I/O error occurred.
    #[error("I/O error accessing {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The setting could not be represented in the file.
    #[error(transparent)]
    Invalid(#[from] SettingError),
}

impl From<StoreError> for PortError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Invalid(inner) => PortError::Invalid(inner),
            other => PortError::Unavailable(other.to_string()),
        }
    }
}

fn io_error(path: &Path, source: io::Error) -> StoreError {
    StoreError::Io {
        path: path.to_path_buf(),
        source,
    }
}

// ── Low-level file access ─────────────────────────────────────────────────────

/// Reads the whole file.  `Ok(None)` means the file does not exist.
///
/// Invalid UTF-8 is replaced rather than rejected; the affected lines simply
/// fail to match any key.
fn read_text(path: &Path) -> Result<Option<String>, StoreError> {
    match fs::read(path) {
        Ok(bytes) => Ok(Some(String::from_utf8_lossy(&bytes).into_owned())),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(io_error(path, e)),
    }
}

fn temp_path_for(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "config".to_string());
    path.with_file_name(format!(".{name}.{}.tmp", Uuid::new_v4().simple()))
}

/// Replaces `path` with `contents` via temp file and rename.
///
/// With `create_parent` unset a missing directory is reported as an error
/// instead of being created.
fn write_atomic(path: &Path, contents: &[u8], create_parent: bool) -> Result<(), StoreError> {
    if create_parent {
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|source| io_error(dir, source))?;
        }
    }

    let tmp = temp_path_for(path);
    let written = (|| -> io::Result<()> {
        let mut file = fs::File::create(&tmp)?;
        file.write_all(contents)?;
        file.sync_all()?;
        drop(file);
        fs::rename(&tmp, path)
    })();

    if let Err(source) = written {
        // The temp file may or may not exist depending on where we failed.
        let _ = fs::remove_file(&tmp);
        return Err(io_error(path, source));
    }
    Ok(())
}

// ── Scanning API ──────────────────────────────────────────────────────────────

/// Looks up `key` and interprets its value as a boolean.
///
/// Returns `Ok(None)` when the file or the key is missing.
///
/// # Errors
///
/// Returns [`StoreError::Io`] if the file exists but cannot be read.
pub fn try_read_bool(path: impl AsRef<Path>, key: &str) -> Result<Option<bool>, StoreError> {
    let Some(text) = read_text(path.as_ref())? else {
        return Ok(None);
    };
    let value = ConfigDocument::parse(&text)
        .first(key)
        .map(SettingValue::parse_bool);
    Ok(value)
}

/// Looks up `key` and interprets its value as an integer.
///
/// Returns `Ok(None)` when the file or the key is missing.
///
/// # Errors
///
/// Returns [`StoreError::Io`] if the file exists but cannot be read.
pub fn try_read_int(path: impl AsRef<Path>, key: &str) -> Result<Option<i32>, StoreError> {
    let Some(text) = read_text(path.as_ref())? else {
        return Ok(None);
    };
    let value = ConfigDocument::parse(&text)
        .first(key)
        .map(SettingValue::parse_int);
    Ok(value)
}

/// Returns the boolean stored under `key`, or `default`.
///
/// Only the literal value `1` is `true`.  Never fails; read errors are
/// logged and give `default`.
pub fn read_bool(path: impl AsRef<Path>, key: &str, default: bool) -> bool {
    match try_read_bool(path, key) {
        Ok(value) => value.unwrap_or(default),
        Err(e) => {
            warn!("{e}; using default for {key:?}");
            default
        }
    }
}

/// Returns the integer stored under `key`, or `default`.
///
/// Non-numeric values read as `0`.  Never fails; read errors are logged and
/// give `default`.
pub fn read_int(path: impl AsRef<Path>, key: &str, default: i32) -> i32 {
    match try_read_int(path, key) {
        Ok(value) => value.unwrap_or(default),
        Err(e) => {
            warn!("{e}; using default for {key:?}");
            default
        }
    }
}

/// Replaces the whole file with the single line `key=<0|1>`.
///
/// **Every other setting in the file is lost.**  Use [`try_write_all`] or
/// [`ConfigStore::update`] to change one key and keep the rest.
///
/// # Errors
///
/// Returns [`StoreError::Invalid`] for an unwritable key and
/// [`StoreError::Io`] if the file cannot be written (including a missing
/// parent directory, which is not created).
pub fn try_write_bool(path: impl AsRef<Path>, key: &str, value: bool) -> Result<(), StoreError> {
    let mut single = Settings::new();
    single.set(key, value)?;
    try_write_all(path, &single)
}

/// Replaces the whole file with one `name=value` line per entry of
/// `settings`, in insertion order.
///
/// # Errors
///
/// Returns [`StoreError::Io`] if the file cannot be written.  A missing
/// parent directory is not created.
pub fn try_write_all(path: impl AsRef<Path>, settings: &Settings) -> Result<(), StoreError> {
    write_atomic(path.as_ref(), encode_settings(settings).as_bytes(), false)
}

/// [`try_write_bool`], logging and discarding any failure.
pub fn write_bool(path: impl AsRef<Path>, key: &str, value: bool) {
    if let Err(e) = try_write_bool(path, key, value) {
        warn!("write of {key:?} skipped: {e}");
    }
}

/// [`try_write_all`], logging and discarding any failure.
pub fn write_all(path: impl AsRef<Path>, settings: &Settings) {
    if let Err(e) = try_write_all(path, settings) {
        warn!("settings write skipped: {e}");
    }
}

// ── ConfigStore ───────────────────────────────────────────────────────────────

/// Handle on one config file and its backup location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigStore {
    path: PathBuf,
    backup_path: PathBuf,
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>, backup_path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            backup_path: backup_path.into(),
        }
    }

    /// A store on the config and backup files of `paths`.
    pub fn from_paths(paths: &StorePaths) -> Self {
        Self::new(paths.config.clone(), paths.backup.clone())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn backup_path(&self) -> &Path {
        &self.backup_path
    }

    /// Parses the whole file.  A missing file is an empty mapping.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the file exists but cannot be read.
    pub fn load(&self) -> Result<Settings, StoreError> {
        let Some(text) = read_text(&self.path)? else {
            debug!("{} not found, starting empty", self.path.display());
            return Ok(Settings::new());
        };
        let doc = ConfigDocument::parse(&text);
        for skipped in doc.skipped() {
            debug!(
                "{}:{}: skipping line: {}",
                self.path.display(),
                skipped.line_number,
                skipped.reason
            );
        }
        Ok(doc.to_settings())
    }

    /// Atomically replaces the file with the complete `settings` mapping,
    /// creating the parent directory if needed.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the directory, the temp file, or the
    /// rename fails.  The previous file is left untouched in that case.
    pub fn save(&self, settings: &Settings) -> Result<(), StoreError> {
        write_atomic(&self.path, encode_settings(settings).as_bytes(), true)?;
        debug!("saved {} settings to {}", settings.len(), self.path.display());
        Ok(())
    }

    /// Loads, applies `change`, and saves, returning the saved mapping.
    ///
    /// Nothing is written if the load or `change` fails.
    ///
    /// # Errors
    ///
    /// Returns the first [`StoreError`] encountered.
    pub fn update<F>(&self, change: F) -> Result<Settings, StoreError>
    where
        F: FnOnce(&mut Settings) -> Result<(), SettingError>,
    {
        let mut settings = self.load()?;
        change(&mut settings)?;
        self.save(&settings)?;
        Ok(settings)
    }

    /// Copies the config file verbatim to the backup path.
    ///
    /// Returns `Ok(false)` when there is no config file to copy.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if either file cannot be accessed.
    pub fn backup(&self) -> Result<bool, StoreError> {
        self.backup_to(&self.backup_path)
    }

    /// Copies the config file verbatim to `dest`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if either file cannot be accessed.
    pub fn backup_to(&self, dest: &Path) -> Result<bool, StoreError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                info!("no config at {} to back up", self.path.display());
                return Ok(false);
            }
            Err(e) => return Err(io_error(&self.path, e)),
        };
        write_atomic(dest, &bytes, true)?;
        info!("backed up {} to {}", self.path.display(), dest.display());
        Ok(true)
    }
}

impl SettingsRepository for ConfigStore {
    fn load(&self) -> Result<Settings, PortError> {
        Ok(ConfigStore::load(self)?)
    }

    fn save(&self, settings: &Settings) -> Result<(), PortError> {
        Ok(ConfigStore::save(self, settings)?)
    }

    fn backup(&self) -> Result<(), PortError> {
        ConfigStore::backup(self)?;
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
