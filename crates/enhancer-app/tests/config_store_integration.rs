//! Integration tests for the Config Store on a real file system.
//!
//! # Purpose
//!
//! These tests drive the public storage API the way the console tools and the
//! sessions use it, against files in a fresh temp directory per test.  They
//! verify:
//!
//! - Reads fall back to the caller's default when the file or key is absent.
//! - `write_all` followed by typed reads round-trips both known settings.
//! - `write_bool` replaces the whole file (the single-key hazard).
//! - Duplicate keys resolve to the first occurrence.
//! - Malformed lines are skipped without affecting valid ones.
//! - Only the literal `1` reads as `true`.
//! - `ConfigStore::update` keeps unknown keys, including names with spaces,
//!   and leaves no temp files.

use std::fs;
use std::path::{Path, PathBuf};

use enhancer_app::infrastructure::storage::config_store::{
    read_bool, read_int, try_read_bool, write_all, write_bool, ConfigStore,
};
use enhancer_app::infrastructure::storage::paths::StorePaths;
use enhancer_core::{Settings, BATTERY_SAVER, BRIGHTNESS};
use uuid::Uuid;

/// A unique, existing temp directory that is removed on drop.
struct TempDir(PathBuf);

impl TempDir {
    fn new() -> Self {
        let dir = std::env::temp_dir().join(format!("enhancer_it_{}", Uuid::new_v4()));
        fs::create_dir_all(&dir).expect("create temp dir");
        Self(dir)
    }

    fn file(&self, name: &str) -> PathBuf {
        self.0.join(name)
    }

    fn path(&self) -> &Path {
        &self.0
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        fs::remove_dir_all(&self.0).ok();
    }
}

// ── Scanning API ──────────────────────────────────────────────────────────────

#[test]
fn test_reads_return_default_when_file_is_missing() {
    // Arrange
    let dir = TempDir::new();
    let path = dir.file("config.json");

    // Act / Assert
    assert!(read_bool(&path, BATTERY_SAVER, true));
    assert!(!read_bool(&path, BATTERY_SAVER, false));
    assert_eq!(read_int(&path, BRIGHTNESS, 100), 100);
}

#[test]
fn test_write_all_round_trips_both_known_settings() {
    // Arrange
    let dir = TempDir::new();
    let path = dir.file("config.json");
    let mut settings = Settings::new();
    settings.set(BATTERY_SAVER, true).unwrap();
    settings.set(BRIGHTNESS, 42).unwrap();

    // Act
    write_all(&path, &settings);

    // Assert
    assert!(read_bool(&path, BATTERY_SAVER, false));
    assert_eq!(read_int(&path, BRIGHTNESS, 0), 42);
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "battery_saver=1\nbrightness=42\n"
    );
}

#[test]
fn test_write_bool_replaces_every_other_key() {
    // Arrange
    let dir = TempDir::new();
    let path = dir.file("config.json");
    fs::write(&path, "battery_saver=1\nbrightness=42\n").unwrap();

    // Act
    write_bool(&path, BATTERY_SAVER, false);

    // Assert
    assert_eq!(fs::read_to_string(&path).unwrap(), "battery_saver=0\n");
    assert_eq!(read_int(&path, BRIGHTNESS, 0), 0);
}

#[test]
fn test_duplicate_keys_resolve_to_first_occurrence() {
    let dir = TempDir::new();
    let path = dir.file("config.json");
    fs::write(&path, "brightness=30\nbattery_saver=1\nbrightness=90\nbattery_saver=0\n").unwrap();

    assert_eq!(read_int(&path, BRIGHTNESS, 0), 30);
    assert!(read_bool(&path, BATTERY_SAVER, false));

    let store = ConfigStore::new(&path, dir.file("config_backup.txt"));
    let loaded = store.load().unwrap();
    assert_eq!(loaded.get(BRIGHTNESS), Some("30"));
    assert_eq!(loaded.len(), 2);
}

#[test]
fn test_malformed_lines_are_skipped() {
    // Arrange – no separator, empty name, empty value, garbage
    let dir = TempDir::new();
    let path = dir.file("config.json");
    fs::write(
        &path,
        "garbage\n=1\nbattery_saver=\n\n\u{1}\u{2}\u{3}\nbrightness=64\nbattery_saver=1\n",
    )
    .unwrap();

    // Act / Assert
    assert_eq!(read_int(&path, BRIGHTNESS, 0), 64);
    assert!(read_bool(&path, BATTERY_SAVER, false));
}

#[test]
fn test_value_after_separator_may_be_preceded_by_whitespace() {
    let dir = TempDir::new();
    let path = dir.file("config.json");
    fs::write(&path, "brightness=   55 trailing words\n").unwrap();

    assert_eq!(read_int(&path, BRIGHTNESS, 0), 55);
}

#[test]
fn test_only_literal_one_is_true() {
    let dir = TempDir::new();
    let path = dir.file("config.json");

    for raw in ["true", "yes", "01", "on", "2"] {
        fs::write(&path, format!("battery_saver={raw}\n")).unwrap();
        assert_eq!(
            try_read_bool(&path, BATTERY_SAVER).unwrap(),
            Some(false),
            "{raw:?} must read as false"
        );
    }
    fs::write(&path, "battery_saver=1\n").unwrap();
    assert_eq!(try_read_bool(&path, BATTERY_SAVER).unwrap(), Some(true));
}

#[test]
fn test_non_utf8_bytes_do_not_hide_valid_lines() {
    let dir = TempDir::new();
    let path = dir.file("config.json");
    fs::write(&path, b"\xff\xfe=\xff\nbrightness=12\n").unwrap();

    assert_eq!(read_int(&path, BRIGHTNESS, 0), 12);
}

// ── ConfigStore ───────────────────────────────────────────────────────────────

#[test]
fn test_update_preserves_unknown_keys_and_leaves_no_temp_file() {
    // Arrange
    let dir = TempDir::new();
    let store = ConfigStore::from_paths(&StorePaths::under(dir.path()));
    fs::write(store.path(), "theme=dark\nbrightness=42\nlanguage=en\n").unwrap();

    // Act
    store
        .update(|settings| settings.set(BATTERY_SAVER, true))
        .expect("update");

    // Assert
    assert_eq!(
        fs::read_to_string(store.path()).unwrap(),
        "theme=dark\nbrightness=42\nlanguage=en\nbattery_saver=1\n"
    );
    let names: Vec<String> = fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["config.json".to_string()]);
}

#[test]
fn test_update_keeps_names_with_leading_space() {
    // Arrange
    let dir = TempDir::new();
    let store = ConfigStore::from_paths(&StorePaths::under(dir.path()));
    fs::write(store.path(), " theme=dark\nbattery_saver=0\n").unwrap();

    // Act
    store
        .update(|settings| settings.set(BATTERY_SAVER, true))
        .expect("update");

    // Assert
    assert_eq!(
        fs::read_to_string(store.path()).unwrap(),
        " theme=dark\nbattery_saver=1\n"
    );
    let reloaded = store.load().unwrap();
    assert_eq!(reloaded.get(" theme"), Some("dark"));
    assert!(read_bool(store.path(), BATTERY_SAVER, false));
}

#[test]
fn test_save_then_scanning_reads_agree() {
    let dir = TempDir::new();
    let store = ConfigStore::from_paths(&StorePaths::under(dir.path()));
    let mut settings = Settings::new();
    settings.set(BRIGHTNESS, 7).unwrap();

    store.save(&settings).unwrap();

    assert_eq!(read_int(store.path(), BRIGHTNESS, 100), 7);
    assert!(!read_bool(store.path(), BATTERY_SAVER, false));
}

#[test]
fn test_save_into_new_data_directory_creates_it() {
    let dir = TempDir::new();
    let data_dir = dir.file("sd").join("3ds").join("system_enhancer");
    let store = ConfigStore::from_paths(&StorePaths::under(&data_dir));

    store.save(&Settings::new()).unwrap();

    assert!(data_dir.join("config.json").is_file());
}

#[test]
fn test_backup_lands_next_to_config() {
    let dir = TempDir::new();
    let paths = StorePaths::under(dir.path());
    let store = ConfigStore::from_paths(&paths);
    fs::write(&paths.config, "brightness=42\n").unwrap();

    assert!(store.backup().unwrap());

    assert_eq!(fs::read_to_string(&paths.backup).unwrap(), "brightness=42\n");
}
