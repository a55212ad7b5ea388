//! Settings model: an ordered name → raw value mapping with typed accessors.
//!
//! The config file stores every value as text.  [`Settings`] keeps that raw
//! text and layers two interpretations on top:
//!
//! - **boolean** – exactly `"1"` is `true`; anything else (including `"true"`,
//!   `"yes"` and `"01"`) is `false`.
//! - **integer** – lenient decimal conversion: optional sign, then leading
//!   digits; anything else stops the conversion, and no digits at all yields
//!   `0` instead of an error.
//!
//! # Why keep raw strings? (for beginners)
//!
//! The store does not enforce a schema.  A future build may add keys that
//! this build does not know about; keeping every value as the text that was
//! read means those keys survive a load → modify → save cycle unchanged.
//!
//! Entries keep insertion order, so a file written by [`Settings`] lists its
//! keys in the order they were first loaded or set.

use std::fmt;

use thiserror::Error;

/// Name of the boolean battery-saver setting.
pub const BATTERY_SAVER: &str = "battery_saver";

/// Name of the integer screen-brightness setting (0–100).
pub const BRIGHTNESS: &str = "brightness";

/// Longest name or value token the config file supports, in bytes.
pub const MAX_TOKEN_LEN: usize = 63;

/// Highest brightness level accepted by the display.
pub const MAX_BRIGHTNESS: u8 = 100;

/// Brightness used when the config file has no `brightness` entry.
pub const DEFAULT_BRIGHTNESS: u8 = 100;

/// Whitespace as the config scanner understands it (C `isspace` in the
/// default locale).
pub(crate) fn is_token_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0b' | '\x0c')
}

/// Error returned when a name or value cannot be stored in [`Settings`].
///
/// Every rule here exists so that whatever [`Settings`] accepts can be
/// written to the config file and read back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingError {
    #[error("setting name is empty")]
    EmptyName,

    #[error("setting name {0:?} contains '='")]
    NameContainsSeparator(String),

    #[error("setting name {0:?} contains a line break")]
    NameContainsLineBreak(String),

    #[error("setting name is {len} bytes, maximum is {max}")]
    NameTooLong { len: usize, max: usize },

    #[error("value for {name:?} is empty")]
    EmptyValue { name: String },

    #[error("value for {name:?} contains whitespace")]
    ValueContainsWhitespace { name: String },

    #[error("value for {name:?} is {len} bytes, maximum is {max}")]
    ValueTooLong { name: String, len: usize, max: usize },
}

/// A typed setting value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingValue {
    /// Stored as `0` or `1`.
    Bool(bool),
    /// Stored as a decimal literal.
    Int(i32),
}

impl SettingValue {
    /// Interprets a raw value token as a boolean: only `"1"` is `true`.
    pub fn parse_bool(raw: &str) -> bool {
        raw == "1"
    }

    /// Interprets a raw value token as an integer, yielding `0` for
    /// non-numeric input and saturating at the `i32` bounds.
    ///
    /// ```rust
    /// use enhancer_core::SettingValue;
    ///
    /// assert_eq!(SettingValue::parse_int("42"), 42);
    /// assert_eq!(SettingValue::parse_int("-7abc"), -7);
    /// assert_eq!(SettingValue::parse_int("abc"), 0);
    /// ```
    pub fn parse_int(raw: &str) -> i32 {
        let s = raw.trim_start_matches(is_token_space);
        let (negative, digits) = match s.as_bytes().first() {
            Some(b'-') => (true, &s[1..]),
            Some(b'+') => (false, &s[1..]),
            _ => (false, s),
        };

        // Cap the accumulator one past i32::MAX so "-2147483648" still fits.
        let limit = i64::from(i32::MAX) + 1;
        let magnitude = digits
            .bytes()
            .take_while(u8::is_ascii_digit)
            .fold(0i64, |acc, b| (acc * 10 + i64::from(b - b'0')).min(limit));

        let signed = if negative { -magnitude } else { magnitude };
        signed.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
    }

    /// Returns the text written to the config file for this value.
    pub fn encode(&self) -> String {
        match self {
            SettingValue::Bool(true) => "1".to_string(),
            SettingValue::Bool(false) => "0".to_string(),
            SettingValue::Int(n) => n.to_string(),
        }
    }
}

impl fmt::Display for SettingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl From<bool> for SettingValue {
    fn from(value: bool) -> Self {
        SettingValue::Bool(value)
    }
}

impl From<i32> for SettingValue {
    fn from(value: i32) -> Self {
        SettingValue::Int(value)
    }
}

impl From<u8> for SettingValue {
    fn from(value: u8) -> Self {
        SettingValue::Int(i32::from(value))
    }
}

/// Checks that `name` can be written as the left-hand side of a config line.
///
/// Names are taken verbatim up to the `=`, so spaces (leading ones included)
/// are allowed.  Only what would split or end the line is refused.
///
/// # Errors
///
/// Returns the first [`SettingError`] rule the name breaks.
pub fn validate_name(name: &str) -> Result<(), SettingError> {
    if name.is_empty() {
        return Err(SettingError::EmptyName);
    }
    if name.contains('=') {
        return Err(SettingError::NameContainsSeparator(name.to_string()));
    }
    if name.contains('\n') {
        return Err(SettingError::NameContainsLineBreak(name.to_string()));
    }
    if name.len() > MAX_TOKEN_LEN {
        return Err(SettingError::NameTooLong {
            len: name.len(),
            max: MAX_TOKEN_LEN,
        });
    }
    Ok(())
}

/// Checks that `value` can be written as the right-hand side of a config line.
///
/// # Errors
///
/// Returns the first [`SettingError`] rule the value breaks.
pub fn validate_value(name: &str, value: &str) -> Result<(), SettingError> {
    if value.is_empty() {
        return Err(SettingError::EmptyValue {
            name: name.to_string(),
        });
    }
    if value.chars().any(is_token_space) {
        return Err(SettingError::ValueContainsWhitespace {
            name: name.to_string(),
        });
    }
    if value.len() > MAX_TOKEN_LEN {
        return Err(SettingError::ValueTooLong {
            name: name.to_string(),
            len: value.len(),
            max: MAX_TOKEN_LEN,
        });
    }
    Ok(())
}

/// Ordered mapping from setting-name to raw string value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    entries: Vec<(String, String)>,
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the raw value stored for `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Returns `name` as a boolean, or `default` if absent.
    pub fn get_bool(&self, name: &str, default: bool) -> bool {
        self.get(name).map(SettingValue::parse_bool).unwrap_or(default)
    }

    /// Returns `name` as an integer, or `default` if absent.
    pub fn get_int(&self, name: &str, default: i32) -> i32 {
        self.get(name).map(SettingValue::parse_int).unwrap_or(default)
    }

    /// Stores a typed value, replacing any existing entry in place.
    ///
    /// # Errors
    ///
    /// Returns [`SettingError`] if the name cannot be written to the config
    /// file.
    pub fn set(&mut self, name: &str, value: impl Into<SettingValue>) -> Result<(), SettingError> {
        self.set_raw(name, &value.into().encode())
    }

    /// Stores a raw value, replacing any existing entry in place.
    ///
    /// # Errors
    ///
    /// Returns [`SettingError`] if the name or value cannot be written to the
    /// config file.
    pub fn set_raw(&mut self, name: &str, value: &str) -> Result<(), SettingError> {
        validate_name(name)?;
        validate_value(name, value)?;
        self.upsert(name, value.to_string());
        Ok(())
    }

    /// Removes `name`, returning its raw value if it was present.
    pub fn remove(&mut self, name: &str) -> Option<String> {
        let index = self.entries.iter().position(|(k, _)| k == name)?;
        Some(self.entries.remove(index).1)
    }

    /// Iterates over `(name, raw value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    fn upsert(&mut self, name: &str, value: String) {
        match self.entries.iter_mut().find(|(k, _)| k == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name.to_string(), value)),
        }
    }
}

/// Clamps a stored brightness value into the 0–100 range the display accepts.
pub fn clamp_brightness(value: i32) -> u8 {
    value.clamp(0, i32::from(MAX_BRIGHTNESS)) as u8
}

// ── Known settings ────────────────────────────────────────────────────────────

/// Typed view of the two settings the screens actually use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KnownSettings {
    pub battery_saver: bool,
    /// Always within 0–100.
    pub brightness: u8,
}

impl Default for KnownSettings {
    fn default() -> Self {
        Self {
            battery_saver: false,
            brightness: DEFAULT_BRIGHTNESS,
        }
    }
}

impl KnownSettings {
    /// Reads the known keys out of `settings`, using defaults for absent ones.
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            battery_saver: settings.get_bool(BATTERY_SAVER, false),
            brightness: clamp_brightness(
                settings.get_int(BRIGHTNESS, i32::from(DEFAULT_BRIGHTNESS)),
            ),
        }
    }

    /// Writes the known keys into `settings`, leaving every other key alone.
    pub fn write_into(&self, settings: &mut Settings) {
        settings.upsert(BATTERY_SAVER, SettingValue::Bool(self.battery_saver).encode());
        settings.upsert(BRIGHTNESS, SettingValue::from(self.brightness).encode());
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // ── Value interpretation ──────────────────────────────────────────────────

    #[test]
    fn test_parse_bool_accepts_only_literal_one() {
        assert!(SettingValue::parse_bool("1"));
        for raw in ["0", "true", "yes", "01", "1 ", "", "on"] {
            assert!(!SettingValue::parse_bool(raw), "{raw:?} must read as false");
        }
    }

    #[test]
    fn test_parse_int_reads_leading_digits_only() {
        assert_eq!(SettingValue::parse_int("42"), 42);
        assert_eq!(SettingValue::parse_int("42%"), 42);
        assert_eq!(SettingValue::parse_int("+8"), 8);
        assert_eq!(SettingValue::parse_int("-15"), -15);
    }

    #[test]
    fn test_parse_int_non_numeric_yields_zero() {
        assert_eq!(SettingValue::parse_int("bright"), 0);
        assert_eq!(SettingValue::parse_int("-"), 0);
        assert_eq!(SettingValue::parse_int(""), 0);
    }

    #[test]
    fn test_parse_int_saturates_instead_of_overflowing() {
        assert_eq!(SettingValue::parse_int("99999999999999999999"), i32::MAX);
        assert_eq!(SettingValue::parse_int("-99999999999999999999"), i32::MIN);
        assert_eq!(SettingValue::parse_int("-2147483648"), i32::MIN);
    }

    #[test]
    fn test_setting_value_encodes_bool_as_digit() {
        assert_eq!(SettingValue::Bool(true).encode(), "1");
        assert_eq!(SettingValue::Bool(false).encode(), "0");
        assert_eq!(SettingValue::Int(42).to_string(), "42");
    }

    // ── Settings mapping ──────────────────────────────────────────────────────

    #[test]
    fn test_settings_start_empty() {
        let settings = Settings::new();
        assert!(settings.is_empty());
        assert_eq!(settings.get(BATTERY_SAVER), None);
    }

    #[test]
    fn test_typed_getters_fall_back_to_default_when_absent() {
        let settings = Settings::new();
        assert!(settings.get_bool(BATTERY_SAVER, true));
        assert_eq!(settings.get_int(BRIGHTNESS, 55), 55);
    }

    #[test]
    fn test_set_replaces_existing_entry_in_place() {
        // Arrange
        let mut settings = Settings::new();
        settings.set(BATTERY_SAVER, true).unwrap();
        settings.set(BRIGHTNESS, 42).unwrap();

        // Act
        settings.set(BATTERY_SAVER, false).unwrap();

        // Assert – order kept, value replaced, no duplicate
        let pairs: Vec<_> = settings.iter().collect();
        assert_eq!(pairs, vec![(BATTERY_SAVER, "0"), (BRIGHTNESS, "42")]);
    }

    #[test]
    fn test_set_raw_rejects_unwritable_names() {
        let mut settings = Settings::new();
        assert_eq!(settings.set_raw("", "1"), Err(SettingError::EmptyName));
        assert!(matches!(
            settings.set_raw("a=b", "1"),
            Err(SettingError::NameContainsSeparator(_))
        ));
        assert!(matches!(
            settings.set_raw("battery\nsaver", "1"),
            Err(SettingError::NameContainsLineBreak(_))
        ));
        assert!(matches!(
            settings.set_raw(&"n".repeat(64), "1"),
            Err(SettingError::NameTooLong { len: 64, .. })
        ));
        assert!(settings.is_empty());
    }

    #[test]
    fn test_set_raw_accepts_names_with_spaces() {
        let mut settings = Settings::new();
        settings.set_raw("my key", "1").unwrap();
        settings.set_raw(" theme", "dark").unwrap();
        assert_eq!(settings.get("my key"), Some("1"));
        assert_eq!(settings.get(" theme"), Some("dark"));
        assert_eq!(settings.get("theme"), None);
    }

    #[test]
    fn test_set_raw_rejects_unwritable_values() {
        let mut settings = Settings::new();
        assert!(matches!(
            settings.set_raw("k", ""),
            Err(SettingError::EmptyValue { .. })
        ));
        assert!(matches!(
            settings.set_raw("k", "two words"),
            Err(SettingError::ValueContainsWhitespace { .. })
        ));
        assert!(matches!(
            settings.set_raw("k", &"v".repeat(64)),
            Err(SettingError::ValueTooLong { len: 64, .. })
        ));
    }

    #[test]
    fn test_set_raw_accepts_sixty_three_byte_tokens() {
        let mut settings = Settings::new();
        let name = "n".repeat(MAX_TOKEN_LEN);
        let value = "v".repeat(MAX_TOKEN_LEN);
        assert!(settings.set_raw(&name, &value).is_ok());
        assert_eq!(settings.get(&name), Some(value.as_str()));
    }

    #[test]
    fn test_remove_returns_previous_value() {
        let mut settings = Settings::new();
        settings.set_raw("theme", "dark").unwrap();
        assert_eq!(settings.remove("theme"), Some("dark".to_string()));
        assert_eq!(settings.remove("theme"), None);
    }

    // ── KnownSettings ─────────────────────────────────────────────────────────

    #[test]
    fn test_known_settings_default_is_saver_off_full_brightness() {
        let known = KnownSettings::default();
        assert!(!known.battery_saver);
        assert_eq!(known.brightness, 100);
    }

    #[test]
    fn test_known_settings_clamps_stored_brightness() {
        let mut settings = Settings::new();
        settings.set(BRIGHTNESS, 250).unwrap();
        assert_eq!(KnownSettings::from_settings(&settings).brightness, 100);

        settings.set(BRIGHTNESS, -20).unwrap();
        assert_eq!(KnownSettings::from_settings(&settings).brightness, 0);
    }

    #[test]
    fn test_known_settings_write_into_preserves_other_keys() {
        // Arrange
        let mut settings = Settings::new();
        settings.set_raw("theme", "dark").unwrap();
        let known = KnownSettings {
            battery_saver: true,
            brightness: 40,
        };

        // Act
        known.write_into(&mut settings);

        // Assert
        assert_eq!(settings.get("theme"), Some("dark"));
        assert_eq!(settings.get(BATTERY_SAVER), Some("1"));
        assert_eq!(settings.get(BRIGHTNESS), Some("40"));
        assert_eq!(KnownSettings::from_settings(&settings), known);
    }
}
