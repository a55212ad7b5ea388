//! Integration tests for the enhancer-core config codec.
//!
//! These tests drive the public API the way the config store does: parse a
//! whole file, look keys up with the scanner rules, convert to a [`Settings`]
//! mapping, and encode it again.

use enhancer_core::{
    encode_settings, ConfigDocument, KnownSettings, SettingValue, Settings, BATTERY_SAVER,
    BRIGHTNESS,
};

#[test]
fn test_malformed_line_before_valid_entry_does_not_hide_it() {
    let text = "this line has no separator\nbrightness=42\n";
    let doc = ConfigDocument::parse(text);

    assert_eq!(doc.first(BRIGHTNESS).map(SettingValue::parse_int), Some(42));
    assert_eq!(doc.skipped().len(), 1);
}

#[test]
fn test_boolean_strictness_through_document_lookup() {
    for raw in ["true", "yes", "01", "on", "0"] {
        let text = format!("battery_saver={raw}\n");
        let doc = ConfigDocument::parse(&text);
        let value = doc.first(BATTERY_SAVER).map(SettingValue::parse_bool);
        assert_eq!(value, Some(false), "{raw:?} must read as false");
    }
}

#[test]
fn test_known_settings_survive_encode_and_parse_with_unknown_keys() {
    // Arrange – a file written by a newer build with an extra key
    let text = "theme=dark\nbattery_saver=0\nbrightness=100\n";
    let mut settings = ConfigDocument::parse(text).to_settings();

    // Act – change the known keys and write everything back
    KnownSettings {
        battery_saver: true,
        brightness: 30,
    }
    .write_into(&mut settings);
    let encoded = encode_settings(&settings);

    // Assert – order kept, unknown key kept, known keys updated
    assert_eq!(encoded, "theme=dark\nbattery_saver=1\nbrightness=30\n");
}

#[test]
fn test_windows_line_endings_parse_like_unix() {
    let unix: Settings = ConfigDocument::parse("battery_saver=1\nbrightness=42\n").to_settings();
    let dos: Settings = ConfigDocument::parse("battery_saver=1\r\nbrightness=42\r\n").to_settings();
    assert_eq!(unix, dos);
}
