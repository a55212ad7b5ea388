//! Whole-file parsing and encoding.

use tracing::trace;

use crate::domain::settings::Settings;
use crate::format::line::{encode_line, parse_line, Entry, LineError};

/// A line that [`ConfigDocument::parse`] did not accept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkippedLine {
    /// 1-based line number in the source text.
    pub line_number: usize,
    pub reason: LineError,
}

/// The parsed contents of a config file.
///
/// Entries are kept in file order, duplicates included, so lookups can follow
/// the scanner's "first occurrence wins" rule.  Blank lines are ignored
/// silently; every other rejected line is recorded in [`skipped`].
///
/// [`skipped`]: ConfigDocument::skipped
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigDocument<'a> {
    entries: Vec<Entry<'a>>,
    skipped: Vec<SkippedLine>,
}

impl<'a> ConfigDocument<'a> {
    /// Parses `text`, never failing.
    pub fn parse(text: &'a str) -> Self {
        let mut doc = Self::default();
        for (index, line) in text.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            match parse_line(line) {
                Ok(entry) => doc.entries.push(entry),
                Err(reason) => doc.skipped.push(SkippedLine {
                    line_number: index + 1,
                    reason,
                }),
            }
        }
        doc
    }

    pub fn entries(&self) -> &[Entry<'a>] {
        &self.entries
    }

    pub fn skipped(&self) -> &[SkippedLine] {
        &self.skipped
    }

    /// Value of the first entry named `name`.
    pub fn first(&self, name: &str) -> Option<&'a str> {
        self.entries
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| entry.value)
    }

    /// Builds a [`Settings`] mapping from the entries.
    ///
    /// The first occurrence of a duplicated name wins.  Every entry that
    /// [`parse_line`] accepted is also a valid [`Settings`] entry, so nothing
    /// else is lost and saving the mapping rewrites every parsed line.
    pub fn to_settings(&self) -> Settings {
        let mut settings = Settings::new();
        for entry in &self.entries {
            if settings.contains(entry.name) {
                continue;
            }
            if let Err(e) = settings.set_raw(entry.name, entry.value) {
                trace!("dropping entry {:?}: {e}", entry.name);
            }
        }
        settings
    }
}

/// Encodes every entry of `settings` as `name=value` lines in insertion order.
pub fn encode_settings(settings: &Settings) -> String {
    settings
        .iter()
        .map(|(name, value)| encode_line(name, value))
        .collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
