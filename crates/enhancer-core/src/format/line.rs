//! Single-line codec for `name=value` entries.
//!
//! Parsing rules (these match every config file the console tools have
//! ever written, including hand-edited ones):
//!
//! 1. The name is everything before the first `=`.  It must be 1–63 bytes.
//!    It is **not** trimmed: `brightness =5` has the name `"brightness "`.
//! 2. Whitespace after the `=` is skipped.
//! 3. The value is the following run of non-whitespace characters.  It must
//!    be non-empty; anything past 63 bytes is truncated and anything after
//!    the run is ignored.

use thiserror::Error;

use crate::domain::settings::{is_token_space, MAX_TOKEN_LEN};

/// One parsed `name=value` line, borrowing from the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entry<'a> {
    pub name: &'a str,
    pub value: &'a str,
}

/// Reason a line was not accepted as an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LineError {
    #[error("no '=' separator")]
    MissingSeparator,

    #[error("name before '=' is empty")]
    EmptyName,

    #[error("name is {len} bytes, maximum is {max}")]
    NameTooLong { len: usize, max: usize },

    #[error("no value after '='")]
    EmptyValue,
}

/// Parses one line (with or without its trailing newline).
///
/// # Errors
///
/// Returns [`LineError`] when the line is not a usable entry.  Callers treat
/// every error as "skip this line".
///
/// # Examples
///
/// ```rust
/// use enhancer_core::format::line::{parse_line, Entry, LineError};
///
/// assert_eq!(
///     parse_line("brightness=42\n"),
///     Ok(Entry { name: "brightness", value: "42" })
/// );
/// assert_eq!(parse_line("garbage"), Err(LineError::MissingSeparator));
/// ```
pub fn parse_line(line: &str) -> Result<Entry<'_>, LineError> {
    let (name, rest) = line.split_once('=').ok_or(LineError::MissingSeparator)?;

    if name.is_empty() {
        return Err(LineError::EmptyName);
    }
    if name.len() > MAX_TOKEN_LEN {
        return Err(LineError::NameTooLong {
            len: name.len(),
            max: MAX_TOKEN_LEN,
        });
    }

    let rest = rest.trim_start_matches(is_token_space);
    let end = rest.find(is_token_space).unwrap_or(rest.len());
    let value = truncate_to_boundary(&rest[..end], MAX_TOKEN_LEN);
    if value.is_empty() {
        return Err(LineError::EmptyValue);
    }

    Ok(Entry { name, value })
}

/// Encodes one entry as a newline-terminated line.
pub fn encode_line(name: &str, value: &str) -> String {
    format!("{name}={value}\n")
}

/// Cuts `s` to at most `max` bytes without splitting a UTF-8 character.
fn truncate_to_boundary(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

// ── Tests ─────────────────────────────────────────────────────────────────────
