//! On-disk format of the config file.
//!
//! Format (one entry per line, no quoting, no comments, no sections):
//! ```text
//! <name>=<value>\n
//! ```
//!
//! Booleans are written as `0` or `1`; integers as decimal literals.  The
//! file is historically named `config.json` even though it is not JSON.
//!
//! - **`line`** – parse and encode a single `name=value` line.
//! - **`document`** – parse a whole file into ordered entries (remembering
//!   which lines were skipped and why) and encode a [`crate::Settings`]
//!   mapping back to text.

pub mod document;
pub mod line;
