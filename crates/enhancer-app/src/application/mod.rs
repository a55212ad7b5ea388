//! Application layer: screens, sessions and the ports they depend on.
//!
//! Nothing in this layer touches the file system, the console hardware or a
//! rendering surface.  It only sees the traits in [`ports`].
//!
//! # Sub-modules
//!
//! - **`input`**           – button bitmask and per-frame input snapshot.
//! - **`settings_screen`** – the five-page Enhanced Settings menu as a pure
//!   state machine that turns input into commands and a view model.
//! - **`overlay`**         – the battery overlay at its three feature levels.
//! - **`session`**         – runs a screen against the ports and keeps the
//!   last storage error for display.
//! - **`ports`**           – the traits implemented by `infrastructure`.

pub mod input;
pub mod overlay;
pub mod ports;
pub mod session;
pub mod settings_screen;
