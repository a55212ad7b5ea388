//! Platform adapters for power, memory, brightness and input.
//!
//! `host` implements the ports on a desktop host so the binaries can run
//! outside the console.  `mock` provides recording doubles for tests.

pub mod host;
pub mod mock;
