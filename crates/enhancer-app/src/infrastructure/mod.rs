//! Infrastructure layer.
//!
//! Contains the OS-facing adapters: the config file and flag files on disk,
//! the launcher TOML config, host power/memory queries, the text console, and
//! the start-up wiring used by the binaries.
//!
//! **Dependency rule**: this layer may depend on `application` and
//! `enhancer_core`, but MUST NOT be imported by the `application` layer
//! outside of tests.

pub mod console;
pub mod launcher;
pub mod platform;
pub mod storage;
