//! Domain entities for System Enhancer.
//!
//! This module contains pure rules with no infrastructure dependencies: no
//! file access, no console calls, no rendering.  Everything here can be
//! compiled and tested on any host.
//!
//! Code in outer layers (the config store, the screens, the binaries) depends
//! on the domain, but the domain never depends on them.

/// Battery bands, the critical-battery pulse, and the brightness policy.
pub mod power;

/// The settings mapping and its typed accessors.
///
/// See [`settings::Settings`] for the main type.
pub mod settings;
