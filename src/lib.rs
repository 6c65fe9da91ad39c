//! stats-pusher-build - build configuration for the uWSGI MongoDB stats pusher
//!
//! This crate resolves the compiler flags, linker flags, libraries and
//! source list needed to build the `stats_pusher_mongodb` plugin, asking
//! `pkg-config` about `libmongoc-1.0`.

pub mod core;
pub mod ops;
pub mod resolver;
pub mod util;

/// Test utilities and mocks for unit tests.
///
/// Only available when compiling tests. Provides an in-memory
/// package-discovery utility.
#[cfg(test)]
pub mod test_support;

pub use crate::core::{BuildConfiguration, PluginSpec};

pub use resolver::{resolve, FlagResolver, PackageQuery, PkgConfig, ResolveError};
pub use util::context::GlobalContext;
