//! Core data structures.
//!
//! - [`PluginSpec`]: what is declared about the plugin up front
//! - [`BuildConfiguration`]: what the build orchestrator receives

pub mod build_config;
pub mod plugin;

pub use build_config::{BuildConfiguration, Section};
pub use plugin::{PluginSpec, MONGOC_DEPENDENCY, PLUGIN_NAME, PLUGIN_SOURCES, STATIC_CFLAGS};
