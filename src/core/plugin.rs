//! Static declaration of the plugin being built.

use crate::util::config::PluginSettings;

/// Name the uWSGI build system registers the plugin under.
pub const PLUGIN_NAME: &str = "stats_pusher_mongodb";

/// pkg-config module of the MongoDB C driver.
pub const MONGOC_DEPENDENCY: &str = "libmongoc-1.0";

/// Compile flags declared before any discovered ones.
pub const STATIC_CFLAGS: [&str; 2] = ["-std=c++11", "-Wno-error"];

/// Main plugin logic and the metrics transformation unit.
pub const PLUGIN_SOURCES: [&str; 2] = ["plugin.cc", "transform_metrics.cc"];

/// Everything about the plugin that is known before querying the system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginSpec {
    name: String,
    dependency: String,
    cflags: Vec<String>,
    sources: Vec<String>,
}

impl PluginSpec {
    /// The MongoDB stats pusher as shipped.
    pub fn mongodb_stats_pusher() -> Self {
        PluginSpec {
            name: PLUGIN_NAME.to_string(),
            dependency: MONGOC_DEPENDENCY.to_string(),
            cflags: STATIC_CFLAGS.iter().map(|s| s.to_string()).collect(),
            sources: PLUGIN_SOURCES.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Apply config overrides on top of the shipped declaration.
    pub fn from_settings(settings: &PluginSettings) -> Self {
        let mut spec = PluginSpec::mongodb_stats_pusher();
        if let Some(name) = &settings.name {
            spec.name = name.clone();
        }
        if let Some(dependency) = &settings.dependency {
            spec.dependency = dependency.clone();
        }
        if let Some(cflags) = &settings.cflags {
            spec.cflags = cflags.clone();
        }
        if let Some(sources) = &settings.sources {
            spec.sources = sources.clone();
        }
        spec
    }

    pub fn with_dependency(mut self, dependency: impl Into<String>) -> Self {
        self.dependency = dependency.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn dependency(&self) -> &str {
        &self.dependency
    }

    pub fn cflags(&self) -> &[String] {
        &self.cflags
    }

    pub fn sources(&self) -> &[String] {
        &self.sources
    }
}

impl Default for PluginSpec {
    fn default() -> Self {
        PluginSpec::mongodb_stats_pusher()
    }
}
