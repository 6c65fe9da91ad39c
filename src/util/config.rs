//! Configuration file support.
//!
//! Two locations are read:
//! - Global: `<config dir>/stats-pusher-build/config.toml` - user-wide defaults
//! - Project: `.stats-pusher/config.toml` - overrides for one checkout
//!
//! Project config takes precedence over global config. With neither file
//! present the shipped plugin declaration and lenient resolution apply.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Tool configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Plugin declaration overrides
    pub plugin: PluginSettings,

    /// Package-discovery settings
    pub pkg_config: PkgConfigSettings,
}

/// Overrides for the plugin declaration.
///
/// Lists replace the shipped lists outright; they are never appended to.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PluginSettings {
    /// Plugin name reported to the build system
    pub name: Option<String>,

    /// pkg-config module to query (e.g., libmongoc-1.0)
    pub dependency: Option<String>,

    /// Static compile flags placed before discovered ones
    pub cflags: Option<Vec<String>>,

    /// Source files of the plugin
    pub sources: Option<Vec<String>>,
}

/// How the package-discovery utility is run.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PkgConfigSettings {
    /// Program to run instead of `$PKG_CONFIG` / `pkg-config`
    pub program: Option<PathBuf>,

    /// Fail when the utility is missing or exits non-zero (default false)
    pub strict: Option<bool>,

    /// Minimum dependency version checked by `doctor` (e.g., "1.6.0")
    pub min_version: Option<String>,
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Load configuration with fallback to defaults if the file is missing
    /// or unreadable.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {:#}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: Config) {
        if other.plugin.name.is_some() {
            self.plugin.name = other.plugin.name;
        }
        if other.plugin.dependency.is_some() {
            self.plugin.dependency = other.plugin.dependency;
        }
        if other.plugin.cflags.is_some() {
            self.plugin.cflags = other.plugin.cflags;
        }
        if other.plugin.sources.is_some() {
            self.plugin.sources = other.plugin.sources;
        }

        if other.pkg_config.program.is_some() {
            self.pkg_config.program = other.pkg_config.program;
        }
        if other.pkg_config.strict.is_some() {
            self.pkg_config.strict = other.pkg_config.strict;
        }
        if other.pkg_config.min_version.is_some() {
            self.pkg_config.min_version = other.pkg_config.min_version;
        }
    }
}

/// Load merged configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config
/// 2. Global config
/// 3. Defaults
pub fn load_config(global_path: Option<&Path>, project_path: &Path) -> Config {
    let mut config = Config::default();

    if let Some(global_path) = global_path {
        if global_path.exists() {
            config.merge(Config::load_or_default(global_path));
        }
    }

    if project_path.exists() {
        config.merge(Config::load_or_default(project_path));
    }

    config
}

/// Get the global config directory.
pub fn global_config_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "stats-pusher-build")
        .map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the project config path (.stats-pusher/config.toml).
pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(".stats-pusher").join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.plugin.name.is_none());
        assert!(config.plugin.cflags.is_none());
        assert!(config.pkg_config.program.is_none());
        assert!(config.pkg_config.strict.is_none());
    }

    #[test]
    fn test_config_load() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.toml");

        std::fs::write(
            &config_path,
            r#"
[plugin]
dependency = "libmongoc-static-1.0"
cflags = ["-std=c++14", "-Wno-error"]

[pkg_config]
program = "/usr/bin/pkgconf"
strict = true
min_version = "1.6.0"
"#,
        )
        .unwrap();

        let config = Config::load(&config_path).unwrap();
        assert_eq!(
            config.plugin.dependency,
            Some("libmongoc-static-1.0".to_string())
        );
        assert_eq!(
            config.plugin.cflags,
            Some(vec!["-std=c++14".to_string(), "-Wno-error".to_string()])
        );
        assert!(config.plugin.sources.is_none());
        assert_eq!(
            config.pkg_config.program,
            Some(PathBuf::from("/usr/bin/pkgconf"))
        );
        assert_eq!(config.pkg_config.strict, Some(true));
        assert_eq!(config.pkg_config.min_version, Some("1.6.0".to_string()));
    }

    #[test]
    fn test_config_load_rejects_bad_toml() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.toml");
        std::fs::write(&config_path, "[pkg_config]\nstrict = \"yes\"\n").unwrap();

        let err = Config::load(&config_path).unwrap_err();
        assert!(format!("{:#}", err).contains("failed to parse config file"));

        // Falls back quietly when loaded leniently.
        let config = Config::load_or_default(&config_path);
        assert!(config.pkg_config.strict.is_none());
    }

    #[test]
    fn test_config_merge() {
        let mut base = Config::default();
        base.plugin.dependency = Some("libmongoc-1.0".to_string());
        base.pkg_config.min_version = Some("1.6.0".to_string());

        let mut override_cfg = Config::default();
        override_cfg.plugin.dependency = Some("libmongoc-2.0".to_string());
        override_cfg.pkg_config.strict = Some(true);

        base.merge(override_cfg);

        assert_eq!(base.plugin.dependency, Some("libmongoc-2.0".to_string()));
        assert_eq!(base.pkg_config.min_version, Some("1.6.0".to_string())); // Not overridden
        assert_eq!(base.pkg_config.strict, Some(true));
    }

    #[test]
    fn test_load_config_precedence() {
        let tmp = TempDir::new().unwrap();
        let global_path = tmp.path().join("global.toml");
        let project_path = tmp.path().join("project.toml");

        std::fs::write(
            &global_path,
            r#"
[plugin]
name = "global_name"
sources = ["a.cc"]

[pkg_config]
program = "pkgconf"
"#,
        )
        .unwrap();

        std::fs::write(
            &project_path,
            r#"
[plugin]
sources = ["plugin.cc", "transform_metrics.cc", "extra.cc"]
"#,
        )
        .unwrap();

        let config = load_config(Some(&global_path), &project_path);

        assert_eq!(config.plugin.name, Some("global_name".to_string()));
        assert_eq!(
            config.plugin.sources,
            Some(vec![
                "plugin.cc".to_string(),
                "transform_metrics.cc".to_string(),
                "extra.cc".to_string()
            ])
        );
        assert_eq!(config.pkg_config.program, Some(PathBuf::from("pkgconf")));
    }

    #[test]
    fn test_project_config_can_disable_strict() {
        let tmp = TempDir::new().unwrap();
        let global_path = tmp.path().join("global.toml");
        let project_path = tmp.path().join("project.toml");

        std::fs::write(&global_path, "[pkg_config]\nstrict = true\n").unwrap();
        std::fs::write(&project_path, "[pkg_config]\nstrict = false\n").unwrap();

        let config = load_config(Some(&global_path), &project_path);
        assert_eq!(config.pkg_config.strict, Some(false));

        // A project file that says nothing keeps the global setting.
        std::fs::write(&project_path, "[plugin]\nname = \"x\"\n").unwrap();
        let config = load_config(Some(&global_path), &project_path);
        assert_eq!(config.pkg_config.strict, Some(true));
    }

    #[test]
    fn test_load_config_missing_files() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(None, &tmp.path().join("nope.toml"));
        assert!(config.plugin.dependency.is_none());
    }

    #[test]
    fn test_project_config_path() {
        assert_eq!(
            project_config_path(Path::new("/src/plugin")),
            PathBuf::from("/src/plugin/.stats-pusher/config.toml")
        );
    }
}
