//! Global context for command execution.
//!
//! Holds the working directory and knows where configuration lives.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::util::config::{self, Config};

/// Working directory and config locations for one invocation.
#[derive(Debug, Clone)]
pub struct GlobalContext {
    /// Current working directory
    cwd: PathBuf,

    /// Global config directory, if the platform has one
    config_dir: Option<PathBuf>,
}

impl GlobalContext {
    /// Create a new GlobalContext for the process working directory.
    pub fn new() -> Result<Self> {
        let cwd = std::env::current_dir().context("failed to get current directory")?;
        Ok(GlobalContext::with_cwd(cwd))
    }

    /// Create a GlobalContext with a specific working directory.
    pub fn with_cwd(cwd: PathBuf) -> Self {
        GlobalContext {
            cwd,
            config_dir: config::global_config_dir(),
        }
    }

    /// Use a specific global config directory (or none).
    pub fn with_config_dir(mut self, config_dir: Option<PathBuf>) -> Self {
        self.config_dir = config_dir;
        self
    }

    /// Get the current working directory.
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// Get the global config file path.
    pub fn config_path(&self) -> Option<PathBuf> {
        self.config_dir.as_ref().map(|dir| dir.join("config.toml"))
    }

    /// Get the project config file path.
    pub fn project_config_path(&self) -> PathBuf {
        config::project_config_path(&self.cwd)
    }

    /// Load configuration.
    ///
    /// An explicit path replaces the project layer and must exist. The
    /// global layer is always consulted.
    pub fn load_config(&self, explicit: Option<&Path>) -> Result<Config> {
        let global = self.config_path();

        let Some(path) = explicit else {
            return Ok(config::load_config(
                global.as_deref(),
                &self.project_config_path(),
            ));
        };

        let path = if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.cwd.join(path)
        };
        let explicit = Config::load(&path)?;

        let mut merged = Config::default();
        if let Some(global) = global.filter(|p| p.exists()) {
            merged.merge(Config::load_or_default(&global));
        }
        merged.merge(explicit);
        Ok(merged)
    }
}
