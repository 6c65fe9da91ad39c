//! Package-discovery queries.
//!
//! The resolver never spawns `pkg-config` itself. It goes through the
//! [`PackageQuery`] trait so that tests can hand it canned output.

use std::fmt;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::ResolveError;
use crate::util::config::PkgConfigSettings;
use crate::util::flags::split_flags;
use crate::util::process::ProcessBuilder;

/// Default program name for the package-discovery utility.
pub const DEFAULT_PKG_CONFIG: &str = "pkg-config";

/// Environment variable that overrides the utility program.
pub const PKG_CONFIG_ENV: &str = "PKG_CONFIG";

/// A `pkg-config` query switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlagSwitch {
    /// `--cflags`: preprocessor and compiler flags.
    Cflags,
    /// `--libs-only-l`: library names.
    LibsOnlyLowerL,
    /// `--libs-only-L`: library search paths.
    LibsOnlyUpperL,
    /// `--modversion`: installed version.
    ModVersion,
    /// `--exists`: answered through the exit status only.
    Exists,
}

impl FlagSwitch {
    /// The switch name without leading dashes.
    pub fn as_str(&self) -> &'static str {
        match self {
            FlagSwitch::Cflags => "cflags",
            FlagSwitch::LibsOnlyLowerL => "libs-only-l",
            FlagSwitch::LibsOnlyUpperL => "libs-only-L",
            FlagSwitch::ModVersion => "modversion",
            FlagSwitch::Exists => "exists",
        }
    }

    /// The command-line argument, e.g. `--libs-only-L`.
    pub fn as_arg(&self) -> String {
        format!("--{}", self.as_str())
    }
}

impl fmt::Display for FlagSwitch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Captured result of one query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryOutput {
    /// Standard output, lossily decoded.
    pub stdout: String,
    /// Standard error, lossily decoded.
    pub stderr: String,
    /// Exit code, `None` when killed by a signal.
    pub status: Option<i32>,
}

impl QueryOutput {
    /// Whether the utility exited with status zero.
    pub fn success(&self) -> bool {
        self.status == Some(0)
    }
}

/// Something that can answer package-discovery queries.
pub trait PackageQuery {
    /// Run one query against `dependency`.
    fn query(&self, dependency: &str, switch: FlagSwitch) -> Result<QueryOutput, ResolveError>;

    /// Run one query and split its output into flags.
    ///
    /// The exit status is not inspected.
    fn query_flags(&self, dependency: &str, switch: FlagSwitch) -> Result<Vec<String>, ResolveError> {
        let output = self.query(dependency, switch)?;
        Ok(split_flags(&output.stdout))
    }
}

impl<Q: PackageQuery + ?Sized> PackageQuery for &Q {
    fn query(&self, dependency: &str, switch: FlagSwitch) -> Result<QueryOutput, ResolveError> {
        (**self).query(dependency, switch)
    }

    fn query_flags(&self, dependency: &str, switch: FlagSwitch) -> Result<Vec<String>, ResolveError> {
        (**self).query_flags(dependency, switch)
    }
}

/// Process-backed [`PackageQuery`] running `pkg-config --<switch> <dependency>`.
#[derive(Debug, Clone)]
pub struct PkgConfig {
    program: PathBuf,
}

impl PkgConfig {
    /// Use a specific program.
    pub fn new(program: impl AsRef<Path>) -> Self {
        PkgConfig {
            program: program.as_ref().to_path_buf(),
        }
    }

    /// Use `$PKG_CONFIG` when set and non-empty, otherwise `pkg-config`.
    pub fn from_env() -> Self {
        match std::env::var(PKG_CONFIG_ENV) {
            Ok(program) if !program.trim().is_empty() => PkgConfig::new(program.trim()),
            _ => PkgConfig::new(DEFAULT_PKG_CONFIG),
        }
    }

    /// A configured program wins over the environment.
    pub fn from_settings(settings: &PkgConfigSettings) -> Self {
        match &settings.program {
            Some(program) => PkgConfig::new(program),
            None => PkgConfig::from_env(),
        }
    }

    /// The program that will be spawned.
    pub fn program(&self) -> &Path {
        &self.program
    }

    fn command(&self, dependency: &str, switch: FlagSwitch) -> ProcessBuilder {
        ProcessBuilder::new(&self.program)
            .arg(switch.as_arg())
            .arg(dependency)
    }
}

impl Default for PkgConfig {
    fn default() -> Self {
        PkgConfig::from_env()
    }
}

impl PackageQuery for PkgConfig {
    fn query(&self, dependency: &str, switch: FlagSwitch) -> Result<QueryOutput, ResolveError> {
        let cmd = self.command(dependency, switch);
        debug!("running `{}`", cmd.display_command());

        let output = cmd.exec()?;
        let output = QueryOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            status: output.status.code(),
        };

        debug!(
            "`{}` exited with {:?}: {:?}",
            cmd.display_command(),
            output.status,
            output.stdout.trim_end()
        );
        Ok(output)
    }
}
