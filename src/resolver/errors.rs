//! Flag resolution error types.

use thiserror::Error;

use super::query::FlagSwitch;

/// Error raised while talking to the package-discovery utility.
///
/// In the default lenient mode the resolver swallows `Spawn` and `Failed`
/// and treats them as "no flags"; strict mode hands them to the caller.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("failed to spawn `{program}`")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`--{switch} {dependency}` exited with status {}", display_status(.status))]
    Failed {
        dependency: String,
        switch: FlagSwitch,
        status: Option<i32>,
        stderr: String,
    },

    #[error("`{dependency}` {found} is older than the required {required}")]
    VersionTooOld {
        dependency: String,
        found: semver::Version,
        required: semver::Version,
    },

    #[error("invalid version `{value}`")]
    InvalidVersion {
        value: String,
        #[source]
        source: semver::Error,
    },
}

fn display_status(status: &Option<i32>) -> String {
    match status {
        Some(code) => code.to_string(),
        None => "unknown (terminated by signal)".to_string(),
    }
}

impl ResolveError {
    /// Hint shown after the error chain by the CLI.
    pub fn help(&self) -> Option<String> {
        match self {
            ResolveError::Spawn { program, .. } => Some(format!(
                "help: install pkg-config or point PKG_CONFIG at it (tried `{}`)",
                program
            )),
            ResolveError::Failed {
                dependency, stderr, ..
            } => {
                let mut help = format!(
                    "help: make sure `{}` is installed and its .pc file is on PKG_CONFIG_PATH",
                    dependency
                );
                let stderr = stderr.trim();
                if !stderr.is_empty() {
                    help = format!("{}\n{}", stderr, help);
                }
                Some(help)
            }
            ResolveError::VersionTooOld { dependency, .. } => {
                Some(format!("help: upgrade `{}`", dependency))
            }
            ResolveError::InvalidVersion { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_message() {
        let err = ResolveError::Failed {
            dependency: "libmongoc-1.0".to_string(),
            switch: FlagSwitch::Cflags,
            status: Some(1),
            stderr: "Package libmongoc-1.0 was not found".to_string(),
        };

        assert_eq!(err.to_string(), "`--cflags libmongoc-1.0` exited with status 1");
        let help = err.help().unwrap();
        assert!(help.starts_with("Package libmongoc-1.0 was not found"));
        assert!(help.contains("PKG_CONFIG_PATH"));
    }

    #[test]
    fn test_failed_by_signal() {
        let err = ResolveError::Failed {
            dependency: "libmongoc-1.0".to_string(),
            switch: FlagSwitch::LibsOnlyUpperL,
            status: None,
            stderr: String::new(),
        };

        assert!(err.to_string().contains("terminated by signal"));
    }

    #[test]
    fn test_version_too_old_message() {
        let err = ResolveError::VersionTooOld {
            dependency: "libmongoc-1.0".to_string(),
            found: semver::Version::new(1, 4, 2),
            required: semver::Version::new(1, 6, 0),
        };

        assert_eq!(
            err.to_string(),
            "`libmongoc-1.0` 1.4.2 is older than the required 1.6.0"
        );
    }
}
