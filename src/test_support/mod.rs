//! Test utilities and mocks for unit tests.
//!
//! Provides an in-memory [`PackageQuery`] so resolver and doctor logic can
//! be exercised without a real `pkg-config` on the machine.
//!
//! # Example
//!
//! ```rust,ignore
//! use stats_pusher_build::test_support::{MockPackageQuery, MockQueryOutput};
//!
//! let query = MockPackageQuery::new()
//!     .respond(FlagSwitch::Cflags, MockQueryOutput::success("-I/usr/include"));
//! let config = FlagResolver::new(PluginSpec::default(), &query).resolve();
//! assert_eq!(query.calls().len(), 3);
//! ```

use std::collections::HashMap;
use std::io;
use std::sync::Mutex;

use crate::resolver::{FlagSwitch, PackageQuery, QueryOutput, ResolveError};

/// Canned output for one query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockQueryOutput {
    /// Exit status code (0 = success).
    pub status: i32,
    /// Standard output.
    pub stdout: String,
    /// Standard error.
    pub stderr: String,
}

impl MockQueryOutput {
    /// Create a successful output with the given stdout.
    pub fn success(stdout: impl Into<String>) -> Self {
        MockQueryOutput {
            status: 0,
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    /// Create a failure output with the given stderr and status code.
    pub fn failure(status: i32, stderr: impl Into<String>) -> Self {
        MockQueryOutput {
            status,
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }
}

impl Default for MockQueryOutput {
    fn default() -> Self {
        MockQueryOutput::success("")
    }
}

impl From<MockQueryOutput> for QueryOutput {
    fn from(output: MockQueryOutput) -> Self {
        QueryOutput {
            stdout: output.stdout,
            stderr: output.stderr,
            status: Some(output.status),
        }
    }
}

/// Mock package-discovery utility.
///
/// Switches without a canned response answer with empty, successful
/// output. Every call is recorded in order.
#[derive(Debug, Default)]
pub struct MockPackageQuery {
    responses: HashMap<FlagSwitch, MockQueryOutput>,
    missing: bool,
    calls: Mutex<Vec<(String, FlagSwitch)>>,
}

impl MockPackageQuery {
    pub fn new() -> Self {
        MockPackageQuery::default()
    }

    /// A utility that cannot be spawned at all.
    pub fn missing() -> Self {
        MockPackageQuery {
            missing: true,
            ..Default::default()
        }
    }

    /// Set the response for a switch.
    pub fn respond(mut self, switch: FlagSwitch, output: MockQueryOutput) -> Self {
        self.responses.insert(switch, output);
        self
    }

    /// All `(dependency, switch)` pairs queried so far.
    pub fn calls(&self) -> Vec<(String, FlagSwitch)> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }
}

impl PackageQuery for MockPackageQuery {
    fn query(&self, dependency: &str, switch: FlagSwitch) -> Result<QueryOutput, ResolveError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push((dependency.to_string(), switch));
        }

        if self.missing {
            return Err(ResolveError::Spawn {
                program: "pkg-config".to_string(),
                source: io::Error::new(io::ErrorKind::NotFound, "No such file or directory"),
            });
        }

        Ok(self
            .responses
            .get(&switch)
            .cloned()
            .unwrap_or_default()
            .into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_switch_answers_empty() {
        let query = MockPackageQuery::new();
        let output = query.query("libmongoc-1.0", FlagSwitch::Cflags).unwrap();

        assert!(output.success());
        assert!(output.stdout.is_empty());
    }

    #[test]
    fn test_records_calls() {
        let query = MockPackageQuery::new()
            .respond(FlagSwitch::ModVersion, MockQueryOutput::success("1.24.3\n"));

        let flags = query
            .query_flags("libmongoc-1.0", FlagSwitch::ModVersion)
            .unwrap();
        assert_eq!(flags, vec!["1.24.3"]);
        assert_eq!(
            query.calls(),
            vec![("libmongoc-1.0".to_string(), FlagSwitch::ModVersion)]
        );
    }

    #[test]
    fn test_missing_records_and_fails() {
        let query = MockPackageQuery::missing();
        assert!(query.query("libmongoc-1.0", FlagSwitch::Exists).is_err());
        assert_eq!(query.calls().len(), 1);
    }
}
