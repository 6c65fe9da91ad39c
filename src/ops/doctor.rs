//! Environment health checks.
//!
//! Resolution itself never fails loudly: a missing `pkg-config` or an
//! unregistered `libmongoc-1.0` only shows up later as a compiler or
//! linker error. `doctor` checks for those conditions up front.
//!
//! ## Usage
//!
//! ```bash
//! stats-pusher-build doctor           # Quick check
//! stats-pusher-build doctor --verbose # Detailed output
//! ```
//!
//! ## Checks Performed
//!
//! - pkg-config availability
//! - Dependency registered with pkg-config (`--exists`)
//! - Dependency version against `pkg_config.min_version`
//! - C++ compiler availability (optional)
//! - Plugin sources present in the working directory (optional)

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use semver::Version;

use crate::core::PluginSpec;
use crate::resolver::{FlagSwitch, PackageQuery, PkgConfig, ResolveError};
use crate::util::process::{find_cxx_compiler, find_executable, ProcessBuilder};
use crate::util::{Config, GlobalContext};

/// Result of a single health check.
#[derive(Debug, Clone)]
pub struct CheckResult {
    /// Name of the check
    pub name: String,

    /// Whether the check passed
    pub passed: bool,

    /// Human-readable status message
    pub message: String,

    /// Path to the tool or file (if applicable)
    pub path: Option<PathBuf>,

    /// Version string (if applicable)
    pub version: Option<String>,

    /// How long the check took
    pub duration: Duration,

    /// Whether this check is required or optional
    pub required: bool,
}

impl CheckResult {
    /// Create a passing check result.
    pub fn pass(name: impl Into<String>, message: impl Into<String>) -> Self {
        CheckResult {
            name: name.into(),
            passed: true,
            message: message.into(),
            path: None,
            version: None,
            duration: Duration::ZERO,
            required: true,
        }
    }

    /// Create a failing check result.
    pub fn fail(name: impl Into<String>, message: impl Into<String>) -> Self {
        CheckResult {
            passed: false,
            ..CheckResult::pass(name, message)
        }
    }

    /// Mark this check as optional.
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    pub fn with_path(mut self, path: PathBuf) -> Self {
        self.path = Some(path);
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }
}

/// Summary of all health checks.
#[derive(Debug, Clone, Default)]
pub struct DoctorReport {
    /// Individual check results
    pub checks: Vec<CheckResult>,

    /// Total time taken
    pub total_duration: Duration,

    /// Environment information
    pub environment: BTreeMap<String, String>,
}

impl DoctorReport {
    pub fn new() -> Self {
        DoctorReport::default()
    }

    pub fn add(&mut self, check: CheckResult) {
        self.checks.push(check);
    }

    /// Check if all required checks passed.
    pub fn all_required_passed(&self) -> bool {
        self.checks.iter().filter(|c| c.required).all(|c| c.passed)
    }

    pub fn passed_count(&self) -> usize {
        self.checks.iter().filter(|c| c.passed).count()
    }

    pub fn failed_count(&self) -> usize {
        self.checks.iter().filter(|c| !c.passed).count()
    }

    pub fn required_failed_count(&self) -> usize {
        self.checks
            .iter()
            .filter(|c| c.required && !c.passed)
            .count()
    }
}

/// Run every check against the system `pkg-config`.
pub fn doctor(ctx: &GlobalContext, config: &Config) -> DoctorReport {
    let start = Instant::now();
    let spec = PluginSpec::from_settings(&config.plugin);
    let pkg_config = PkgConfig::from_settings(&config.pkg_config);

    let mut report = DoctorReport::new();
    report
        .environment
        .insert("os".to_string(), std::env::consts::OS.to_string());
    report
        .environment
        .insert("arch".to_string(), std::env::consts::ARCH.to_string());
    report
        .environment
        .insert("plugin".to_string(), spec.name().to_string());
    report
        .environment
        .insert("dependency".to_string(), spec.dependency().to_string());

    report.add(check_pkg_config(&pkg_config));
    report.add(check_dependency(&pkg_config, spec.dependency()));
    report.add(check_dependency_version(
        &pkg_config,
        spec.dependency(),
        config.pkg_config.min_version.as_deref(),
    ));
    report.add(check_cxx_compiler());
    for check in check_sources(ctx.cwd(), spec.sources()) {
        report.add(check);
    }

    report.total_duration = start.elapsed();
    report
}

/// Check that the discovery utility can be run.
fn check_pkg_config(pkg_config: &PkgConfig) -> CheckResult {
    let start = Instant::now();
    let program = pkg_config.program();

    if let Ok(output) = ProcessBuilder::new(program).arg("--version").exec() {
        if output.status.success() {
            let version = String::from_utf8_lossy(&output.stdout).trim().to_string();
            let mut result =
                CheckResult::pass("pkg-config", format!("{} is available", program.display()))
                    .with_version(version)
                    .with_duration(start.elapsed());
            if let Some(path) = find_executable(program) {
                result = result.with_path(path);
            }
            return result;
        }
    }

    CheckResult::fail(
        "pkg-config",
        format!(
            "`{}` not found (install pkg-config or set PKG_CONFIG)",
            program.display()
        ),
    )
    .with_duration(start.elapsed())
}

/// Check that the dependency is registered.
fn check_dependency<Q: PackageQuery>(query: &Q, dependency: &str) -> CheckResult {
    let start = Instant::now();

    let result = match query.query(dependency, FlagSwitch::Exists) {
        Ok(output) if output.success() => {
            CheckResult::pass(dependency, format!("`{}` is registered", dependency))
        }
        Ok(output) => {
            let stderr = output.stderr.trim();
            let message = if stderr.is_empty() {
                format!("`{}` not found on PKG_CONFIG_PATH", dependency)
            } else {
                stderr.to_string()
            };
            CheckResult::fail(dependency, message)
        }
        Err(err) => CheckResult::fail(dependency, format!("could not query `{}`: {}", dependency, err)),
    };

    result.with_duration(start.elapsed())
}

/// Check the dependency version, against a minimum when one is configured.
fn check_dependency_version<Q: PackageQuery>(
    query: &Q,
    dependency: &str,
    min_version: Option<&str>,
) -> CheckResult {
    let start = Instant::now();
    let name = format!("{} version", dependency);

    let found = match query.query(dependency, FlagSwitch::ModVersion) {
        Ok(output) if output.success() && !output.stdout.trim().is_empty() => {
            output.stdout.trim().to_string()
        }
        _ => {
            let result = CheckResult::fail(&name, "version unknown").with_duration(start.elapsed());
            return if min_version.is_some() {
                result
            } else {
                result.optional()
            };
        }
    };

    let Some(min_version) = min_version else {
        return CheckResult::pass(&name, format!("{} {}", dependency, found))
            .with_version(found)
            .with_duration(start.elapsed())
            .optional();
    };

    let result = match ensure_min_version(dependency, &found, min_version) {
        Ok(_) => CheckResult::pass(
            &name,
            format!("{} {} (>= {} required)", dependency, found, min_version),
        ),
        Err(err) => CheckResult::fail(&name, err.to_string()),
    };

    result.with_version(found).with_duration(start.elapsed())
}

/// Check for a C++ compiler.
fn check_cxx_compiler() -> CheckResult {
    let start = Instant::now();

    let Some(path) = find_cxx_compiler() else {
        return CheckResult::fail(
            "C++ Compiler",
            "No C++ compiler found (tried $CXX, c++, clang++, g++)",
        )
        .with_duration(start.elapsed())
        .optional();
    };

    let mut result = CheckResult::pass("C++ Compiler", format!("Found {}", path.display()));
    if let Ok(output) = ProcessBuilder::new(&path).arg("--version").exec() {
        let text = String::from_utf8_lossy(&output.stdout);
        if let Some(line) = text.lines().map(str::trim).find(|l| !l.is_empty()) {
            result = result.with_version(line);
        }
    }

    result
        .with_path(path)
        .with_duration(start.elapsed())
        .optional()
}

/// Check that each plugin source exists under `dir`.
fn check_sources(dir: &Path, sources: &[String]) -> Vec<CheckResult> {
    sources
        .iter()
        .map(|source| {
            let path = dir.join(source);
            let name = format!("Source {}", source);
            let result = if path.is_file() {
                CheckResult::pass(name, "present")
            } else {
                CheckResult::fail(name, format!("{} not found", path.display()))
            };
            result.with_path(path).optional()
        })
        .collect()
}

/// Parse a pkg-config version leniently: `1.6` reads as `1.6.0`.
pub fn parse_version(value: &str) -> Result<Version, ResolveError> {
    let value = value.trim();
    let split = value.find(['-', '+']).unwrap_or(value.len());
    let (core, rest) = value.split_at(split);

    let mut padded = core.to_string();
    for _ in core.matches('.').count()..2 {
        padded.push_str(".0");
    }
    padded.push_str(rest);

    Version::parse(&padded).map_err(|source| ResolveError::InvalidVersion {
        value: value.to_string(),
        source,
    })
}

/// Require `found >= required`.
pub fn ensure_min_version(
    dependency: &str,
    found: &str,
    required: &str,
) -> Result<Version, ResolveError> {
    let found = parse_version(found)?;
    let required = parse_version(required)?;

    if found < required {
        return Err(ResolveError::VersionTooOld {
            dependency: dependency.to_string(),
            found,
            required,
        });
    }
    Ok(found)
}

/// Format the doctor report for display.
pub fn format_report(report: &DoctorReport, verbose: bool) -> String {
    use std::fmt::Write;

    let mut output = String::new();

    writeln!(output, "stats-pusher-build doctor").unwrap();
    writeln!(output, "=========================\n").unwrap();

    if verbose {
        writeln!(output, "Environment:").unwrap();
        for (key, value) in &report.environment {
            writeln!(output, "  {}: {}", key, value).unwrap();
        }
        writeln!(output).unwrap();
    }

    writeln!(output, "Checks:").unwrap();
    for check in &report.checks {
        let status = if check.passed { "[OK]" } else { "[!!]" };
        let required = if check.required { "" } else { " (optional)" };

        writeln!(output, "  {} {}{}", status, check.name, required).unwrap();

        // Failures always say why.
        if verbose || !check.passed {
            writeln!(output, "      {}", check.message).unwrap();
        }
        if verbose {
            if let Some(path) = &check.path {
                writeln!(output, "      Path: {}", path.display()).unwrap();
            }
            if let Some(version) = &check.version {
                writeln!(output, "      Version: {}", version).unwrap();
            }
        }
    }

    writeln!(output).unwrap();

    let passed = report.passed_count();
    let failed = report.failed_count();
    let required_failed = report.required_failed_count();

    writeln!(output, "Summary: {} passed, {} failed", passed, failed).unwrap();

    if required_failed > 0 {
        writeln!(
            output,
            "\nWarning: {} required check(s) failed. The plugin will likely fail to compile or link.",
            required_failed
        )
        .unwrap();
    } else if failed > 0 {
        writeln!(
            output,
            "\nAll required checks passed. {} optional check(s) failed.",
            failed
        )
        .unwrap();
    } else {
        writeln!(output, "\nAll checks passed.").unwrap();
    }

    output
}
