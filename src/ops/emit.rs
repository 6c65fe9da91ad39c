//! Rendering a [`BuildConfiguration`] for build orchestrators.
//!
//! - `uwsgi`: the variable block a `uwsgiplugin.py` exposes to
//!   `uwsgi --build-plugin` (`NAME`, `CFLAGS`, `LDFLAGS`, `LIBS`, `GCC_LIST`)
//! - `json`: the configuration as a JSON object
//! - `env`: shell assignments suitable for `eval` or a Makefile include

use std::fmt::{self, Write};
use std::str::FromStr;

use anyhow::{Context, Result};

use crate::core::{BuildConfiguration, Section};

/// Output format for resolved flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Uwsgi,
    Json,
    Env,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OutputFormat::Uwsgi => "uwsgi",
            OutputFormat::Json => "json",
            OutputFormat::Env => "env",
        })
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "uwsgi" | "python" => Ok(OutputFormat::Uwsgi),
            "json" => Ok(OutputFormat::Json),
            "env" | "shell" => Ok(OutputFormat::Env),
            _ => Err(format!(
                "invalid format '{}'; expected 'uwsgi', 'json', or 'env'",
                s
            )),
        }
    }
}

/// Render the whole configuration.
pub fn render(config: &BuildConfiguration, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Uwsgi => Ok(render_uwsgi(config)),
        OutputFormat::Json => render_json(config),
        OutputFormat::Env => Ok(render_env(config)),
    }
}

/// Render one list, one entry per line.
pub fn render_section(config: &BuildConfiguration, section: Section) -> String {
    let mut output = String::new();
    for item in config.section(section) {
        output.push_str(item);
        output.push('\n');
    }
    output
}

fn render_uwsgi(config: &BuildConfiguration) -> String {
    let mut output = String::new();

    writeln!(output, "NAME = {}", python_str(config.name())).unwrap();
    writeln!(output).unwrap();
    writeln!(output, "CFLAGS = {}", python_list(config.compile_flags())).unwrap();
    writeln!(output, "LDFLAGS = {}", python_list(config.link_flags())).unwrap();
    writeln!(output, "LIBS = {}", python_list(config.libs())).unwrap();
    writeln!(output).unwrap();
    writeln!(output, "GCC_LIST = {}", python_list(config.sources())).unwrap();

    output
}

fn render_json(config: &BuildConfiguration) -> Result<String> {
    let mut json =
        serde_json::to_string_pretty(config).context("failed to serialize build configuration")?;
    json.push('\n');
    Ok(json)
}

fn render_env(config: &BuildConfiguration) -> String {
    let mut output = String::new();

    writeln!(output, "NAME={}", shell_quote(config.name())).unwrap();
    writeln!(output, "CFLAGS={}", shell_quote(&config.compile_flags().join(" "))).unwrap();
    writeln!(output, "LDFLAGS={}", shell_quote(&config.link_flags().join(" "))).unwrap();
    writeln!(output, "LIBS={}", shell_quote(&config.libs().join(" "))).unwrap();
    writeln!(output, "SOURCES={}", shell_quote(&config.sources().join(" "))).unwrap();

    output
}

/// Single-quoted Python string literal.
fn python_str(value: &str) -> String {
    let escaped = value.replace('\\', "\\\\").replace('\'', "\\'");
    format!("'{}'", escaped)
}

fn python_list(values: &[String]) -> String {
    let items: Vec<String> = values.iter().map(|v| python_str(v)).collect();
    format!("[{}]", items.join(", "))
}

/// POSIX single-quoting: `'` becomes `'\''`.
fn shell_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', "'\\''"))
}
