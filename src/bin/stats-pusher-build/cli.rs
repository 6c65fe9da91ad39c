//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use stats_pusher_build::core::Section;
use stats_pusher_build::ops::OutputFormat;

/// Resolve compiler and linker flags for the uWSGI MongoDB stats pusher
#[derive(Parser)]
#[command(name = "stats-pusher-build")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file to use instead of .stats-pusher/config.toml
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the resolved build configuration
    Flags(FlagsArgs),

    /// Check pkg-config, the MongoDB C driver and the plugin sources
    Doctor,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args)]
pub struct FlagsArgs {
    /// Output format (uwsgi, json, env)
    #[arg(short, long, default_value = "uwsgi")]
    pub format: OutputFormat,

    /// Print only the compile flags, one per line
    #[arg(long, conflicts_with_all = ["link", "libs", "sources"])]
    pub compile: bool,

    /// Print only the link flags, one per line
    #[arg(long, conflicts_with_all = ["libs", "sources"])]
    pub link: bool,

    /// Print only the libraries, one per line
    #[arg(long, conflicts_with = "sources")]
    pub libs: bool,

    /// Print only the source files, one per line
    #[arg(long)]
    pub sources: bool,

    /// Fail if pkg-config is missing or does not know the dependency
    #[arg(long)]
    pub strict: bool,
}

impl FlagsArgs {
    /// The single list selected on the command line, if any.
    pub fn section(&self) -> Option<Section> {
        if self.compile {
            Some(Section::Compile)
        } else if self.link {
            Some(Section::Link)
        } else if self.libs {
            Some(Section::Libs)
        } else if self.sources {
            Some(Section::Sources)
        } else {
            None
        }
    }
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: Shell,
}
