//! stats-pusher-build CLI - build flags for the uWSGI MongoDB stats pusher

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use stats_pusher_build::ResolveError;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {:#}", e);
        if let Some(help) = e.downcast_ref::<ResolveError>().and_then(ResolveError::help) {
            eprintln!("{}", help);
        }
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries only build output.
    let filter = if cli.verbose {
        EnvFilter::new("stats_pusher_build=debug")
    } else {
        EnvFilter::new("stats_pusher_build=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    let config = cli.config.as_deref();
    match cli.command {
        Commands::Flags(args) => commands::flags::execute(args, config),
        Commands::Doctor => commands::doctor::execute(config, cli.verbose),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}
