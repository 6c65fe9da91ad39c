//! `stats-pusher-build flags` command

use std::path::Path;

use anyhow::Result;

use crate::cli::FlagsArgs;
use stats_pusher_build::ops::{render, render_section};
use stats_pusher_build::{FlagResolver, GlobalContext, PkgConfig, PluginSpec};

pub fn execute(args: FlagsArgs, config_path: Option<&Path>) -> Result<()> {
    let ctx = GlobalContext::new()?;
    let config = ctx.load_config(config_path)?;

    let spec = PluginSpec::from_settings(&config.plugin);
    let pkg_config = PkgConfig::from_settings(&config.pkg_config);
    tracing::debug!(
        "resolving `{}` against `{}` with {}",
        spec.name(),
        spec.dependency(),
        pkg_config.program().display()
    );

    let resolver = FlagResolver::new(spec, pkg_config);
    let build = if args.strict || config.pkg_config.strict.unwrap_or(false) {
        resolver.resolve_strict()?
    } else {
        resolver.resolve()
    };

    let output = match args.section() {
        Some(section) => render_section(&build, section),
        None => render(&build, args.format)?,
    };
    print!("{}", output);

    Ok(())
}
