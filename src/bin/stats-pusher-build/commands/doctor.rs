//! `stats-pusher-build doctor` command

use std::path::Path;

use anyhow::Result;

use stats_pusher_build::ops::{doctor, format_report};
use stats_pusher_build::GlobalContext;

pub fn execute(config_path: Option<&Path>, verbose: bool) -> Result<()> {
    let ctx = GlobalContext::new()?;
    let config = ctx.load_config(config_path)?;

    let report = doctor(&ctx, &config);
    print!("{}", format_report(&report, verbose));

    // Exit with error code if required checks failed
    if !report.all_required_passed() {
        std::process::exit(1);
    }

    Ok(())
}
