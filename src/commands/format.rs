//! The `format` subcommand: locate the root, ensure the tool, run a pass.
use anyhow::Result;

use crate::cli::{FormatMode, FormatOpts, GlobalOpts};
use crate::config::format::FormatConfig;
use crate::exec::SystemExecutor;
use crate::logging::Logger;
use crate::workspace;

/// Run the format command.
///
/// # Errors
///
/// Returns an error if the project root cannot be found, the formatting tool
/// is unavailable, or check mode finds a target over the replacement limit.
pub fn run(global: &GlobalOpts, opts: &FormatOpts, log: &Logger) -> Result<()> {
    let cfg = FormatConfig {
        threshold: opts.threshold,
        ..FormatConfig::default()
    };

    log.stage("Locating project root");
    let start = workspace::resolve_start(global.root.as_deref())?;
    let root = workspace::find_root_from(&start, &cfg.marker)?;
    log.info(&format!("root: {}", root.display()));

    let executor = SystemExecutor;
    log.stage("Checking formatter availability");
    crate::format::ensure_tool(&executor, log, global.dry_run)?;

    let result = match opts.mode {
        FormatMode::Run => {
            log.stage("Formatting sources");
            crate::format::run_pass(&root, &cfg, &executor, log, global.dry_run)
        }
        FormatMode::Check => {
            log.stage("Checking formatting");
            crate::format::check_pass(&root, &cfg, &executor, log)
        }
    };

    log.print_summary();
    result
}
