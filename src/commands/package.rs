//! The `package` subcommand: resolve configuration and stage artifacts.
use anyhow::{Context as _, Result};

use crate::cli::{GlobalOpts, PackageOpts};
use crate::config::package::PackageConfig;
use crate::logging::Logger;
use crate::package::{self, PackageMetadata};

/// Run the package command.
///
/// # Errors
///
/// Returns an error if a required `PACKAGE_*` environment variable is
/// missing, or staging fails (no headers, no binaries, copy error).
pub fn run(global: &GlobalOpts, opts: &PackageOpts, log: &Logger) -> Result<()> {
    log.stage("Reading package configuration");
    let cfg = PackageConfig::from_env()?;
    log.info(&format!("package: {}/{}", cfg.name, cfg.version));
    log.info(&format!("install dir: {}", cfg.install_dir.display()));

    let dest = match &opts.dest {
        Some(dest) => dest.clone(),
        None => std::env::current_dir().context("resolving current directory")?,
    };
    let meta = PackageMetadata {
        description: opts.description.clone(),
        url: opts.url.clone(),
        license: opts.license.clone(),
        topics: opts.topics.clone(),
    };

    log.stage("Staging artifacts");
    let result = package::stage(&cfg, &meta, &dest, log, global.dry_run);
    if let Ok(report) = &result {
        log.info(&format!(
            "staged {} headers, {} shared libraries, {} binaries",
            report.headers, report.shared_libs, report.binaries
        ));
    }

    log.print_summary();
    result.map(|_| ())
}
