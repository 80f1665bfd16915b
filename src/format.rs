//! Formatting passes over the project's C/C++ sources.
//!
//! Both passes walk the fixed (directory, extension) target set from
//! [`FormatConfig`] and shell out to `clang-format` through an [`Executor`].
//! The run pass rewrites files in place; the check pass counts the
//! replacements the tool proposes and enforces a per-target limit.
//!
//! Both passes are best-effort across targets: a target with no matching
//! files is an explicit, logged, zero-work outcome, and a tool failure for
//! one target is reported as a warning without halting the remaining
//! targets. Only a limit violation aborts the check pass.

use anyhow::Result;
use std::path::Path;

use crate::config::format::FormatConfig;
use crate::error::FormatError;
use crate::exec::Executor;
use crate::fsutil;
use crate::logging::{Logger, StepStatus};

/// Name of the external formatting tool.
pub const FORMAT_TOOL: &str = "clang-format";

/// Ensure the formatting tool is available, attempting a fallback install.
///
/// When the tool is not on PATH, a `pip install clang-format` is attempted
/// once; in dry-run mode the install is only announced. The tool's version
/// banner is logged at debug level when available.
///
/// # Errors
///
/// Returns [`FormatError::ToolUnavailable`] if the tool is missing and the
/// fallback install does not make it available.
pub fn ensure_tool(executor: &dyn Executor, log: &Logger, dry_run: bool) -> Result<(), FormatError> {
    if !executor.which(FORMAT_TOOL) {
        if dry_run {
            log.dry_run(&format!("would install {FORMAT_TOOL} via pip"));
            return Ok(());
        }
        log.warn(&format!(
            "{FORMAT_TOOL} not found on PATH, attempting: pip install {FORMAT_TOOL}"
        ));
        let installed = matches!(
            executor.run_unchecked("pip", &["install", FORMAT_TOOL]),
            Ok(r) if r.success
        );
        if !installed || !executor.which(FORMAT_TOOL) {
            return Err(FormatError::ToolUnavailable {
                tool: FORMAT_TOOL.to_string(),
            });
        }
    }

    if let Ok(result) = executor.run_unchecked(FORMAT_TOOL, &["--version"])
        && result.success
    {
        log.debug(&format!("formatter: {}", result.stdout.trim()));
    }
    Ok(())
}

/// Rewrite all matching sources in place (`clang-format -i`).
///
/// The tool's own error output is captured rather than echoed; a failing
/// invocation for one target is logged as a warning and does not halt the
/// others.
///
/// # Errors
///
/// Returns an error only if a source directory cannot be read.
pub fn run_pass(
    root: &Path,
    cfg: &FormatConfig,
    executor: &dyn Executor,
    log: &Logger,
    dry_run: bool,
) -> Result<()> {
    log_target_set(cfg, log);
    for target in cfg.targets() {
        let name = target.to_string();
        let files =
            fsutil::collect_files_with_extension(&root.join(&target.dir), &target.extension)?;
        if files.is_empty() {
            log.debug(&format!("{name}: no matching files"));
            log.record_step(&name, StepStatus::NotApplicable, None);
            continue;
        }

        if dry_run {
            for file in &files {
                log.dry_run(&format!("would format {}", file.display()));
            }
            log.record_step(
                &name,
                StepStatus::DryRun,
                Some(&format!("{} files", files.len())),
            );
            continue;
        }

        let paths: Vec<String> = files.iter().map(|p| p.display().to_string()).collect();
        let mut args: Vec<&str> = vec!["-i"];
        args.extend(paths.iter().map(String::as_str));

        match executor.run(FORMAT_TOOL, &args) {
            Ok(_) => {
                log.info(&format!("{name}: formatted {} files", files.len()));
                log.record_step(
                    &name,
                    StepStatus::Ok,
                    Some(&format!("{} files", files.len())),
                );
            }
            Err(e) => {
                log.warn(&format!("{name}: {e:#}"));
                log.record_step(&name, StepStatus::Failed, Some(&format!("{e:#}")));
            }
        }
    }
    Ok(())
}

/// Count proposed replacements per target and enforce the configured limit.
///
/// Asks the tool for its machine-readable replacement listing
/// (`-output-replacements-xml`) and counts the proposed edits. A target
/// whose count exceeds `cfg.threshold` aborts the pass; a count at the
/// limit passes.
///
/// # Errors
///
/// Returns [`FormatError::ThresholdExceeded`] (as [`anyhow::Error`]) when a
/// target needs more replacements than allowed, or an error if a source
/// directory cannot be read.
pub fn check_pass(
    root: &Path,
    cfg: &FormatConfig,
    executor: &dyn Executor,
    log: &Logger,
) -> Result<()> {
    log_target_set(cfg, log);
    for target in cfg.targets() {
        let name = target.to_string();
        let files =
            fsutil::collect_files_with_extension(&root.join(&target.dir), &target.extension)?;
        if files.is_empty() {
            log.info(&format!("{name}: no matching files"));
            log.record_step(&name, StepStatus::NotApplicable, None);
            continue;
        }

        let paths: Vec<String> = files.iter().map(|p| p.display().to_string()).collect();
        let mut args: Vec<&str> = vec!["-output-replacements-xml"];
        args.extend(paths.iter().map(String::as_str));

        let result = match executor.run_unchecked(FORMAT_TOOL, &args) {
            Ok(result) => result,
            Err(e) => {
                log.warn(&format!("{name}: {e:#}"));
                log.record_step(&name, StepStatus::Failed, Some(&format!("{e:#}")));
                continue;
            }
        };
        if !result.success {
            log.warn(&format!(
                "{name}: {FORMAT_TOOL} exited with {}: {}",
                result.code.unwrap_or(-1),
                result.stderr.trim()
            ));
            log.record_step(&name, StepStatus::Failed, Some("formatter error"));
            continue;
        }

        let count = count_replacements(&result.stdout);
        if count > cfg.threshold {
            log.record_step(
                &name,
                StepStatus::Failed,
                Some(&format!("{count} replacements")),
            );
            return Err(FormatError::ThresholdExceeded {
                target: name,
                count,
                limit: cfg.threshold,
            }
            .into());
        }

        log.info(&format!("{name}: {count} replacements"));
        log.record_step(&name, StepStatus::Ok, Some(&format!("{count} replacements")));
    }
    Ok(())
}

/// Count the proposed edits in a `-output-replacements-xml` listing.
#[must_use]
pub fn count_replacements(xml: &str) -> usize {
    xml.matches("<replacement ").count()
}

/// Announce which directories and extensions a pass covers.
fn log_target_set(cfg: &FormatConfig, log: &Logger) {
    let globs: Vec<String> = cfg.extensions.iter().map(|e| format!("*.{e}")).collect();
    log.info(&format!(
        "check in [{}] with [{}]",
        cfg.dirs.join(", "),
        globs.join(", ")
    ));
}
