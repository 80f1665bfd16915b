//! Logger facade with step recording and summary reporting.
use std::path::PathBuf;
use std::sync::Mutex;

use super::utils::log_file_path;
use super::{StepEntry, StepStatus};

/// Logger facade over the [`tracing`] pipeline.
///
/// Display methods delegate to `tracing` macros; the console and file
/// renderings are decided by the layers installed via
/// [`init_subscriber`](super::init_subscriber). Step results are collected
/// for the run summary printed at the end of a command.
#[derive(Debug)]
pub struct Logger {
    steps: Mutex<Vec<StepEntry>>,
    log_file: Option<PathBuf>,
}

impl Logger {
    /// Create a new logger for `command`.
    ///
    /// Stores the log file path for display in the run summary. The file
    /// itself is created by the file layer during
    /// [`init_subscriber`](super::init_subscriber); this constructor does not
    /// write to it.
    #[must_use]
    pub fn new(command: &str) -> Self {
        Self {
            steps: Mutex::new(Vec::new()),
            log_file: log_file_path(command),
        }
    }

    /// Log an error message.
    pub fn error(&self, msg: &str) {
        tracing::error!("{msg}");
    }

    /// Log a warning message.
    pub fn warn(&self, msg: &str) {
        tracing::warn!("{msg}");
    }

    /// Log a stage header (major section).
    pub fn stage(&self, msg: &str) {
        tracing::info!(target: "cxxkit::stage", "{msg}");
    }

    /// Log an informational message.
    pub fn info(&self, msg: &str) {
        tracing::info!("{msg}");
    }

    /// Log a debug message (suppressed on console unless verbose; always
    /// written to the log file).
    pub fn debug(&self, msg: &str) {
        tracing::debug!("{msg}");
    }

    /// Log a dry-run action message.
    pub fn dry_run(&self, msg: &str) {
        tracing::info!(target: "cxxkit::dry_run", "{msg}");
    }

    /// Record a step result for the summary.
    pub fn record_step(&self, name: &str, status: StepStatus, message: Option<&str>) {
        if let Ok(mut guard) = self.steps.lock() {
            guard.push(StepEntry {
                name: name.to_string(),
                status,
                message: message.map(String::from),
            });
        }
    }

    /// Number of recorded steps that failed.
    #[must_use]
    pub fn failure_count(&self) -> usize {
        self.steps.lock().map_or(0, |guard| {
            guard
                .iter()
                .filter(|s| s.status == StepStatus::Failed)
                .count()
        })
    }

    /// Whether any recorded step failed.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.failure_count() > 0
    }

    /// Return a clone of all recorded step entries (test-only).
    #[cfg(test)]
    pub(crate) fn step_entries(&self) -> Vec<StepEntry> {
        self.steps.lock().map_or_else(|_| vec![], |g| g.clone())
    }

    /// Print the summary of all recorded steps.
    pub fn print_summary(&self) {
        let steps = match self.steps.lock() {
            Ok(guard) => guard.clone(),
            Err(_) => return,
        };
        if steps.is_empty() {
            return;
        }

        self.stage("Summary");

        for step in &steps {
            let (icon, color) = status_style(step.status);
            let suffix = step
                .message
                .as_ref()
                .map_or_else(String::new, |msg| format!(" ({msg})"));
            self.info(&format!("{color}{icon} {}{suffix}\x1b[0m", step.name));
        }

        let count = |status| steps.iter().filter(|s| s.status == status).count();
        self.info(&format!(
            "{} steps: \x1b[32m{} ok\x1b[0m, {} n/a, \x1b[33m{} skipped\x1b[0m, {} dry-run, \x1b[31m{} failed\x1b[0m",
            steps.len(),
            count(StepStatus::Ok),
            count(StepStatus::NotApplicable),
            count(StepStatus::Skipped),
            count(StepStatus::DryRun),
            count(StepStatus::Failed),
        ));

        if let Some(path) = &self.log_file {
            self.info(&format!("\x1b[2mlog: {}\x1b[0m", path.display()));
        }
    }
}

/// Icon and ANSI colour used for a step in the summary listing.
const fn status_style(status: StepStatus) -> (&'static str, &'static str) {
    match status {
        StepStatus::Ok => ("✓", "\x1b[32m"),
        StepStatus::NotApplicable => ("·", "\x1b[2m"),
        StepStatus::Skipped => ("○", "\x1b[33m"),
        StepStatus::DryRun => ("~", "\x1b[33m"),
        StepStatus::Failed => ("✗", "\x1b[31m"),
    }
}
