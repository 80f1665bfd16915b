//! Console and file logging built on [`tracing`].
//!
//! All user-facing output flows through a [`Logger`] facade whose methods
//! delegate to `tracing` macros. [`init_subscriber`] installs two layers: a
//! console formatter that renders the tool's ANSI output style, and a file
//! layer that appends every event (including `debug`) to a persistent log
//! under `$XDG_CACHE_HOME/cxxkit/<command>.log` with ANSI codes stripped.

mod logger;
mod subscriber;
mod utils;

pub use logger::Logger;
pub use subscriber::init_subscriber;

/// Status of a completed step, for summary reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    /// The step completed and made (or confirmed) its changes.
    Ok,
    /// The step had nothing to operate on.
    NotApplicable,
    /// The step was skipped, with a reason.
    Skipped,
    /// The step previewed its changes without applying them.
    DryRun,
    /// The step failed.
    Failed,
}

/// A recorded step result for the run summary.
#[derive(Debug, Clone)]
pub struct StepEntry {
    /// Step name as shown in the summary.
    pub name: String,
    /// Outcome of the step.
    pub status: StepStatus,
    /// Optional detail shown in parentheses after the name.
    pub message: Option<String>,
}
