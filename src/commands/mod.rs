//! Top-level subcommand orchestration.
pub mod format;
pub mod package;
