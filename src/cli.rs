//! Command-line interface definition.
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::config::format::DEFAULT_THRESHOLD;

/// Top-level CLI entry point for the CI helper.
#[derive(Parser, Debug)]
#[command(
    name = "cxxkit",
    about = "CI helper for C/C++ projects: formatting and package staging",
    version
)]
pub struct Cli {
    /// Selected subcommand.
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Options shared across all subcommands.
    #[command(flatten)]
    pub global: GlobalOpts,
}

/// Options shared across all subcommands.
#[derive(Parser, Debug, Clone)]
pub struct GlobalOpts {
    /// Preview changes without applying
    #[arg(short = 'd', long, global = true)]
    pub dry_run: bool,

    /// Directory the project-root search starts from (default: current dir)
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Format C/C++ sources in place, or check how much formatting they need
    Format(FormatOpts),
    /// Stage build artifacts into a binary-package layout
    Package(PackageOpts),
    /// Print version information
    Version,
}

/// Options for the `format` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct FormatOpts {
    /// Whether to rewrite files or only report needed changes
    #[arg(value_enum, default_value = "run")]
    pub mode: FormatMode,

    /// Maximum replacements tolerated per directory/extension pair in check mode
    #[arg(long, default_value_t = DEFAULT_THRESHOLD)]
    pub threshold: usize,
}

/// Formatting pass selection.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatMode {
    /// Rewrite matching files in place.
    Run,
    /// Count proposed replacements and fail above the threshold.
    Check,
}

/// Options for the `package` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct PackageOpts {
    /// Destination directory for the staged package (default: current dir)
    #[arg(long)]
    pub dest: Option<PathBuf>,

    /// Short package description recorded in the manifest
    #[arg(long)]
    pub description: Option<String>,

    /// Project URL recorded in the manifest
    #[arg(long)]
    pub url: Option<String>,

    /// License identifier recorded in the manifest
    #[arg(long)]
    pub license: Option<String>,

    /// Comma-separated topic tags recorded in the manifest
    #[arg(long, value_delimiter = ',')]
    pub topics: Vec<String>,
}
