//! CI helper for C/C++ library projects.
//!
//! Two independent jobs behind one binary: a `clang-format` runner/checker
//! over the project's `src/` and `include/` trees, and a packaging step that
//! stages build artifacts (headers, shared libraries, executables) from a
//! build-install tree into a binary-package layout.
//!
//! The public API is organised into thin layers:
//!
//! - **[`config`]** — the fixed formatting target set and env-driven packaging settings
//! - **[`workspace`]** — project-root discovery by upward marker-file search
//! - **[`format`] / [`package`]** — the two jobs themselves
//! - **[`commands`]** — top-level subcommand orchestration (`format`, `package`)
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod exec;
pub mod format;
pub mod fsutil;
pub mod logging;
pub mod package;
pub mod workspace;
