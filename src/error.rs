//! Domain-specific error types for the CI helper.
//!
//! This module provides a structured error hierarchy using [`thiserror`].
//! Internal modules return typed errors (e.g., [`FormatError`],
//! [`PackageError`]) while command handlers at the CLI boundary convert them
//! to [`anyhow::Error`] via the standard `?` operator.
//!
//! # Error hierarchy
//!
//! ```text
//! CxxkitError
//! ├── Workspace(WorkspaceError) — project-root discovery
//! ├── Config(ConfigError)       — environment-driven configuration
//! ├── Format(FormatError)       — formatter availability and check results
//! └── Package(PackageError)     — artifact staging assertions
//! ```

use thiserror::Error;

/// Top-level error type for the CI helper.
///
/// Aggregates domain-specific sub-errors and is convertible to
/// [`anyhow::Error`] for use at CLI command boundaries.
#[derive(Error, Debug)]
pub enum CxxkitError {
    /// Project-root discovery error.
    #[error("Workspace error: {0}")]
    Workspace(#[from] WorkspaceError),

    /// Configuration error (missing environment variables).
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Formatting error (tool unavailable, threshold exceeded).
    #[error("Format error: {0}")]
    Format(#[from] FormatError),

    /// Packaging error (missing required artifacts).
    #[error("Package error: {0}")]
    Package(#[from] PackageError),
}

/// Errors that arise while locating the project root.
#[derive(Error, Debug)]
pub enum WorkspaceError {
    /// The upward search reached the file-system root without finding the
    /// marker file.
    #[error("{marker} not found in this or any parent directory")]
    MarkerNotFound {
        /// Name of the marker file that was searched for.
        marker: String,
    },

    /// The search starting point does not exist or cannot be resolved.
    #[error("cannot resolve search start {path}: {source}")]
    BadStart {
        /// The starting path that could not be resolved.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

/// Errors that arise from environment-driven configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A required environment variable is unset or empty.
    #[error("required environment variable {name} is not set")]
    MissingEnv {
        /// Name of the missing variable.
        name: &'static str,
    },
}

/// Errors that arise from the formatting runner/checker.
#[derive(Error, Debug)]
pub enum FormatError {
    /// The formatting tool is not on PATH and the fallback install failed.
    #[error("{tool} is unavailable; try installing it manually: pip install {tool}")]
    ToolUnavailable {
        /// Name of the formatting tool.
        tool: String,
    },

    /// A directory/extension pair needs more replacements than allowed.
    #[error("{target}: {count} formatting replacements needed (limit {limit})")]
    ThresholdExceeded {
        /// The offending directory/extension pair, e.g. `src/*.cpp`.
        target: String,
        /// Number of replacements the tool proposed.
        count: usize,
        /// Maximum number of replacements tolerated per pair.
        limit: usize,
    },
}

/// Errors that arise from the artifact staging assertions.
#[derive(Error, Debug)]
pub enum PackageError {
    /// The install tree contained no header files to copy.
    #[error("not any header files")]
    NoHeaderFiles,

    /// The install tree contained no executable files to copy.
    #[error("not any bin files")]
    NoBinFiles,
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;
    use std::io;

    // -----------------------------------------------------------------------
    // WorkspaceError
    // -----------------------------------------------------------------------

    #[test]
    fn workspace_error_marker_not_found_display() {
        let e = WorkspaceError::MarkerNotFound {
            marker: ".clang-format".to_string(),
        };
        assert_eq!(
            e.to_string(),
            ".clang-format not found in this or any parent directory"
        );
    }

    #[test]
    fn workspace_error_bad_start_display() {
        let e = WorkspaceError::BadStart {
            path: "/no/such/dir".to_string(),
            source: io::Error::new(io::ErrorKind::NotFound, "no such file"),
        };
        assert!(e.to_string().contains("/no/such/dir"));
        assert!(e.to_string().contains("cannot resolve search start"));
    }

    #[test]
    fn workspace_error_bad_start_has_source() {
        use std::error::Error as StdError;
        let e = WorkspaceError::BadStart {
            path: "/no/such/dir".to_string(),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(e.source().is_some());
    }

    // -----------------------------------------------------------------------
    // ConfigError
    // -----------------------------------------------------------------------

    #[test]
    fn config_error_missing_env_display() {
        let e = ConfigError::MissingEnv {
            name: "PACKAGE_NAME",
        };
        assert_eq!(
            e.to_string(),
            "required environment variable PACKAGE_NAME is not set"
        );
    }

    // -----------------------------------------------------------------------
    // FormatError
    // -----------------------------------------------------------------------

    #[test]
    fn format_error_tool_unavailable_display() {
        let e = FormatError::ToolUnavailable {
            tool: "clang-format".to_string(),
        };
        assert_eq!(
            e.to_string(),
            "clang-format is unavailable; try installing it manually: pip install clang-format"
        );
    }

    #[test]
    fn format_error_threshold_exceeded_display() {
        let e = FormatError::ThresholdExceeded {
            target: "src/*.cpp".to_string(),
            count: 42,
            limit: 10,
        };
        assert_eq!(
            e.to_string(),
            "src/*.cpp: 42 formatting replacements needed (limit 10)"
        );
    }

    // -----------------------------------------------------------------------
    // PackageError
    // -----------------------------------------------------------------------

    #[test]
    fn package_error_no_header_files_display() {
        assert_eq!(PackageError::NoHeaderFiles.to_string(), "not any header files");
    }

    #[test]
    fn package_error_no_bin_files_display() {
        assert_eq!(PackageError::NoBinFiles.to_string(), "not any bin files");
    }

    // -----------------------------------------------------------------------
    // CxxkitError conversions
    // -----------------------------------------------------------------------

    #[test]
    fn cxxkit_error_from_workspace_error() {
        let e: CxxkitError = WorkspaceError::MarkerNotFound {
            marker: ".clang-format".to_string(),
        }
        .into();
        assert!(e.to_string().contains("Workspace error"));
        assert!(e.to_string().contains(".clang-format"));
    }

    #[test]
    fn cxxkit_error_from_config_error() {
        let e: CxxkitError = ConfigError::MissingEnv {
            name: "PACKAGE_VERSION",
        }
        .into();
        assert!(e.to_string().contains("Configuration error"));
    }

    #[test]
    fn cxxkit_error_from_format_error() {
        let e: CxxkitError = FormatError::ToolUnavailable {
            tool: "clang-format".to_string(),
        }
        .into();
        assert!(e.to_string().contains("Format error"));
    }

    #[test]
    fn cxxkit_error_from_package_error() {
        let e: CxxkitError = PackageError::NoBinFiles.into();
        assert!(e.to_string().contains("Package error"));
    }

    // -----------------------------------------------------------------------
    // Send + Sync bounds
    // -----------------------------------------------------------------------

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn all_error_types_are_send_sync() {
        assert_send_sync::<CxxkitError>();
        assert_send_sync::<WorkspaceError>();
        assert_send_sync::<ConfigError>();
        assert_send_sync::<FormatError>();
        assert_send_sync::<PackageError>();
    }

    // -----------------------------------------------------------------------
    // anyhow conversion
    // -----------------------------------------------------------------------

    #[test]
    fn format_error_converts_to_anyhow() {
        let e = FormatError::ThresholdExceeded {
            target: "include/*.h".to_string(),
            count: 11,
            limit: 10,
        };
        let _anyhow_err: anyhow::Error = e.into();
    }

    #[test]
    fn package_error_converts_to_anyhow() {
        let e = PackageError::NoHeaderFiles;
        let _anyhow_err: anyhow::Error = e.into();
    }
}
