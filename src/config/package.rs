//! Environment-driven packaging configuration.
//!
//! The packaging step is configured entirely through `PACKAGE_*` environment
//! variables set by the CI pipeline. Required values are checked up front so
//! a misconfigured job fails before any files are staged, not at the point
//! of use.

use std::path::PathBuf;

use crate::error::ConfigError;

/// Environment variable naming the package.
pub const ENV_NAME: &str = "PACKAGE_NAME";
/// Environment variable carrying the package version.
pub const ENV_VERSION: &str = "PACKAGE_VERSION";
/// Environment variable pointing at the source checkout (recorded only).
pub const ENV_SOURCE_DIR: &str = "PACKAGE_SOURCE_DIR";
/// Environment variable pointing at the build tree (recorded only).
pub const ENV_BUILD_DIR: &str = "PACKAGE_BUILD_DIR";
/// Environment variable pointing at the build-install tree artifacts are
/// staged from.
pub const ENV_INSTALL_DIR: &str = "PACKAGE_INSTALL_DIR";

/// Packaging settings resolved from the environment.
#[derive(Debug, Clone)]
pub struct PackageConfig {
    /// Package name.
    pub name: String,
    /// Package version.
    pub version: String,
    /// Build-install tree the artifacts are copied from.
    pub install_dir: PathBuf,
    /// Source checkout location, recorded in the manifest but otherwise
    /// unused.
    pub source_dir: Option<PathBuf>,
    /// Build tree location, recorded in the manifest but otherwise unused.
    pub build_dir: Option<PathBuf>,
}

impl PackageConfig {
    /// Resolve the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingEnv`] if any of `PACKAGE_NAME`,
    /// `PACKAGE_VERSION`, or `PACKAGE_INSTALL_DIR` is unset or empty.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolve the configuration through an arbitrary variable lookup.
    ///
    /// Tests supply a closure over a map instead of mutating process-global
    /// environment state.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingEnv`] if a required variable is unset
    /// or empty.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| -> Result<String, ConfigError> {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or(ConfigError::MissingEnv { name })
        };
        let optional = |name: &str| -> Option<PathBuf> {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .map(PathBuf::from)
        };

        Ok(Self {
            name: required(ENV_NAME)?,
            version: required(ENV_VERSION)?,
            install_dir: PathBuf::from(required(ENV_INSTALL_DIR)?),
            source_dir: optional(ENV_SOURCE_DIR),
            build_dir: optional(ENV_BUILD_DIR),
        })
    }
}
