//! Project-root discovery by upward marker-file search.
//!
//! The formatting configuration file doubles as the root marker: walking up
//! from the starting directory, the first ancestor that contains it is the
//! project root. Reaching the file-system root without a hit is a fatal
//! lookup failure.

use std::path::{Path, PathBuf};

use crate::error::WorkspaceError;

/// Resolve the directory the upward search starts from.
///
/// An explicit `--root` flag wins; otherwise the current working directory
/// is used. The result is canonicalised (via [`dunce`] so Windows paths stay
/// UNC-free).
///
/// # Errors
///
/// Returns [`WorkspaceError::BadStart`] if the starting directory does not
/// exist or cannot be canonicalised.
pub fn resolve_start(root_flag: Option<&Path>) -> Result<PathBuf, WorkspaceError> {
    let start = match root_flag {
        Some(root) => root.to_path_buf(),
        None => std::env::current_dir().map_err(|source| WorkspaceError::BadStart {
            path: ".".to_string(),
            source,
        })?,
    };
    dunce::canonicalize(&start).map_err(|source| WorkspaceError::BadStart {
        path: start.display().to_string(),
        source,
    })
}

/// Walk upward from `start` until a directory containing `marker` is found.
///
/// Returns that directory. The search is bounded by the file-system root:
/// when no ancestor contains the marker the search terminates with
/// [`WorkspaceError::MarkerNotFound`] rather than looping.
///
/// # Errors
///
/// Returns [`WorkspaceError::MarkerNotFound`] when the marker does not exist
/// in `start` or any of its ancestors.
pub fn find_root_from(start: &Path, marker: &str) -> Result<PathBuf, WorkspaceError> {
    let mut dir = start.to_path_buf();
    loop {
        if dir.join(marker).is_file() {
            return Ok(dir);
        }
        match dir.parent() {
            Some(parent) => dir = parent.to_path_buf(),
            None => {
                return Err(WorkspaceError::MarkerNotFound {
                    marker: marker.to_string(),
                });
            }
        }
    }
}
