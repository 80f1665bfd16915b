// Shared helpers for integration tests.
//
// Provides a temporary-directory-backed project tree and a fluent builder so
// each integration test can set up an isolated environment without
// repeating filesystem boilerplate.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::path::{Path, PathBuf};

/// An isolated project tree backed by a [`tempfile::TempDir`].
pub struct TestProject {
    dir: tempfile::TempDir,
}

impl TestProject {
    /// Create an empty project tree.
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("create temp project"),
        }
    }

    /// Write the `.clang-format` marker at the project root.
    pub fn with_marker(self) -> Self {
        std::fs::write(self.path().join(".clang-format"), "BasedOnStyle: Google\n")
            .expect("write marker");
        self
    }

    /// Write a file at `rel`, creating parent directories as needed.
    pub fn with_file(self, rel: &str, contents: &str) -> Self {
        let path = self.path().join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create parent dirs");
        }
        std::fs::write(&path, contents).expect("write file");
        self
    }

    /// Create an (empty) directory at `rel`.
    pub fn with_dir(self, rel: &str) -> Self {
        std::fs::create_dir_all(self.path().join(rel)).expect("create dir");
        self
    }

    /// Root of the project tree.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Create a chain of `depth` nested directories under the root and
    /// return the deepest one.
    pub fn nested(&self, depth: usize) -> PathBuf {
        let mut dir = self.path().to_path_buf();
        for level in 0..depth {
            dir = dir.join(format!("level{level}"));
        }
        std::fs::create_dir_all(&dir).expect("create nested dirs");
        dir
    }
}
