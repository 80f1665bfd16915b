//! Formatting pass configuration.
//!
//! The target set is fixed: two source directories crossed with four C/C++
//! file extensions. The marker file doubles as the project-root sentinel for
//! the upward search in [`crate::workspace`].

use std::fmt;

/// Default maximum number of proposed replacements tolerated per target.
pub const DEFAULT_THRESHOLD: usize = 10;

/// Configuration for the formatting runner/checker.
#[derive(Debug, Clone)]
pub struct FormatConfig {
    /// Formatting style file; its presence marks the project root.
    pub marker: String,
    /// Directories (relative to the root) whose sources are formatted.
    pub dirs: Vec<String>,
    /// File extensions (without the leading dot) that are formatted.
    pub extensions: Vec<String>,
    /// Maximum number of proposed replacements tolerated per target in
    /// check mode.
    pub threshold: usize,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            marker: ".clang-format".to_string(),
            dirs: vec!["src".to_string(), "include".to_string()],
            extensions: vec![
                "cpp".to_string(),
                "c".to_string(),
                "hpp".to_string(),
                "h".to_string(),
            ],
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl FormatConfig {
    /// Enumerate every (directory, extension) pair, directories outermost.
    #[must_use]
    pub fn targets(&self) -> Vec<FormatTarget> {
        let mut targets = Vec::with_capacity(self.dirs.len() * self.extensions.len());
        for dir in &self.dirs {
            for ext in &self.extensions {
                targets.push(FormatTarget {
                    dir: dir.clone(),
                    extension: ext.clone(),
                });
            }
        }
        targets
    }
}

/// One (directory, extension) pair processed by a formatting pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatTarget {
    /// Directory relative to the project root.
    pub dir: String,
    /// File extension without the leading dot.
    pub extension: String,
}

impl fmt::Display for FormatTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/*.{}", self.dir, self.extension)
    }
}
