//! Error types for the hookify crate.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for hookify operations.
///
/// Most variants never reach the host: the loader and the condition
/// evaluator catch them, log a warning, and carry on with the remaining
/// rules. Only the CLI turns a surfaced error into a diagnostic decision.
#[derive(Debug, Error)]
pub enum HookifyError {
    /// IO error during stdin/stdout or rule file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing or serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A rule file without usable frontmatter.
    #[error("Rule file '{path}' is malformed: {reason}")]
    MalformedRule {
        /// The rule file path (or a placeholder for in-memory rules).
        path: String,
        /// Why the file could not be compiled.
        reason: String,
    },

    /// A condition pattern that is not a valid regular expression.
    #[error("Invalid regex pattern '{pattern}': {source}")]
    InvalidPattern {
        /// The pattern text as written in the rule.
        pattern: String,
        /// The underlying compile error.
        #[source]
        source: regex::Error,
    },

    /// The transcript referenced by the event could not be read.
    #[error("Failed to read transcript '{}': {source}", path.display())]
    Transcript {
        /// The transcript path from the event payload.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },
}

impl HookifyError {
    /// Create a malformed rule error for a file path.
    pub fn malformed(path: impl Into<String>, reason: impl Into<String>) -> Self {
        HookifyError::MalformedRule {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

/// Convenience result alias.
pub type Result<T> = std::result::Result<T, HookifyError>;
