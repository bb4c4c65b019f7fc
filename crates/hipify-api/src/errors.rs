use std::path::PathBuf;
use thiserror::Error;

/// Errors that can stop a translation step
///
/// Lookup misses, span conflicts, parse diagnostics and skipped edits are not
/// errors: they are recorded as data and the run continues.
#[derive(Error, Debug)]
pub enum HipifyError {
    /// Failed to read, copy, rename or write a file
    #[error("IO error on {0}: {1}")]
    Io(PathBuf, #[source] std::io::Error),

    /// Configuration could not be loaded or is inconsistent
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// The front end could not produce a parse for a file
    #[error("Front end error in {path}: {message}")]
    Frontend {
        /// File being scanned
        path: PathBuf,
        /// What went wrong
        message: String,
    },

    /// Report or config serialization failed
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl HipifyError {
    /// Create a front end error for a file.
    pub fn frontend(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Frontend {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Result type for translator operations
pub type HipifyResult<T> = Result<T, HipifyError>;
