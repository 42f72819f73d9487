//! Error types for scriptbundle.
//!
//! Library crates use [`ScriptBundleError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Top-level error type for all scriptbundle operations.
///
/// Per-file read problems never surface here; they are folded into the
/// document as placeholder sections. Everything in this enum ends the run.
#[derive(Debug, thiserror::Error)]
pub enum ScriptBundleError {
    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Filesystem I/O error on the output directory or output file.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Data validation error.
    #[error("validation error: {message}")]
    Validation { message: String },

    /// The 4-digit version counter has no free slot left.
    #[error("version counter exhausted for '{base_name}': {max} is the highest 4-digit version")]
    VersionExhausted { base_name: String, max: u32 },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, ScriptBundleError>;

impl ScriptBundleError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create a validation error from any displayable message.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
