//! Error types for qmesh-setup operations.
//!
//! This module defines [`SetupError`], the error type used throughout the
//! crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Configuration errors: a required tool or path is missing or invalid
//! - Functional errors: the tool is on disk but failed its check
//! - Use `anyhow::Error` (via `SetupError::Other`) for unexpected errors
//!
//! Every error aborts the packaging run. The git sha metadata writer is the
//! only caller that recovers from a failure.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for qmesh-setup operations.
#[derive(Debug, Error)]
pub enum SetupError {
    /// A path-valued attribute does not point at an existing file or directory.
    #[error("'{attribute}' must be a path ('{}' is not a path)", path.display())]
    PathNotFound { attribute: String, path: PathBuf },

    /// Host lookup could not find the tool's executable.
    #[error("Could not locate a {tool} installation: {message}")]
    ToolNotFound { tool: String, message: String },

    /// The toolkit's runtime (Python API) cannot be imported on this host.
    #[error("Platform does not provide {tool}: {message}")]
    ToolkitAbsent { tool: String, message: String },

    /// Tool is present but failed its functional check.
    #[error("{tool} at {} is not functional: {message}", path.display())]
    ToolNotFunctional {
        tool: String,
        path: PathBuf,
        message: String,
    },

    /// Failed to parse a configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SetupError {
    /// Whether this error means a dependency or path is missing or invalid,
    /// as opposed to present but broken.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            SetupError::PathNotFound { .. }
                | SetupError::ToolNotFound { .. }
                | SetupError::ToolkitAbsent { .. }
                | SetupError::ConfigParseError { .. }
        )
    }
}

/// Result type alias for qmesh-setup operations.
pub type Result<T> = std::result::Result<T, SetupError>;
