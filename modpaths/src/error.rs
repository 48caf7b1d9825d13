//! Error types for the modpaths library.
//!
//! This module provides the error hierarchy shared by the path value types,
//! the filesystem abstraction and the temporary-resource manager, using
//! `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Result type alias for operations that may fail with a modpaths error.
///
/// # Examples
///
/// ```
/// use modpaths::{Error, Result};
///
/// fn example_operation() -> Result<usize> {
///     Ok(42)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the modpaths library.
#[derive(Debug, Error)]
pub enum Error {
    /// The running operating system has no known path-root rules.
    #[error("platform not supported: {os}")]
    PlatformNotSupported {
        /// Name of the unsupported operating system.
        os: String,
    },

    /// A path-domain operation failed (unrelated paths, missing segments).
    #[error("path error for '{path}': {reason}")]
    Path {
        /// The path the operation was applied to.
        path: String,
        /// The reason the operation failed.
        reason: String,
    },

    /// A caller-supplied buffer cannot hold the formatted path.
    #[error("buffer too small: {required} bytes required, {actual} available")]
    BufferTooSmall {
        /// Number of bytes the full path needs.
        required: usize,
        /// Number of bytes the buffer provides.
        actual: usize,
    },

    /// An extension was neither empty nor dot-prefixed.
    #[error("invalid extension '{value}': must be empty or start with '.'")]
    InvalidExtension {
        /// The rejected extension text.
        value: String,
    },

    /// A glob pattern could not be compiled.
    #[error("invalid pattern '{pattern}': {reason}")]
    InvalidPattern {
        /// The rejected pattern.
        pattern: String,
        /// The reason the pattern is invalid.
        reason: String,
    },

    /// A file does not exist.
    #[error("file not found: {path}")]
    FileNotFound {
        /// The path that was not found.
        path: String,
    },

    /// A directory does not exist.
    #[error("directory not found: {path}")]
    DirectoryNotFound {
        /// The path that was not found.
        path: String,
    },

    /// The destination of a create or move already exists.
    #[error("already exists: {path}")]
    AlreadyExists {
        /// The conflicting path.
        path: String,
    },

    /// A non-recursive delete targeted a directory with contents.
    #[error("directory not empty: {path}")]
    DirectoryNotEmpty {
        /// The directory that still has entries.
        path: String,
    },

    /// A game folder has no registered location.
    #[error("no location registered for folder {folder}")]
    UnknownFolder {
        /// Display name of the folder type.
        folder: String,
    },

    /// A well-known directory cannot be determined on this filesystem.
    #[error("known path {known} is not available: {reason}")]
    KnownPathUnavailable {
        /// The requested directory.
        known: String,
        /// Why it could not be determined.
        reason: String,
    },

    /// A validation error occurred.
    #[error("validation error for '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// A description of the validation failure.
        message: String,
    },

    /// A configuration file could not be parsed.
    #[error("configuration error: {0}")]
    Configuration(#[from] serde_yaml::Error),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Build a path-domain error.
    pub(crate) fn path(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Path {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Check if error indicates a file or directory does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use modpaths::Error;
    ///
    /// let err = Error::FileNotFound { path: "/nonexistent".to_string() };
    /// assert!(err.is_not_found());
    /// ```
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::FileNotFound { .. } | Self::DirectoryNotFound { .. } => true,
            Self::Io(e) => e.kind() == std::io::ErrorKind::NotFound,
            _ => false,
        }
    }

    /// Check if error is a path-domain error.
    ///
    /// # Examples
    ///
    /// ```
    /// use modpaths::Error;
    ///
    /// let err = Error::Path { path: "a/b".to_string(), reason: "no".to_string() };
    /// assert!(err.is_path_error());
    /// ```
    #[must_use]
    pub fn is_path_error(&self) -> bool {
        matches!(self, Self::Path { .. })
    }
}
