//! Error types for SDK packaging operations.

use std::path::Path;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using `PackError`.
pub type Result<T> = std::result::Result<T, PackError>;

/// Errors that can occur while packaging an SDK.
///
/// A missing include entry is not an error: it is reported as a warning and
/// packaging continues. Everything here is fatal for the current run.
#[derive(Error, Debug)]
pub enum PackError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Copying a file into the staging directory failed.
    #[error("failed to copy {} to {}: {source}", from.display(), to.display())]
    Copy {
        /// Source file.
        from: PathBuf,
        /// Destination inside the staging directory.
        to: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Directory traversal failed.
    #[error("failed to walk {}: {source}", path.display())]
    Traverse {
        /// Root of the traversal.
        path: PathBuf,
        /// Underlying walkdir error.
        #[source]
        source: walkdir::Error,
    },

    /// ZIP writer reported an error.
    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// Exclude pattern is not a valid glob.
    #[error("invalid exclude pattern '{pattern}': {reason}")]
    InvalidPattern {
        /// The offending pattern.
        pattern: String,
        /// Parser message.
        reason: String,
    },

    /// Compression level outside 1-9.
    #[error("invalid compression level {level} (expected 1-9)")]
    InvalidCompressionLevel {
        /// The rejected level.
        level: u8,
    },

    /// Configuration is unusable for another reason.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Source root does not exist or is not a directory.
    #[error("source root not found: {}", path.display())]
    SourceNotFound {
        /// The configured source root.
        path: PathBuf,
    },

    /// Staging directory could not be removed after a successful run.
    #[error("failed to remove staging directory {}: {source}", path.display())]
    Cleanup {
        /// The staging directory.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl PackError {
    /// Returns the filesystem path most relevant to this error, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use sdkpack_core::PackError;
    /// use std::path::{Path, PathBuf};
    ///
    /// let err = PackError::SourceNotFound {
    ///     path: PathBuf::from("/sdk"),
    /// };
    /// assert_eq!(err.path(), Some(Path::new("/sdk")));
    ///
    /// let err = PackError::InvalidCompressionLevel { level: 0 };
    /// assert_eq!(err.path(), None);
    /// ```
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Copy { from, .. } => Some(from),
            Self::Traverse { path, .. }
            | Self::SourceNotFound { path }
            | Self::Cleanup { path, .. } => Some(path),
            _ => None,
        }
    }

    /// Returns the underlying I/O error kind, if this error wraps one.
    #[must_use]
    pub fn io_kind(&self) -> Option<std::io::ErrorKind> {
        match self {
            Self::Io(e) | Self::Copy { source: e, .. } | Self::Cleanup { source: e, .. } => {
                Some(e.kind())
            }
            Self::Traverse { source, .. } => source.io_error().map(std::io::Error::kind),
            Self::Zip(zip::result::ZipError::Io(e)) => Some(e.kind()),
            _ => None,
        }
    }
}
