//! Error conversion utilities for CLI.
//!
//! Converts sdkpack-core's typed errors (thiserror) into user-friendly
//! contextual errors (anyhow) with actionable guidance.

use anyhow::anyhow;
use sdkpack_core::PackError;
use std::io::ErrorKind;

/// Converts `PackError` to a user-friendly anyhow error with hints.
pub fn convert_pack_error(err: PackError) -> anyhow::Error {
    let kind = err.io_kind();
    match err {
        PackError::SourceNotFound { path } => anyhow!(
            "Source root not found: {}\n\
             HINT: Run from the SDK root or pass --source <DIR>.",
            path.display()
        ),
        PackError::InvalidPattern { pattern, reason } => anyhow!(
            "Invalid exclude pattern '{pattern}': {reason}\n\
             HINT: Patterns use glob syntax (*, ?, [abc], [!abc])."
        ),
        PackError::InvalidCompressionLevel { level } => anyhow!(
            "Invalid compression level {level}\n\
             HINT: Use --compression-level with a value from 1 to 9."
        ),
        PackError::InvalidConfig(reason) => anyhow!("Invalid configuration: {reason}"),
        err if kind == Some(ErrorKind::PermissionDenied) => {
            let hint = err.path().map_or_else(
                || {
                    "Check read access to the source tree and write access to the output \
                     directory."
                        .to_string()
                },
                |path| format!("Check permissions on {}.", path.display()),
            );
            anyhow!("Packaging failed: {err}\nHINT: {hint}")
        }
        err if kind == Some(ErrorKind::StorageFull) => anyhow!(
            "Packaging failed: {err}\n\
             HINT: The output volume is out of space; free space or use --output-dir."
        ),
        err => anyhow::Error::from(err).context("Packaging failed"),
    }
}

/// Converts a core result into an anyhow result with hints.
pub fn add_pack_context<T>(result: Result<T, PackError>) -> anyhow::Result<T> {
    result.map_err(convert_pack_error)
}
