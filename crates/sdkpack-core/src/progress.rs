//! Progress reporting for packaging runs.
//!
//! The packer drives a [`PackProgress`] implementation through each stage
//! of the pipeline. All methods have empty default bodies so implementors
//! only override what they display.

use std::fmt;
use std::path::Path;

/// Stage of the packaging pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackStage {
    /// Copying include-list entries into the staging directory.
    Staging,
    /// Compressing the staging directory into the output archive.
    Archiving,
    /// Removing the staging directory.
    Cleanup,
}

impl fmt::Display for PackStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Staging => write!(f, "staging"),
            Self::Archiving => write!(f, "archiving"),
            Self::Cleanup => write!(f, "cleanup"),
        }
    }
}

/// Callback trait for packaging progress.
///
/// # Examples
///
/// ```
/// use sdkpack_core::PackProgress;
/// use sdkpack_core::PackStage;
/// use std::path::Path;
///
/// struct Printer;
///
/// impl PackProgress for Printer {
///     fn on_stage(&mut self, stage: PackStage) {
///         println!("stage: {stage}");
///     }
///
///     fn on_missing_include(&mut self, path: &Path) {
///         println!("skipped missing {}", path.display());
///     }
/// }
/// ```
pub trait PackProgress {
    /// Called when the pipeline enters a stage.
    fn on_stage(&mut self, _stage: PackStage) {}

    /// Called for each include-list entry absent from the source root.
    fn on_missing_include(&mut self, _path: &Path) {}

    /// Called once before archiving with the number of files to write.
    fn on_archive_start(&mut self, _total: usize) {}

    /// Called after each file is written to the archive.
    fn on_entry_archived(&mut self, _archive_path: &Path, _bytes: u64) {}

    /// Called once the archive has been finalized.
    fn on_archive_complete(&mut self) {}
}

/// No-op progress callback.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopProgress;

impl PackProgress for NoopProgress {}
