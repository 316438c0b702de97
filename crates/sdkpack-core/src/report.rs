//! Packaging run reporting.

use std::path::PathBuf;
use std::time::Duration;

/// Report of a successful packaging run.
///
/// # Examples
///
/// ```
/// use sdkpack_core::PackReport;
///
/// let mut report = PackReport::default();
/// report.bytes_written = 1000;
/// report.bytes_compressed = 250;
///
/// assert_eq!(report.compression_ratio(), 4.0);
/// assert_eq!(report.compression_percentage(), 75.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct PackReport {
    /// Absolute path of the produced archive.
    pub archive_path: PathBuf,

    /// Timestamp embedded in the archive name (`YYYYMMDD_HHMMSS`).
    pub timestamp: String,

    /// Files copied into the staging directory.
    pub files_staged: usize,

    /// Directories created inside the staging directory.
    pub directories_staged: usize,

    /// Files written to the archive.
    pub files_archived: usize,

    /// Paths pruned by exclude patterns.
    pub paths_excluded: usize,

    /// Total uncompressed bytes written to the archive.
    pub bytes_written: u64,

    /// Size of the archive on disk.
    pub bytes_compressed: u64,

    /// Include-list entries that were absent from the source root.
    pub missing_includes: Vec<PathBuf>,

    /// Warnings generated during the run.
    pub warnings: Vec<String>,

    /// Wall-clock duration of the run.
    pub duration: Duration,
}

impl PackReport {
    /// Creates a new empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a warning message to the report.
    pub fn add_warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    /// Returns whether any warnings were generated.
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Returns the compression ratio (uncompressed / compressed).
    ///
    /// Returns 0.0 if either size is 0.
    #[must_use]
    pub fn compression_ratio(&self) -> f64 {
        if self.bytes_compressed == 0 || self.bytes_written == 0 {
            return 0.0;
        }
        self.bytes_written as f64 / self.bytes_compressed as f64
    }

    /// Returns the space saved as a percentage of the uncompressed size.
    ///
    /// Returns 0.0 if nothing was written. The ZIP container overhead can
    /// exceed tiny payloads, which clamps to 0.0 as well.
    #[must_use]
    pub fn compression_percentage(&self) -> f64 {
        if self.bytes_written == 0 {
            return 0.0;
        }
        let saved = self.bytes_written.saturating_sub(self.bytes_compressed);
        (saved as f64 / self.bytes_written as f64) * 100.0
    }
}
