//! Staging directory lifecycle and include-list copying.

use crate::PackConfig;
use crate::PackError;
use crate::PackProgress;
use crate::PathFilter;
use crate::Result;
use std::fs;
use std::fs::File;
use std::io;
use std::path::Path;
use std::path::PathBuf;
use walkdir::WalkDir;

/// Guard owning the transient staging directory.
///
/// The directory is removed by [`StagingDir::close`] or, if the guard is
/// dropped without being closed, best-effort on drop. Either way it does not
/// outlive the packaging run.
///
/// # Examples
///
/// ```no_run
/// use sdkpack_core::staging::StagingDir;
///
/// let staging = StagingDir::new("output/temp");
/// staging.prepare()?;
/// // ... populate ...
/// staging.close()?;
/// # Ok::<(), sdkpack_core::PackError>(())
/// ```
#[derive(Debug)]
pub struct StagingDir {
    path: PathBuf,
    armed: bool,
}

impl StagingDir {
    /// Creates a guard for `path` without touching the filesystem.
    #[must_use]
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            armed: true,
        }
    }

    /// Staging directory path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Deletes any residue from an earlier run and creates an empty
    /// directory.
    pub fn prepare(&self) -> Result<()> {
        remove_if_exists(&self.path)?;
        fs::create_dir_all(&self.path)?;
        tracing::debug!(path = %self.path.display(), "staging directory created");
        Ok(())
    }

    /// Removes the staging directory, reporting failure.
    ///
    /// A directory that is already gone counts as success.
    pub fn close(mut self) -> Result<()> {
        self.armed = false;
        remove_if_exists(&self.path).map_err(|source| PackError::Cleanup {
            path: self.path.clone(),
            source,
        })
    }
}

impl Drop for StagingDir {
    fn drop(&mut self) {
        if self.armed
            && let Err(e) = remove_if_exists(&self.path)
        {
            tracing::warn!(
                path = %self.path.display(),
                error = %e,
                "failed to remove staging directory"
            );
        }
    }
}

fn remove_if_exists(path: &Path) -> io::Result<()> {
    match fs::remove_dir_all(path) {
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        other => other,
    }
}

/// Statistics collected while staging the include list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StagingReport {
    /// Regular files copied into staging.
    pub files_copied: usize,

    /// Directories created inside staging.
    pub directories_created: usize,

    /// Bytes copied.
    pub bytes_copied: u64,

    /// Files and directories pruned by exclude patterns.
    pub paths_excluded: usize,

    /// Include-list entries absent from the source root.
    pub missing_includes: Vec<PathBuf>,
}

/// Copies every include-list entry from the source root into `staging`.
///
/// Absent entries are reported through `progress` and skipped. Directories
/// are copied recursively with excluded entries pruned at every level; the
/// include entry itself is never filtered. Symlinks are followed.
///
/// # Errors
///
/// Returns an error if reading the source or writing the staging copy
/// fails.
pub fn stage_includes(
    config: &PackConfig,
    filter: &PathFilter,
    staging: &Path,
    progress: &mut dyn PackProgress,
) -> Result<StagingReport> {
    let mut report = StagingReport::default();

    for include in &config.include_paths {
        let relative: PathBuf = Path::new(include).components().collect();
        let src = config.source_root.join(&relative);
        let dst = staging.join(&relative);

        let metadata = match fs::metadata(&src) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::warn!(path = %include, "include entry does not exist, skipping");
                progress.on_missing_include(&relative);
                report.missing_includes.push(relative);
                continue;
            }
            Err(e) => return Err(e.into()),
        };

        if metadata.is_dir() {
            copy_tree(&src, &dst, filter, &mut report)?;
        } else {
            if let Some(parent) = dst.parent() {
                fs::create_dir_all(parent)?;
            }
            report.bytes_copied += copy_file(&src, &dst)?;
            report.files_copied += 1;
        }
    }

    Ok(report)
}

fn copy_tree(src: &Path, dst: &Path, filter: &PathFilter, report: &mut StagingReport) -> Result<()> {
    let mut excluded = 0;
    let walker = WalkDir::new(src)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            if entry.depth() > 0 && filter.is_excluded(entry.path()) {
                tracing::debug!(path = %entry.path().display(), "excluded");
                excluded += 1;
                return false;
            }
            true
        });

    for entry in walker {
        let entry = entry.map_err(|source| PackError::Traverse {
            path: src.to_path_buf(),
            source,
        })?;
        let relative = entry.path().strip_prefix(src).unwrap_or(entry.path());
        let target = dst.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
            report.directories_created += 1;
        } else if entry.file_type().is_file() {
            report.bytes_copied += copy_file(entry.path(), &target)?;
            report.files_copied += 1;
        } else {
            tracing::debug!(path = %entry.path().display(), "skipping special file");
        }
    }

    report.paths_excluded += excluded;
    Ok(())
}

/// Copies one file, keeping permissions and modification time.
fn copy_file(src: &Path, dst: &Path) -> Result<u64> {
    let bytes = fs::copy(src, dst).map_err(|source| PackError::Copy {
        from: src.to_path_buf(),
        to: dst.to_path_buf(),
        source,
    })?;
    tracing::debug!(from = %src.display(), to = %dst.display(), bytes, "copied");

    // mtime ends up in the ZIP entry header; losing it is not fatal
    if let Err(e) = preserve_mtime(src, dst) {
        tracing::debug!(path = %dst.display(), error = %e, "could not preserve mtime");
    }

    Ok(bytes)
}

fn preserve_mtime(src: &Path, dst: &Path) -> io::Result<()> {
    let modified = fs::metadata(src)?.modified()?;
    File::open(dst)?.set_modified(modified)
}
