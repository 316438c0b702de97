//! Packaging pipeline: stage, archive, clean up.

use crate::NoopProgress;
use crate::PackConfig;
use crate::PackError;
use crate::PackProgress;
use crate::PackReport;
use crate::PackStage;
use crate::PathFilter;
use crate::Result;
use crate::archive;
use crate::staging;
use crate::staging::StagingDir;
use chrono::Local;
use std::fs;
use std::path::Path;
use std::time::Instant;

/// Packages an SDK source tree into a timestamped ZIP.
///
/// # Examples
///
/// ```no_run
/// use sdkpack_core::PackConfig;
/// use sdkpack_core::SdkPacker;
///
/// let config = PackConfig::default().with_source_root("path/to/sdk");
/// let report = SdkPacker::new(config)?.pack()?;
/// println!("SDK package saved to: {}", report.archive_path.display());
/// # Ok::<(), sdkpack_core::PackError>(())
/// ```
#[derive(Debug)]
pub struct SdkPacker {
    config: PackConfig,
    filter: PathFilter,
}

impl SdkPacker {
    /// Validates `config` and compiles its exclude patterns.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or an exclude
    /// pattern is malformed.
    pub fn new(config: PackConfig) -> Result<Self> {
        config.validate()?;
        let filter = PathFilter::new(&config.source_root, &config.exclude_patterns)?;
        tracing::debug!(
            root = %filter.root().display(),
            patterns = filter.len(),
            "compiled exclude patterns"
        );
        Ok(Self { config, filter })
    }

    /// Configuration this packer was built with.
    #[must_use]
    pub fn config(&self) -> &PackConfig {
        &self.config
    }

    /// Runs the pipeline without progress reporting.
    ///
    /// # Errors
    ///
    /// See [`SdkPacker::pack_with_progress`].
    pub fn pack(&self) -> Result<PackReport> {
        self.pack_with_progress(&mut NoopProgress)
    }

    /// Runs the pipeline, reporting each stage to `progress`.
    ///
    /// The staging directory is removed whether or not packaging succeeds.
    /// A pipeline error takes precedence over a cleanup error; a cleanup
    /// failure after a successful pipeline is returned as
    /// [`PackError::Cleanup`].
    ///
    /// # Errors
    ///
    /// Returns an error if the source root is missing, any filesystem or
    /// archive operation fails, or the staging directory cannot be removed.
    pub fn pack_with_progress(&self, progress: &mut dyn PackProgress) -> Result<PackReport> {
        let start = Instant::now();
        let staging = StagingDir::new(self.config.staging_dir());

        let result = self.run(&staging, progress);

        progress.on_stage(PackStage::Cleanup);
        tracing::info!(path = %staging.path().display(), "removing staging directory");
        let cleanup = staging.close();

        match (result, cleanup) {
            (Ok(mut report), Ok(())) => {
                report.duration = start.elapsed();
                tracing::info!(
                    archive = %report.archive_path.display(),
                    files = report.files_archived,
                    "packaging complete"
                );
                Ok(report)
            }
            (Ok(_), Err(e)) => {
                tracing::debug!(error = %e, "packaging failed");
                Err(e)
            }
            (Err(e), cleanup) => {
                if let Err(cleanup_err) = cleanup {
                    tracing::warn!(error = %cleanup_err, "cleanup after failure also failed");
                }
                tracing::debug!(error = %e, "packaging failed");
                Err(e)
            }
        }
    }

    fn run(&self, staging: &StagingDir, progress: &mut dyn PackProgress) -> Result<PackReport> {
        fs::create_dir_all(&self.config.output_dir)?;
        check_source_root(&self.config.source_root)?;

        progress.on_stage(PackStage::Staging);
        tracing::info!(source = %self.config.source_root.display(), "copying files");
        staging.prepare()?;
        let staged = staging::stage_includes(&self.config, &self.filter, staging.path(), progress)?;

        progress.on_stage(PackStage::Archiving);
        let timestamp = Local::now().naive_local();
        let file_name = archive::archive_file_name(&self.config.product_prefix, &timestamp);
        let archive_path = std::path::absolute(self.config.output_dir.join(file_name))?;
        tracing::info!(archive = %archive_path.display(), "creating ZIP archive");
        let archived = archive::create_archive(
            staging.path(),
            &archive_path,
            self.config.compression_level,
            progress,
        )?;

        let mut report = PackReport {
            archive_path,
            timestamp: archive::format_timestamp(&timestamp),
            files_staged: staged.files_copied,
            directories_staged: staged.directories_created,
            files_archived: archived.files_added,
            paths_excluded: staged.paths_excluded,
            bytes_written: archived.bytes_written,
            bytes_compressed: archived.bytes_compressed,
            ..PackReport::default()
        };
        for missing in staged.missing_includes {
            report.add_warning(format!("{} does not exist, skipped", missing.display()));
            report.missing_includes.push(missing);
        }

        Ok(report)
    }
}

fn check_source_root(root: &Path) -> Result<()> {
    if root.is_dir() {
        Ok(())
    } else {
        Err(PackError::SourceNotFound {
            path: root.to_path_buf(),
        })
    }
}
