//! ZIP archive creation from the staging tree.

use crate::PackError;
use crate::PackProgress;
use crate::Result;
use chrono::DateTime;
use chrono::Datelike;
use chrono::Local;
use chrono::NaiveDateTime;
use chrono::Timelike;
use std::fs;
use std::fs::File;
use std::io;
use std::path::Path;
use std::path::PathBuf;
use std::time::SystemTime;
use walkdir::WalkDir;
use zip::CompressionMethod;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

/// `strftime` layout of the archive timestamp.
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Statistics for one written archive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArchiveReport {
    /// Files written to the archive.
    pub files_added: usize,

    /// Uncompressed bytes written.
    pub bytes_written: u64,

    /// Size of the finished archive file.
    pub bytes_compressed: u64,
}

/// Formats an archive timestamp, e.g. `20240131_235959`.
#[must_use]
pub fn format_timestamp(timestamp: &NaiveDateTime) -> String {
    timestamp.format(TIMESTAMP_FORMAT).to_string()
}

/// Builds the archive file name `<prefix>_<YYYYMMDD_HHMMSS>.zip`.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use sdkpack_core::archive::archive_file_name;
///
/// let ts = NaiveDate::from_ymd_opt(2024, 3, 9)
///     .and_then(|d| d.and_hms_opt(7, 5, 1))
///     .unwrap();
/// assert_eq!(archive_file_name("mysdk", &ts), "mysdk_20240309_070501.zip");
/// ```
#[must_use]
pub fn archive_file_name(prefix: &str, timestamp: &NaiveDateTime) -> String {
    format!("{prefix}_{}.zip", format_timestamp(timestamp))
}

/// Writes every regular file under `staging_root` into a new ZIP at
/// `output`.
///
/// Entry names are relative to `staging_root` and use `/` separators.
/// Directories are not stored as separate entries. Files are deflated at
/// `compression_level` and keep their unix permissions and modification
/// time.
///
/// # Errors
///
/// Returns an error if the staging tree cannot be walked, a file cannot be
/// read, or the archive cannot be written.
pub fn create_archive(
    staging_root: &Path,
    output: &Path,
    compression_level: u8,
    progress: &mut dyn PackProgress,
) -> Result<ArchiveReport> {
    let files = collect_files(staging_root)?;
    progress.on_archive_start(files.len());

    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .compression_level(Some(i64::from(compression_level)));

    let mut zip = ZipWriter::new(File::create(output)?);
    let mut report = ArchiveReport::default();

    for (path, archive_path) in &files {
        let mut file = File::open(path)?;
        let metadata = file.metadata()?;
        let entry_options = entry_options(options, &metadata);
        let name = zip_entry_name(archive_path)?;

        zip.start_file(name.as_str(), entry_options)?;
        let bytes = io::copy(&mut file, &mut zip)?;
        tracing::debug!(entry = %name, bytes, "archived");

        report.files_added += 1;
        report.bytes_written += bytes;
        progress.on_entry_archived(archive_path, bytes);
    }

    zip.finish()?;
    report.bytes_compressed = fs::metadata(output)?.len();
    progress.on_archive_complete();

    Ok(report)
}

/// Collects `(path, archive_path)` pairs for all regular files, sorted.
fn collect_files(root: &Path) -> Result<Vec<(PathBuf, PathBuf)>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(|source| PackError::Traverse {
            path: root.to_path_buf(),
            source,
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let relative = entry
            .path()
            .strip_prefix(root)
            .map_err(|_| {
                io::Error::other(format!(
                    "{} is not under staging root {}",
                    entry.path().display(),
                    root.display()
                ))
            })?
            .to_path_buf();
        files.push((entry.into_path(), relative));
    }

    Ok(files)
}

fn entry_options(options: SimpleFileOptions, metadata: &fs::Metadata) -> SimpleFileOptions {
    // Entries at or past the 32-bit size limit need ZIP64 headers
    let options = options.large_file(metadata.len() >= u64::from(u32::MAX));
    let options = match metadata.modified() {
        Ok(modified) => options.last_modified_time(zip_datetime(modified)),
        Err(_) => options,
    };

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        options.unix_permissions(metadata.permissions().mode())
    }
    #[cfg(not(unix))]
    {
        options
    }
}

/// Converts a filesystem time to a ZIP (DOS) timestamp in local time.
///
/// DOS timestamps cannot represent dates before 1980; those fall back to
/// the format's epoch.
fn zip_datetime(time: SystemTime) -> zip::DateTime {
    let local: DateTime<Local> = time.into();
    let (Ok(year), Ok(month), Ok(day), Ok(hour), Ok(minute), Ok(second)) = (
        u16::try_from(local.year()),
        u8::try_from(local.month()),
        u8::try_from(local.day()),
        u8::try_from(local.hour()),
        u8::try_from(local.minute()),
        u8::try_from(local.second()),
    ) else {
        return zip::DateTime::default();
    };
    zip::DateTime::from_date_and_time(year, month, day, hour, minute, second).unwrap_or_default()
}

/// Joins path components with `/`, as ZIP entry names require.
fn zip_entry_name(path: &Path) -> Result<String> {
    let mut parts = Vec::new();
    for component in path.components() {
        let part = component.as_os_str().to_str().ok_or_else(|| {
            io::Error::other(format!("path is not valid UTF-8: {}", path.display()))
        })?;
        parts.push(part);
    }
    Ok(parts.join("/"))
}
