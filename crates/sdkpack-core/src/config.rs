//! Configuration for SDK packaging runs.

use crate::PackError;
use crate::Result;
use std::path::Path;
use std::path::PathBuf;

/// Product prefix used in archive file names by default.
pub const DEFAULT_PRODUCT_PREFIX: &str = "wukongimfluttersdk";

/// Output directory used when none is configured.
pub const DEFAULT_OUTPUT_DIR: &str = "./output";

/// Name of the staging directory created inside the output directory.
pub const STAGING_DIR_NAME: &str = "temp";

/// Top-level entries copied into the package by default.
pub const DEFAULT_INCLUDE_PATHS: &[&str] = &[
    "lib/",
    "assets/",
    "pubspec.yaml",
    "LICENSE",
    "README.md",
    "CHANGELOG.md",
    "analysis_options.yaml",
];

/// Glob patterns pruned from the package by default.
pub const DEFAULT_EXCLUDE_PATTERNS: &[&str] = &[
    ".git/",
    ".dart_tool/",
    ".idea/",
    ".vscode/",
    "build/",
    "*.log",
    "*.lock",
    ".packages",
    ".flutter-plugins",
    ".flutter-plugins-dependencies",
    ".metadata",
    ".DS_Store",
    "Thumbs.db",
];

/// Configuration for a packaging run.
///
/// # Examples
///
/// ```
/// use sdkpack_core::PackConfig;
///
/// let config = PackConfig::default()
///     .with_source_root("/work/sdk")
///     .with_output_dir("/work/dist")
///     .with_compression_level(9);
///
/// assert!(config.validate().is_ok());
/// assert!(config.staging_dir().ends_with("dist/temp"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackConfig {
    /// Directory the include list is resolved against.
    ///
    /// Default: `.`.
    pub source_root: PathBuf,

    /// Directory receiving the archive and the transient staging directory.
    ///
    /// Default: `./output`.
    pub output_dir: PathBuf,

    /// Archive name prefix, followed by `_<YYYYMMDD_HHMMSS>.zip`.
    ///
    /// Default: [`DEFAULT_PRODUCT_PREFIX`].
    pub product_prefix: String,

    /// Relative paths of files and directories to package, in order.
    ///
    /// Default: [`DEFAULT_INCLUDE_PATHS`].
    pub include_paths: Vec<String>,

    /// Glob patterns matched against root-relative paths and base names.
    ///
    /// Default: [`DEFAULT_EXCLUDE_PATTERNS`].
    pub exclude_patterns: Vec<String>,

    /// Deflate level (1-9).
    ///
    /// Default: `6`.
    pub compression_level: u8,
}

impl Default for PackConfig {
    fn default() -> Self {
        Self {
            source_root: PathBuf::from("."),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            product_prefix: DEFAULT_PRODUCT_PREFIX.to_string(),
            include_paths: DEFAULT_INCLUDE_PATHS.iter().map(ToString::to_string).collect(),
            exclude_patterns: DEFAULT_EXCLUDE_PATTERNS
                .iter()
                .map(ToString::to_string)
                .collect(),
            compression_level: 6,
        }
    }
}

impl PackConfig {
    /// Creates a new `PackConfig` with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the source root.
    #[must_use]
    pub fn with_source_root<P: AsRef<Path>>(mut self, root: P) -> Self {
        self.source_root = root.as_ref().to_path_buf();
        self
    }

    /// Sets the output directory.
    #[must_use]
    pub fn with_output_dir<P: AsRef<Path>>(mut self, dir: P) -> Self {
        self.output_dir = dir.as_ref().to_path_buf();
        self
    }

    /// Sets the product prefix.
    #[must_use]
    pub fn with_product_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.product_prefix = prefix.into();
        self
    }

    /// Replaces the include list.
    #[must_use]
    pub fn with_include_paths(mut self, paths: Vec<String>) -> Self {
        self.include_paths = paths;
        self
    }

    /// Replaces the exclude patterns.
    #[must_use]
    pub fn with_exclude_patterns(mut self, patterns: Vec<String>) -> Self {
        self.exclude_patterns = patterns;
        self
    }

    /// Appends one exclude pattern to the current set.
    #[must_use]
    pub fn exclude(mut self, pattern: impl Into<String>) -> Self {
        self.exclude_patterns.push(pattern.into());
        self
    }

    /// Sets the compression level.
    ///
    /// Out-of-range values are caught by [`PackConfig::validate`].
    #[must_use]
    pub fn with_compression_level(mut self, level: u8) -> Self {
        self.compression_level = level;
        self
    }

    /// Path of the staging directory, `<output_dir>/temp`.
    #[must_use]
    pub fn staging_dir(&self) -> PathBuf {
        self.output_dir.join(STAGING_DIR_NAME)
    }

    /// Validates the configuration.
    ///
    /// Glob syntax is checked when the filter is compiled, see
    /// [`crate::PathFilter::new`].
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Compression level is not in range 1-9
    /// - Product prefix is empty or contains a path separator
    /// - An include path is absolute or escapes the source root
    pub fn validate(&self) -> Result<()> {
        if !(1..=9).contains(&self.compression_level) {
            return Err(PackError::InvalidCompressionLevel {
                level: self.compression_level,
            });
        }

        if self.product_prefix.is_empty() {
            return Err(PackError::InvalidConfig(
                "product prefix must not be empty".to_string(),
            ));
        }
        if self.product_prefix.contains(['/', '\\']) {
            return Err(PackError::InvalidConfig(format!(
                "product prefix must not contain path separators: {}",
                self.product_prefix
            )));
        }

        for include in &self.include_paths {
            let path = Path::new(include);
            if path.is_absolute()
                || path
                    .components()
                    .any(|c| matches!(c, std::path::Component::ParentDir))
            {
                return Err(PackError::InvalidConfig(format!(
                    "include path must stay inside the source root: {include}"
                )));
            }
        }

        Ok(())
    }
}
