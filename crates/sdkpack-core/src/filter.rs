//! Exclude-pattern matching for staged paths.
//!
//! A path is excluded when its form relative to the source root, or its base
//! name alone, matches any exclude pattern. Patterns use shell glob syntax
//! (`*`, `?`, `[abc]`, `[!abc]`); `*` also crosses path separators. A
//! trailing separator marks a directory pattern and is stripped before
//! compilation, so `build/` matches any path component named `build`.

use crate::PackError;
use crate::Result;
use glob::MatchOptions;
use glob::Pattern;
use std::path::Path;
use std::path::PathBuf;

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: false,
    require_literal_leading_dot: false,
};

/// Compiled exclude patterns bound to a source root.
///
/// # Examples
///
/// ```
/// use sdkpack_core::PathFilter;
/// use std::path::Path;
///
/// let patterns = vec![".dart_tool/".to_string(), "*.log".to_string()];
/// let filter = PathFilter::new("/sdk", &patterns)?;
///
/// assert!(filter.is_excluded(Path::new("/sdk/lib/.dart_tool")));
/// assert!(filter.is_excluded(Path::new("/sdk/lib/debug.log")));
/// assert!(!filter.is_excluded(Path::new("/sdk/lib/main.dart")));
/// # Ok::<(), sdkpack_core::PackError>(())
/// ```
#[derive(Debug, Clone)]
pub struct PathFilter {
    root: PathBuf,
    patterns: Vec<Pattern>,
}

impl PathFilter {
    /// Compiles `patterns` for paths under `root`.
    ///
    /// # Errors
    ///
    /// Returns [`PackError::InvalidPattern`] if a pattern is not valid glob
    /// syntax (for example an unclosed `[`).
    pub fn new<P: AsRef<Path>>(root: P, patterns: &[String]) -> Result<Self> {
        let patterns = patterns
            .iter()
            .map(|raw| compile_pattern(raw))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            root: root.as_ref().to_path_buf(),
            patterns,
        })
    }

    /// Source root that relative paths are computed against.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Number of compiled patterns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Returns `true` if no patterns are configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Decides whether `path` is pruned from the package.
    ///
    /// Paths outside the root are matched in the form they were given.
    #[must_use]
    pub fn is_excluded(&self, path: &Path) -> bool {
        let relative = path.strip_prefix(&self.root).unwrap_or(path);
        let base_name = path.file_name().and_then(|name| name.to_str());

        self.patterns.iter().any(|pattern| {
            pattern.matches_path_with(relative, MATCH_OPTIONS)
                || base_name.is_some_and(|name| pattern.matches_with(name, MATCH_OPTIONS))
        })
    }
}

fn compile_pattern(raw: &str) -> Result<Pattern> {
    let trimmed = raw.trim_end_matches(['/', std::path::MAIN_SEPARATOR]);
    Pattern::new(trimmed).map_err(|e| PackError::InvalidPattern {
        pattern: raw.to_string(),
        reason: e.msg.to_string(),
    })
}
