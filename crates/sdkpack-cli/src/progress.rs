//! Console progress for packaging runs.

use crate::output::OutputFormatter;
use console::Term;
use indicatif::ProgressBar;
use indicatif::ProgressStyle;
use sdkpack_core::PackProgress;
use sdkpack_core::PackStage;
use std::path::Path;

/// Forwards pipeline events to the output formatter and, on a TTY, drives a
/// progress bar while the archive is written.
pub struct CliProgress<'a> {
    formatter: &'a dyn OutputFormatter,
    show_bar: bool,
    bar: Option<ProgressBar>,
    bytes_written: u64,
}

impl<'a> CliProgress<'a> {
    #[must_use]
    pub fn new(formatter: &'a dyn OutputFormatter, show_bar: bool) -> Self {
        Self {
            formatter,
            show_bar,
            bar: None,
            bytes_written: 0,
        }
    }

    /// Checks if we should show progress (TTY detection).
    #[must_use]
    pub fn should_show() -> bool {
        Term::stdout().is_term()
    }

    fn new_bar(total: usize) -> ProgressBar {
        let bar = ProgressBar::new(total as u64);
        // Template: "Compressing [████████░░░░] 42/100 files (15.2 MB)"
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{msg} [{bar:40.cyan/blue}] {pos}/{len} files ({prefix})")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("█▓░"),
        );
        bar.set_message("Compressing");
        bar
    }
}

impl Drop for CliProgress<'_> {
    fn drop(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
    }
}

impl PackProgress for CliProgress<'_> {
    fn on_stage(&mut self, stage: PackStage) {
        self.formatter.format_stage(stage);
    }

    fn on_missing_include(&mut self, path: &Path) {
        self.formatter
            .format_warning(&format!("{} does not exist, skipped", path.display()));
    }

    fn on_archive_start(&mut self, total: usize) {
        if self.show_bar {
            self.bar = Some(Self::new_bar(total));
        }
    }

    fn on_entry_archived(&mut self, _archive_path: &Path, bytes: u64) {
        self.bytes_written += bytes;
        if let Some(bar) = &self.bar {
            bar.set_prefix(humanize_bytes(self.bytes_written));
            bar.inc(1);
        }
    }

    fn on_archive_complete(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
    }
}

/// Converts bytes to human-readable format (KB, MB, GB, TB).
fn humanize_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;
    const TB: u64 = GB * 1024;

    if bytes >= TB {
        format!("{:.1} TB", bytes as f64 / TB as f64)
    } else if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{bytes} B")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sdkpack_core::PackReport;
    use std::cell::RefCell;

    #[derive(Default)]
    struct Capture {
        lines: RefCell<Vec<String>>,
    }

    impl OutputFormatter for Capture {
        fn format_stage(&self, stage: PackStage) {
            self.lines.borrow_mut().push(format!("stage:{stage}"));
        }

        fn format_pack_result(&self, _report: &PackReport) -> anyhow::Result<()> {
            Ok(())
        }

        fn format_error(&self, _error: &anyhow::Error) {}

        fn format_warning(&self, message: &str) {
            self.lines.borrow_mut().push(format!("warn:{message}"));
        }
    }

    #[test]
    fn test_humanize_bytes() {
        assert_eq!(humanize_bytes(0), "0 B");
        assert_eq!(humanize_bytes(512), "512 B");
        assert_eq!(humanize_bytes(1536), "1.5 KB");
        assert_eq!(humanize_bytes(1024 * 1024), "1.0 MB");
        assert_eq!(humanize_bytes(1024_u64.pow(4)), "1.0 TB");
    }

    #[test]
    fn test_events_forwarded_to_formatter() {
        let capture = Capture::default();
        {
            let mut progress = CliProgress::new(&capture, false);
            progress.on_stage(PackStage::Staging);
            progress.on_missing_include(Path::new("LICENSE"));
            progress.on_archive_start(2);
            progress.on_entry_archived(Path::new("lib/a.dart"), 100);
            progress.on_entry_archived(Path::new("pubspec.yaml"), 28);
            progress.on_archive_complete();
            assert_eq!(progress.bytes_written, 128);
            assert!(progress.bar.is_none());
        }

        let lines = capture.lines.borrow();
        assert_eq!(
            *lines,
            vec![
                "stage:staging".to_string(),
                "warn:LICENSE does not exist, skipped".to_string(),
            ]
        );
    }

    #[test]
    fn test_bar_created_and_cleared() {
        let capture = Capture::default();
        let mut progress = CliProgress::new(&capture, true);
        progress.on_archive_start(1);
        assert!(progress.bar.is_some());
        progress.on_entry_archived(Path::new("a"), 1);
        progress.on_archive_complete();
        assert!(progress.bar.is_none());
    }
}
