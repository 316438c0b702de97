//! Human-readable output formatter with colors and styling.

use super::formatter::OutputFormatter;
use anyhow::Result;
use console::Term;
use console::style;
use sdkpack_core::PackReport;
use sdkpack_core::PackStage;

pub struct HumanFormatter {
    verbose: bool,
    quiet: bool,
    use_colors: bool,
    term: Term,
}

impl HumanFormatter {
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            verbose,
            quiet,
            use_colors: console::colors_enabled(),
            term: Term::stdout(),
        }
    }

    fn stage_message(stage: PackStage) -> &'static str {
        match stage {
            PackStage::Staging => "Copying files...",
            PackStage::Archiving => "Creating ZIP archive...",
            PackStage::Cleanup => "Cleaning up temporary files...",
        }
    }

    fn format_size(bytes: u64) -> String {
        const KB: u64 = 1024;
        const MB: u64 = KB * 1024;
        const GB: u64 = MB * 1024;

        if bytes >= GB {
            format!("{:.1} GB", bytes as f64 / GB as f64)
        } else if bytes >= MB {
            format!("{:.1} MB", bytes as f64 / MB as f64)
        } else if bytes >= KB {
            format!("{:.1} KB", bytes as f64 / KB as f64)
        } else {
            format!("{bytes} B")
        }
    }
}

impl OutputFormatter for HumanFormatter {
    fn format_stage(&self, stage: PackStage) {
        if self.quiet {
            return;
        }

        let message = Self::stage_message(stage);
        if self.use_colors {
            let _ = self.term.write_line(&format!("{}", style(message).dim()));
        } else {
            let _ = self.term.write_line(message);
        }
    }

    fn format_pack_result(&self, report: &PackReport) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        let _ = self.term.write_line("");
        if self.use_colors {
            let _ = self.term.write_line(&format!(
                "{} Packaging complete!",
                style("✓").green().bold()
            ));
        } else {
            let _ = self.term.write_line("Packaging complete!");
        }
        let _ = self.term.write_line(&format!(
            "SDK package saved to: {}",
            report.archive_path.display()
        ));

        if self.verbose {
            let _ = self
                .term
                .write_line(&format!("  Files archived:   {}", report.files_archived));
            let _ = self
                .term
                .write_line(&format!("  Directories:      {}", report.directories_staged));
            let _ = self
                .term
                .write_line(&format!("  Paths excluded:   {}", report.paths_excluded));
            let _ = self.term.write_line(&format!(
                "  Total size:       {}",
                Self::format_size(report.bytes_written)
            ));
            let _ = self.term.write_line(&format!(
                "  Archive size:     {}",
                Self::format_size(report.bytes_compressed)
            ));
            let _ = self.term.write_line(&format!(
                "  Compression:      {:.1}%",
                report.compression_percentage()
            ));
            let _ = self
                .term
                .write_line(&format!("  Duration:         {:?}", report.duration));

            // Already printed as they happened; recap them for verbose runs
            if report.has_warnings() {
                let _ = self.term.write_line("");
                if self.use_colors {
                    let _ = self
                        .term
                        .write_line(&format!("{}", style("Warnings:").yellow().bold()));
                } else {
                    let _ = self.term.write_line("Warnings:");
                }
                for warning in &report.warnings {
                    let _ = self.term.write_line(&format!("  - {warning}"));
                }
            }
        }

        Ok(())
    }

    fn format_error(&self, error: &anyhow::Error) {
        // Always show errors, even in quiet mode
        if self.use_colors {
            let _ = self
                .term
                .write_line(&format!("{} {error:?}", style("ERROR:").red().bold()));
        } else {
            let _ = self.term.write_line(&format!("ERROR: {error:?}"));
        }
    }

    fn format_warning(&self, message: &str) {
        if self.quiet {
            return;
        }

        if self.use_colors {
            let _ = self
                .term
                .write_line(&format!("{} {message}", style("⚠").yellow().bold()));
        } else {
            let _ = self.term.write_line(&format!("WARNING: {message}"));
        }
    }
}
