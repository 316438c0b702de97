//! Pack command implementation.

use crate::cli::Cli;
use crate::error::add_pack_context;
use crate::output::OutputFormatter;
use crate::progress::CliProgress;
use anyhow::Context;
use anyhow::Result;
use sdkpack_core::SdkPacker;
use std::env;

pub fn execute(cli: &Cli, formatter: &dyn OutputFormatter) -> Result<()> {
    let cwd = env::current_dir().context("failed to get current directory")?;
    let packer = add_pack_context(SdkPacker::new(cli.pack_config(cwd)))?;
    let config = packer.config();
    tracing::debug!(
        source = %config.source_root.display(),
        output = %config.output_dir.display(),
        includes = config.include_paths.len(),
        excludes = config.exclude_patterns.len(),
        "resolved configuration"
    );

    // Progress bar only for interactive human output
    let show_bar = !cli.json && !cli.quiet && CliProgress::should_show();
    let report = {
        let mut progress = CliProgress::new(formatter, show_bar);
        add_pack_context(packer.pack_with_progress(&mut progress))?
    };

    formatter.format_pack_result(&report)?;

    Ok(())
}
