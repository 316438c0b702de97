//! CLI argument parsing using clap.

use clap::Parser;
use sdkpack_core::PackConfig;
use sdkpack_core::config::DEFAULT_OUTPUT_DIR;
use sdkpack_core::config::DEFAULT_PRODUCT_PREFIX;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sdkpack")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// SDK source root (default: current directory)
    #[arg(short, long, value_name = "DIR")]
    pub source: Option<PathBuf>,

    /// Directory receiving the archive
    #[arg(short, long, value_name = "DIR", default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,

    /// Archive name prefix
    #[arg(short, long, value_name = "NAME", default_value = DEFAULT_PRODUCT_PREFIX)]
    pub prefix: String,

    /// Path to package, relative to the source root (repeatable, replaces
    /// the default list)
    #[arg(short, long = "include", value_name = "PATH")]
    pub include: Vec<String>,

    /// Exclude pattern (glob, repeatable, added to the defaults)
    #[arg(short = 'x', long = "exclude", value_name = "PATTERN")]
    pub exclude: Vec<String>,

    /// Compression level (1-9)
    #[arg(short = 'l', long, value_parser = clap::value_parser!(u8).range(1..=9))]
    pub compression_level: Option<u8>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output results in JSON format
    #[arg(short, long)]
    pub json: bool,
}

impl Cli {
    /// Builds the packaging configuration, rooted at `default_source` unless
    /// `--source` was given.
    pub fn pack_config(&self, default_source: PathBuf) -> PackConfig {
        let mut config = PackConfig::default()
            .with_source_root(self.source.clone().unwrap_or(default_source))
            .with_output_dir(&self.output_dir)
            .with_product_prefix(self.prefix.clone());

        if !self.include.is_empty() {
            config = config.with_include_paths(self.include.clone());
        }
        for pattern in &self.exclude {
            config = config.exclude(pattern.clone());
        }
        if let Some(level) = self.compression_level {
            config = config.with_compression_level(level);
        }

        config
    }
}
