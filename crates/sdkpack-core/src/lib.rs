//! Package an SDK source tree into a timestamped ZIP archive.
//!
//! `sdkpack-core` copies an allow-listed set of files and directories into a
//! staging directory, prunes build artifacts and tooling metadata by glob
//! pattern, compresses the result, and removes the staging directory again
//! whether or not packaging succeeded.
//!
//! # Examples
//!
//! ```no_run
//! use sdkpack_core::PackConfig;
//! use sdkpack_core::SdkPacker;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = PackConfig::default()
//!     .with_source_root("path/to/sdk")
//!     .with_output_dir("dist");
//! let report = SdkPacker::new(config)?.pack()?;
//! println!("Packed {} files into {}", report.files_archived, report.archive_path.display());
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod archive;
pub mod config;
pub mod error;
pub mod filter;
pub mod packer;
pub mod progress;
pub mod report;
pub mod staging;

// Re-export main API types
pub use config::PackConfig;
pub use error::PackError;
pub use error::Result;
pub use filter::PathFilter;
pub use packer::SdkPacker;
pub use progress::NoopProgress;
pub use progress::PackProgress;
pub use progress::PackStage;
pub use report::PackReport;
