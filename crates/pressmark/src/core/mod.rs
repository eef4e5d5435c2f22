//! Conversion orchestration.
//!
//! - **Entry points** (`convert`): `convert_file()`, `convert_bytes()` and the sync wrapper
//! - **Pipeline** (`pipeline`): the select → extract → collect → merge stages
//! - **Configuration** (`config`): loading and validating `ConversionConfig`
//! - **I/O** (`io`): file reading and writing helpers
//!
//! # Example
//!
//! ```rust,no_run
//! use pressmark::core::convert::convert_file;
//! use pressmark::core::config::ConversionConfig;
//!
//! # async fn example() -> pressmark::Result<()> {
//! let config = ConversionConfig::default();
//! let output = convert_file("export.xml", &config).await?;
//! println!("Converted {} posts", output.posts.len());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod convert;
pub mod io;
pub mod pipeline;

pub use config::{ConversionConfig, FailurePolicy, OutputConfig};
pub use convert::{convert_bytes, convert_file, convert_file_sync};
pub use pipeline::convert_document;
