//! Pressmark - WordPress export to Markdown conversion
//!
//! Pressmark reads a WordPress WXR export, picks out the publishable posts,
//! pages and custom post types, converts their bodies to Markdown and attaches
//! the images each post references, both uploaded attachments and `<img>` tags
//! found in the body.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use pressmark::{ConversionConfig, convert_file_sync, output::write_posts};
//!
//! # fn main() -> pressmark::Result<()> {
//! let config = ConversionConfig::default();
//! let output = convert_file_sync("export.xml", &config)?;
//! for failure in &output.failures {
//!     eprintln!("skipped: {}", failure.message);
//! }
//! write_posts(&output.posts, &config.output)?;
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! - **WXR** (`wxr`): typed export schema, loading and item classification
//! - **Extraction** (`extraction`): post records, image collection, image merge
//! - **Plugins** (`plugins`): the `ContentConverter` seam for body conversion
//! - **Converters** (`converters`): the built-in HTML to Markdown converter
//! - **Core** (`core`): configuration, I/O and the conversion pipeline
//! - **Output** (`output`): markdown files with YAML front-matter

#![deny(unsafe_code)]

pub mod converters;
pub mod core;
pub mod error;
pub mod extraction;
pub mod output;
pub mod plugins;
pub mod types;
pub mod wxr;

pub use error::{PressmarkError, Result};
pub use types::*;

pub use core::config::{ConversionConfig, FailurePolicy, OutputConfig};
pub use core::convert::{convert_bytes, convert_file, convert_file_sync};
pub use core::pipeline::convert_document;

pub use converters::MarkdownConverter;
pub use plugins::{ContentConverter, ConversionContext, Plugin};
