//! WXR export loading and item classification.
//!
//! # Example
//!
//! ```rust
//! use pressmark::wxr::{classify, parse_document};
//!
//! # fn example() -> pressmark::Result<()> {
//! let doc = parse_document("<rss><channel><item><wp:post_type xmlns:wp=\"wp\">post</wp:post_type></item></channel></rss>")?;
//! assert_eq!(classify::items_of_types(&doc, &["post"]).len(), 1);
//! # Ok(())
//! # }
//! ```

pub mod classify;
pub mod document;

pub use document::{WxrCategory, WxrChannel, WxrDocument, WxrItem, WxrPostMeta, parse_document, parse_document_bytes};

use crate::Result;
use crate::core::io;
use std::path::Path;

/// Read and parse an export file.
#[cfg_attr(feature = "otel", tracing::instrument(
    fields(
        load.path = %path.as_ref().display(),
    )
))]
pub async fn load_document(path: impl AsRef<Path>) -> Result<WxrDocument> {
    let path = path.as_ref();
    io::validate_file_exists(path)?;
    let bytes = io::read_file_async(path).await?;
    parse_document_bytes(&bytes)
}

/// Read and parse an export file without an async runtime.
pub fn load_document_sync(path: impl AsRef<Path>) -> Result<WxrDocument> {
    let path = path.as_ref();
    io::validate_file_exists(path)?;
    let bytes = io::read_file_sync(path)?;
    parse_document_bytes(&bytes)
}
