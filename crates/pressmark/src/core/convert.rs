//! Main conversion entry points.
//!
//! - [`convert_file`] - load an export file and convert it
//! - [`convert_bytes`] - convert an export already in memory
//! - [`convert_file_sync`] - blocking wrapper for [`convert_file`]
//!
//! All of them use the built-in [`MarkdownConverter`]. Use
//! [`convert_document`](crate::core::pipeline::convert_document) to plug in
//! another converter.

use crate::Result;
use crate::converters::MarkdownConverter;
use crate::core::config::ConversionConfig;
use crate::core::pipeline::convert_document;
use crate::types::ConversionOutput;
use crate::wxr::{load_document, parse_document_bytes};
use once_cell::sync::Lazy;
use std::path::Path;

/// Global Tokio runtime for synchronous operations.
///
/// Lazily built on first use and shared by all sync wrappers. Building it can
/// only fail when the process is out of threads or memory.
static GLOBAL_RUNTIME: Lazy<tokio::runtime::Runtime> = Lazy::new(|| {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .expect("Failed to create global Tokio runtime - system may be out of resources")
});

/// Load and convert an export file.
///
/// # Errors
///
/// Returns `PressmarkError::Validation` if the file doesn't exist or the config
/// is invalid, `PressmarkError::Io` for read errors, and
/// `PressmarkError::MalformedDocument` if the export can't be parsed.
///
/// # Example
///
/// ```rust,no_run
/// use pressmark::core::convert::convert_file;
/// use pressmark::core::config::ConversionConfig;
///
/// # async fn example() -> pressmark::Result<()> {
/// let output = convert_file("export.xml", &ConversionConfig::default()).await?;
/// println!("{} posts", output.posts.len());
/// # Ok(())
/// # }
/// ```
#[cfg_attr(feature = "otel", tracing::instrument(
    skip(config, path),
    fields(
        conversion.path = %path.as_ref().display(),
    )
))]
pub async fn convert_file(path: impl AsRef<Path>, config: &ConversionConfig) -> Result<ConversionOutput> {
    config.validate()?;
    let document = load_document(path).await?;
    convert_document(&document, config, &MarkdownConverter)
}

/// Convert an export held in memory.
pub fn convert_bytes(content: &[u8], config: &ConversionConfig) -> Result<ConversionOutput> {
    config.validate()?;
    let document = parse_document_bytes(content)?;
    convert_document(&document, config, &MarkdownConverter)
}

/// Synchronous wrapper for `convert_file`.
///
/// Blocks the current thread on the shared global runtime. Must not be called
/// from inside an async context.
pub fn convert_file_sync(path: impl AsRef<Path>, config: &ConversionConfig) -> Result<ConversionOutput> {
    GLOBAL_RUNTIME.block_on(convert_file(path, config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PressmarkError;
    use tempfile::tempdir;

    const EXPORT: &str = r#"<rss xmlns:wp="http://wordpress.org/export/1.2/"><channel>
  <item>
    <title>Only</title>
    <pubDate>Sat, 04 Jul 2020 12:00:00 +0000</pubDate>
    <wp:post_id>5</wp:post_id>
    <wp:post_name>only</wp:post_name>
    <wp:post_type>page</wp:post_type>
    <wp:status>publish</wp:status>
  </item>
</channel></rss>"#;

    #[test]
    fn test_convert_bytes() {
        let output = convert_bytes(EXPORT.as_bytes(), &ConversionConfig::default()).unwrap();
        assert_eq!(output.posts.len(), 1);
        assert_eq!(output.posts[0].meta.post_type, "page");
        assert_eq!(output.posts[0].frontmatter.date.to_string(), "2020-07-04");
    }

    #[test]
    fn test_convert_bytes_malformed() {
        let err = convert_bytes(b"<html></html>", &ConversionConfig::default()).unwrap_err();
        assert!(matches!(err, PressmarkError::MalformedDocument { .. }));
    }

    #[tokio::test]
    async fn test_convert_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("export.xml");
        std::fs::write(&path, EXPORT).unwrap();

        let output = convert_file(&path, &ConversionConfig::default()).await.unwrap();
        assert_eq!(output.posts[0].meta.slug, "only");
    }

    #[test]
    fn test_convert_file_sync_missing_file() {
        let err = convert_file_sync("/nonexistent/export.xml", &ConversionConfig::default()).unwrap_err();
        assert!(matches!(err, PressmarkError::Validation { .. }));
    }
}
