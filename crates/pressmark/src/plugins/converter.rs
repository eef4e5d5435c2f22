//! Content converter plugin trait.
//!
//! A content converter turns the raw body of one export item into the text
//! written below the front-matter. The built-in implementation is
//! [`MarkdownConverter`](crate::converters::MarkdownConverter).

use crate::Result;
use crate::core::config::ConversionConfig;
use crate::plugins::Plugin;
use crate::wxr::WxrItem;

/// Per-item facts the post extractor hands to a converter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConversionContext<'a> {
    pub post_id: &'a str,
    pub post_type: &'a str,
    pub link: Option<&'a str>,
}

/// Trait for body conversion plugins.
///
/// Called exactly once per converted item, in document order.
///
/// # Example
///
/// ```rust
/// use pressmark::plugins::{ContentConverter, ConversionContext, Plugin};
/// use pressmark::core::config::ConversionConfig;
/// use pressmark::wxr::WxrItem;
/// use pressmark::Result;
///
/// struct RawHtml;
///
/// impl Plugin for RawHtml {
///     fn name(&self) -> &str { "raw-html" }
///     fn version(&self) -> String { "1.0.0".to_string() }
/// }
///
/// impl ContentConverter for RawHtml {
///     fn convert(&self, item: &WxrItem, _ctx: &ConversionContext<'_>, _config: &ConversionConfig) -> Result<String> {
///         Ok(item.content.clone().unwrap_or_default())
///     }
/// }
/// ```
pub trait ContentConverter: Plugin {
    /// Convert the body of `item`.
    ///
    /// # Errors
    ///
    /// Errors abort the run; they are not treated as per-item failures.
    fn convert(&self, item: &WxrItem, context: &ConversionContext<'_>, config: &ConversionConfig) -> Result<String>;
}
