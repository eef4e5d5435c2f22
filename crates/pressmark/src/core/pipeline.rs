//! Conversion pipeline over a loaded export.
//!
//! Stages, all synchronous and in-memory:
//!
//! 1. select items of the configured post types, drop trashed and draft ones
//! 2. extract a post record per item
//! 3. collect attached and scraped images
//! 4. merge images into posts

use crate::Result;
use crate::core::config::ConversionConfig;
use crate::extraction::{collect_images, extract_posts, merge_images};
use crate::plugins::ContentConverter;
use crate::types::ConversionOutput;
use crate::wxr::WxrDocument;
use crate::wxr::classify::{items_of_types, publishable};

/// Run every stage over `document`.
///
/// The converter is initialized before the first item and shut down after the
/// last, whether or not extraction succeeded.
///
/// # Errors
///
/// Returns the first item error under `FailurePolicy::FailFast`, and any
/// non-item error (converter failures included) regardless of policy.
#[cfg_attr(feature = "otel", tracing::instrument(
    skip(document, config, converter),
    fields(
        pipeline.items = document.items.len(),
        pipeline.converter = converter.name(),
    )
))]
pub fn convert_document(
    document: &WxrDocument,
    config: &ConversionConfig,
    converter: &dyn ContentConverter,
) -> Result<ConversionOutput> {
    let post_types = config.post_types();
    let selected = publishable(items_of_types(document, &post_types));
    tracing::debug!(
        "Selected {} of {} items for post types {:?}",
        selected.len(),
        document.items.len(),
        post_types
    );

    converter.initialize()?;
    let extracted = extract_posts(selected, converter, config);
    let shutdown = converter.shutdown();
    let (mut posts, failures) = extracted?;
    shutdown?;

    let images = collect_images(document, config);
    merge_images(&mut posts, &images);

    Ok(ConversionOutput { posts, failures })
}
