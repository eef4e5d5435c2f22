//! Image discovery.
//!
//! Two independent sources:
//!
//! - **Attached** images come from attachment items whose URL has an image
//!   extension. They carry the attachment id, so they can become cover images.
//! - **Scraped** images are `<img src>` values pattern-matched out of the raw
//!   body of each selected post and resolved to absolute URLs.
//!
//! Scraping is best effort. It does not parse HTML: `srcset`, unquoted `src`,
//! sources with a query string after the extension, and markup assembled by
//! scripts or shortcodes are all missed.

use crate::core::config::ConversionConfig;
use crate::extraction::url::{filename_from_url, resolve_image_url};
use crate::types::ImageRef;
use crate::wxr::WxrDocument;
use crate::wxr::classify::{attachments, items_of_types};
use once_cell::sync::Lazy;
use regex::Regex;

static IMAGE_EXTENSION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\.(?:gif|jpe?g|png)$").expect("Image extension regex pattern is valid and should compile"));

static IMG_SRC: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)<img\s(?:[^>]*?\s)?src\s*=\s*["']([^"'<>]+?\.(?:gif|jpe?g|png))["'][^>]*>"#)
        .expect("Image tag regex pattern is valid and should compile")
});

/// Whether a URL ends in a recognized image extension (gif, jpg, jpeg, png).
pub fn has_image_extension(url: &str) -> bool {
    IMAGE_EXTENSION.is_match(url.trim())
}

/// `src` values of `<img>` tags pointing at image files, in document order.
///
/// ```rust
/// use pressmark::extraction::images::scrape_image_sources;
///
/// let html = r#"<p><IMG class="wide" src="a.PNG" alt=""> <img data-src="x.png" src='b.jpg'></p>"#;
/// assert_eq!(scrape_image_sources(html), vec!["a.PNG", "b.jpg"]);
/// ```
pub fn scrape_image_sources(html: &str) -> Vec<&str> {
    IMG_SRC
        .captures_iter(html)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
        .collect()
}

/// Rewrite scraped `<img src>` values to `<prefix><filename>`.
///
/// Only sources [`scrape_image_sources`] would report and that resolve against
/// `link` are touched, so every rewritten tag names an image that
/// [`collect_scraped_images`] also collects. Other attributes repeating the
/// source, such as `data-src`, are left as they are.
pub fn rewrite_image_sources(html: &str, prefix: &str, link: Option<&str>) -> String {
    IMG_SRC
        .replace_all(html, |caps: &regex::Captures<'_>| {
            let (Some(tag), Some(src)) = (caps.get(0), caps.get(1)) else {
                return caps[0].to_string();
            };
            if resolve_image_url(src.as_str(), link).is_none() {
                return tag.as_str().to_string();
            }

            let filename = filename_from_url(src.as_str());
            let start = src.start() - tag.start();
            let end = src.end() - tag.start();
            format!("{}{}{}{}", &tag.as_str()[..start], prefix, filename, &tag.as_str()[end..])
        })
        .into_owned()
}

/// Images declared by attachment items.
///
/// The attachment's own id becomes the image id and its parent becomes the
/// owning post. Attachments without an id, parent, or image URL are skipped.
pub fn collect_attached_images(document: &WxrDocument) -> Vec<ImageRef> {
    attachments(document)
        .into_iter()
        .filter_map(|attachment| {
            let url = attachment.attachment_url.as_deref()?.trim();
            if !has_image_extension(url) {
                return None;
            }
            let id = attachment.id()?;
            let parent = attachment.post_parent.as_deref()?;
            Some(ImageRef::attached(id, parent, url))
        })
        .collect()
}

/// Images referenced by `<img>` tags in the bodies of items of `post_types`.
///
/// Items are not filtered by status here; images of unconverted items are
/// dropped when merging.
pub fn collect_scraped_images<S: AsRef<str>>(document: &WxrDocument, post_types: &[S]) -> Vec<ImageRef> {
    let mut images = Vec::new();

    for item in items_of_types(document, post_types) {
        let (Some(post_id), Some(content)) = (item.id(), item.content.as_deref()) else {
            continue;
        };

        for src in scrape_image_sources(content) {
            match resolve_image_url(src, item.link.as_deref()) {
                Some(url) => images.push(ImageRef::scraped(post_id, url)),
                None => tracing::debug!("Item {}: cannot resolve image source '{}'", post_id, src),
            }
        }
    }

    images
}

/// All images enabled by `config`: attached first, then scraped.
pub fn collect_images(document: &WxrDocument, config: &ConversionConfig) -> Vec<ImageRef> {
    let mut images = Vec::new();

    if config.save_attached_images {
        images.extend(collect_attached_images(document));
    }

    if config.save_scraped_images {
        images.extend(collect_scraped_images(document, &config.post_types()));
    }

    tracing::debug!("Collected {} image references", images.len());
    images
}
