//! Export items to post records.

use crate::core::config::{ConversionConfig, FailurePolicy};
use crate::plugins::{ContentConverter, ConversionContext};
use crate::types::{Frontmatter, ItemFailure, PostMeta, PostRecord};
use crate::wxr::WxrItem;
use crate::wxr::document::{CATEGORY_DOMAIN, TAG_DOMAIN, THUMBNAIL_META_KEY};
use crate::{PressmarkError, Result};
use chrono::{DateTime, NaiveDate, Utc};

/// Parse an RFC 2822 publish date and return its calendar date in UTC.
///
/// ```rust
/// use pressmark::extraction::post::parse_pub_date;
///
/// let date = parse_pub_date("Wed, 01 Jan 2020 00:00:00 +0000", None).unwrap();
/// assert_eq!(date.to_string(), "2020-01-01");
///
/// // 23:30 in New York is already the next day in UTC.
/// let date = parse_pub_date("Tue, 31 Dec 2019 23:30:00 -0500", None).unwrap();
/// assert_eq!(date.to_string(), "2020-01-01");
/// ```
pub fn parse_pub_date(value: &str, item_id: Option<&str>) -> Result<NaiveDate> {
    DateTime::parse_from_rfc2822(value.trim())
        .map(|date| date.with_timezone(&Utc).date_naive())
        .map_err(|source| PressmarkError::UnparseableDate {
            value: value.to_string(),
            item_id: item_id.map(str::to_string),
            source,
        })
}

/// Build one post record from an export item.
///
/// The converter is called once, after every required field checked out.
///
/// # Errors
///
/// - `MissingRequiredField` if `post_id`, `pubDate`, or `title` is absent
/// - `UnparseableDate` if `pubDate` is not RFC 2822
/// - whatever the converter returns
pub fn extract_post(item: &WxrItem, converter: &dyn ContentConverter, config: &ConversionConfig) -> Result<PostRecord> {
    let id = item.id().ok_or_else(|| PressmarkError::missing_field("post_id", None))?;
    let pub_date = item
        .pub_date
        .as_deref()
        .ok_or_else(|| PressmarkError::missing_field("pubDate", Some(id)))?;
    let title = item
        .title
        .as_deref()
        .ok_or_else(|| PressmarkError::missing_field("title", Some(id)))?;
    let date = parse_pub_date(pub_date, Some(id))?;

    let slug = item.post_name.clone().unwrap_or_default();
    let post_type = item.post_type.clone().unwrap_or_default();

    let context = ConversionContext {
        post_id: id,
        post_type: &post_type,
        link: item.link.as_deref(),
    };
    let content = converter.convert(item, &context, config)?;

    Ok(PostRecord {
        meta: PostMeta {
            id: id.to_string(),
            slug: slug.clone(),
            cover_image_id: item.meta_value(THUMBNAIL_META_KEY).map(str::to_string),
            image_urls: Vec::new(),
            post_type,
        },
        frontmatter: Frontmatter {
            title: title.to_string(),
            date,
            slug,
            link: item.link.clone().unwrap_or_default(),
            author: item.creator.clone().unwrap_or_default(),
            description: item.description.clone().unwrap_or_default(),
            comment_status: item.comment_status.clone().unwrap_or_default(),
            ping_status: item.ping_status.clone().unwrap_or_default(),
            sticky: item.sticky(),
            categories: item.terms_in_domain(CATEGORY_DOMAIN),
            // Tags live in the same <category> list, marked by their domain.
            tags: item.terms_in_domain(TAG_DOMAIN),
            cover_image: None,
        },
        content,
    })
}

/// Build post records for `items`, in order.
///
/// Item-scoped errors are handled according to `config.failure_policy`:
/// `Skip` records them in the returned failures, `FailFast` returns the first.
/// Any other error aborts immediately.
pub fn extract_posts<'a>(
    items: impl IntoIterator<Item = &'a WxrItem>,
    converter: &dyn ContentConverter,
    config: &ConversionConfig,
) -> Result<(Vec<PostRecord>, Vec<ItemFailure>)> {
    let mut posts = Vec::new();
    let mut failures = Vec::new();

    for item in items {
        match extract_post(item, converter, config) {
            Ok(post) => posts.push(post),
            Err(err) if err.is_item_error() && config.failure_policy == FailurePolicy::Skip => {
                tracing::warn!("Skipping item: {}", err);
                failures.push(ItemFailure::from(&err));
            }
            Err(err) => return Err(err),
        }
    }

    tracing::debug!("Extracted {} posts, skipped {} items", posts.len(), failures.len());
    Ok((posts, failures))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugins::Plugin;
    use crate::wxr::{WxrCategory, WxrPostMeta};
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Echoes the raw body and counts calls.
    struct EchoConverter {
        calls: AtomicUsize,
    }

    impl EchoConverter {
        fn new() -> Self {
            Self {
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl Plugin for EchoConverter {
        fn name(&self) -> &str {
            "echo"
        }

        fn version(&self) -> String {
            "0.0.0".to_string()
        }
    }

    impl ContentConverter for EchoConverter {
        fn convert(&self, item: &WxrItem, context: &ConversionContext<'_>, _config: &ConversionConfig) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(format!("{}:{}", context.post_id, item.content.as_deref().unwrap_or_default()))
        }
    }

    fn category(domain: Option<&str>, name: &str) -> WxrCategory {
        WxrCategory {
            domain: domain.map(str::to_string),
            nicename: None,
            name: name.to_string(),
        }
    }

    fn item(id: &str) -> WxrItem {
        WxrItem {
            title: Some("Hello".to_string()),
            link: Some("https://example.com/hello/".to_string()),
            pub_date: Some("Wed, 01 Jan 2020 00:00:00 +0000".to_string()),
            creator: Some("admin".to_string()),
            description: Some(String::new()),
            post_id: Some(id.to_string()),
            post_name: Some("hello".to_string()),
            post_type: Some("post".to_string()),
            status: Some("publish".to_string()),
            comment_status: Some("open".to_string()),
            ping_status: Some("closed".to_string()),
            is_sticky: Some("0".to_string()),
            content: Some("<p>Hi</p>".to_string()),
            categories: vec![
                category(Some("category"), "News"),
                category(Some("post_tag"), "rust"),
                category(Some("post_format"), "post-format-aside"),
                category(None, "Loose"),
                category(Some("category"), "Tech"),
            ],
            postmeta: vec![
                WxrPostMeta {
                    key: "_edit_last".to_string(),
                    value: "1".to_string(),
                },
                WxrPostMeta {
                    key: "_thumbnail_id".to_string(),
                    value: "42".to_string(),
                },
            ],
            ..Default::default()
        }
    }

    #[test]
    fn test_extract_post_fields() {
        let converter = EchoConverter::new();
        let post = extract_post(&item("7"), &converter, &ConversionConfig::default()).unwrap();

        assert_eq!(post.meta.id, "7");
        assert_eq!(post.meta.slug, "hello");
        assert_eq!(post.meta.cover_image_id.as_deref(), Some("42"));
        assert!(post.meta.image_urls.is_empty());
        assert_eq!(post.meta.post_type, "post");

        let fm = &post.frontmatter;
        assert_eq!(fm.title, "Hello");
        assert_eq!(fm.date.to_string(), "2020-01-01");
        assert_eq!(fm.slug, "hello");
        assert_eq!(fm.link, "https://example.com/hello/");
        assert_eq!(fm.author, "admin");
        assert_eq!(fm.comment_status, "open");
        assert_eq!(fm.ping_status, "closed");
        assert!(!fm.sticky);
        assert!(fm.cover_image.is_none());

        assert_eq!(post.content, "7:<p>Hi</p>");
        assert_eq!(converter.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_categories_and_tags_partition() {
        let converter = EchoConverter::new();
        let post = extract_post(&item("7"), &converter, &ConversionConfig::default()).unwrap();

        assert_eq!(post.frontmatter.categories, vec!["News", "Tech"]);
        assert_eq!(post.frontmatter.tags, vec!["rust"]);
    }

    #[test]
    fn test_no_categories_no_meta() {
        let converter = EchoConverter::new();
        let bare = WxrItem {
            categories: vec![],
            postmeta: vec![],
            ..item("7")
        };
        let post = extract_post(&bare, &converter, &ConversionConfig::default()).unwrap();

        assert!(post.frontmatter.categories.is_empty());
        assert!(post.frontmatter.tags.is_empty());
        assert!(post.meta.cover_image_id.is_none());
    }

    #[test]
    fn test_missing_required_fields() {
        let converter = EchoConverter::new();
        let config = ConversionConfig::default();

        let no_id = WxrItem {
            post_id: None,
            ..item("7")
        };
        let err = extract_post(&no_id, &converter, &config).unwrap_err();
        assert!(matches!(err, PressmarkError::MissingRequiredField { field: "post_id", .. }));

        let no_date = WxrItem {
            pub_date: None,
            ..item("7")
        };
        let err = extract_post(&no_date, &converter, &config).unwrap_err();
        assert!(matches!(err, PressmarkError::MissingRequiredField { field: "pubDate", .. }));
        assert_eq!(err.item_id(), Some("7"));

        let no_title = WxrItem {
            title: None,
            ..item("7")
        };
        let err = extract_post(&no_title, &converter, &config).unwrap_err();
        assert!(matches!(err, PressmarkError::MissingRequiredField { field: "title", .. }));

        assert_eq!(converter.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_unparseable_date() {
        let converter = EchoConverter::new();
        let bad = WxrItem {
            pub_date: Some("2020-01-01".to_string()),
            ..item("9")
        };
        let err = extract_post(&bad, &converter, &ConversionConfig::default()).unwrap_err();
        assert!(matches!(err, PressmarkError::UnparseableDate { .. }));
        assert_eq!(err.item_id(), Some("9"));
    }

    #[test]
    fn test_date_is_normalized_to_utc() {
        let date = parse_pub_date("Wed, 01 Jan 2020 01:30:00 +0200", None).unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2019, 12, 31).unwrap());
    }

    #[test]
    fn test_extract_posts_skip_policy() {
        let converter = EchoConverter::new();
        let items = vec![
            item("1"),
            WxrItem {
                title: None,
                ..item("2")
            },
            item("3"),
        ];

        let (posts, failures) = extract_posts(&items, &converter, &ConversionConfig::default()).unwrap();
        let ids: Vec<_> = posts.iter().map(|p| p.meta.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3"]);
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].item_id.as_deref(), Some("2"));
    }

    #[test]
    fn test_extract_posts_fail_fast_policy() {
        let converter = EchoConverter::new();
        let items = vec![
            WxrItem {
                pub_date: Some("soon".to_string()),
                ..item("1")
            },
            item("2"),
        ];
        let config = ConversionConfig {
            failure_policy: FailurePolicy::FailFast,
            ..Default::default()
        };

        let err = extract_posts(&items, &converter, &config).unwrap_err();
        assert!(matches!(err, PressmarkError::UnparseableDate { .. }));
        assert_eq!(converter.calls.load(Ordering::SeqCst), 0);
    }
}
