use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A normalized post, page, or custom-type entry ready for rendering.
///
/// Created by the post extractor, mutated once by the image merge, then handed
/// to the writer untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostRecord {
    /// Internal fields, never written to front-matter.
    pub meta: PostMeta,

    /// Fields rendered as YAML front-matter.
    pub frontmatter: Frontmatter,

    /// Body text produced by the content converter.
    pub content: String,
}

/// Internal bookkeeping for a post.
///
/// `id` is unique within a run and is the join key for image merging.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostMeta {
    pub id: String,
    pub slug: String,

    /// Attachment id named by the post's `_thumbnail_id` meta entry.
    pub cover_image_id: Option<String>,

    /// Absolute image URLs belonging to the post, unique, in first-seen order.
    pub image_urls: Vec<String>,

    pub post_type: String,
}

/// Descriptive fields persisted as front-matter.
///
/// Empty strings, `false` flags, empty lists and a missing cover image are
/// omitted when serialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frontmatter {
    pub title: String,

    /// Publish date in UTC, serialized as `YYYY-MM-DD`.
    pub date: NaiveDate,

    pub slug: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub link: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub author: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub comment_status: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub ping_status: String,

    #[serde(default, skip_serializing_if = "is_false")]
    pub sticky: bool,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// An image discovered in the export, not yet attached to a post.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageRef {
    /// Attachment id for images declared by an attachment item.
    ///
    /// `None` is the "no attachment id" marker carried by scraped images; it
    /// never matches a post's cover image id.
    pub id: Option<String>,

    /// Id of the owning post. References to unknown posts are dropped on merge.
    pub post_id: String,

    /// Absolute URL.
    pub url: String,
}

impl ImageRef {
    /// Image declared by an attachment item.
    pub fn attached(id: impl Into<String>, post_id: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            post_id: post_id.into(),
            url: url.into(),
        }
    }

    /// Image found in a post body.
    pub fn scraped(post_id: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: None,
            post_id: post_id.into(),
            url: url.into(),
        }
    }

    pub fn is_scraped(&self) -> bool {
        self.id.is_none()
    }
}

/// A per-item failure recorded instead of aborting the run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemFailure {
    /// Export id of the offending item, when it had one.
    pub item_id: Option<String>,
    pub message: String,
}

impl From<&crate::PressmarkError> for ItemFailure {
    fn from(err: &crate::PressmarkError) -> Self {
        Self {
            item_id: err.item_id().map(str::to_string),
            message: err.to_string(),
        }
    }
}

/// Posts produced by one conversion run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionOutput {
    /// Posts in source order, with image data merged in.
    pub posts: Vec<PostRecord>,

    /// Items skipped under [`FailurePolicy::Skip`](crate::core::config::FailurePolicy::Skip).
    pub failures: Vec<ItemFailure>,
}
