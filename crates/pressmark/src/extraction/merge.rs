//! Attach discovered images to their posts.

use crate::extraction::url::filename_from_url;
use crate::types::{ImageRef, PostRecord};
use std::collections::HashMap;

/// Counts from one merge, for logging.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeSummary {
    /// References that matched a post.
    pub merged: usize,
    /// References whose post id matched no post.
    pub orphaned: usize,
    /// Cover image assignments, overwrites included.
    pub covers: usize,
}

/// Merge `images` into `posts` by post id.
///
/// For each reference, in order:
///
/// 1. References to unknown posts are dropped.
/// 2. If the reference id equals the post's cover image id, the post's
///    `cover_image` becomes the URL's filename. Later matches overwrite.
/// 3. The URL is appended to the post's `image_urls` unless already there.
///
/// The result depends only on the order of `images`. When two posts share an
/// id, the later one receives the images.
pub fn merge_images(posts: &mut [PostRecord], images: &[ImageRef]) -> MergeSummary {
    let by_id: HashMap<String, usize> = posts
        .iter()
        .enumerate()
        .map(|(index, post)| (post.meta.id.clone(), index))
        .collect();

    let mut summary = MergeSummary::default();

    for image in images {
        let Some(&index) = by_id.get(&image.post_id) else {
            tracing::trace!("Dropping image {} for unknown post {}", image.url, image.post_id);
            summary.orphaned += 1;
            continue;
        };
        let post = &mut posts[index];

        if image.id.is_some() && image.id == post.meta.cover_image_id {
            post.frontmatter.cover_image = Some(filename_from_url(&image.url));
            summary.covers += 1;
        }

        if !post.meta.image_urls.contains(&image.url) {
            post.meta.image_urls.push(image.url.clone());
        }
        summary.merged += 1;
    }

    tracing::debug!(
        "Merged {} image references ({} orphaned, {} cover images)",
        summary.merged,
        summary.orphaned,
        summary.covers
    );
    summary
}
