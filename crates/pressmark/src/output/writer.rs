//! Markdown files with YAML front-matter.
//!
//! Layout is driven by [`OutputConfig`]:
//!
//! ```text
//! <dir>/[<post_type>/][<yyyy>/][<mm>/][<yyyy-mm-dd->]<slug>/index.md
//! <dir>/[<post_type>/][<yyyy>/][<mm>/][<yyyy-mm-dd->]<slug>.md
//! ```

use crate::core::config::OutputConfig;
use crate::core::io::write_file_sync;
use crate::types::PostRecord;
use crate::{PressmarkError, Result};
use std::collections::HashMap;
use std::path::PathBuf;

/// Files written by [`write_posts`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteSummary {
    /// Written paths, in post order.
    pub written: Vec<PathBuf>,
}

impl WriteSummary {
    pub fn count(&self) -> usize {
        self.written.len()
    }
}

/// Fallback name for posts whose slug and id are both unusable.
const UNNAMED_POST: &str = "untitled";

/// Path the post is written to.
///
/// Slug and post type come from the export, so each is reduced to a single
/// path segment by [`path_segment`] and the result always stays under
/// `output.dir`. Posts without a usable slug are named after their id.
pub fn post_path(post: &PostRecord, output: &OutputConfig) -> PathBuf {
    let mut path = output.dir.clone();
    let date = post.frontmatter.date;

    if output.type_folders
        && let Some(post_type) = path_segment(&post.meta.post_type)
    {
        path.push(post_type);
    }
    if output.year_folders {
        path.push(date.format("%Y").to_string());
    }
    if output.month_folders {
        path.push(date.format("%m").to_string());
    }

    let slug = path_segment(&post.meta.slug)
        .or_else(|| path_segment(&post.meta.id))
        .unwrap_or_else(|| UNNAMED_POST.to_string());
    let name = if output.prefix_date {
        format!("{}-{}", date.format("%Y-%m-%d"), slug)
    } else {
        slug
    };

    if output.post_folders {
        path.push(name);
        path.push("index.md");
    } else {
        path.push(format!("{}.md", name));
    }
    path
}

/// Reduce an export value to one file name segment.
///
/// Separators split the value into parts; empty, `.` and `..` parts are
/// dropped and the rest joined with `-`. Drive prefixes lose their `:`.
/// Returns `None` when nothing is left.
///
/// ```rust
/// use pressmark::output::writer::path_segment;
///
/// assert_eq!(path_segment("hello-world").as_deref(), Some("hello-world"));
/// assert_eq!(path_segment("../../tmp/pwned").as_deref(), Some("tmp-pwned"));
/// assert_eq!(path_segment(".."), None);
/// ```
pub fn path_segment(value: &str) -> Option<String> {
    let parts: Vec<&str> = value
        .split(['/', '\\'])
        .map(str::trim)
        .filter(|part| !part.is_empty() && *part != "." && *part != "..")
        .collect();

    if parts.is_empty() {
        return None;
    }
    Some(parts.join("-").replace(':', "-"))
}

/// Render front-matter and body as one markdown document.
///
/// # Errors
///
/// Returns `PressmarkError::Serialization` if the front-matter can't be encoded.
pub fn render_markdown(post: &PostRecord) -> Result<String> {
    let yaml = serde_yaml_ng::to_string(&post.frontmatter)?;

    let mut rendered = String::with_capacity(yaml.len() + post.content.len() + 16);
    rendered.push_str("---\n");
    rendered.push_str(&yaml);
    if !yaml.ends_with('\n') {
        rendered.push('\n');
    }
    rendered.push_str("---\n\n");
    rendered.push_str(&post.content);
    rendered.push('\n');
    Ok(rendered)
}

/// Write every post under `output.dir`.
///
/// All paths are computed up front; when two posts land on the same path
/// nothing is written.
///
/// # Errors
///
/// Returns `PressmarkError::Validation` on a path collision and
/// `PressmarkError::Io` if a file or directory can't be created.
#[cfg_attr(feature = "otel", tracing::instrument(
    skip(posts, output),
    fields(
        output.dir = %output.dir.display(),
        output.posts = posts.len(),
    )
))]
pub fn write_posts(posts: &[PostRecord], output: &OutputConfig) -> Result<WriteSummary> {
    let mut owners: HashMap<PathBuf, &str> = HashMap::with_capacity(posts.len());
    let mut paths = Vec::with_capacity(posts.len());

    for post in posts {
        let path = post_path(post, output);
        if let Some(other) = owners.insert(path.clone(), &post.meta.id) {
            return Err(PressmarkError::validation(format!(
                "Posts {} and {} would both be written to {}",
                other,
                post.meta.id,
                path.display()
            )));
        }
        paths.push(path);
    }

    for (post, path) in posts.iter().zip(&paths) {
        write_file_sync(path, render_markdown(post)?)?;
        tracing::debug!("Wrote post {} to {}", post.meta.id, path.display());
    }

    tracing::info!("Wrote {} posts to {}", paths.len(), output.dir.display());
    Ok(WriteSummary { written: paths })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Frontmatter, PostMeta};
    use chrono::NaiveDate;
    use std::path::{Component, Path};
    use tempfile::tempdir;

    fn post(id: &str, slug: &str) -> PostRecord {
        PostRecord {
            meta: PostMeta {
                id: id.to_string(),
                slug: slug.to_string(),
                cover_image_id: None,
                image_urls: vec![],
                post_type: "post".to_string(),
            },
            frontmatter: Frontmatter {
                title: "Hello".to_string(),
                date: NaiveDate::from_ymd_opt(2021, 3, 9).unwrap(),
                slug: slug.to_string(),
                link: String::new(),
                author: "jo".to_string(),
                description: String::new(),
                comment_status: String::new(),
                ping_status: String::new(),
                sticky: false,
                categories: vec!["News".to_string()],
                tags: vec![],
                cover_image: None,
            },
            content: "Body **text**".to_string(),
        }
    }

    fn output(dir: &Path) -> OutputConfig {
        OutputConfig {
            dir: dir.to_path_buf(),
            ..Default::default()
        }
    }

    #[test]
    fn test_post_path_default_layout() {
        let path = post_path(&post("1", "hello"), &output(Path::new("out")));
        assert_eq!(path, Path::new("out/post/hello/index.md"));
    }

    #[test]
    fn test_post_path_all_folders() {
        let config = OutputConfig {
            dir: PathBuf::from("out"),
            type_folders: false,
            year_folders: true,
            month_folders: true,
            post_folders: false,
            prefix_date: true,
        };
        let path = post_path(&post("1", "hello"), &config);
        assert_eq!(path, Path::new("out/2021/03/2021-03-09-hello.md"));
    }

    #[test]
    fn test_post_path_empty_slug_uses_id() {
        let path = post_path(&post("17", ""), &output(Path::new("out")));
        assert_eq!(path, Path::new("out/post/17/index.md"));
    }

    #[test]
    fn test_post_path_stays_under_output_dir() {
        let config = OutputConfig {
            year_folders: true,
            prefix_date: true,
            ..output(Path::new("out"))
        };
        let mut hostile = post("9", "../../../../tmp/pwned");
        hostile.meta.post_type = "../..".to_string();

        let path = post_path(&hostile, &config);

        assert_eq!(path, Path::new("out/2021/2021-03-09-tmp-pwned/index.md"));
        assert!(path.starts_with("out"));
        assert!(path.components().all(|c| matches!(c, Component::Normal(_))));
    }

    #[test]
    fn test_post_path_absolute_slug_is_relativized() {
        let path = post_path(&post("9", "/etc/passwd"), &output(Path::new("out")));
        assert_eq!(path, Path::new("out/post/etc-passwd/index.md"));

        let path = post_path(&post("9", r"C:\Windows\evil"), &output(Path::new("out")));
        assert_eq!(path, Path::new("out/post/C--Windows-evil/index.md"));
    }

    #[test]
    fn test_post_path_unusable_slug_falls_back() {
        let path = post_path(&post("17", "../.."), &output(Path::new("out")));
        assert_eq!(path, Path::new("out/post/17/index.md"));

        let path = post_path(&post("..", "/"), &output(Path::new("out")));
        assert_eq!(path, Path::new("out/post/untitled/index.md"));
    }

    #[test]
    fn test_write_posts_never_escapes_output_dir() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("site");
        let posts = vec![post("1", "../escaped")];

        let summary = write_posts(&posts, &output(&root)).unwrap();

        assert!(summary.written[0].starts_with(&root));
        assert!(root.join("post/escaped/index.md").is_file());
        assert!(!dir.path().join("escaped").exists());
    }

    #[test]
    fn test_render_markdown() {
        let rendered = render_markdown(&post("1", "hello")).unwrap();

        assert!(rendered.starts_with("---\ntitle: Hello\n"));
        assert!(rendered.contains("date: 2021-03-09") || rendered.contains("date: '2021-03-09'"));
        assert!(rendered.contains("author: jo\n"));
        assert!(rendered.contains("- News\n"));
        assert!(!rendered.contains("sticky"));
        assert!(!rendered.contains("tags"));
        assert!(rendered.ends_with("---\n\nBody **text**\n"));
    }

    #[test]
    fn test_write_posts() {
        let dir = tempdir().unwrap();
        let posts = vec![post("1", "hello"), post("2", "world")];

        let summary = write_posts(&posts, &output(dir.path())).unwrap();

        assert_eq!(summary.count(), 2);
        let written = std::fs::read_to_string(dir.path().join("post/world/index.md")).unwrap();
        assert!(written.contains("Body **text**"));
    }

    #[test]
    fn test_write_posts_rejects_collisions_before_writing() {
        let dir = tempdir().unwrap();
        let posts = vec![post("1", "same"), post("2", "fresh"), post("3", "same")];

        let err = write_posts(&posts, &output(dir.path())).unwrap_err();

        assert!(matches!(err, PressmarkError::Validation { .. }));
        assert!(err.to_string().contains("Posts 1 and 3"));
        assert!(!dir.path().join("post").exists());
    }
}
