//! URL helpers for image references.

use percent_encoding::percent_decode_str;
use url::Url;

/// Last path segment of a URL, percent-decoded.
///
/// Query strings and fragments are ignored. Strings that are not absolute URLs
/// are treated as bare paths.
///
/// ```rust
/// use pressmark::extraction::url::filename_from_url;
///
/// assert_eq!(filename_from_url("https://example.com/uploads/my%20cat.jpg?w=300"), "my cat.jpg");
/// assert_eq!(filename_from_url("uploads/dog.png"), "dog.png");
/// ```
pub fn filename_from_url(url: &str) -> String {
    let segment = match Url::parse(url) {
        Ok(parsed) => parsed
            .path_segments()
            .and_then(|mut segments| segments.next_back().map(str::to_string))
            .unwrap_or_default(),
        Err(_) => {
            let path = url.split(['?', '#']).next().unwrap_or_default();
            path.rsplit('/').next().unwrap_or_default().to_string()
        }
    };

    percent_decode_str(&segment).decode_utf8_lossy().into_owned()
}

/// Resolve an `<img src>` value to an absolute URL.
///
/// Absolute sources are returned normalized. Anything else is resolved against
/// the site root of `link`: permalinks are virtual paths, so a relative source
/// in WordPress markup names a path under the site, not under the post.
/// Returns `None` when a relative source has no usable base.
///
/// ```rust
/// use pressmark::extraction::url::resolve_image_url;
///
/// let link = Some("https://example.com/post/");
/// assert_eq!(resolve_image_url("photo.png", link).as_deref(), Some("https://example.com/photo.png"));
/// assert_eq!(resolve_image_url("//cdn.example.com/a.gif", link).as_deref(), Some("https://cdn.example.com/a.gif"));
/// assert_eq!(resolve_image_url("photo.png", None), None);
/// ```
pub fn resolve_image_url(src: &str, link: Option<&str>) -> Option<String> {
    let src = src.trim();
    if let Ok(absolute) = Url::parse(src) {
        return Some(absolute.to_string());
    }

    let mut base = Url::parse(link?.trim()).ok()?;
    if base.cannot_be_a_base() {
        return None;
    }
    base.set_path("/");
    base.set_query(None);
    base.set_fragment(None);

    base.join(src).ok().map(String::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filename_from_absolute_url() {
        assert_eq!(
            filename_from_url("https://example.com/wp-content/uploads/2020/01/cover.jpg"),
            "cover.jpg"
        );
    }

    #[test]
    fn test_filename_is_decoded() {
        assert_eq!(filename_from_url("https://example.com/a/caf%C3%A9%20menu.png"), "café menu.png");
    }

    #[test]
    fn test_filename_ignores_query_and_fragment() {
        assert_eq!(filename_from_url("https://example.com/a/b.gif?x=1#top"), "b.gif");
        assert_eq!(filename_from_url("b/c.gif?x=1"), "c.gif");
    }

    #[test]
    fn test_filename_of_directory_url_is_empty() {
        assert_eq!(filename_from_url("https://example.com/a/"), "");
    }

    #[test]
    fn test_resolve_absolute_source() {
        assert_eq!(
            resolve_image_url("https://img.example.org/x.png", Some("https://example.com/post/")).as_deref(),
            Some("https://img.example.org/x.png")
        );
    }

    #[test]
    fn test_resolve_relative_source_against_site_root() {
        let link = Some("https://example.com/2020/01/post/?preview=1");
        assert_eq!(
            resolve_image_url("photo.png", link).as_deref(),
            Some("https://example.com/photo.png")
        );
        assert_eq!(
            resolve_image_url("/wp-content/uploads/photo.png", link).as_deref(),
            Some("https://example.com/wp-content/uploads/photo.png")
        );
        assert_eq!(
            resolve_image_url("../photo.png", link).as_deref(),
            Some("https://example.com/photo.png")
        );
    }

    #[test]
    fn test_resolve_without_base() {
        assert_eq!(resolve_image_url("photo.png", None), None);
        assert_eq!(resolve_image_url("photo.png", Some("not a url")), None);
    }
}
