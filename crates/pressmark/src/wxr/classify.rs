//! Item selection by post type and status.

use super::document::{ATTACHMENT_TYPE, WxrDocument, WxrItem};

/// Statuses never converted.
pub const EXCLUDED_STATUSES: &[&str] = &["trash", "draft"];

/// Split a comma-separated post type list.
///
/// Segments are trimmed, empty segments dropped, and duplicates removed
/// keeping the first occurrence.
///
/// ```rust
/// use pressmark::wxr::classify::parse_post_types;
///
/// assert_eq!(parse_post_types(" post, page,,post "), vec!["post", "page"]);
/// assert!(parse_post_types("").is_empty());
/// ```
pub fn parse_post_types(list: &str) -> Vec<String> {
    let mut types: Vec<String> = Vec::new();
    for segment in list.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        if !types.iter().any(|t| t == segment) {
            types.push(segment.to_string());
        }
    }
    types
}

/// Items whose post type is one of `post_types`, in document order.
///
/// No status filtering happens here. An empty type set selects nothing.
pub fn items_of_types<'a, S: AsRef<str>>(document: &'a WxrDocument, post_types: &[S]) -> Vec<&'a WxrItem> {
    document
        .items
        .iter()
        .filter(|item| post_types.iter().any(|t| item.is_type(t.as_ref())))
        .collect()
}

/// Attachment items, in document order.
pub fn attachments(document: &WxrDocument) -> Vec<&WxrItem> {
    items_of_types(document, &[ATTACHMENT_TYPE])
}

/// Whether an item's status allows conversion.
pub fn is_publishable(item: &WxrItem) -> bool {
    !item
        .status
        .as_deref()
        .is_some_and(|status| EXCLUDED_STATUSES.contains(&status))
}

/// Drop trashed and draft items, keeping order.
pub fn publishable<'a>(items: impl IntoIterator<Item = &'a WxrItem>) -> Vec<&'a WxrItem> {
    items.into_iter().filter(|item| is_publishable(item)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, post_type: &str, status: &str) -> WxrItem {
        WxrItem {
            post_id: Some(id.to_string()),
            post_type: Some(post_type.to_string()),
            status: Some(status.to_string()),
            ..Default::default()
        }
    }

    fn document() -> WxrDocument {
        WxrDocument {
            items: vec![
                item("1", "post", "publish"),
                item("2", "page", "publish"),
                item("3", "attachment", "inherit"),
                item("4", "post", "draft"),
                item("5", "nav_menu_item", "publish"),
                item("6", "post", "trash"),
                item("7", "post", "private"),
            ],
            ..Default::default()
        }
    }

    fn ids(items: &[&WxrItem]) -> Vec<String> {
        items.iter().map(|i| i.id().unwrap().to_string()).collect()
    }

    #[test]
    fn test_items_of_types_keeps_order() {
        let doc = document();
        let selected = items_of_types(&doc, &["page", "post"]);
        assert_eq!(ids(&selected), vec!["1", "2", "4", "6", "7"]);
    }

    #[test]
    fn test_empty_type_set_selects_nothing() {
        let doc = document();
        let none: [&str; 0] = [];
        assert!(items_of_types(&doc, &none).is_empty());
    }

    #[test]
    fn test_attachments() {
        let doc = document();
        assert_eq!(ids(&attachments(&doc)), vec!["3"]);
    }

    #[test]
    fn test_publishable_drops_trash_and_draft() {
        let doc = document();
        let posts = publishable(items_of_types(&doc, &["post"]));
        assert_eq!(ids(&posts), vec!["1", "7"]);
    }

    #[test]
    fn test_missing_status_is_publishable() {
        let item = WxrItem::default();
        assert!(is_publishable(&item));
    }

    #[test]
    fn test_parse_post_types() {
        assert_eq!(parse_post_types("post,page"), vec!["post", "page"]);
        assert_eq!(parse_post_types(" post , , page ,post"), vec!["post", "page"]);
        assert!(parse_post_types(" , ").is_empty());
    }
}
