//! Typed view of a WordPress eXtended RSS (WXR) export.
//!
//! The export is parsed with `roxmltree` and projected onto plain structs, one
//! field per known tag. Everything downstream works on these structs and never
//! sees the XML tree.
//!
//! ```xml
//! <rss version="2.0" xmlns:wp="http://wordpress.org/export/1.2/" ...>
//!   <channel>
//!     <title>My Blog</title>
//!     <item>
//!       <title>Hello</title>
//!       <wp:post_id>7</wp:post_id>
//!       <wp:post_type>post</wp:post_type>
//!       <category domain="post_tag" nicename="rust"><![CDATA[Rust]]></category>
//!       <content:encoded><![CDATA[<p>Hi</p>]]></content:encoded>
//!     </item>
//!   </channel>
//! </rss>
//! ```

use crate::{PressmarkError, Result};
use roxmltree::Node;
use serde::{Deserialize, Serialize};

/// Taxonomy domain for categories.
pub const CATEGORY_DOMAIN: &str = "category";
/// Taxonomy domain for tags.
pub const TAG_DOMAIN: &str = "post_tag";
/// Post type of media items.
pub const ATTACHMENT_TYPE: &str = "attachment";
/// Meta key naming a post's featured image.
pub const THUMBNAIL_META_KEY: &str = "_thumbnail_id";

/// A parsed export: channel metadata plus items in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WxrDocument {
    pub channel: WxrChannel,
    pub items: Vec<WxrItem>,
}

/// Site-level fields of the export channel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WxrChannel {
    pub title: Option<String>,
    pub link: Option<String>,
    pub base_site_url: Option<String>,
}

/// One `<item>` of the export.
///
/// Scalar tags are `None` when absent from the item; an empty element yields
/// `Some("")`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WxrItem {
    pub title: Option<String>,
    pub link: Option<String>,
    pub pub_date: Option<String>,
    pub creator: Option<String>,
    pub description: Option<String>,
    pub post_id: Option<String>,
    pub post_name: Option<String>,
    pub post_parent: Option<String>,
    pub post_type: Option<String>,
    pub status: Option<String>,
    pub comment_status: Option<String>,
    pub ping_status: Option<String>,
    pub is_sticky: Option<String>,
    pub attachment_url: Option<String>,

    /// Raw HTML body from `content:encoded`.
    pub content: Option<String>,

    /// Raw excerpt from `excerpt:encoded`.
    pub excerpt: Option<String>,

    pub categories: Vec<WxrCategory>,
    pub postmeta: Vec<WxrPostMeta>,
}

/// A `<category>` element: both categories and tags, told apart by `domain`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WxrCategory {
    pub domain: Option<String>,
    pub nicename: Option<String>,
    pub name: String,
}

/// A `<wp:postmeta>` key/value pair.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WxrPostMeta {
    pub key: String,
    pub value: String,
}

impl WxrItem {
    /// Non-empty `post_id`.
    pub fn id(&self) -> Option<&str> {
        self.post_id.as_deref().filter(|id| !id.is_empty())
    }

    pub fn is_type(&self, post_type: &str) -> bool {
        self.post_type.as_deref() == Some(post_type)
    }

    /// Value of the first meta entry with the given key.
    pub fn meta_value(&self, key: &str) -> Option<&str> {
        self.postmeta
            .iter()
            .find(|meta| meta.key == key)
            .map(|meta| meta.value.as_str())
    }

    /// Names of the category entries in the given taxonomy domain, in order.
    pub fn terms_in_domain(&self, domain: &str) -> Vec<String> {
        self.categories
            .iter()
            .filter(|category| category.domain.as_deref() == Some(domain))
            .map(|category| category.name.clone())
            .collect()
    }

    /// `wp:is_sticky` as a flag. WordPress writes `1` for sticky posts.
    pub fn sticky(&self) -> bool {
        matches!(self.is_sticky.as_deref().map(str::trim), Some("1") | Some("true"))
    }
}

/// Parse a WXR export from UTF-8 bytes.
///
/// A leading byte-order mark is ignored.
///
/// # Errors
///
/// Returns `PressmarkError::MalformedDocument` for invalid UTF-8, XML the parser
/// rejects, or a document without `rss/channel`.
pub fn parse_document_bytes(bytes: &[u8]) -> Result<WxrDocument> {
    let text = std::str::from_utf8(bytes)
        .map_err(|e| PressmarkError::malformed_with_source("export is not valid UTF-8", e))?;
    parse_document(text)
}

/// Parse a WXR export.
///
/// # Errors
///
/// Returns `PressmarkError::MalformedDocument` for XML the parser rejects or a
/// document without `rss/channel`.
pub fn parse_document(xml: &str) -> Result<WxrDocument> {
    let xml = xml.strip_prefix('\u{feff}').unwrap_or(xml);
    let doc = roxmltree::Document::parse(xml)?;

    let rss = doc.root_element();
    if rss.tag_name().name() != "rss" {
        return Err(PressmarkError::malformed(format!(
            "expected <rss> root element, found <{}>",
            rss.tag_name().name()
        )));
    }

    let channel_node = rss
        .children()
        .find(|n| is_plain(n, "channel"))
        .ok_or_else(|| PressmarkError::malformed("<rss> has no <channel> element"))?;

    let mut channel = WxrChannel::default();
    let mut items = Vec::new();

    for child in channel_node.children().filter(|n| n.is_element()) {
        match (child.tag_name().namespace().is_some(), child.tag_name().name()) {
            (false, "title") => channel.title = Some(element_text(child)),
            (false, "link") => channel.link = Some(element_text(child)),
            (true, "base_site_url") => channel.base_site_url = Some(element_text(child)),
            (false, "item") => items.push(parse_item(child)),
            _ => {}
        }
    }

    tracing::debug!("Parsed WXR export with {} items", items.len());

    Ok(WxrDocument { channel, items })
}

fn parse_item(node: Node) -> WxrItem {
    let mut item = WxrItem::default();

    for child in node.children().filter(|n| n.is_element()) {
        let namespaced = child.tag_name().namespace().is_some();
        let text = || Some(element_text(child));

        match (namespaced, child.tag_name().name()) {
            (false, "title") => item.title = text(),
            (false, "link") => item.link = text(),
            (false, "pubDate") => item.pub_date = text(),
            (false, "description") => item.description = text(),
            (false, "category") => item.categories.push(WxrCategory {
                domain: child.attribute("domain").map(str::to_string),
                nicename: child.attribute("nicename").map(str::to_string),
                name: element_text(child),
            }),
            (true, "creator") => item.creator = text(),
            (true, "post_id") => item.post_id = text(),
            (true, "post_name") => item.post_name = text(),
            (true, "post_parent") => item.post_parent = text(),
            (true, "post_type") => item.post_type = text(),
            (true, "status") => item.status = text(),
            (true, "comment_status") => item.comment_status = text(),
            (true, "ping_status") => item.ping_status = text(),
            (true, "is_sticky") => item.is_sticky = text(),
            (true, "attachment_url") => item.attachment_url = text(),
            (true, "encoded") if is_excerpt(child) => item.excerpt = text(),
            (true, "encoded") => item.content = text(),
            (true, "postmeta") => item.postmeta.push(parse_postmeta(child)),
            _ => {}
        }
    }

    item
}

fn parse_postmeta(node: Node) -> WxrPostMeta {
    let mut meta = WxrPostMeta::default();
    for child in node.children().filter(|n| n.is_element()) {
        match child.tag_name().name() {
            "meta_key" => meta.key = element_text(child),
            "meta_value" => meta.value = element_text(child),
            _ => {}
        }
    }
    meta
}

fn is_plain(node: &Node, name: &str) -> bool {
    node.is_element() && node.tag_name().namespace().is_none() && node.tag_name().name() == name
}

fn is_excerpt(node: Node) -> bool {
    node.tag_name()
        .namespace()
        .is_some_and(|ns| ns.trim_end_matches('/').ends_with("/excerpt"))
}

/// Text of an element's direct text children, CDATA included.
fn element_text(node: Node) -> String {
    node.children()
        .filter(|n| n.is_text())
        .filter_map(|n| n.text())
        .collect::<String>()
        .trim()
        .to_string()
}
