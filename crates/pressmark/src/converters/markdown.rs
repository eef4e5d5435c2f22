//! Default body converter: WordPress HTML to Markdown.

use crate::Result;
use crate::core::config::ConversionConfig;
use crate::extraction::html::convert_html_to_markdown;
use crate::extraction::images::rewrite_image_sources;
use crate::plugins::{ContentConverter, ConversionContext, Plugin};
use crate::wxr::WxrItem;
use once_cell::sync::Lazy;
use regex::Regex;

/// Folder, relative to the post, that scraped images are pointed at.
pub const IMAGE_FOLDER_PREFIX: &str = "images/";

static BLANK_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\r?\n[ \t]*\r?\n").expect("Blank line regex pattern is valid and should compile"));

static BLOCK_START: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^<(?:(?:p|div|h[1-6]|ul|ol|li|dl|blockquote|pre|table|figure|hr|iframe|section|address|form)\b|!--)")
        .expect("Block tag regex pattern is valid and should compile")
});

/// Converts post bodies with `html-to-markdown-rs`.
///
/// Before conversion, blank-line separated text is wrapped in `<p>` the way
/// WordPress renders it, and, when scraped images are saved, `<img>` sources
/// that resolve against the post link are pointed at [`IMAGE_FOLDER_PREFIX`].
#[derive(Debug, Default, Clone, Copy)]
pub struct MarkdownConverter;

impl MarkdownConverter {
    pub fn new() -> Self {
        Self
    }
}

impl Plugin for MarkdownConverter {
    fn name(&self) -> &str {
        "markdown-converter"
    }

    fn version(&self) -> String {
        env!("CARGO_PKG_VERSION").to_string()
    }

    fn description(&self) -> &str {
        "Converts WordPress post HTML to Markdown"
    }
}

impl ContentConverter for MarkdownConverter {
    fn convert(&self, item: &WxrItem, context: &ConversionContext<'_>, config: &ConversionConfig) -> Result<String> {
        let raw = item.content.as_deref().unwrap_or_default();
        if raw.trim().is_empty() {
            return Ok(String::new());
        }

        let html = if config.rewrites_image_links() {
            rewrite_image_sources(raw, IMAGE_FOLDER_PREFIX, context.link)
        } else {
            raw.to_string()
        };

        let markdown = convert_html_to_markdown(&wrap_paragraphs(&html), config.html_options.clone())
            .map_err(|e| crate::PressmarkError::parsing(format!("Item {}: {}", context.post_id, e)))?;

        Ok(tidy(&markdown))
    }
}

/// Wrap blank-line separated runs of inline content in `<p>`.
///
/// Runs that already open with a block-level tag are left alone.
pub fn wrap_paragraphs(html: &str) -> String {
    BLANK_LINE
        .split(html)
        .map(str::trim)
        .filter(|block| !block.is_empty())
        .map(|block| {
            if BLOCK_START.is_match(block) {
                block.to_string()
            } else {
                format!("<p>{}</p>", block)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Strip trailing spaces per line and surrounding blank lines.
fn tidy(markdown: &str) -> String {
    markdown
        .lines()
        .map(str::trim_end)
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}
