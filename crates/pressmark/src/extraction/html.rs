//! HTML to Markdown conversion functions.
//!
//! Thin wrapper over `html-to-markdown-rs`. Very large bodies are converted on
//! a dedicated thread with a bigger stack, since the converter recurses over
//! the DOM.
//!
//! # Example
//!
//! ```rust
//! use pressmark::extraction::html::convert_html_to_markdown;
//!
//! # fn example() -> pressmark::Result<()> {
//! let html = r#"<h1>Title</h1><p>This is <strong>bold</strong> text.</p>"#;
//! let markdown = convert_html_to_markdown(html, None)?;
//!
//! assert!(markdown.contains("Title"));
//! assert!(markdown.contains("**bold**"));
//! # Ok(())
//! # }
//! ```
use crate::error::{PressmarkError, Result};
use html_to_markdown_rs::{ConversionOptions, PreprocessingOptions, convert as convert_html};
use std::{any::Any, thread};

const LARGE_HTML_STACK_THRESHOLD_BYTES: usize = 512 * 1024;
const HTML_CONVERSION_STACK_SIZE_BYTES: usize = 16 * 1024 * 1024;

/// Defaults for post bodies: fragments have no `<head>`, so no metadata block.
fn resolve_conversion_options(options: Option<ConversionOptions>) -> ConversionOptions {
    options.unwrap_or_else(|| ConversionOptions {
        extract_metadata: false,
        hocr_spatial_tables: false,
        preprocessing: PreprocessingOptions {
            enabled: false,
            ..Default::default()
        },
        ..Default::default()
    })
}

fn html_requires_large_stack(len: usize) -> bool {
    len >= LARGE_HTML_STACK_THRESHOLD_BYTES
}

fn convert_html_with_options(html: &str, options: ConversionOptions) -> Result<String> {
    convert_html(html, Some(options))
        .map_err(|e| PressmarkError::parsing(format!("Failed to convert HTML to Markdown: {}", e)))
}

fn convert_html_with_options_large_stack(html: String, options: ConversionOptions) -> Result<String> {
    run_on_dedicated_stack(move || convert_html_with_options(&html, options))
}

fn run_on_dedicated_stack<T, F>(job: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T> + Send + 'static,
{
    let handle = thread::Builder::new()
        .name("pressmark-html-conversion".to_string())
        .stack_size(HTML_CONVERSION_STACK_SIZE_BYTES)
        .spawn(job)
        .map_err(|err| PressmarkError::Other(format!("Failed to spawn HTML conversion thread: {}", err)))?;

    match handle.join() {
        Ok(result) => result,
        Err(panic) => {
            let reason = extract_panic_reason(&panic);
            Err(PressmarkError::Other(format!("HTML conversion panicked: {}", reason)))
        }
    }
}

fn extract_panic_reason(panic: &Box<dyn Any + Send + 'static>) -> String {
    if let Some(msg) = panic.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = panic.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// Convert HTML to markdown with optional configuration.
///
/// Uses these defaults if no configuration is provided:
/// - `extract_metadata = false` (no front-matter block from `<head>`)
/// - `hocr_spatial_tables = false`
/// - `preprocessing.enabled = false`
pub fn convert_html_to_markdown(html: &str, options: Option<ConversionOptions>) -> Result<String> {
    let options = resolve_conversion_options(options);
    if html_requires_large_stack(html.len()) {
        convert_html_with_options_large_stack(html.to_string(), options)
    } else {
        convert_html_with_options(html, options)
    }
}
