//! Built-in content converters.

pub mod markdown;

pub use markdown::MarkdownConverter;
