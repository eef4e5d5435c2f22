//! Writing converted posts to disk.

pub mod writer;

pub use writer::{WriteSummary, path_segment, post_path, render_markdown, write_posts};
