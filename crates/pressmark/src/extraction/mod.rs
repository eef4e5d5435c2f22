pub mod html;
pub mod images;
pub mod merge;
pub mod post;
pub mod url;

pub use html::convert_html_to_markdown;
pub use images::{collect_attached_images, collect_images, collect_scraped_images};
pub use merge::{MergeSummary, merge_images};
pub use post::{extract_post, extract_posts, parse_pub_date};
pub use url::{filename_from_url, resolve_image_url};
