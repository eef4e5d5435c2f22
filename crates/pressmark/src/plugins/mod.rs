//! Plugin traits for pluggable collaborators.

mod converter;
mod traits;

pub use converter::{ContentConverter, ConversionContext};
pub use traits::Plugin;
