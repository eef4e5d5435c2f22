//! Error types for pressmark.
//!
//! Every fallible operation in the library returns [`PressmarkError`]. The
//! variants fall into three groups:
//!
//! - **Structural** - `MalformedDocument`: the export has no `rss/channel`, or the
//!   XML parser rejected it. Fatal for the whole run.
//! - **Per item** - `MissingRequiredField` and `UnparseableDate`: one `<item>`
//!   could not be turned into a post. Whether this aborts the run is decided by
//!   [`FailurePolicy`](crate::core::config::FailurePolicy).
//! - **Ambient** - `Io`, `Parsing`, `Validation`, `Serialization`, `Other`.
//!
//! `Io` errors always bubble up unchanged.
//!
//! # Example
//!
//! ```rust
//! use pressmark::{PressmarkError, Result};
//!
//! fn require_title(title: Option<&str>, item_id: Option<&str>) -> Result<String> {
//!     title
//!         .map(str::to_string)
//!         .ok_or_else(|| PressmarkError::missing_field("title", item_id))
//! }
//!
//! assert!(require_title(None, Some("7")).is_err());
//! ```
use thiserror::Error;

/// Result type alias using `PressmarkError`.
pub type Result<T> = std::result::Result<T, PressmarkError>;

/// Main error type for all pressmark operations.
#[derive(Debug, Error)]
pub enum PressmarkError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed export document: {message}")]
    MalformedDocument {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Item {}: missing required field '{field}'", .item_id.as_deref().unwrap_or("<unknown>"))]
    MissingRequiredField { field: &'static str, item_id: Option<String> },

    #[error("Item {}: unparseable date '{value}'", .item_id.as_deref().unwrap_or("<unknown>"))]
    UnparseableDate {
        value: String,
        item_id: Option<String>,
        #[source]
        source: chrono::ParseError,
    },

    #[error("Parsing error: {message}")]
    Parsing {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Validation error: {message}")]
    Validation {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Serialization error: {message}")]
    Serialization {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for PressmarkError {
    fn from(err: serde_json::Error) -> Self {
        PressmarkError::Serialization {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}

impl From<serde_yaml_ng::Error> for PressmarkError {
    fn from(err: serde_yaml_ng::Error) -> Self {
        PressmarkError::Serialization {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}

impl From<toml::de::Error> for PressmarkError {
    fn from(err: toml::de::Error) -> Self {
        PressmarkError::Serialization {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}

impl From<roxmltree::Error> for PressmarkError {
    fn from(err: roxmltree::Error) -> Self {
        PressmarkError::MalformedDocument {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}

macro_rules! error_constructor {
    ($name:ident, $variant:ident) => {
        pastey::paste! {
            #[doc = "Create a " $variant " error"]
            pub fn $name<S: Into<String>>(message: S) -> Self {
                Self::$variant {
                    message: message.into(),
                    source: None,
                }
            }

            #[doc = "Create a " $variant " error with source"]
            pub fn [<$name _with_source>]<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
                message: S,
                source: E,
            ) -> Self {
                Self::$variant {
                    message: message.into(),
                    source: Some(Box::new(source)),
                }
            }
        }
    };
}

impl PressmarkError {
    error_constructor!(malformed, MalformedDocument);
    error_constructor!(parsing, Parsing);
    error_constructor!(validation, Validation);
    error_constructor!(serialization, Serialization);

    /// Create a `MissingRequiredField` error for the given item.
    pub fn missing_field(field: &'static str, item_id: Option<&str>) -> Self {
        Self::MissingRequiredField {
            field,
            item_id: item_id.map(str::to_string),
        }
    }

    /// Identifier of the export item this error belongs to, for per-item errors.
    pub fn item_id(&self) -> Option<&str> {
        match self {
            Self::MissingRequiredField { item_id, .. } | Self::UnparseableDate { item_id, .. } => item_id.as_deref(),
            _ => None,
        }
    }

    /// `true` for errors scoped to a single export item.
    ///
    /// These are the errors a [`FailurePolicy::Skip`](crate::core::config::FailurePolicy::Skip)
    /// run records and steps over; everything else aborts the run.
    pub fn is_item_error(&self) -> bool {
        matches!(self, Self::MissingRequiredField { .. } | Self::UnparseableDate { .. })
    }
}
