//! Configuration loading and management.
//!
//! [`ConversionConfig`] can be loaded from TOML, YAML, or JSON files, discovered
//! as `pressmark.toml` in the current directory or any parent, or built in code.

use crate::wxr::classify::parse_post_types;
use crate::{PressmarkError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the file [`ConversionConfig::discover`] looks for.
pub const CONFIG_FILE_NAME: &str = "pressmark.toml";

/// Main conversion configuration.
///
/// # Example
///
/// ```rust
/// use pressmark::core::config::ConversionConfig;
///
/// let config = ConversionConfig {
///     post_types: "post".to_string(),
///     save_scraped_images: false,
///     ..Default::default()
/// };
/// assert_eq!(config.post_types(), vec!["post".to_string()]);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionConfig {
    /// Comma-separated post types to convert, e.g. `"post,page"`.
    #[serde(default = "default_post_types")]
    pub post_types: String,

    /// Collect images declared by attachment items
    #[serde(default = "default_true")]
    pub save_attached_images: bool,

    /// Collect images found in `<img>` tags of post bodies
    #[serde(default = "default_true")]
    pub save_scraped_images: bool,

    /// Point scraped `<img>` tags at `images/<file>` in the converted body.
    ///
    /// Only applies when `save_scraped_images` is on.
    #[serde(default = "default_true")]
    pub rewrite_image_links: bool,

    /// What to do when a single item cannot be converted
    #[serde(default)]
    pub failure_policy: FailurePolicy,

    /// Output layout for the markdown writer
    #[serde(default)]
    pub output: OutputConfig,

    /// HTML conversion options (None = use defaults)
    ///
    /// Note: This field cannot be deserialized from TOML/YAML/JSON files.
    /// Set it programmatically after loading config.
    #[serde(skip)]
    pub html_options: Option<html_to_markdown_rs::ConversionOptions>,
}

/// Per-item failure handling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Record the failure and continue with the next item
    #[default]
    Skip,
    /// Abort the run on the first failing item
    FailFast,
}

/// Markdown writer layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Root directory for written files
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,

    /// Nest files under a folder named after the post type
    #[serde(default = "default_true")]
    pub type_folders: bool,

    /// Nest files under a `yyyy` folder
    #[serde(default)]
    pub year_folders: bool,

    /// Nest files under a `mm` folder
    #[serde(default)]
    pub month_folders: bool,

    /// Write `<slug>/index.md` instead of `<slug>.md`
    #[serde(default = "default_true")]
    pub post_folders: bool,

    /// Prefix the file or folder name with `yyyy-mm-dd-`
    #[serde(default)]
    pub prefix_date: bool,
}

fn default_true() -> bool {
    true
}
fn default_post_types() -> String {
    "post,page".to_string()
}
fn default_output_dir() -> PathBuf {
    PathBuf::from("output")
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            post_types: default_post_types(),
            save_attached_images: true,
            save_scraped_images: true,
            rewrite_image_links: true,
            failure_policy: FailurePolicy::default(),
            output: OutputConfig::default(),
            html_options: None,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
            type_folders: true,
            year_folders: false,
            month_folders: false,
            post_folders: true,
            prefix_date: false,
        }
    }
}

impl ConversionConfig {
    /// The configured post types, parsed from the comma-separated `post_types`.
    pub fn post_types(&self) -> Vec<String> {
        parse_post_types(&self.post_types)
    }

    /// Whether scraped `<img>` sources should be rewritten in converted bodies.
    pub fn rewrites_image_links(&self) -> bool {
        self.save_scraped_images && self.rewrite_image_links
    }

    /// Check the configuration for values that cannot work.
    ///
    /// # Errors
    ///
    /// Returns `PressmarkError::Validation` if the output directory is empty.
    pub fn validate(&self) -> Result<()> {
        if self.output.dir.as_os_str().is_empty() {
            return Err(PressmarkError::validation("output.dir must not be empty"));
        }

        if self.post_types().is_empty() {
            tracing::warn!("post_types '{}' selects no items; nothing will be converted", self.post_types);
        }

        Ok(())
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns `PressmarkError::Validation` if the file can't be read or is invalid TOML.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = read_config(path.as_ref())?;

        toml::from_str(&content)
            .map_err(|e| PressmarkError::validation(format!("Invalid TOML in {}: {}", path.as_ref().display(), e)))
    }

    /// Load configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = read_config(path.as_ref())?;

        serde_yaml_ng::from_str(&content)
            .map_err(|e| PressmarkError::validation(format!("Invalid YAML in {}: {}", path.as_ref().display(), e)))
    }

    /// Load configuration from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = read_config(path.as_ref())?;

        serde_json::from_str(&content)
            .map_err(|e| PressmarkError::validation(format!("Invalid JSON in {}: {}", path.as_ref().display(), e)))
    }

    /// Load configuration, picking the format from the file extension.
    ///
    /// `.yaml`/`.yml` and `.json` are recognized; anything else is read as TOML.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml_file(path),
            Some("json") => Self::from_json_file(path),
            _ => Self::from_toml_file(path),
        }
    }

    /// Discover configuration file in parent directories.
    ///
    /// Searches for `pressmark.toml` in current directory and parent directories.
    ///
    /// # Returns
    ///
    /// - `Some(config)` if found
    /// - `None` if no config file found
    pub fn discover() -> Result<Option<Self>> {
        let mut current = std::env::current_dir().map_err(PressmarkError::Io)?;

        loop {
            let candidate = current.join(CONFIG_FILE_NAME);
            if candidate.exists() {
                tracing::debug!("Using configuration from {}", candidate.display());
                return Ok(Some(Self::from_toml_file(candidate)?));
            }

            if let Some(parent) = current.parent() {
                current = parent.to_path_buf();
            } else {
                break;
            }
        }

        Ok(None)
    }
}

fn read_config(path: &Path) -> Result<String> {
    std::fs::read_to_string(path)
        .map_err(|e| PressmarkError::validation(format!("Failed to read config file {}: {}", path.display(), e)))
}
