//! Base plugin trait definition.
//!
//! Every pluggable collaborator implements [`Plugin`], which carries its
//! identity and lifecycle hooks.

use crate::Result;

/// Identity and lifecycle shared by all plugins.
///
/// The pipeline calls [`initialize`](Plugin::initialize) once before the first
/// item and [`shutdown`](Plugin::shutdown) once after the last, even when the
/// run fails in between.
pub trait Plugin: Send + Sync {
    /// Unique, lowercase, hyphenated name, e.g. `"markdown-converter"`.
    fn name(&self) -> &str;

    /// Semantic version of this plugin.
    fn version(&self) -> String;

    fn initialize(&self) -> Result<()> {
        Ok(())
    }

    fn shutdown(&self) -> Result<()> {
        Ok(())
    }

    fn description(&self) -> &str {
        ""
    }
}
