//! File I/O utilities.
//!
//! Async and sync reads of export files, and the directory-creating write used
//! by the markdown writer.

use crate::{PressmarkError, Result};
use std::path::Path;
use tokio::fs;

/// Read a file asynchronously.
///
/// # Errors
///
/// Returns `PressmarkError::Io` for I/O errors (these always bubble up).
pub async fn read_file_async(path: impl AsRef<Path>) -> Result<Vec<u8>> {
    fs::read(path.as_ref()).await.map_err(PressmarkError::Io)
}

/// Read a file synchronously.
///
/// # Errors
///
/// Returns `PressmarkError::Io` for I/O errors (these always bubble up).
pub fn read_file_sync(path: impl AsRef<Path>) -> Result<Vec<u8>> {
    std::fs::read(path.as_ref()).map_err(PressmarkError::Io)
}

/// Validate that a file exists.
///
/// # Errors
///
/// Returns `PressmarkError::Validation` if the path does not point at a file.
pub fn validate_file_exists(path: impl AsRef<Path>) -> Result<()> {
    if !path.as_ref().is_file() {
        return Err(PressmarkError::validation(format!(
            "File does not exist: {}",
            path.as_ref().display()
        )));
    }
    Ok(())
}

/// Write `contents` to `path`, creating missing parent directories.
pub fn write_file_sync(path: impl AsRef<Path>, contents: impl AsRef<[u8]>) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, contents)?;
    Ok(())
}
