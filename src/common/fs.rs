//! Common file system operations with unified error handling

use std::fs;
use std::path::Path;

use crate::error::{RigupError, Result};

fn file_read_error(path: &Path, e: &std::io::Error) -> RigupError {
    RigupError::FileReadFailed {
        path: path.display().to_string(),
        reason: e.to_string(),
    }
}

fn file_write_error(path: &Path, e: &std::io::Error) -> RigupError {
    RigupError::FileWriteFailed {
        path: path.display().to_string(),
        reason: e.to_string(),
    }
}

/// Ensure parent directory exists for a path
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| file_write_error(parent, &e))?;
    }
    Ok(())
}

/// Read a UTF-8 text file
pub fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| file_read_error(path, &e))
}

/// Write a text file, creating missing parent directories
pub fn write_text(path: &Path, content: &str) -> Result<()> {
    ensure_parent_dir(path)?;
    fs::write(path, content).map_err(|e| file_write_error(path, &e))
}
