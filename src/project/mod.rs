//! Host project handling for Rigup
//!
//! This module handles:
//! - Opening the host project and loading `rigup.yaml`
//! - Building absolute paths for the well-known project directories
//! - Rendering paths relative to the project root for notices
//!
//! ## Project Structure
//!
//! ```text
//! <root>/
//! ├── rigup.yaml      # Optional project settings
//! ├── adonisrc.ts     # Runtime configuration file (name configurable)
//! ├── package.json    # Manifest updated by the dependency manager
//! └── config/ ...     # Directories targeted by published stubs
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use crate::common::path_utils::to_forward_slashes;
use crate::config::ProjectConfig;
use crate::error::{RigupError, Result};

/// Project settings filename
pub const PROJECT_CONFIG_FILE: &str = "rigup.yaml";

/// The host project a package is configured into
#[derive(Debug, Clone)]
pub struct Project {
    /// Root directory of the host project
    pub root: PathBuf,

    /// Project settings (rigup.yaml, defaults when absent)
    pub config: ProjectConfig,
}

impl Project {
    /// Open a project rooted at `root`, reading `rigup.yaml` when it exists
    pub fn open(root: &Path) -> Result<Self> {
        if !root.is_dir() {
            return Err(RigupError::IoError {
                message: format!("Project root is not a directory: {}", root.display()),
            });
        }
        let root = dunce::canonicalize(root).map_err(|e| RigupError::IoError {
            message: format!("Failed to resolve project root {}: {}", root.display(), e),
        })?;
        let config = Self::load_config(&root)?;
        Ok(Self { root, config })
    }

    /// Project with default settings, without touching the filesystem
    #[cfg(test)]
    pub fn with_defaults(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            config: ProjectConfig::default(),
        }
    }

    fn load_config(root: &Path) -> Result<ProjectConfig> {
        let path = root.join(PROJECT_CONFIG_FILE);
        if !path.exists() {
            return Ok(ProjectConfig::default());
        }

        let content = fs::read_to_string(&path).map_err(|e| RigupError::FileReadFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        ProjectConfig::from_yaml(&content).map_err(|e| match e {
            RigupError::ConfigParseFailed { reason, .. } => RigupError::ConfigParseFailed {
                path: path.display().to_string(),
                reason,
            },
            other => other,
        })
    }

    /// Absolute path of the runtime configuration file
    pub fn rc_file_path(&self) -> PathBuf {
        self.root.join(&self.config.rc_file)
    }

    /// Join segments onto the project root
    pub fn make_path<S: AsRef<str>>(&self, segments: &[S]) -> PathBuf {
        join_segments(self.root.clone(), segments)
    }

    /// Join segments onto a well-known directory, `None` for unknown names
    pub fn directory_path<S: AsRef<str>>(&self, name: &str, segments: &[S]) -> Option<PathBuf> {
        let dir = self.config.directory(name)?;
        Some(join_segments(self.root.join(dir), segments))
    }

    /// Path relative to the project root with forward slashes, for notices
    pub fn relative_display(&self, path: &Path) -> String {
        match path.strip_prefix(&self.root) {
            Ok(relative) => to_forward_slashes(relative),
            Err(_) => to_forward_slashes(path),
        }
    }
}

fn join_segments<S: AsRef<str>>(base: PathBuf, segments: &[S]) -> PathBuf {
    segments
        .iter()
        .map(AsRef::as_ref)
        .filter(|s| !s.is_empty())
        .fold(base, |acc, segment| acc.join(segment))
}
