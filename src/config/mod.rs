//! Configuration file handling for Rigup
//!
//! This module contains data structures for:
//! - `rigup.yaml` - Project settings (rc file, install timeout, directories)
//! - `setup.yaml` - Package setup manifest (stubsRoot and configure steps)

pub mod package;
pub mod project;

// Re-export commonly used types
pub use package::{PACKAGE_MANIFEST_FILE, PackageManifest, SetupAction};
pub use project::ProjectConfig;
