//! Project settings (rigup.yaml) data structures
//!
//! The file is optional. When present it may override the rc file name, the
//! install timeout and any of the well-known project directories.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{RigupError, Result};

/// Default runtime configuration file
pub const DEFAULT_RC_FILE: &str = "adonisrc.ts";

/// Default install timeout in seconds
pub const DEFAULT_INSTALL_TIMEOUT_SECS: u64 = 300;

/// Well-known directories and their default location relative to the project root
pub const DEFAULT_DIRECTORIES: &[(&str, &str)] = &[
    ("commands", "commands"),
    ("config", "config"),
    ("contracts", "contracts"),
    ("controllers", "app/controllers"),
    ("events", "app/events"),
    ("exceptions", "app/exceptions"),
    ("factories", "database/factories"),
    ("languageFiles", "resources/lang"),
    ("listeners", "app/listeners"),
    ("middleware", "app/middleware"),
    ("migrations", "database/migrations"),
    ("models", "app/models"),
    ("policies", "app/policies"),
    ("providers", "providers"),
    ("public", "public"),
    ("seeders", "database/seeders"),
    ("services", "app/services"),
    ("start", "start"),
    ("tests", "tests"),
    ("types", "types"),
    ("validators", "app/validators"),
    ("views", "resources/views"),
];

/// Project settings (rigup.yaml)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ProjectConfig {
    /// Runtime configuration file mutated by `updateRcFile`
    #[serde(default = "default_rc_file")]
    pub rc_file: String,

    /// Seconds to wait for the dependency manager; 0 disables the limit
    #[serde(default = "default_install_timeout")]
    pub install_timeout: u64,

    /// Directory overrides keyed by directory name
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub directories: BTreeMap<String, String>,
}

fn default_rc_file() -> String {
    DEFAULT_RC_FILE.to_string()
}

fn default_install_timeout() -> u64 {
    DEFAULT_INSTALL_TIMEOUT_SECS
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            rc_file: default_rc_file(),
            install_timeout: default_install_timeout(),
            directories: BTreeMap::new(),
        }
    }
}

impl ProjectConfig {
    /// Parse project settings from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Resolve a directory by name, falling back to the default layout
    pub fn directory(&self, name: &str) -> Option<&str> {
        if let Some(dir) = self.directories.get(name) {
            return Some(dir.as_str());
        }
        DEFAULT_DIRECTORIES
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, dir)| *dir)
    }

    /// All known directory names, defaults merged with overrides
    pub fn directory_names(&self) -> Vec<String> {
        let mut names: Vec<String> = DEFAULT_DIRECTORIES
            .iter()
            .map(|(name, _)| (*name).to_string())
            .collect();
        for name in self.directories.keys() {
            if !names.contains(name) {
                names.push(name.clone());
            }
        }
        names.sort();
        names
    }

    /// Install timeout, `None` when disabled
    pub fn install_timeout(&self) -> Option<Duration> {
        (self.install_timeout > 0).then(|| Duration::from_secs(self.install_timeout))
    }

    pub fn validate(&self) -> Result<()> {
        if self.rc_file.trim().is_empty() {
            return Err(RigupError::ConfigParseFailed {
                path: crate::project::PROJECT_CONFIG_FILE.to_string(),
                reason: "rcFile cannot be empty".to_string(),
            });
        }
        if let Some((name, _)) = self.directories.iter().find(|(_, dir)| dir.trim().is_empty()) {
            return Err(RigupError::ConfigParseFailed {
                path: crate::project::PROJECT_CONFIG_FILE.to_string(),
                reason: format!("directory '{}' cannot be empty", name),
            });
        }
        Ok(())
    }
}
