//! Dependency manager detection
//!
//! The manager is chosen purely from lockfile presence in the project root,
//! probed in a fixed order: `pnpm-lock.yaml`, then `yarn.lock`, then
//! `package-lock.json`. No lockfile at all selects npm.

use std::fmt;
use std::path::Path;

/// Supported dependency managers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageManager {
    Pnpm,
    Yarn,
    Npm,
}

/// Order in which lockfiles are probed
const DETECTION_ORDER: [PackageManager; 3] =
    [PackageManager::Pnpm, PackageManager::Yarn, PackageManager::Npm];

/// Order in which managers are rendered by the listing helper
pub const LISTING_ORDER: [PackageManager; 3] =
    [PackageManager::Npm, PackageManager::Yarn, PackageManager::Pnpm];

impl PackageManager {
    pub fn id(self) -> &'static str {
        match self {
            PackageManager::Pnpm => "pnpm",
            PackageManager::Yarn => "yarn",
            PackageManager::Npm => "npm",
        }
    }

    pub fn lockfile(self) -> &'static str {
        match self {
            PackageManager::Pnpm => "pnpm-lock.yaml",
            PackageManager::Yarn => "yarn.lock",
            PackageManager::Npm => "package-lock.json",
        }
    }

    /// Pick the manager for a project root; npm when no lockfile matches
    pub fn detect(root: &Path) -> Self {
        DETECTION_ORDER
            .into_iter()
            .find(|manager| root.join(manager.lockfile()).is_file())
            .unwrap_or(PackageManager::Npm)
    }

    /// Executable and leading arguments used to install dependencies
    pub fn install_command(self, dev: bool) -> Vec<&'static str> {
        let mut command = match self {
            PackageManager::Npm => vec!["npm", "install"],
            PackageManager::Yarn => vec!["yarn", "add"],
            PackageManager::Pnpm => vec!["pnpm", "add"],
        };
        if dev {
            command.push("-D");
        }
        command
    }

    /// Short form shown to users by the listing helper
    pub fn list_command(self, dev: bool) -> String {
        let base = match self {
            PackageManager::Npm => "npm i",
            PackageManager::Yarn => "yarn add",
            PackageManager::Pnpm => "pnpm add",
        };
        if dev {
            format!("{} -D", base)
        } else {
            base.to_string()
        }
    }

    /// Resolved install profile for this manager
    pub fn profile(self) -> ManagerProfile {
        ManagerProfile {
            id: self,
            dev_install_command: self.install_command(true),
            prod_install_command: self.install_command(false),
        }
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Manager identity together with its install command templates
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManagerProfile {
    pub id: PackageManager,
    pub dev_install_command: Vec<&'static str>,
    pub prod_install_command: Vec<&'static str>,
}

impl ManagerProfile {
    /// Detect the manager for `root` and return its profile
    pub fn detect(root: &Path) -> Self {
        PackageManager::detect(root).profile()
    }

    pub fn command(&self, dev: bool) -> &[&'static str] {
        if dev {
            &self.dev_install_command
        } else {
            &self.prod_install_command
        }
    }
}
