//! Common test utilities for Rigup integration tests

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;

/// Minimal rc file used by host projects in tests
pub const RC_FILE: &str = "import { defineConfig } from '@adonisjs/core/app'\n\nexport default defineConfig({\n})\n";

/// A temporary host project
#[allow(dead_code)]
pub struct TestProject {
    /// Temporary directory
    pub temp: TempDir,
    /// Path to project root
    pub path: PathBuf,
}

#[allow(dead_code)]
impl TestProject {
    /// Create an empty project
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let path = temp.path().to_path_buf();
        Self { temp, path }
    }

    /// Create a project with `package.json` and an empty rc file
    pub fn with_rc_file() -> Self {
        let project = Self::new();
        project.write_file("package.json", "{\n  \"name\": \"app\"\n}\n");
        project.write_file("adonisrc.ts", RC_FILE);
        project
    }

    /// Write a file in the project
    pub fn write_file(&self, path: &str, content: &str) {
        let file_path = self.path.join(path);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&file_path, content).expect("Failed to write file");
    }

    /// Read a file from the project
    pub fn read_file(&self, path: &str) -> String {
        let file_path = self.path.join(path);
        std::fs::read_to_string(&file_path).expect("Failed to read file")
    }

    /// Check if a file exists in the project
    pub fn file_exists(&self, path: &str) -> bool {
        self.path.join(path).exists()
    }

    /// Write an executable shell script, returning its directory
    #[cfg(unix)]
    pub fn write_script(&self, path: &str, body: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        self.write_file(path, &format!("#!/bin/sh\n{}\n", body));
        let file_path = self.path.join(path);
        let mut permissions = std::fs::metadata(&file_path)
            .expect("Failed to stat script")
            .permissions();
        permissions.set_mode(0o755);
        std::fs::set_permissions(&file_path, permissions).expect("Failed to chmod script");
        file_path
            .parent()
            .map(Path::to_path_buf)
            .expect("Script has a parent directory")
    }

    /// Command for the rigup binary running inside this project
    pub fn rigup_cmd(&self) -> Command {
        let mut cmd = rigup_cmd();
        cmd.current_dir(&self.path);
        cmd
    }
}

impl Default for TestProject {
    fn default() -> Self {
        Self::new()
    }
}

// Temporary fix for deprecated cargo_bin - will be updated when build-dir issues are resolved
#[allow(deprecated)]
pub fn rigup_cmd() -> Command {
    let mut cmd = Command::cargo_bin("rigup").expect("rigup binary is built");
    cmd.env_remove("RIGUP_PROJECT");
    cmd
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_creation() {
        let project = TestProject::new();
        assert!(project.path.exists());
    }

    #[test]
    fn test_project_file_operations() {
        let project = TestProject::new();
        project.write_file("config/app.ts", "hello");
        assert!(project.file_exists("config/app.ts"));
        assert_eq!(project.read_file("config/app.ts"), "hello");
    }
}
