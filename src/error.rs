//! Error types and handling for Rigup
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! Variants are grouped by the stage that raises them: package resolution,
//! contract validation, the setup routine itself, stub publishing, dependency
//! installation and rc file mutation.

use std::time::Duration;

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for Rigup operations
#[derive(Error, Diagnostic, Debug)]
pub enum RigupError {
    // Resolution errors
    #[error("Cannot find module '{path}'")]
    #[diagnostic(
        code(rigup::resolve::not_found),
        help("Check that the package reference points at a directory or file containing setup.yaml")
    )]
    PackageNotFound { reference: String, path: String },

    #[error("Unable to load package \"{reference}\": {reason}")]
    #[diagnostic(code(rigup::resolve::failed))]
    ResolutionFailed { reference: String, reason: String },

    // Contract errors
    #[error(
        "Missing \"{field}\" export from \"{reference}\" package. The stubsRoot variable is required to lookup package stubs"
    )]
    #[diagnostic(
        code(rigup::contract::violation),
        help("Declare stubsRoot next to the configure hook")
    )]
    ContractViolation { reference: String, field: String },

    #[error("{message}")]
    #[diagnostic(code(rigup::configure::failed))]
    SetupRoutineFailed { message: String },

    // Stub errors
    #[error("Stub not found: {path}")]
    #[diagnostic(code(rigup::stub::not_found))]
    StubNotFound { path: String },

    #[error("Invalid command block in stub '{stub}': {reason}")]
    #[diagnostic(
        code(rigup::stub::invalid_directive),
        help("The command block must contain a single exports({{ to: ... }}) call")
    )]
    InvalidStubDirective { stub: String, reason: String },

    #[error("Failed to render stub '{stub}': {reason}")]
    #[diagnostic(code(rigup::stub::render_failed))]
    TemplateRenderFailed { stub: String, reason: String },

    // Install errors
    #[error("{}", install_failure_message(.command, .exit_code, .stderr))]
    #[diagnostic(
        code(rigup::install::failed),
        help("Inspect the output above, or re-run with --no-install to install manually")
    )]
    InstallFailed {
        command: String,
        exit_code: i32,
        stderr: String,
    },

    #[error("Command timed out after {}: {command}", format_timeout(.timeout))]
    #[diagnostic(
        code(rigup::install::timed_out),
        help("Raise the limit with --install-timeout, or pass 0 to disable it")
    )]
    InstallTimedOut { command: String, timeout: Duration },

    #[error("Unable to locate '{program}' on PATH")]
    #[diagnostic(code(rigup::install::manager_not_found))]
    ManagerNotFound { program: String },

    // Rc file errors
    #[error("Runtime configuration file not found: {path}")]
    #[diagnostic(code(rigup::rcfile::not_found))]
    RcFileNotFound { path: String },

    #[error("Failed to update {path}: {reason}")]
    #[diagnostic(
        code(rigup::rcfile::mutation_failed),
        help("The rc file must export a defineConfig({{ ... }}) object literal")
    )]
    MutationFailed { path: String, reason: String },

    #[error("Invalid metaFiles pattern '{pattern}': {reason}")]
    #[diagnostic(code(rigup::rcfile::invalid_pattern))]
    InvalidMetaFilePattern { pattern: String, reason: String },

    // Command line errors
    #[error("Unknown shell: {shell}")]
    #[diagnostic(
        code(rigup::cli::unsupported_shell),
        help("Supported shells: bash, elvish, fish, powershell, zsh")
    )]
    UnsupportedShell { shell: String },

    // Configuration errors
    #[error("Failed to parse configuration file: {path}: {reason}")]
    #[diagnostic(code(rigup::config::parse_failed))]
    ConfigParseFailed { path: String, reason: String },

    // File system errors
    #[error("Failed to read file: {path}: {reason}")]
    #[diagnostic(code(rigup::fs::read_failed))]
    FileReadFailed { path: String, reason: String },

    #[error("Failed to write file: {path}: {reason}")]
    #[diagnostic(code(rigup::fs::write_failed))]
    FileWriteFailed { path: String, reason: String },

    #[error("IO error: {message}")]
    #[diagnostic(code(rigup::fs::io_error))]
    IoError { message: String },
}

fn install_failure_message(command: &str, exit_code: &i32, stderr: &str) -> String {
    let stderr = stderr.trim();
    if stderr.is_empty() {
        format!("Command failed with exit code {exit_code}: {command}")
    } else {
        format!("Command failed with exit code {exit_code}: {command}\n{stderr}")
    }
}

fn format_timeout(timeout: &Duration) -> String {
    if timeout.subsec_millis() == 0 {
        format!("{}s", timeout.as_secs())
    } else {
        format!("{}ms", timeout.as_millis())
    }
}

impl RigupError {
    /// Build a setup routine failure from any displayable message
    pub fn setup(message: impl Into<String>) -> Self {
        RigupError::SetupRoutineFailed {
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for RigupError {
    fn from(err: std::io::Error) -> Self {
        RigupError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<serde_yaml::Error> for RigupError {
    fn from(err: serde_yaml::Error) -> Self {
        RigupError::ConfigParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for RigupError {
    fn from(err: serde_json::Error) -> Self {
        RigupError::ConfigParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, RigupError>;
