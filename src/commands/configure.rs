//! Configure command CLI wrapper
//!
//! This module provides the CLI interface for the configure operation,
//! delegating all business logic to operations/configure.

use std::path::PathBuf;

use crate::cli::ConfigureArgs;
use crate::error::{RigupError, Result};
use crate::installer::SystemRunner;
use crate::operations::{ConfigureOperation, ConfigureOptions};
use crate::project::Project;
use crate::resolver::DefaultImporter;
use crate::ui::TerminalLogger;

fn resolve_project_path(project: Option<PathBuf>) -> Result<PathBuf> {
    match project {
        Some(path) => Ok(path),
        None => std::env::current_dir().map_err(|e| RigupError::IoError {
            message: format!("Failed to get current directory: {}", e),
        }),
    }
}

/// Run configure command, returning the process exit code
///
/// Only project loading errors are returned as `Err`; everything that happens
/// while configuring the package is reported by the operation itself.
pub fn run(project: Option<PathBuf>, verbose: bool, args: ConfigureArgs) -> Result<i32> {
    let root = resolve_project_path(project)?;
    let project = Project::open(&root)?;

    let logger = TerminalLogger::new(verbose);
    let runner = SystemRunner;
    let options = ConfigureOptions {
        verbose,
        ..ConfigureOptions::from(&args)
    };

    let operation = ConfigureOperation::new(&project, &logger, &runner, options);
    let command = operation.execute(&args.package, &DefaultImporter);

    Ok(command.exit_code)
}
