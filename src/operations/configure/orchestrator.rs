//! Main orchestrator for configure operation
//! Resolves the package, validates its contract and runs its setup routine

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use crate::error::{RigupError, Result};
use crate::installer::ProcessRunner;
use crate::project::Project;
use crate::resolver::{PackageImporter, PackageReference};
use crate::ui::Logger;

use super::command::{ConfigureCommand, ConfigureOptions};

/// Main orchestrator for configure operation
pub struct ConfigureOperation<'a> {
    project: &'a Project,
    logger: &'a dyn Logger,
    runner: &'a dyn ProcessRunner,
    options: ConfigureOptions,
}

impl<'a> ConfigureOperation<'a> {
    pub fn new(
        project: &'a Project,
        logger: &'a dyn Logger,
        runner: &'a dyn ProcessRunner,
        options: ConfigureOptions,
    ) -> Self {
        Self {
            project,
            logger,
            runner,
            options,
        }
    }

    /// Configure one package
    ///
    /// Never fails: any fatal condition is logged once and recorded on the
    /// returned command, whose `exit_code` is the run's exit status. Side
    /// effects applied before a failure are kept.
    pub fn execute(&self, reference: &str, importer: &dyn PackageImporter) -> ConfigureCommand<'a> {
        let mut command = ConfigureCommand::new(
            self.project,
            self.logger,
            self.runner,
            PackageReference::new(reference),
            self.options.clone(),
        );

        if let Err(e) = run(&mut command, importer) {
            command.fail(e);
        }
        command
    }
}

fn run(command: &mut ConfigureCommand<'_>, importer: &dyn PackageImporter) -> Result<()> {
    let contract = importer.import(command.reference(), command.project())?;

    let Some(hook) = contract.configure else {
        command.logger().warning(&format!(
            "Cannot configure \"{}\" package. The package does not export the configure hook",
            command.reference()
        ));
        return Ok(());
    };

    let Some(stubs_root) = contract.stubs_root else {
        return Err(RigupError::ContractViolation {
            reference: command.reference().raw().to_string(),
            field: "stubsRoot".to_string(),
        });
    };

    command.set_stubs_root(stubs_root);

    // A panicking hook still ends the run with one error line and exit 1
    let reference = command.reference().raw().to_string();
    panic::catch_unwind(AssertUnwindSafe(|| hook.run(command))).unwrap_or_else(|payload| {
        Err(RigupError::setup(format!(
            "Configure hook of \"{}\" package panicked: {}",
            reference,
            panic_message(payload.as_ref())
        )))
    })
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        *message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.as_str()
    } else {
        "unknown cause"
    }
}
