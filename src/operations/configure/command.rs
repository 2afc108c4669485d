//! Host-side API handed to a package's configure routine

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde_json::Value;

use crate::cli::ConfigureArgs;
use crate::error::{RigupError, Result};
use crate::installer::{Dependency, InstallReport, Installer, ProcessRunner};
use crate::project::Project;
use crate::rcfile::RcFileEditor;
use crate::resolver::PackageReference;
use crate::stubs::{PublishOutcome, StubPublisher};
use crate::ui::{ActionOutcome, Logger};

/// Options for configure
#[derive(Debug, Clone)]
pub struct ConfigureOptions {
    /// Overwrite existing files when publishing stubs
    pub force: bool,
    pub verbose: bool,
    /// Run the dependency manager; when false only the listing is printed
    pub install: bool,
    /// Install timeout override in seconds, 0 disables it
    pub install_timeout: Option<u64>,
}

impl Default for ConfigureOptions {
    fn default() -> Self {
        Self {
            force: false,
            verbose: false,
            install: true,
            install_timeout: None,
        }
    }
}

impl From<&ConfigureArgs> for ConfigureOptions {
    fn from(args: &ConfigureArgs) -> Self {
        Self {
            force: args.force,
            verbose: false,
            install: !args.no_install,
            install_timeout: args.install_timeout,
        }
    }
}

/// State of one configure run, exposed to the package's setup routine
pub struct ConfigureCommand<'a> {
    project: &'a Project,
    logger: &'a dyn Logger,
    runner: &'a dyn ProcessRunner,
    reference: PackageReference,
    options: ConfigureOptions,
    stubs_root: Option<PathBuf>,

    /// 0 on success, 1 after any fatal condition
    pub exit_code: i32,
    /// The fatal error, if one ended the run
    pub error: Option<RigupError>,
    /// Value a setup routine reports back to the host
    pub result: Option<Value>,
    /// Free-form values set by the setup routine
    pub state: BTreeMap<String, Value>,
}

impl<'a> ConfigureCommand<'a> {
    pub fn new(
        project: &'a Project,
        logger: &'a dyn Logger,
        runner: &'a dyn ProcessRunner,
        reference: PackageReference,
        options: ConfigureOptions,
    ) -> Self {
        Self {
            project,
            logger,
            runner,
            reference,
            options,
            stubs_root: None,
            exit_code: 0,
            error: None,
            result: None,
            state: BTreeMap::new(),
        }
    }

    pub fn reference(&self) -> &PackageReference {
        &self.reference
    }

    pub fn project(&self) -> &'a Project {
        self.project
    }

    pub fn app_root(&self) -> &'a Path {
        &self.project.root
    }

    pub fn logger(&self) -> &'a dyn Logger {
        self.logger
    }

    pub fn is_verbose(&self) -> bool {
        self.options.verbose
    }

    pub fn is_forced(&self) -> bool {
        self.options.force
    }

    pub fn stubs_root(&self) -> Option<&Path> {
        self.stubs_root.as_deref()
    }

    /// Set the stubs root; relative paths resolve against the project root
    pub fn set_stubs_root(&mut self, stubs_root: impl Into<PathBuf>) {
        self.stubs_root = Some(self.project.root.join(stubs_root.into()));
    }

    /// Effective install timeout, `None` when disabled
    pub fn install_timeout(&self) -> Option<Duration> {
        match self.options.install_timeout {
            Some(0) => None,
            Some(secs) => Some(Duration::from_secs(secs)),
            None => self.project.config.install_timeout(),
        }
    }

    /// Install dependencies with the detected manager
    ///
    /// With installs disabled this prints the manual listing instead. A failed
    /// invocation is returned to the caller; recording it as the run's failure
    /// is left to [`ConfigureCommand::fail`].
    pub fn install_packages(&self, dependencies: &[Dependency]) -> Result<Option<InstallReport>> {
        if !self.options.install {
            self.list_packages_to_install(dependencies);
            return Ok(None);
        }

        let installer = Installer::new(
            self.app_root(),
            self.runner,
            self.logger,
            self.install_timeout(),
        );
        let report = installer.install(dependencies)?;
        if self.is_verbose() && report.invocations > 0 {
            self.logger
                .success(&format!("installed dependencies using {}", report.manager));
        }
        Ok(Some(report))
    }

    /// Print the commands a user can run to install dependencies manually
    pub fn list_packages_to_install(&self, dependencies: &[Dependency]) {
        let installer = Installer::new(self.app_root(), self.runner, self.logger, None);
        installer.list(dependencies);
    }

    /// Publish a stub from the package's stubs root
    pub fn publish_stub(&self, stub: &str, data: Option<&Value>) -> Result<PublishOutcome> {
        let stubs_root = self.stubs_root().ok_or_else(|| RigupError::ContractViolation {
            reference: self.reference.raw().to_string(),
            field: "stubsRoot".to_string(),
        })?;
        StubPublisher::new(self.project, stubs_root, self.logger, self.is_forced())
            .publish(stub, data)
    }

    /// Edit the rc file, writing it back only when something changed
    pub fn update_rc_file<F>(&self, edit: F) -> Result<bool>
    where
        F: FnOnce(&mut RcFileEditor) -> Result<()>,
    {
        let path = self.project.rc_file_path();
        let mut editor = RcFileEditor::load(&path)?;
        edit(&mut editor)?;

        let written = editor.save()?;
        if written {
            self.logger.action(&ActionOutcome::done(format!(
                "update {} file",
                self.project.relative_display(&path)
            )));
        }
        Ok(written)
    }

    /// Record a fatal error: one error line, exit code 1
    pub fn fail(&mut self, error: RigupError) {
        self.logger.error(&error.to_string());
        self.exit_code = 1;
        self.error = Some(error);
    }
}
