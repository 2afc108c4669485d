//! Dependency installation for configured packages
//!
//! This module handles:
//! - Detecting the project's dependency manager from its lockfiles
//! - Partitioning dependencies into dev and prod batches
//! - Running one install invocation per non-empty batch
//! - Rendering a manual install listing for every supported manager
//!
//! The manager itself merges the new entries into `package.json`; the
//! installer only triggers it and checks the exit status.

pub mod manager;
pub mod process;

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{RigupError, Result};
use crate::ui::Logger;

pub use manager::{LISTING_ORDER, ManagerProfile, PackageManager};
pub use process::{Invocation, ProcessRunner, SystemRunner};

/// A package requested by a configure hook, e.g. `is-odd@2.0.0`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Dependency {
    /// Package name, optionally suffixed with `@version`
    pub name: String,

    #[serde(default)]
    pub is_dev_dependency: bool,
}

impl Dependency {
    #[cfg(test)]
    pub fn dev(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_dev_dependency: true,
        }
    }

    #[cfg(test)]
    pub fn prod(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_dev_dependency: false,
        }
    }

    /// Split `name@version` at the version separator, keeping scoped names intact
    #[cfg(test)]
    fn split_version(&self) -> (&str, Option<&str>) {
        let search_from = usize::from(self.name.starts_with('@'));
        match self.name[search_from..].find('@') {
            Some(index) => {
                let at = index + search_from;
                (&self.name[..at], Some(&self.name[at + 1..]))
            }
            None => (self.name.as_str(), None),
        }
    }

    /// Package name without the version specifier
    #[cfg(test)]
    pub fn package_name(&self) -> &str {
        self.split_version().0
    }

    /// Requested version, `latest` when none was given
    #[cfg(test)]
    pub fn version(&self) -> &str {
        match self.split_version().1 {
            Some(version) if !version.is_empty() => version,
            _ => "latest",
        }
    }
}

/// Dependencies split by kind, preserving input order
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct InstallBatch<'a> {
    pub dev: Vec<&'a Dependency>,
    pub prod: Vec<&'a Dependency>,
}

impl<'a> InstallBatch<'a> {
    pub fn partition(dependencies: &'a [Dependency]) -> Self {
        let (dev, prod): (Vec<_>, Vec<_>) =
            dependencies.iter().partition(|d| d.is_dev_dependency);
        Self { dev, prod }
    }

    pub fn is_empty(&self) -> bool {
        self.dev.is_empty() && self.prod.is_empty()
    }

    /// Non-empty subsets in install order: dev first, then prod
    pub fn subsets(&self) -> impl Iterator<Item = (bool, &[&'a Dependency])> {
        [(true, self.dev.as_slice()), (false, self.prod.as_slice())]
            .into_iter()
            .filter(|(_, deps)| !deps.is_empty())
    }
}

/// Summary of a successful install call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallReport {
    pub manager: PackageManager,
    pub invocations: usize,
}

/// Runs the project's dependency manager
pub struct Installer<'a> {
    project_root: &'a Path,
    runner: &'a dyn ProcessRunner,
    logger: &'a dyn Logger,
    timeout: Option<Duration>,
}

impl<'a> Installer<'a> {
    pub fn new(
        project_root: &'a Path,
        runner: &'a dyn ProcessRunner,
        logger: &'a dyn Logger,
        timeout: Option<Duration>,
    ) -> Self {
        Self {
            project_root,
            runner,
            logger,
            timeout,
        }
    }

    /// Build the invocation installing one subset
    pub fn invocation(
        &self,
        profile: &ManagerProfile,
        dev: bool,
        dependencies: &[&Dependency],
    ) -> Invocation {
        let command = profile.command(dev);
        let args = command[1..]
            .iter()
            .map(|a| (*a).to_string())
            .chain(dependencies.iter().map(|d| d.name.clone()))
            .collect();
        Invocation {
            program: command[0].to_string(),
            args,
            cwd: self.project_root.to_path_buf(),
            timeout: self.timeout,
        }
    }

    /// Install dependencies, stopping at the first failing invocation
    pub fn install(&self, dependencies: &[Dependency]) -> Result<InstallReport> {
        let batch = InstallBatch::partition(dependencies);
        let profile = ManagerProfile::detect(self.project_root);

        if batch.is_empty() {
            return Ok(InstallReport {
                manager: profile.id,
                invocations: 0,
            });
        }

        let mut spinner = self
            .logger
            .spinner(&format!("installing dependencies using {}", profile.id));

        let mut invocations = 0;
        for (dev, subset) in batch.subsets() {
            let invocation = self.invocation(&profile, dev, subset);
            let outcome = self.runner.run(&invocation).and_then(|output| {
                if output.success() {
                    Ok(())
                } else {
                    Err(RigupError::InstallFailed {
                        command: invocation.command_line(),
                        exit_code: output.code.unwrap_or(-1),
                        stderr: output.stderr,
                    })
                }
            });
            invocations += 1;

            if let Err(e) = outcome {
                spinner.update("unable to install dependencies");
                spinner.stop();
                return Err(e);
            }
        }

        spinner.stop();
        Ok(InstallReport {
            manager: profile.id,
            invocations,
        })
    }

    /// Print the commands a user can run to install dependencies manually
    pub fn list(&self, dependencies: &[Dependency]) {
        if dependencies.is_empty() {
            return;
        }
        self.logger.info(&render_listing(dependencies));
    }
}

/// Listing of install commands grouped by dev/prod, once per manager family
pub fn render_listing(dependencies: &[Dependency]) -> String {
    let batch = InstallBatch::partition(dependencies);
    let mut sections = Vec::new();

    for manager in LISTING_ORDER {
        let mut lines = vec![format!("# {}", manager)];
        for (dev, subset) in batch.subsets() {
            let names: Vec<&str> = subset.iter().map(|d| d.name.as_str()).collect();
            lines.push(format!("{} {}", manager.list_command(dev), names.join(" ")));
        }
        sections.push(lines.join("\n"));
    }

    format!(
        "Please install following packages\n{}",
        sections.join("\n \n")
    )
}
