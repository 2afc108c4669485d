//! Package resolution
//!
//! Turns a package reference into a [`SetupContract`]:
//!
//! 1. Path-like references (`./pkg`, `../pkg`, `/abs/pkg`, `packages/pkg`)
//!    resolve against the project root. A directory means `<dir>/setup.yaml`,
//!    a file is read as the manifest itself.
//! 2. Built-in package names (`vinejs`, `edge`) resolve to contracts compiled
//!    into the binary.
//! 3. Any other name resolves to `node_modules/<name>/setup.yaml`.
//!
//! A `?query` suffix on the reference is ignored for lookup but kept for
//! messages.

pub mod builtin;
pub mod manifest;

use std::fmt;
use std::path::PathBuf;

use crate::common::path_utils::{is_path_like, strip_query_suffix};
use crate::config::PACKAGE_MANIFEST_FILE;
use crate::error::Result;
use crate::operations::configure::ConfigureCommand;
use crate::project::Project;

/// Directory searched for bare package names
pub const PACKAGES_DIR: &str = "node_modules";

/// Reference to the package being configured, as typed by the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageReference {
    raw: String,
}

impl PackageReference {
    pub fn new(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }

    /// The reference exactly as given, query suffix included
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The reference used for lookup, without the query suffix
    pub fn lookup(&self) -> &str {
        strip_query_suffix(&self.raw)
    }

    pub fn is_path_like(&self) -> bool {
        is_path_like(self.lookup())
    }
}

impl fmt::Display for PackageReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Setup routine run against the host project
pub trait ConfigureHook {
    fn run(&self, command: &mut ConfigureCommand<'_>) -> Result<()>;
}

impl<F> ConfigureHook for F
where
    F: Fn(&mut ConfigureCommand<'_>) -> Result<()>,
{
    fn run(&self, command: &mut ConfigureCommand<'_>) -> Result<()> {
        self(command)
    }
}

/// What a package exposes to the configure command
#[derive(Default)]
pub struct SetupContract {
    /// Directory stubs are looked up in; relative paths resolve against the project root
    pub stubs_root: Option<PathBuf>,

    /// Setup routine; `None` means there is nothing to configure
    pub configure: Option<Box<dyn ConfigureHook>>,
}

impl SetupContract {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_stubs_root(mut self, stubs_root: impl Into<PathBuf>) -> Self {
        self.stubs_root = Some(stubs_root.into());
        self
    }

    pub fn with_hook(mut self, hook: impl ConfigureHook + 'static) -> Self {
        self.configure = Some(Box::new(hook));
        self
    }
}

impl fmt::Debug for SetupContract {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SetupContract")
            .field("stubs_root", &self.stubs_root)
            .field("configure", &self.configure.is_some())
            .finish()
    }
}

/// Loads the contract behind a package reference
pub trait PackageImporter {
    fn import(&self, reference: &PackageReference, project: &Project) -> Result<SetupContract>;
}

/// Importer reading `setup.yaml` manifests and built-in packages
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultImporter;

impl PackageImporter for DefaultImporter {
    fn import(&self, reference: &PackageReference, project: &Project) -> Result<SetupContract> {
        let lookup = reference.lookup();

        if reference.is_path_like() {
            return manifest::load(reference, &project.root.join(lookup));
        }

        if let Some(contract) = builtin::contract(lookup) {
            return Ok(contract);
        }

        let manifest_path = project
            .root
            .join(PACKAGES_DIR)
            .join(lookup)
            .join(PACKAGE_MANIFEST_FILE);
        manifest::load(reference, &manifest_path)
    }
}
