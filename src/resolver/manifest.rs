//! Contracts backed by a `setup.yaml` manifest

use std::path::Path;

use crate::common::fs;
use crate::config::{PACKAGE_MANIFEST_FILE, PackageManifest, SetupAction};
use crate::error::{RigupError, Result};
use crate::operations::configure::ConfigureCommand;

use super::{ConfigureHook, PackageReference, SetupContract};

/// Load the manifest at `path` (or `path/setup.yaml` for a directory)
pub fn load(reference: &PackageReference, path: &Path) -> Result<SetupContract> {
    let manifest_path = if path.is_dir() {
        path.join(PACKAGE_MANIFEST_FILE)
    } else {
        path.to_path_buf()
    };

    if !manifest_path.is_file() {
        return Err(RigupError::PackageNotFound {
            reference: reference.raw().to_string(),
            path: manifest_path.display().to_string(),
        });
    }

    let content = fs::read_text(&manifest_path)?;
    let manifest = PackageManifest::from_yaml(&content).map_err(|e| match e {
        RigupError::ConfigParseFailed { reason, .. } => RigupError::ResolutionFailed {
            reference: reference.raw().to_string(),
            reason,
        },
        other => other,
    })?;

    let base = manifest_path.parent().unwrap_or(Path::new(""));
    let mut contract = SetupContract::new();
    if let Some(stubs_root) = &manifest.stubs_root {
        contract = contract.with_stubs_root(base.join(stubs_root));
    }
    if let Some(actions) = manifest.actions(reference.raw())? {
        contract = contract.with_hook(ManifestHook { actions });
    }
    Ok(contract)
}

/// Runs the declarative steps of a manifest in order
#[derive(Debug, Clone)]
pub struct ManifestHook {
    actions: Vec<SetupAction>,
}

impl ConfigureHook for ManifestHook {
    fn run(&self, command: &mut ConfigureCommand<'_>) -> Result<()> {
        for action in &self.actions {
            match action {
                SetupAction::InstallPackages(dependencies) => {
                    command.install_packages(dependencies)?;
                }
                SetupAction::ListPackages(dependencies) => {
                    command.list_packages_to_install(dependencies);
                }
                SetupAction::PublishStub { stub, data } => {
                    command.publish_stub(stub, data.as_ref())?;
                }
                SetupAction::UpdateRcFile(changes) => {
                    command.update_rc_file(|rc| {
                        rc.apply(changes)?;
                        Ok(())
                    })?;
                }
                SetupAction::SetResult(value) => {
                    command.result = Some(value.clone());
                }
                SetupAction::SetState(values) => {
                    command
                        .state
                        .extend(values.iter().map(|(k, v)| (k.clone(), v.clone())));
                }
            }
        }
        Ok(())
    }
}
