//! Package setup manifest (setup.yaml) data structures
//!
//! A package declares where its stubs live and, optionally, the steps its
//! configure hook performs against the host project:
//!
//! ```yaml
//! stubsRoot: ./stubs
//! configure:
//!   - publishStub:
//!       stub: cors/config.stub
//!   - updateRcFile:
//!       providers: ['@acme/cors/cors_provider']
//!   - installPackages:
//!       - name: cors-core@2.0.0
//!         isDevDependency: false
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{RigupError, Result};
use crate::installer::Dependency;
use crate::rcfile::RcFileChanges;

/// Manifest file looked up inside a package directory
pub const PACKAGE_MANIFEST_FILE: &str = "setup.yaml";

/// Package setup manifest (setup.yaml)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PackageManifest {
    /// Stub directory, relative to the manifest
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stubs_root: Option<String>,

    /// Configure hook; absent means the package cannot be configured
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub configure: Option<Vec<SetupStep>>,
}

/// One entry of the `configure` list as written in YAML
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SetupStep {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub install_packages: Option<Vec<Dependency>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list_packages: Option<Vec<Dependency>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publish_stub: Option<PublishStubStep>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_rc_file: Option<RcFileChanges>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub set: Option<BTreeMap<String, Value>>,
}

/// Arguments of a `publishStub` step
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PublishStubStep {
    /// Stub path relative to `stubsRoot`
    pub stub: String,

    /// Template data made available to the command block and the body
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

/// A validated setup step
#[derive(Debug, Clone, PartialEq)]
pub enum SetupAction {
    InstallPackages(Vec<Dependency>),
    ListPackages(Vec<Dependency>),
    PublishStub { stub: String, data: Option<Value> },
    UpdateRcFile(RcFileChanges),
    SetResult(Value),
    SetState(BTreeMap<String, Value>),
}

impl SetupStep {
    /// Turn the raw step into exactly one action
    pub fn into_action(self, index: usize) -> std::result::Result<SetupAction, String> {
        let mut actions = Vec::new();
        if let Some(deps) = self.install_packages {
            actions.push(SetupAction::InstallPackages(deps));
        }
        if let Some(deps) = self.list_packages {
            actions.push(SetupAction::ListPackages(deps));
        }
        if let Some(step) = self.publish_stub {
            actions.push(SetupAction::PublishStub {
                stub: step.stub,
                data: step.data,
            });
        }
        if let Some(changes) = self.update_rc_file {
            actions.push(SetupAction::UpdateRcFile(changes));
        }
        if let Some(value) = self.result {
            actions.push(SetupAction::SetResult(value));
        }
        if let Some(state) = self.set {
            actions.push(SetupAction::SetState(state));
        }

        match actions.len() {
            1 => Ok(actions.remove(0)),
            0 => Err(format!("configure step {} does not declare an action", index + 1)),
            n => Err(format!(
                "configure step {} declares {} actions, expected exactly one",
                index + 1,
                n
            )),
        }
    }
}

impl PackageManifest {
    /// Parse a manifest from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let manifest: Self = serde_yaml::from_str(yaml)?;
        Ok(manifest)
    }

    /// Validate every configure step, returning them as actions
    pub fn actions(&self, reference: &str) -> Result<Option<Vec<SetupAction>>> {
        let Some(steps) = &self.configure else {
            return Ok(None);
        };
        steps
            .iter()
            .cloned()
            .enumerate()
            .map(|(index, step)| {
                step.into_action(index)
                    .map_err(|reason| RigupError::ResolutionFailed {
                        reference: reference.to_string(),
                        reason,
                    })
            })
            .collect::<Result<Vec<_>>>()
            .map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_manifest() {
        let yaml = r#"
stubsRoot: ./stubs
configure:
  - installPackages:
      - name: is-odd@2.0.0
        isDevDependency: true
      - name: is-even@1.0.0
  - publishStub:
      stub: cors/config.stub
      data:
        entity:
          name: cors
  - updateRcFile:
      providers: ['@acme/cors/cors_provider']
      metaFiles:
        - pattern: 'resources/views/**/*.edge'
          reloadServer: false
  - result: configured
"#;
        let manifest = PackageManifest::from_yaml(yaml).unwrap();
        assert_eq!(manifest.stubs_root.as_deref(), Some("./stubs"));

        let actions = manifest.actions("./pkg").unwrap().unwrap();
        assert_eq!(actions.len(), 4);
        match &actions[0] {
            SetupAction::InstallPackages(deps) => {
                assert_eq!(deps.len(), 2);
                assert!(deps[0].is_dev_dependency);
                assert!(!deps[1].is_dev_dependency);
            }
            other => panic!("unexpected action: {:?}", other),
        }
        assert!(matches!(&actions[1], SetupAction::PublishStub { stub, .. } if stub == "cors/config.stub"));
        assert!(matches!(&actions[2], SetupAction::UpdateRcFile(changes) if changes.meta_files.len() == 1));
        assert_eq!(actions[3], SetupAction::SetResult(Value::from("configured")));
    }

    #[test]
    fn test_missing_configure_is_none() {
        let manifest = PackageManifest::from_yaml("stubsRoot: ./\n").unwrap();
        assert!(manifest.actions("./pkg").unwrap().is_none());
    }

    #[test]
    fn test_empty_configure_list_is_present() {
        let manifest = PackageManifest::from_yaml("configure: []\n").unwrap();
        assert_eq!(manifest.actions("./pkg").unwrap(), Some(Vec::new()));
    }

    #[test]
    fn test_step_without_action_rejected() {
        let manifest = PackageManifest::from_yaml("configure:\n  - {}\n").unwrap();
        let err = manifest.actions("./pkg").unwrap_err();
        assert!(err.to_string().contains("does not declare an action"));
    }

    #[test]
    fn test_step_with_two_actions_rejected() {
        let yaml = "configure:\n  - result: a\n    set: { b: 1 }\n";
        let manifest = PackageManifest::from_yaml(yaml).unwrap();
        let err = manifest.actions("./pkg").unwrap_err();
        assert!(err.to_string().contains("declares 2 actions"));
    }

    #[test]
    fn test_unknown_step_key_rejected() {
        let result = PackageManifest::from_yaml("configure:\n  - runScript: foo\n");
        assert!(result.is_err());
    }
}
