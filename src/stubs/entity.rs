//! Entity names passed to stubs

use serde::Serialize;
use serde_json::{Value, json};

/// A generated entity split into its directory and base name
///
/// `admin/user_profile` becomes `path = "admin"`, `name = "user_profile"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entity {
    pub path: String,
    pub name: String,
}

impl Entity {
    pub fn from_name(input: &str) -> Self {
        let normalized = input.replace('\\', "/");
        let trimmed = normalized.trim_matches('/');
        match trimmed.rsplit_once('/') {
            Some((path, name)) => Self {
                path: path.to_string(),
                name: name.to_string(),
            },
            None => Self {
                path: String::new(),
                name: trimmed.to_string(),
            },
        }
    }

    pub fn to_value(&self) -> Value {
        json!({ "path": self.path, "name": self.name })
    }
}
