//! Runtime configuration (rc) file mutation
//!
//! The rc file is a source file exporting `defineConfig({ ... })`. Edits are
//! applied directly to the text of that object literal so that everything the
//! editor does not touch (comments, formatting, unrelated keys) is preserved.
//!
//! Every edit is idempotent: an entry whose module path (or glob pattern for
//! `metaFiles`) already appears in the target list is left alone.

mod scan;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::common::fs;
use crate::error::{RigupError, Result};

/// Call whose object argument holds the runtime configuration
const CONFIG_CALL: &str = "defineConfig";

const PROPERTY_INDENT: &str = "  ";
const ENTRY_INDENT: &str = "    ";

/// A file-watcher pattern registered under `metaFiles`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct MetaFile {
    pub pattern: String,
    #[serde(default)]
    pub reload_server: bool,
}

impl MetaFile {
    #[cfg(test)]
    pub fn new(pattern: impl Into<String>, reload_server: bool) -> Self {
        Self {
            pattern: pattern.into(),
            reload_server,
        }
    }
}

/// Declarative set of rc file additions
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RcFileChanges {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub providers: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub commands: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub preloads: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub meta_files: Vec<MetaFile>,
}

/// In-memory editor over the rc file source
#[derive(Debug, Clone)]
pub struct RcFileEditor {
    path: PathBuf,
    source: String,
    modified: bool,
}

impl RcFileEditor {
    /// Load the rc file from disk
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(RigupError::RcFileNotFound {
                path: path.display().to_string(),
            });
        }
        let source = fs::read_text(path)?;
        Ok(Self::from_source(path, source))
    }

    /// Editor over an in-memory source, saved to `path`
    pub fn from_source(path: &Path, source: impl Into<String>) -> Self {
        Self {
            path: path.to_path_buf(),
            source: source.into(),
            modified: false,
        }
    }

    #[cfg(test)]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[cfg(test)]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Whether any edit changed the source since it was loaded
    #[cfg(test)]
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// Register a service provider module
    pub fn add_provider(&mut self, module: &str) -> Result<&mut Self> {
        self.add_lazy_import("providers", module)
    }

    /// Register a command module
    pub fn add_command(&mut self, module: &str) -> Result<&mut Self> {
        self.add_lazy_import("commands", module)
    }

    /// Register a preload module
    pub fn add_preload(&mut self, module: &str) -> Result<&mut Self> {
        self.add_lazy_import("preloads", module)
    }

    /// Register a file-watcher pattern
    pub fn add_meta_file(&mut self, pattern: &str, reload_server: bool) -> Result<&mut Self> {
        wax::Glob::new(pattern).map_err(|e| RigupError::InvalidMetaFilePattern {
            pattern: pattern.to_string(),
            reason: e.to_string(),
        })?;

        let entry = format!(
            "{{\n{ENTRY_INDENT}pattern: '{}',\n{ENTRY_INDENT}reloadServer: {},\n{PROPERTY_INDENT}}}",
            escape_single_quoted(pattern),
            reload_server
        );
        self.insert_entry("metaFiles", pattern, &entry)?;
        Ok(self)
    }

    /// Apply a declarative change set
    pub fn apply(&mut self, changes: &RcFileChanges) -> Result<&mut Self> {
        for module in &changes.providers {
            self.add_provider(module)?;
        }
        for module in &changes.commands {
            self.add_command(module)?;
        }
        for module in &changes.preloads {
            self.add_preload(module)?;
        }
        for meta in &changes.meta_files {
            self.add_meta_file(&meta.pattern, meta.reload_server)?;
        }
        Ok(self)
    }

    /// Write the source back when it changed; returns whether a write happened
    pub fn save(&self) -> Result<bool> {
        if !self.modified {
            return Ok(false);
        }
        fs::write_text(&self.path, &self.source)?;
        Ok(true)
    }

    fn add_lazy_import(&mut self, key: &str, module: &str) -> Result<&mut Self> {
        let entry = format!("() => import('{}')", escape_single_quoted(module));
        self.insert_entry(key, module, &entry)?;
        Ok(self)
    }

    /// Insert `entry` into the array under `key`, unless `identity` is already listed there
    fn insert_entry(&mut self, key: &str, identity: &str, entry: &str) -> Result<()> {
        let open = scan::find_call_object(&self.source, CONFIG_CALL)
            .ok_or_else(|| self.mutation_error(format!("unable to locate {CONFIG_CALL}({{ ... }}) call")))?;
        let close = scan::find_closing(&self.source, open)
            .ok_or_else(|| self.mutation_error(format!("unbalanced {CONFIG_CALL} object literal")))?;

        let updated = match scan::find_property_value(&self.source, open, close, key) {
            Some(value) => {
                if self.source.as_bytes().get(value) != Some(&b'[') {
                    return Err(self.mutation_error(format!("\"{key}\" is not an array literal")));
                }
                let list_close = scan::find_closing(&self.source, value)
                    .ok_or_else(|| self.mutation_error(format!("unbalanced \"{key}\" array")))?;
                let items = &self.source[value + 1..list_close];
                if lists_identity(items, identity) {
                    return Ok(());
                }
                splice(&self.source, value + 1, list_close, &append_item(items, entry))
            }
            None => {
                let body = &self.source[open + 1..close];
                let property = format!("{key}: [{entry}]");
                splice(&self.source, open + 1, close, &append_property(body, &property))
            }
        };

        self.source = updated;
        self.modified = true;
        Ok(())
    }

    fn mutation_error(&self, reason: String) -> RigupError {
        RigupError::MutationFailed {
            path: self.path.display().to_string(),
            reason,
        }
    }
}

fn escape_single_quoted(value: &str) -> String {
    value.replace('\\', "\\\\").replace('\'', "\\'")
}

fn lists_identity(items: &str, identity: &str) -> bool {
    let escaped = escape_single_quoted(identity);
    items.contains(&format!("'{escaped}'"))
        || items.contains(&format!("\"{identity}\""))
        || items.contains(&format!("`{identity}`"))
}

fn splice(source: &str, start: usize, end: usize, replacement: &str) -> String {
    let mut out = String::with_capacity(source.len() + replacement.len());
    out.push_str(&source[..start]);
    out.push_str(replacement);
    out.push_str(&source[end..]);
    out
}

/// `text` up to its trailing whitespace, with a comma after the last code
/// token when one is missing; trailing comments stay after the comma
fn with_separator(text: &str) -> String {
    let content_end = text.trim_end().len();
    let code_end = scan::end_of_code(text.as_bytes(), 0, content_end);
    let (code, comments) = text[..content_end].split_at(code_end);
    if code.is_empty() || code.ends_with(',') {
        format!("{code}{comments}")
    } else {
        format!("{code},{comments}")
    }
}

/// New array contents with `entry` appended after the existing items
fn append_item(items: &str, entry: &str) -> String {
    if items.trim().is_empty() {
        return entry.to_string();
    }
    let head = with_separator(items);
    let tail = &items[items.trim_end().len()..];

    if items.contains('\n') {
        let indent = leading_indent(items).unwrap_or(ENTRY_INDENT);
        format!("{head}\n{indent}{entry}{tail}")
    } else {
        format!("{head} {entry}{tail}")
    }
}

/// New object body with `property` appended after the existing properties
fn append_property(body: &str, property: &str) -> String {
    if body.trim().is_empty() {
        return format!("\n{PROPERTY_INDENT}{property}\n");
    }
    let head = with_separator(body);
    let indent = leading_indent(body).unwrap_or(PROPERTY_INDENT);
    format!("{head}\n{indent}{property}\n")
}

/// Indentation of the first non-blank line that follows a newline
fn leading_indent(text: &str) -> Option<&str> {
    text.split('\n').skip(1).find_map(|line| {
        let trimmed = line.trim_start_matches([' ', '\t']);
        if trimmed.trim().is_empty() {
            None
        } else {
            Some(&line[..line.len() - trimmed.len()])
        }
    })
}
