//! Stub publishing
//!
//! This module handles:
//! - Locating a stub under the package's `stubsRoot`
//! - Splitting the optional `{{{ ... }}}` command block from the body
//! - Evaluating the command block into a [`Directive`]
//! - Rendering the body and writing it under the overwrite policy
//!
//! Every publish call emits exactly one notice: `DONE:    create <path>` when
//! the file was written, `SKIPPED: create <path> (File already exists)` when
//! the destination exists and neither the directive nor the caller forces it.

pub mod directive;
mod entity;
mod render;

use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::common::fs;
use crate::common::path_utils::{is_contained_relative, to_forward_slashes};
use crate::error::{RigupError, Result};
use crate::project::Project;
use crate::ui::{ActionOutcome, Logger};

pub use directive::Directive;
pub use entity::Entity;

const OPEN_MARKER: &str = "{{{";
const CLOSE_MARKER: &str = "}}}";

/// Reason shown when an existing destination is left alone
pub const ALREADY_EXISTS: &str = "File already exists";

/// A stub split into its command block and body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StubParts<'a> {
    pub block: Option<&'a str>,
    pub body: &'a str,
}

impl<'a> StubParts<'a> {
    /// Split stub contents at the command block markers
    pub fn split(content: &'a str) -> std::result::Result<Self, String> {
        let rest = content.trim_start();
        let Some(after_open) = rest.strip_prefix(OPEN_MARKER) else {
            return Ok(Self {
                block: None,
                body: content,
            });
        };

        // Single line form: {{{ exports({ ... }) }}}
        let first_line = after_open.split('\n').next().unwrap_or_default();
        let first_line = first_line.trim_end();
        if let Some(block) = first_line.strip_suffix(CLOSE_MARKER) {
            if !block.trim().is_empty() {
                let body = &after_open[first_line.len()..];
                return Ok(Self {
                    block: Some(block),
                    body: strip_leading_newline(body),
                });
            }
        }

        let mut offset = 0;
        for line in after_open.split_inclusive('\n') {
            if line.trim() == CLOSE_MARKER {
                return Ok(Self {
                    block: Some(&after_open[..offset]),
                    body: &after_open[offset + line.len()..],
                });
            }
            offset += line.len();
        }

        Err(format!("unterminated command block, expected a closing {} line", CLOSE_MARKER))
    }
}

fn strip_leading_newline(text: &str) -> &str {
    let text = text.trim_start_matches([' ', '\t']);
    text.strip_prefix("\r\n")
        .or_else(|| text.strip_prefix('\n'))
        .unwrap_or(text)
}

/// Result of one publish call
#[derive(Debug, Clone, PartialEq)]
pub struct PublishOutcome {
    pub destination: PathBuf,
    pub directive: Directive,
    pub outcome: ActionOutcome,
}

impl PublishOutcome {
    #[cfg(test)]
    pub fn is_skipped(&self) -> bool {
        !self.outcome.is_done()
    }
}

/// Publishes stubs from one package into the host project
pub struct StubPublisher<'a> {
    project: &'a Project,
    stubs_root: &'a Path,
    logger: &'a dyn Logger,
    force: bool,
}

impl<'a> StubPublisher<'a> {
    pub fn new(project: &'a Project, stubs_root: &'a Path, logger: &'a dyn Logger, force: bool) -> Self {
        Self {
            project,
            stubs_root,
            logger,
            force,
        }
    }

    /// Render `stub` (relative to the stubs root) into the project
    pub fn publish(&self, stub: &str, data: Option<&Value>) -> Result<PublishOutcome> {
        let stub_path = self.resolve(stub)?;
        let content = fs::read_text(&stub_path)?;
        let parts = StubParts::split(&content).map_err(|reason| invalid_directive(stub, reason))?;
        let data = template_data(stub, data)?;

        let directive = match parts.block {
            Some(block) => directive::evaluate(block, self.project, &data)
                .map_err(|reason| invalid_directive(stub, reason))?,
            None => Directive::new(self.project.root.join(stub)),
        };

        let destination = directive.to.clone();
        let action = format!("create {}", self.project.relative_display(&destination));

        if destination.exists() && !(directive.force || self.force) {
            let outcome = ActionOutcome::skipped(action, ALREADY_EXISTS);
            self.logger.action(&outcome);
            return Ok(PublishOutcome {
                destination,
                directive,
                outcome,
            });
        }

        let context = template_context(self.project, data);
        let contents = render::render_body(stub, parts.body, &context)?;
        fs::write_text(&destination, &contents)?;

        let outcome = ActionOutcome::done(action);
        self.logger.action(&outcome);
        Ok(PublishOutcome {
            destination,
            directive,
            outcome,
        })
    }

    fn resolve(&self, stub: &str) -> Result<PathBuf> {
        let path = self.stubs_root.join(stub);
        if !is_contained_relative(stub) || !path.is_file() {
            return Err(RigupError::StubNotFound {
                path: path.display().to_string(),
            });
        }
        Ok(path)
    }
}

fn invalid_directive(stub: &str, reason: String) -> RigupError {
    RigupError::InvalidStubDirective {
        stub: stub.to_string(),
        reason,
    }
}

/// Template data as a mapping; a string `entity` is expanded into path and name
fn template_data(stub: &str, data: Option<&Value>) -> Result<Map<String, Value>> {
    let mut map = match data {
        None | Some(Value::Null) => Map::new(),
        Some(Value::Object(map)) => map.clone(),
        Some(_) => {
            return Err(invalid_directive(stub, "template data must be a mapping".to_string()));
        }
    };

    if let Some(name) = map.get("entity").and_then(Value::as_str).map(str::to_string) {
        map.insert("entity".to_string(), Entity::from_name(&name).to_value());
    }
    Ok(map)
}

/// Body context: the template data plus an `app` object with the project directories
fn template_context(project: &Project, mut data: Map<String, Value>) -> Value {
    data.entry("app").or_insert_with(|| {
        let mut app = Map::new();
        app.insert("root".to_string(), Value::String(to_forward_slashes(&project.root)));
        for name in project.config.directory_names() {
            if let Some(dir) = project.config.directory(&name) {
                app.insert(name.clone(), Value::String(dir.to_string()));
            }
        }
        Value::Object(app)
    });
    Value::Object(data)
}
