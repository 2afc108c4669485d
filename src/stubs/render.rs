//! Stub body rendering with minijinja

use minijinja::Environment;
use serde_json::Value;

use crate::common::string_utils;
use crate::error::{RigupError, Result};

fn build_environment<'source>() -> Environment<'source> {
    let mut env = Environment::new();
    env.set_keep_trailing_newline(true);

    env.add_filter("camel_case", |value: &str| -> String { string_utils::camel_case(value) });
    env.add_filter("pascal_case", |value: &str| -> String { string_utils::pascal_case(value) });
    env.add_filter("snake_case", |value: &str| -> String { string_utils::snake_case(value) });
    env.add_filter("dash_case", |value: &str| -> String { string_utils::dash_case(value) });
    env.add_filter("title_case", |value: &str| -> String { string_utils::title_case(value) });

    env
}

/// Render a stub body against its template context
pub fn render_body(stub: &str, body: &str, context: &Value) -> Result<String> {
    let mut env = build_environment();
    env.add_template(stub, body).map_err(|e| RigupError::TemplateRenderFailed {
        stub: stub.to_string(),
        reason: e.to_string(),
    })?;

    let template = env.get_template(stub).map_err(|e| RigupError::TemplateRenderFailed {
        stub: stub.to_string(),
        reason: e.to_string(),
    })?;

    template
        .render(minijinja::Value::from_serialize(context))
        .map_err(|e| RigupError::TemplateRenderFailed {
            stub: stub.to_string(),
            reason: e.to_string(),
        })
}
