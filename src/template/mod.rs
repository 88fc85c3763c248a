/*!
 * Template rendering for rubric reports.
 *
 * The exporter only depends on the `TemplateRenderer` trait, so the engine can
 * be replaced without touching the loader or the exporter.
 *
 * - `jinja`: the minijinja-backed renderer used by default
 */

pub mod jinja;

use serde_json::Value;

use crate::errors::TemplateError;

pub use jinja::JinjaRenderer;

/// Report template compiled into the binary, used when no template path is configured
pub const BUILTIN_TEMPLATE: &str = include_str!("../../templates/rubric.html");

/// Name the built-in template goes by in progress output and errors
pub const BUILTIN_TEMPLATE_NAME: &str = "<built-in rubric.html>";

/// Renders template source against a JSON context
pub trait TemplateRenderer {
    fn render(&self, source: &str, context: &Value) -> Result<String, TemplateError>;
}
