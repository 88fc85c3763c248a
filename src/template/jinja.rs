/*!
 * `TemplateRenderer` backed by minijinja.
 *
 * Templates use Jinja2 syntax. Printed values are HTML-escaped unless the
 * renderer is built with `plain()` or the template applies `|safe`.
 */

use minijinja::{AutoEscape, Environment, Error, ErrorKind};
use serde_json::Value;

use super::TemplateRenderer;
use crate::errors::TemplateError;

/// Jinja2 renderer over a shared minijinja environment
pub struct JinjaRenderer {
    env: Environment<'static>,
}

impl JinjaRenderer {
    /// Renderer that escapes every printed value for HTML
    pub fn new() -> Self {
        Self::with_html_escape(true)
    }

    /// Renderer that prints values as-is, for text reports
    pub fn plain() -> Self {
        Self::with_html_escape(false)
    }

    fn with_html_escape(html: bool) -> Self {
        let mut env = Environment::new();
        env.set_auto_escape_callback(move |_name| {
            if html { AutoEscape::Html } else { AutoEscape::None }
        });
        Self { env }
    }
}

impl Default for JinjaRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateRenderer for JinjaRenderer {
    fn render(&self, source: &str, context: &Value) -> Result<String, TemplateError> {
        self.env.render_str(source, context).map_err(TemplateError::from)
    }
}

impl From<Error> for TemplateError {
    fn from(err: Error) -> Self {
        let line = err.line().unwrap_or(0);
        let message = match err.detail() {
            Some(detail) => detail.to_string(),
            None => err.to_string(),
        };
        match err.kind() {
            ErrorKind::SyntaxError => TemplateError::Syntax { line, message },
            ErrorKind::UnknownFilter | ErrorKind::UnknownTest | ErrorKind::UnknownFunction => {
                TemplateError::UnknownName { line, message }
            }
            _ => TemplateError::Render { line, message },
        }
    }
}
