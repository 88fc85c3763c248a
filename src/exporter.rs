/*!
 * Report export.
 *
 * Renders a `NormalizedRubric` through a `TemplateRenderer` and writes the
 * result to the output path. The render context has one root key, `rubric`,
 * holding `title` (also as `name`), `header`, `criteria_index`, `matrix`,
 * `rows`, and the original `scales` and `criteria` records.
 */

use std::path::Path;

use log::info;
use serde_json::{Value, json};

use crate::errors::{FileRole, RubricError};
use crate::file_utils::FileManager;
use crate::progress::ProgressReporter;
use crate::rubric::NormalizedRubric;
use crate::template::{BUILTIN_TEMPLATE, BUILTIN_TEMPLATE_NAME, JinjaRenderer, TemplateRenderer};

/// Writes rendered rubric reports
pub struct RubricExporter<'a, R: TemplateRenderer = JinjaRenderer> {
    renderer: R,
    progress: &'a ProgressReporter,
}

impl<'a> RubricExporter<'a, JinjaRenderer> {
    /// Exporter rendering Jinja templates with HTML escaping
    pub fn new(progress: &'a ProgressReporter) -> Self {
        Self::with_renderer(JinjaRenderer::new(), progress)
    }
}

impl<'a, R: TemplateRenderer> RubricExporter<'a, R> {
    pub fn with_renderer(renderer: R, progress: &'a ProgressReporter) -> Self {
        Self { renderer, progress }
    }

    /// Render `rubric` with the template at `template_path` into `out_path`
    ///
    /// Nothing is written unless rendering succeeds; the output replaces any
    /// existing file in a single rename.
    pub fn export(
        &self,
        rubric: &NormalizedRubric,
        template_path: &Path,
        out_path: &Path,
    ) -> Result<(), RubricError> {
        if !FileManager::file_exists(template_path) {
            self.progress.update(&format!(
                "The specified template ({}) was not found. Exiting.",
                template_path.display()
            ));
            return Err(RubricError::NotFound {
                role: FileRole::Template,
                path: template_path.to_path_buf(),
            });
        }

        let template_source = FileManager::read_to_string(template_path)
            .map_err(|e| RubricError::file(template_path, e))?;
        self.write_report(rubric, &template_source, template_path, out_path)
    }

    /// Render `rubric` with the template compiled into the binary
    pub fn export_builtin(&self, rubric: &NormalizedRubric, out_path: &Path) -> Result<(), RubricError> {
        self.write_report(rubric, BUILTIN_TEMPLATE, Path::new(BUILTIN_TEMPLATE_NAME), out_path)
    }

    fn write_report(
        &self,
        rubric: &NormalizedRubric,
        template_source: &str,
        template_path: &Path,
        out_path: &Path,
    ) -> Result<(), RubricError> {
        let html = self.render(rubric, template_source).map_err(|e| match e {
            RubricError::Template { source, .. } => RubricError::Template {
                path: template_path.to_path_buf(),
                source,
            },
            other => other,
        })?;
        self.progress
            .update(&format!("Rendered template: {}", template_path.display()));

        FileManager::write_atomically(out_path, &html).map_err(|e| RubricError::file(out_path, e))?;
        info!("Wrote rubric '{}' to {}", rubric.title, out_path.display());
        self.progress
            .update(&format!("Exported rubric to: {}", out_path.display()));

        Ok(())
    }

    /// Render `rubric` with in-memory template source
    pub fn render(&self, rubric: &NormalizedRubric, source: &str) -> Result<String, RubricError> {
        let context = render_context(rubric);
        self.renderer
            .render(source, &context)
            .map_err(|source| RubricError::Template {
                path: "<inline>".into(),
                source,
            })
    }
}

/// Build the JSON context a template is rendered against
pub fn render_context(rubric: &NormalizedRubric) -> Value {
    json!({
        "rubric": {
            "title": rubric.title,
            "name": rubric.title,
            "header": rubric.header,
            "criteria_index": rubric.criteria_index,
            "matrix": rubric.matrix,
            "rows": rubric.rows,
            "scales": rubric.scales,
            "criteria": rubric.criteria,
        }
    })
}
