use log::debug;
use std::path::Path;

use crate::app_config::Config;
use crate::errors::RubricError;
use crate::exporter::RubricExporter;
use crate::progress::ProgressReporter;
use crate::rubric::RubricLoader;

// @module: Application controller for rubric rendering

/// Main application controller: load, normalize, export
pub struct Controller {
    // @field: App configuration
    config: Config,
    // @field: Stage reporter built from `config.verbose`
    progress: ProgressReporter,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Self {
        let progress = ProgressReporter::new(config.verbose);
        Self::with_reporter(config, progress)
    }

    /// Create a controller reporting progress through `progress`
    pub fn with_reporter(config: Config, progress: ProgressReporter) -> Self {
        Self { config, progress }
    }

    /// Render the rubric export at `input` into `output`
    ///
    /// A loader failure returns before the exporter runs, so no output file
    /// is created. Errors are returned, not logged; the caller reports them.
    pub fn run(&self, input: &Path, output: &Path) -> Result<(), RubricError> {
        let start_time = std::time::Instant::now();

        let result = RubricLoader::new(&self.progress)
            .load(input)
            .and_then(|rubric| {
                let exporter = RubricExporter::new(&self.progress);
                match &self.config.template_path {
                    Some(template) => exporter.export(&rubric, template, output),
                    None => exporter.export_builtin(&rubric, output),
                }
            });

        match &result {
            Ok(()) => debug!(
                "Rendered {} into {} in {:?}",
                input.display(),
                output.display(),
                start_time.elapsed()
            ),
            Err(e) => debug!(
                "Rendering {} failed after {:?}: {:?}",
                input.display(),
                start_time.elapsed(),
                e.kind()
            ),
        }
        result
    }
}
