/*!
 * # Rubricator - rubric exports to HTML grading matrices
 *
 * A Rust library for turning rubric export files from a grading tool into
 * HTML reports.
 *
 * ## Features
 *
 * - Validate rubric exports (required keys, record counts, cell references)
 * - Normalize the four flat record lists into a criteria x scales matrix
 * - Render the matrix through a user-supplied template
 * - Atomic report writes, creating output directories as needed
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `rubric`: Export loading and normalization:
 *   - `rubric::raw`: Export record types
 *   - `rubric::validation`: Record-count checks
 *   - `rubric::model`: The normalized matrix
 *   - `rubric::loader`: Load, validate, normalize
 * - `template`: The `TemplateRenderer` seam and its minijinja implementation
 * - `exporter`: Renders a normalized rubric to a file
 * - `progress`: Timestamped verbose progress output
 * - `file_utils`: File system operations
 * - `app_controller`: Main application controller
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod file_utils;
pub mod rubric;
pub mod template;
pub mod exporter;
pub mod progress;
pub mod app_controller;
pub mod errors;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::Controller;
pub use rubric::{NormalizedRubric, RubricLoader, load_rubric};
pub use exporter::RubricExporter;
pub use template::{JinjaRenderer, TemplateRenderer};
pub use progress::ProgressReporter;
pub use errors::{ErrorKind, FileRole, RubricError, TemplateError, ValidationIssue};
