/*!
 * Error types for the rubricator application.
 *
 * Every failure the loader or exporter can hit is a variant of `RubricError`,
 * carrying the offending path and, where it applies, the field or identifier
 * involved. Template engine failures have their own `TemplateError` and are
 * wrapped when they surface through the exporter.
 */

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Which file a `NotFound` error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileRole {
    /// The rubric export being loaded
    Rubric,
    /// The report template
    Template,
}

impl fmt::Display for FileRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileRole::Rubric => write!(f, "rubric"),
            FileRole::Template => write!(f, "template"),
        }
    }
}

/// Structural problems found after the required keys are known to be present
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationIssue {
    /// `Rubric` must hold exactly one record
    RubricCount { actual: usize },
    /// `RubricScale` is empty
    NoScales,
    /// `RubricCriterion` is empty
    NoCriteria,
    /// `RubricCriterionScale` does not fill the criteria x scales grid
    CellCount {
        scales: usize,
        criteria: usize,
        actual: usize,
    },
    /// A criterion references the wrong number of scale cells
    CriterionCellCount {
        criterion: String,
        expected: usize,
        actual: usize,
    },
    /// Two criterion-scale records share an id
    DuplicateCellId { id: String },
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationIssue::RubricCount { actual } => {
                write!(f, "expected exactly 1 Rubric record, found {}", actual)
            }
            ValidationIssue::NoScales => write!(f, "RubricScale has no records"),
            ValidationIssue::NoCriteria => write!(f, "RubricCriterion has no records"),
            ValidationIssue::CellCount { scales, criteria, actual } => write!(
                f,
                "expected {} RubricCriterionScale records ({} scales x {} criteria), found {}",
                scales * criteria,
                scales,
                criteria,
                actual
            ),
            ValidationIssue::CriterionCellCount { criterion, expected, actual } => write!(
                f,
                "criterion '{}' references {} scale cells, expected {}",
                criterion, actual, expected
            ),
            ValidationIssue::DuplicateCellId { id } => {
                write!(f, "RubricCriterionScale id '{}' appears more than once", id)
            }
        }
    }
}

/// Errors raised while compiling or rendering a template
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TemplateError {
    /// Malformed or unbalanced tag
    #[error("Template syntax error on line {line}: {message}")]
    Syntax { line: usize, message: String },

    /// Filter, test or function the environment does not define
    #[error("Unknown name on line {line}: {message}")]
    UnknownName { line: usize, message: String },

    /// Failure while evaluating a compiled template
    #[error("Template render failed on line {line}: {message}")]
    Render { line: usize, message: String },
}

/// Stable tag for each `RubricError` variant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Parse,
    Schema,
    Validation,
    Lookup,
    Template,
    File,
}

/// Errors that can occur while loading or exporting a rubric
#[derive(Error, Debug)]
pub enum RubricError {
    /// Input rubric or template does not exist
    #[error("The specified {role} ({}) was not found", path.display())]
    NotFound { role: FileRole, path: PathBuf },

    /// Input is not valid JSON
    #[error("Unable to decode rubric file {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    /// A required key or record field is missing or has the wrong shape
    #[error("Rubric {} has an invalid '{field}': {message}", path.display())]
    Schema {
        path: PathBuf,
        field: String,
        message: String,
    },

    /// Record counts do not describe a complete matrix
    #[error("Rubric {} is not valid: {issue}", path.display())]
    Validation { path: PathBuf, issue: ValidationIssue },

    /// A criterion references a scale cell that does not exist
    #[error("Rubric {}: criterion '{criterion}' references unknown scale cell '{id}'", path.display())]
    Lookup {
        path: PathBuf,
        criterion: String,
        id: String,
    },

    /// Template could not be parsed or rendered
    #[error("Template {} failed: {source}", path.display())]
    Template {
        path: PathBuf,
        #[source]
        source: TemplateError,
    },

    /// Reading or writing a file failed
    #[error("File error for {}: {message}", path.display())]
    File { path: PathBuf, message: String },
}

impl RubricError {
    /// Returns the taxonomy tag of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            RubricError::NotFound { .. } => ErrorKind::NotFound,
            RubricError::Parse { .. } => ErrorKind::Parse,
            RubricError::Schema { .. } => ErrorKind::Schema,
            RubricError::Validation { .. } => ErrorKind::Validation,
            RubricError::Lookup { .. } => ErrorKind::Lookup,
            RubricError::Template { .. } => ErrorKind::Template,
            RubricError::File { .. } => ErrorKind::File,
        }
    }

    pub(crate) fn file(path: impl Into<PathBuf>, error: anyhow::Error) -> Self {
        RubricError::File {
            path: path.into(),
            message: format!("{:#}", error),
        }
    }
}
