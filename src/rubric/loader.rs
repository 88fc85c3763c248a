use std::collections::HashMap;
use std::path::Path;

use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::errors::{FileRole, RubricError, ValidationIssue};
use crate::file_utils::FileManager;
use crate::progress::ProgressReporter;
use crate::rubric::model::{CriterionEntry, HeaderCell, NormalizedRubric, RubricRow};
use crate::rubric::raw::{
    CELL_KEY, CRITERION_KEY, REQUIRED_KEYS, RUBRIC_KEY, RawRubricDocument, SCALE_KEY,
};
use crate::rubric::validation::Cardinality;

// @module: Rubric export loading and normalization

/// Reads an export from disk and turns it into a `NormalizedRubric`
pub struct RubricLoader<'a> {
    progress: &'a ProgressReporter,
}

impl<'a> RubricLoader<'a> {
    pub fn new(progress: &'a ProgressReporter) -> Self {
        Self { progress }
    }

    /// Load, validate and normalize the export at `path`
    pub fn load(&self, path: &Path) -> Result<NormalizedRubric, RubricError> {
        self.progress
            .update(&format!("Loading specified rubric: {}", path.display()));

        if !path.exists() {
            self.progress.update(&format!(
                "The specified rubric ({}) was not found. Exiting.",
                path.display()
            ));
            return Err(RubricError::NotFound {
                role: FileRole::Rubric,
                path: path.to_path_buf(),
            });
        }

        let text = FileManager::read_to_string(path).map_err(|e| RubricError::file(path, e))?;
        let document = self.parse(path, &text)?;
        self.normalize(path, document)
    }

    /// Parse export text and check its keys and record counts
    ///
    /// `path` only labels errors; nothing is read from it.
    pub fn parse(&self, path: &Path, text: &str) -> Result<RawRubricDocument, RubricError> {
        let value: Value = serde_json::from_str(text).map_err(|e| {
            self.progress
                .update("Unable to decode specified rubric file. Exiting.");
            RubricError::Parse {
                path: path.to_path_buf(),
                message: e.to_string(),
            }
        })?;

        let mut object = match value {
            Value::Object(object) => object,
            other => {
                return Err(schema_error(
                    path,
                    "$",
                    format!("expected a JSON object at the top level, found {}", json_type(&other)),
                ));
            }
        };

        for key in REQUIRED_KEYS {
            match object.get(key) {
                None => {
                    warn!("Rubric {} is missing required key '{}'", path.display(), key);
                    return Err(schema_error(path, key, "required key is missing".to_string()));
                }
                Some(Value::Array(_)) => {}
                Some(other) => {
                    return Err(schema_error(
                        path,
                        key,
                        format!("expected a list of records, found {}", json_type(other)),
                    ));
                }
            }
        }
        self.progress
            .update("All expected keys are present in the specified rubric file.");

        let counts = Cardinality::new(
            list_len(&object, RUBRIC_KEY),
            list_len(&object, SCALE_KEY),
            list_len(&object, CRITERION_KEY),
            list_len(&object, CELL_KEY),
        );
        if let Err(issue) = counts.check() {
            self.progress.update(&format!("Rubric is not valid: {}", issue));
            return Err(RubricError::Validation {
                path: path.to_path_buf(),
                issue,
            });
        }
        self.progress.update("All rubric items are of the correct length.");

        Ok(RawRubricDocument {
            rubric: decode_records(path, &mut object, RUBRIC_KEY)?,
            scales: decode_records(path, &mut object, SCALE_KEY)?,
            criteria: decode_records(path, &mut object, CRITERION_KEY)?,
            cells: decode_records(path, &mut object, CELL_KEY)?,
        })
    }

    /// Build header, criteria index and matrix from a decoded export
    pub fn normalize(
        &self,
        path: &Path,
        document: RawRubricDocument,
    ) -> Result<NormalizedRubric, RubricError> {
        Cardinality::of(&document)
            .check()
            .map_err(|issue| validation_error(path, issue))?;

        let title = document.rubric[0].name.clone();
        let header: Vec<HeaderCell> = document.scales.iter().map(HeaderCell::from).collect();
        let criteria_index: Vec<CriterionEntry> =
            document.criteria.iter().map(CriterionEntry::from).collect();

        let mut values: HashMap<&str, &str> = HashMap::with_capacity(document.cells.len());
        for cell in &document.cells {
            if values.insert(cell.id.as_str(), cell.description.as_str()).is_some() {
                return Err(validation_error(
                    path,
                    ValidationIssue::DuplicateCellId {
                        id: cell.id.to_string(),
                    },
                ));
            }
        }

        let mut matrix = Vec::with_capacity(document.criteria.len());
        for criterion in &document.criteria {
            if criterion.criterion_scales.len() != header.len() {
                return Err(validation_error(
                    path,
                    ValidationIssue::CriterionCellCount {
                        criterion: criterion.name.clone(),
                        expected: header.len(),
                        actual: criterion.criterion_scales.len(),
                    },
                ));
            }

            let row = criterion
                .criterion_scales
                .iter()
                .map(|id| {
                    values
                        .get(id.as_str())
                        .map(|description| description.to_string())
                        .ok_or_else(|| RubricError::Lookup {
                            path: path.to_path_buf(),
                            criterion: criterion.name.clone(),
                            id: id.to_string(),
                        })
                })
                .collect::<Result<Vec<String>, RubricError>>()?;
            matrix.push(row);
        }
        debug!(
            "Built {}x{} matrix for rubric '{}'",
            matrix.len(),
            header.len(),
            title
        );
        self.progress.update("Rubric matrix built.");

        let rows = criteria_index
            .iter()
            .cloned()
            .zip(matrix.iter().cloned())
            .map(|(entry, cells)| RubricRow(entry, cells))
            .collect();

        Ok(NormalizedRubric {
            title,
            header,
            criteria_index,
            matrix,
            rows,
            scales: document.scales,
            criteria: document.criteria,
        })
    }
}

/// Load a rubric without progress output
pub fn load_rubric<P: AsRef<Path>>(path: P) -> Result<NormalizedRubric, RubricError> {
    let progress = ProgressReporter::silent();
    RubricLoader::new(&progress).load(path.as_ref())
}

fn list_len(object: &Map<String, Value>, key: &str) -> usize {
    object.get(key).and_then(Value::as_array).map_or(0, Vec::len)
}

fn decode_records<T: DeserializeOwned>(
    path: &Path,
    object: &mut Map<String, Value>,
    key: &str,
) -> Result<Vec<T>, RubricError> {
    let items = match object.remove(key) {
        Some(Value::Array(items)) => items,
        _ => return Err(schema_error(path, key, "expected a list of records".to_string())),
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            serde_json::from_value(item)
                .map_err(|e| schema_error(path, &format!("{}[{}]", key, index), e.to_string()))
        })
        .collect()
}

fn schema_error(path: &Path, field: &str, message: String) -> RubricError {
    RubricError::Schema {
        path: path.to_path_buf(),
        field: field.to_string(),
        message,
    }
}

fn validation_error(path: &Path, issue: ValidationIssue) -> RubricError {
    RubricError::Validation {
        path: path.to_path_buf(),
        issue,
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
