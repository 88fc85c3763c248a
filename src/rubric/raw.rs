/*!
 * Record types of a rubric export file.
 *
 * An export is a JSON object with four lists of flat records. Only the fields
 * the report needs are modelled; anything else in a record is ignored.
 */

use std::fmt;

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

/// Key holding the single rubric record
pub const RUBRIC_KEY: &str = "Rubric";
/// Key holding the scale (column) records
pub const SCALE_KEY: &str = "RubricScale";
/// Key holding the criterion (row) records
pub const CRITERION_KEY: &str = "RubricCriterion";
/// Key holding the criterion-scale cell records
pub const CELL_KEY: &str = "RubricCriterionScale";

/// Top-level keys every export must carry, in document order
pub const REQUIRED_KEYS: [&str; 4] = [RUBRIC_KEY, SCALE_KEY, CRITERION_KEY, CELL_KEY];

/// Score or weight attached to a scale or criterion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Points {
    Number(Number),
    Text(String),
}

impl fmt::Display for Points {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Points::Number(n) => write!(f, "{}", n),
            Points::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for Points {
    fn from(value: i64) -> Self {
        Points::Number(Number::from(value))
    }
}

/// Identifier of a criterion-scale cell
///
/// Exports use either strings or integers; both are keyed by their text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct CellId(String);

impl CellId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for CellId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::String(s) => Ok(CellId(s)),
            Value::Number(n) if n.is_i64() || n.is_u64() => Ok(CellId(n.to_string())),
            other => Err(de::Error::custom(format!(
                "expected a string or integer id, found {}",
                other
            ))),
        }
    }
}

fn nullable_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// The rubric itself
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RubricRecord {
    pub name: String,
}

/// One performance level (matrix column)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RubricScale {
    pub name: String,
    pub value: Points,
}

/// One graded dimension (matrix row)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RubricCriterion {
    pub name: String,
    // @field: Weight of the criterion
    pub value: Points,
    #[serde(default, deserialize_with = "nullable_string")]
    pub description: String,
    // @field: Cell ids in column order
    pub criterion_scales: Vec<CellId>,
}

/// Text of one matrix cell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RubricCriterionScale {
    pub id: CellId,
    #[serde(deserialize_with = "nullable_string")]
    pub description: String,
}

/// A decoded export, before normalization
#[derive(Debug, Clone, PartialEq)]
pub struct RawRubricDocument {
    pub rubric: Vec<RubricRecord>,
    pub scales: Vec<RubricScale>,
    pub criteria: Vec<RubricCriterion>,
    pub cells: Vec<RubricCriterionScale>,
}
