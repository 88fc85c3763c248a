use serde::Serialize;

use crate::rubric::raw::{Points, RubricCriterion, RubricScale};

// @module: Normalized rubric handed to the exporter

/// Column descriptor built from one scale record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeaderCell {
    pub name: String,
    pub value: Points,
    // @field: "name / value", ready for a column heading
    pub label: String,
}

impl From<&RubricScale> for HeaderCell {
    fn from(scale: &RubricScale) -> Self {
        Self {
            name: scale.name.clone(),
            value: scale.value.clone(),
            label: format!("{} / {}", scale.name, scale.value),
        }
    }
}

/// Row descriptor built from one criterion record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CriterionEntry {
    pub criterion: String,
    pub weight: Points,
    pub description: String,
}

impl From<&RubricCriterion> for CriterionEntry {
    fn from(criterion: &RubricCriterion) -> Self {
        Self {
            criterion: criterion.name.clone(),
            weight: criterion.value.clone(),
            description: criterion.description.clone(),
        }
    }
}

/// A criterion paired with its cell descriptions
///
/// Serializes as a two-element list so templates can unpack it as
/// `{% for entry, cells in rubric.rows %}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RubricRow(pub CriterionEntry, pub Vec<String>);

impl RubricRow {
    pub fn entry(&self) -> &CriterionEntry {
        &self.0
    }

    pub fn cells(&self) -> &[String] {
        &self.1
    }
}

/// The criteria x scales grid, with the records it was derived from
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedRubric {
    pub title: String,
    pub header: Vec<HeaderCell>,
    pub criteria_index: Vec<CriterionEntry>,
    pub matrix: Vec<Vec<String>>,
    pub rows: Vec<RubricRow>,
    // @field: Original scale records, for templates that want them directly
    pub scales: Vec<RubricScale>,
    // @field: Original criterion records
    pub criteria: Vec<RubricCriterion>,
}

impl NormalizedRubric {
    /// Number of criteria (matrix rows)
    pub fn criterion_count(&self) -> usize {
        self.criteria_index.len()
    }

    /// Number of scales (matrix columns)
    pub fn scale_count(&self) -> usize {
        self.header.len()
    }

    /// Cell text at `row`, `column`
    pub fn cell(&self, row: usize, column: usize) -> Option<&str> {
        self.matrix.get(row)?.get(column).map(String::as_str)
    }
}
