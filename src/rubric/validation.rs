/*!
 * Cardinality checks for rubric exports.
 *
 * A rubric describes a complete grid: exactly one rubric record, at least one
 * scale, at least one criterion, and one cell record for every
 * criterion/scale pair. Each condition is its own method; `check` is their
 * conjunction and reports the first one that fails.
 */

use crate::errors::ValidationIssue;
use crate::rubric::raw::RawRubricDocument;

/// Record counts of the four lists of an export
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cardinality {
    pub rubric: usize,
    pub scales: usize,
    pub criteria: usize,
    pub cells: usize,
}

impl Cardinality {
    pub fn new(rubric: usize, scales: usize, criteria: usize, cells: usize) -> Self {
        Self {
            rubric,
            scales,
            criteria,
            cells,
        }
    }

    pub fn of(document: &RawRubricDocument) -> Self {
        Self::new(
            document.rubric.len(),
            document.scales.len(),
            document.criteria.len(),
            document.cells.len(),
        )
    }

    pub fn has_single_rubric(&self) -> bool {
        self.rubric == 1
    }

    pub fn has_scales(&self) -> bool {
        self.scales > 0
    }

    pub fn has_criteria(&self) -> bool {
        self.criteria > 0
    }

    pub fn cells_fill_matrix(&self) -> bool {
        self.scales.checked_mul(self.criteria) == Some(self.cells)
    }

    /// True when all four conditions hold
    pub fn is_valid(&self) -> bool {
        self.has_single_rubric() && self.has_scales() && self.has_criteria() && self.cells_fill_matrix()
    }

    pub fn check(&self) -> Result<(), ValidationIssue> {
        if self.is_valid() {
            return Ok(());
        }

        if !self.has_single_rubric() {
            Err(ValidationIssue::RubricCount { actual: self.rubric })
        } else if !self.has_scales() {
            Err(ValidationIssue::NoScales)
        } else if !self.has_criteria() {
            Err(ValidationIssue::NoCriteria)
        } else {
            Err(ValidationIssue::CellCount {
                scales: self.scales,
                criteria: self.criteria,
                actual: self.cells,
            })
        }
    }
}
