/*!
 * Rubric export loading.
 *
 * - `raw`: record types as they appear in an export file
 * - `validation`: the record-count checks an export must pass
 * - `model`: the normalized criteria x scales matrix
 * - `loader`: reads, validates and normalizes an export
 */

pub mod raw;
pub mod validation;
pub mod model;
pub mod loader;

// Re-export main types
pub use loader::{RubricLoader, load_rubric};
pub use model::{CriterionEntry, HeaderCell, NormalizedRubric, RubricRow};
pub use raw::RawRubricDocument;
pub use validation::Cardinality;
