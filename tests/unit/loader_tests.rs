/*!
 * Tests for rubric export loading and validation
 */

use anyhow::Result;
use serde_json::{json, Value};
use rubricator::errors::{ErrorKind, FileRole, RubricError, ValidationIssue};
use rubricator::rubric::{load_rubric, RubricLoader};
use rubricator::ProgressReporter;
use crate::common;

fn load_value(rubric: &Value) -> Result<Result<rubricator::NormalizedRubric, RubricError>> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::write_rubric(temp_dir.path(), "rubric.rbc", rubric)?;
    Ok(load_rubric(&path))
}

/// The essay example from the format description normalizes as documented
#[test]
fn test_load_withEssayRubric_shouldBuildDocumentedMatrix() -> Result<()> {
    let rubric = load_rubric(common::test_resource_path("essay.rbc"))?;

    assert_eq!(rubric.title, "Essay Rubric");
    assert_eq!(rubric.header.len(), 2);
    assert_eq!(rubric.header[0].name, "Poor");
    assert_eq!(rubric.header[1].value.to_string(), "10");
    assert_eq!(
        rubric.matrix,
        vec![vec!["Many errors".to_string(), "Few errors".to_string()]]
    );

    assert_eq!(rubric.rows.len(), 1);
    let entry = rubric.rows[0].entry();
    assert_eq!(entry.criterion, "Grammar");
    assert_eq!(entry.weight.to_string(), "5");
    assert_eq!(entry.description, "Grammar quality");
    assert_eq!(rubric.rows[0].cells(), ["Many errors", "Few errors"]);

    Ok(())
}

/// Rows pair the criteria index with matrix rows in criterion order
#[test]
fn test_load_withSeveralCriteria_shouldPreserveCriterionOrder() -> Result<()> {
    let rubric = load_value(&common::research_rubric_json())??;

    let names: Vec<&str> = rubric.criteria_index.iter().map(|c| c.criterion.as_str()).collect();
    assert_eq!(names, ["Thesis", "Evidence", "Style"]);
    for (i, row) in rubric.rows.iter().enumerate() {
        assert_eq!(row.entry(), &rubric.criteria_index[i]);
        assert_eq!(row.cells(), rubric.matrix[i].as_slice());
    }

    // Style lists its cells in reverse id order
    assert_eq!(rubric.cell(2, 0), Some("Polished prose"));
    assert_eq!(rubric.cell(2, 1), Some("Choppy <prose>"));
    // null description becomes empty
    assert_eq!(rubric.criteria_index[1].description, "");
    Ok(())
}

#[test]
fn test_load_withMissingFile_shouldReturnNotFound() {
    let error = load_rubric("definitely/not/here.rbc").unwrap_err();
    match error {
        RubricError::NotFound { role, path } => {
            assert_eq!(role, FileRole::Rubric);
            assert!(path.ends_with("here.rbc"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_load_withTruncatedFile_shouldReturnParseError() {
    let error = load_rubric(common::test_resource_path("truncated.rbc")).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Parse);
    assert!(error.to_string().contains("truncated.rbc"));
}

#[test]
fn test_load_withoutRubricScale_shouldReturnSchemaError() {
    let error = load_rubric(common::test_resource_path("missing_scale.rbc")).unwrap_err();
    match error {
        RubricError::Schema { field, .. } => assert_eq!(field, "RubricScale"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_load_withEachKeyMissing_shouldNameTheKey() -> Result<()> {
    for key in ["Rubric", "RubricScale", "RubricCriterion", "RubricCriterionScale"] {
        let mut rubric = common::essay_rubric_json();
        rubric.as_object_mut().unwrap().remove(key);

        match load_value(&rubric)? {
            Err(RubricError::Schema { field, .. }) => assert_eq!(field, key),
            other => panic!("expected schema error for {key}, got {other:?}"),
        }
    }
    Ok(())
}

/// 2 scales x 3 criteria needs 6 cells; 5 is rejected
#[test]
fn test_load_withFiveCellsForSixSlots_shouldReturnValidationError() -> Result<()> {
    let mut rubric = common::research_rubric_json();
    rubric["RubricCriterionScale"].as_array_mut().unwrap().pop();

    match load_value(&rubric)? {
        Err(RubricError::Validation { issue, .. }) => assert_eq!(
            issue,
            ValidationIssue::CellCount { scales: 2, criteria: 3, actual: 5 }
        ),
        other => panic!("unexpected result: {other:?}"),
    }
    Ok(())
}

#[test]
fn test_load_withTwoRubricRecords_shouldReturnValidationError() -> Result<()> {
    let mut rubric = common::essay_rubric_json();
    rubric["Rubric"] = json!([{"name": "One"}, {"name": "Two"}]);

    let error = load_value(&rubric)?.unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Validation);
    Ok(())
}

#[test]
fn test_load_withNoScalesOrCells_shouldReturnValidationError() -> Result<()> {
    let mut rubric = common::essay_rubric_json();
    rubric["RubricScale"] = json!([]);
    rubric["RubricCriterionScale"] = json!([]);
    rubric["RubricCriterion"][0]["criterion_scales"] = json!([]);

    match load_value(&rubric)? {
        Err(RubricError::Validation { issue, .. }) => assert_eq!(issue, ValidationIssue::NoScales),
        other => panic!("unexpected result: {other:?}"),
    }
    Ok(())
}

#[test]
fn test_load_withUnknownCellReference_shouldReturnLookupError() -> Result<()> {
    let mut rubric = common::essay_rubric_json();
    rubric["RubricCriterion"][0]["criterion_scales"] = json!(["a", "missing"]);

    match load_value(&rubric)? {
        Err(RubricError::Lookup { criterion, id, .. }) => {
            assert_eq!(criterion, "Grammar");
            assert_eq!(id, "missing");
        }
        other => panic!("unexpected result: {other:?}"),
    }
    Ok(())
}

#[test]
fn test_load_withStringWeights_shouldKeepThemAsText() -> Result<()> {
    let mut rubric = common::essay_rubric_json();
    rubric["RubricCriterion"][0]["value"] = json!("25%");

    let rubric = load_value(&rubric)??;
    assert_eq!(rubric.criteria_index[0].weight.to_string(), "25%");
    Ok(())
}

/// Verbose mode reports each completed stage
#[test]
fn test_load_withVerboseReporter_shouldReportStages() -> Result<()> {
    use std::cell::RefCell;
    use std::io::Write;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct Capture(Rc<RefCell<Vec<u8>>>);

    impl Write for Capture {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.borrow_mut().extend_from_slice(buf);
            Ok(buf.len())
        }
        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    common::init_logging();
    let capture = Capture::default();
    let progress = ProgressReporter::with_sink(true, Box::new(capture.clone()));
    RubricLoader::new(&progress).load(&common::test_resource_path("essay.rbc"))?;

    let output = String::from_utf8(capture.0.borrow().clone())?;
    assert!(output.contains(":: Loading specified rubric"));
    assert!(output.contains(":: All expected keys are present"));
    assert!(output.contains(":: All rubric items are of the correct length."));
    assert!(output.contains(":: Rubric matrix built."));
    Ok(())
}
