/*!
 * Tests for the Jinja renderer against rubric contexts
 */

use anyhow::Result;
use rubricator::exporter::render_context;
use rubricator::template::{BUILTIN_TEMPLATE, JinjaRenderer, TemplateRenderer};
use rubricator::load_rubric;
use crate::common;

/// The shipped template renders every header and cell
#[test]
fn test_defaultTemplate_withEssayRubric_shouldRenderMatrix() -> Result<()> {
    let rubric = load_rubric(common::test_resource_path("essay.rbc"))?;
    let source = std::fs::read_to_string(common::default_template_path())?;

    let html = JinjaRenderer::new().render(&source, &render_context(&rubric))?;

    assert!(html.contains("<title>Essay Rubric</title>"));
    assert!(html.contains("<th>Poor <br/> 0</th>"));
    assert!(html.contains("<th>Good <br/> 10</th>"));
    assert!(html.contains("Weight: 5"));
    assert!(html.contains("<td>Many errors</td>"));
    assert!(html.contains("<td>Few errors</td>"));
    assert!(!html.contains("{{"));
    assert!(!html.contains("{%"));
    Ok(())
}

#[test]
fn test_builtinTemplate_shouldMatchShippedFile() -> Result<()> {
    let source = std::fs::read_to_string(common::default_template_path())?;
    assert_eq!(BUILTIN_TEMPLATE, source);
    Ok(())
}

/// Cell text is escaped, template markup is not
#[test]
fn test_defaultTemplate_withMarkupInCells_shouldEscapeIt() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::write_rubric(temp_dir.path(), "research.rbc", &common::research_rubric_json())?;
    let rubric = load_rubric(&path)?;

    let html = JinjaRenderer::new().render(BUILTIN_TEMPLATE, &render_context(&rubric))?;

    assert!(html.contains("Choppy &lt;prose&gt;"));
    assert!(html.contains("Tone &amp; flow"));
    // Evidence has no description, so no description span for it
    assert_eq!(html.matches("class=\"description\"").count(), 2);
    Ok(())
}

/// Templates can read the raw scale and criterion records too
#[test]
fn test_template_withRawLists_shouldExposeScalesAndCriteria() -> Result<()> {
    let rubric = load_rubric(common::test_resource_path("essay.rbc"))?;
    let source = "{{ rubric.name }}|{% for s in rubric.scales %}{{ s.name }}={{ s.value }};{% endfor %}|{{ rubric.criteria[0].criterion_scales|length }}";

    let out = JinjaRenderer::new().render(source, &render_context(&rubric))?;

    assert_eq!(out, "Essay Rubric|Poor=0;Good=10;|2");
    Ok(())
}

#[test]
fn test_template_withHeaderLabels_shouldJoinNameAndValue() -> Result<()> {
    let rubric = load_rubric(common::test_resource_path("essay.rbc"))?;
    let source = "{% for h in rubric.header %}[{{ h.label }}]{% endfor %}";

    let out = JinjaRenderer::plain().render(source, &render_context(&rubric))?;

    assert_eq!(out, "[Poor / 0][Good / 10]");
    Ok(())
}

/// Ordinary Jinja expressions, tags and filters work on the rubric context
#[test]
fn test_template_withCommonJinjaConstructs_shouldRender() -> Result<()> {
    let rubric = load_rubric(common::test_resource_path("essay.rbc"))?;
    let context = render_context(&rubric);
    let renderer = JinjaRenderer::plain();

    let cases = [
        ("{% if rubric.scales|length > 1 %}many{% else %}one{% endif %}", "many"),
        ("{{ rubric.header|map(attribute='name')|join(' | ') }}", "Poor | Good"),
        ("{% set t = rubric.title %}{{ t }}", "Essay Rubric"),
        ("{{ rubric.missing|default('Untitled') }}", "Untitled"),
        ("{{ rubric.title ~ ' report' }}", "Essay Rubric report"),
    ];
    for (source, expected) in cases {
        assert_eq!(renderer.render(source, &context)?, expected, "source: {}", source);
    }
    Ok(())
}
