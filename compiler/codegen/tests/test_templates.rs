//! Tests for template loading, caching, and the helper vocabulary.

use std::fs;

use codegen::{GenerationContext, TemplateError, TemplateManager};
use protocol::ProtocolDefinition;
use serde_json::json;
use tempfile::TempDir;

fn templates_dir(files: &[(&str, &str)]) -> TempDir {
    let dir = tempfile::tempdir().expect("Failed to create temporary directory");
    for (name, source) in files {
        fs::write(dir.path().join(name), source).expect("Failed to write template");
    }
    dir
}

fn context_value() -> serde_json::Value {
    let definition: ProtocolDefinition = serde_json::from_value(json!({
        "domains": [
            {
                "domain": "Page",
                "types": [
                    { "id": "FrameId", "type": "string" },
                    { "id": "TransitionType", "type": "string", "enum": ["link", "typed"] }
                ]
            }
        ]
    }))
    .expect("Failed to deserialize protocol fixture");
    let known_types = definition.known_types();
    let context = GenerationContext::new(definition.domains[0].clone(), known_types);
    serde_json::to_value(&context).expect("Failed to serialize context")
}

#[test]
fn test_templates_compile_once() {
    let dir = templates_dir(&[("unit.hbs", "Hello {{name}}!")]);
    let mut manager = TemplateManager::new(dir.path());

    let data = json!({ "name": "Page" });
    let first = manager.render("unit.hbs", &data).expect("Failed to render");
    assert_eq!(first, "Hello Page!");
    assert_eq!(manager.compile_count(), 1);

    let second = manager.render("unit.hbs", &data).expect("Failed to render");
    assert_eq!(second, first);
    assert_eq!(manager.compile_count(), 1);
}

#[test]
fn test_template_cache_ignores_path_case() {
    let dir = templates_dir(&[("unit.hbs", "{{name}}")]);
    let mut manager = TemplateManager::new(dir.path());

    let data = json!({ "name": "Page" });
    manager.render("unit.hbs", &data).expect("Failed to render");
    // A differently-cased request must hit the cached renderer
    manager.render("UNIT.hbs", &data).expect("Failed to render");
    assert_eq!(manager.compile_count(), 1);
}

#[test]
fn test_missing_template_is_reported_with_its_path() {
    let dir = templates_dir(&[]);
    let mut manager = TemplateManager::new(dir.path());

    let err = manager.render("absent.hbs", &json!({})).expect_err("Expected an error");
    match err {
        TemplateError::NotFound(path) => {
            assert!(path.ends_with("absent.hbs"), "unexpected path {path:?}");
        }
        other => panic!("Expected NotFound error, got {other:?}"),
    }
}

#[test]
fn test_output_is_not_html_escaped() {
    let dir = templates_dir(&[("unit.hbs", "{{snippet}}")]);
    let mut manager = TemplateManager::new(dir.path());

    let rendered = manager
        .render("unit.hbs", &json!({ "snippet": "Vec<String> && \"quoted\"" }))
        .expect("Failed to render");
    assert_eq!(rendered, "Vec<String> && \"quoted\"");
}

#[test]
fn test_dehumanize_helper() {
    let dir = templates_dir(&[("unit.hbs", "pub struct {{dehumanize name}};")]);
    let mut manager = TemplateManager::new(dir.path());

    let rendered = manager
        .render("unit.hbs", &json!({ "name": "time_since_epoch" }))
        .expect("Failed to render");
    assert_eq!(rendered, "pub struct TimeSinceEpoch;");
}

#[test]
fn test_dehumanize_helper_rejects_wrong_arity() {
    let dir = templates_dir(&[("unit.hbs", "{{dehumanize}}")]);
    let mut manager = TemplateManager::new(dir.path());

    let err = manager.render("unit.hbs", &json!({})).expect_err("Expected an error");
    assert!(
        err.to_string().contains("exactly one argument"),
        "unexpected error: {err}"
    );
}

#[test]
fn test_typemap_helper_resolves_references() {
    let dir = templates_dir(&[("unit.hbs", "{{typemap this context}}")]);
    let mut manager = TemplateManager::new(dir.path());

    let mut data = json!({ "name": "frameId", "$ref": "FrameId" });
    data["context"] = context_value();
    let rendered = manager.render("unit.hbs", &data).expect("Failed to render");
    assert_eq!(rendered, "PageFrameId");

    let mut data = json!({ "name": "transition", "$ref": "Page.TransitionType" });
    data["context"] = context_value();
    let rendered = manager.render("unit.hbs", &data).expect("Failed to render");
    assert_eq!(rendered, "PageTransitionType");
}

#[test]
fn test_typemap_helper_rejects_wrong_arity() {
    let dir = templates_dir(&[("unit.hbs", "{{typemap this}}")]);
    let mut manager = TemplateManager::new(dir.path());

    let mut data = json!({ "name": "frameId", "$ref": "FrameId" });
    data["context"] = context_value();
    let err = manager.render("unit.hbs", &data).expect_err("Expected an error");
    assert!(
        err.to_string().contains("exactly two arguments"),
        "unexpected error: {err}"
    );
}

#[test]
fn test_typemap_helper_rejects_malformed_context() {
    let dir = templates_dir(&[("unit.hbs", "{{typemap this context}}")]);
    let mut manager = TemplateManager::new(dir.path());

    let data = json!({ "name": "frameId", "$ref": "FrameId", "context": "not a context" });
    let err = manager.render("unit.hbs", &data).expect_err("Expected an error");
    assert!(
        err.to_string().contains("not a generation context"),
        "unexpected error: {err}"
    );
}

#[test]
fn test_typemap_helper_surfaces_unresolved_references() {
    let dir = templates_dir(&[("unit.hbs", "{{typemap this context}}")]);
    let mut manager = TemplateManager::new(dir.path());

    let mut data = json!({ "name": "bogus", "$ref": "DoesNotExist" });
    data["context"] = context_value();
    let err = manager.render("unit.hbs", &data).expect_err("Expected an error");
    assert!(
        err.to_string().contains("DoesNotExist"),
        "unexpected error: {err}"
    );
}

#[test]
fn test_invalid_template_fails_to_compile() {
    let dir = templates_dir(&[("unit.hbs", "{{#if name}}unterminated")]);
    let mut manager = TemplateManager::new(dir.path());

    let err = manager.render("unit.hbs", &json!({})).expect_err("Expected an error");
    assert!(matches!(err, TemplateError::Compile { .. }), "unexpected error: {err}");
}
