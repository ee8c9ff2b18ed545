use analysis::SchemaValidator;

#[test]
fn conforming_document_has_no_issues() {
    let document = serde_json::json!({
        "version": { "major": "1", "minor": "3" },
        "domains": [
            {
                "domain": "Page",
                "types": [
                    { "id": "FrameId", "type": "string" }
                ],
                "commands": [
                    {
                        "name": "navigate",
                        "parameters": [{ "name": "url", "type": "string" }],
                        "returns": [{ "name": "frameId", "$ref": "FrameId" }]
                    }
                ],
                "events": [
                    { "name": "frameNavigated", "parameters": [] }
                ]
            }
        ]
    });

    let validator = SchemaValidator::new().expect("embedded schema should compile");
    let issues = validator.validate(&document);
    assert!(issues.is_empty(), "expected no issues, got: {:?}", issues);
}

#[test]
fn domain_without_name_is_reported() {
    let document = serde_json::json!({
        "domains": [
            { "description": "a domain with no name" }
        ]
    });

    let validator = SchemaValidator::new().expect("embedded schema should compile");
    let issues = validator.validate(&document);
    assert!(!issues.is_empty());
    assert!(
        issues.iter().any(|i| i.path.starts_with("/domains/0")),
        "issue paths should point into the offending domain, got: {:?}",
        issues
    );
}

#[test]
fn missing_domains_field_is_reported() {
    let validator = SchemaValidator::new().expect("embedded schema should compile");
    let issues = validator.validate(&serde_json::json!({}));
    assert_eq!(issues.len(), 1);
}

#[test]
fn unknown_type_kind_is_reported() {
    let document = serde_json::json!({
        "domains": [
            {
                "domain": "Page",
                "types": [{ "id": "Broken", "type": "quaternion" }]
            }
        ]
    });

    let validator = SchemaValidator::new().expect("embedded schema should compile");
    let issues = validator.validate(&document);
    assert!(!issues.is_empty());
}
