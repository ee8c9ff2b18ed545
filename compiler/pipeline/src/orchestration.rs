//! Pipeline orchestration for the main entry point.
//!
//! Runs the stages in order: schema validation of the raw document,
//! deserialization into the typed model, model validation, code
//! generation, and publishing. Each stage must succeed before the next
//! runs, so templates never see a document the validators rejected.

use std::fs;
use std::path::Path;

use analysis::{ModelValidator, SchemaValidator};
use codegen::CodeGenerator;
use config::Settings;
use protocol::ProtocolDefinition;
use serde_json::Value;

use crate::publisher::{publish, PublishReport};
use crate::PipelineError;

/// Generate client sources for `protocol` under `output_root`.
///
/// With `force` set, an existing output directory is removed before
/// publishing; otherwise publishing merges into it, rewriting only the
/// files whose content changed.
pub fn run(
    settings: &Settings,
    protocol: &Value,
    output_root: &Path,
    force: bool,
) -> Result<PublishReport, PipelineError> {
    logging::trace("pipeline", "validating protocol document against the schema");
    let schema_validator = SchemaValidator::new()?;
    let issues = schema_validator.validate(protocol);
    if !issues.is_empty() {
        return Err(PipelineError::InvalidProtocol(issues));
    }

    let definition: ProtocolDefinition = serde_json::from_value(protocol.clone())?;

    logging::trace("pipeline", "validating the protocol model");
    let errors = ModelValidator::new().validate(&definition);
    if !errors.is_empty() {
        return Err(PipelineError::InvalidModel(errors));
    }

    logging::trace(
        "pipeline",
        &format!("generating code for {} domain(s)", definition.domains.len()),
    );
    let mut generator = CodeGenerator::new(settings);
    let outputs = generator.generate(&definition)?;

    if force && output_root.exists() {
        logging::trace("pipeline", "removing existing output directory");
        fs::remove_dir_all(output_root)?;
    }

    logging::trace("pipeline", &format!("publishing {} file(s)", outputs.len()));
    let report = publish(output_root, &outputs)?;
    logging::trace(
        "pipeline",
        &format!("published: {} written, {} unchanged", report.written, report.skipped),
    );
    Ok(report)
}
