//! Structural validation of the raw protocol document.
//!
//! The expected shape of a protocol definition is embedded as a JSON
//! Schema resource and compiled once per validator. Input that fails
//! here must never reach the model deserializer: partially-shaped input
//! would produce misleading generated code.

use std::fmt;

use serde_json::Value;
use thiserror::Error;

// Embedded at compile time; a missing resource hard-fails the build.
const PROTOCOL_SCHEMA_JSON: &str = include_str!("../resources/protocol.schema.json");

/// Errors constructing the schema validator itself.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// The embedded schema resource is not valid JSON.
    #[error("embedded protocol schema is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// The embedded schema resource is not a valid JSON Schema.
    #[error("embedded protocol schema failed to compile: {0}")]
    Compile(String),
}

/// A single structural problem in the input document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    /// JSON pointer to the offending value.
    pub path: String,
    /// Why the value does not conform.
    pub reason: String,
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.reason)
    }
}

/// Validates raw protocol documents against the expected shape.
pub struct SchemaValidator {
    validator: jsonschema::Validator,
}

impl SchemaValidator {
    /// Compile the embedded protocol schema.
    pub fn new() -> Result<Self, SchemaError> {
        let schema: Value = serde_json::from_str(PROTOCOL_SCHEMA_JSON)?;
        let validator =
            jsonschema::validator_for(&schema).map_err(|e| SchemaError::Compile(e.to_string()))?;
        Ok(Self { validator })
    }

    /// Validate a raw document, returning every structural problem found.
    ///
    /// An empty result means the document conforms and may be
    /// deserialized into the protocol model.
    pub fn validate(&self, document: &Value) -> Vec<ValidationIssue> {
        self.validator
            .iter_errors(document)
            .map(|e| ValidationIssue {
                path: e.instance_path.to_string(),
                reason: e.to_string(),
            })
            .collect()
    }
}
