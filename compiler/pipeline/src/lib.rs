#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! High-level pipeline that turns a protocol document into published
//! client source files.
//!
//! The pipeline coordinates the other crates end to end: schema
//! validation of the raw document, deserialization into the typed
//! model, model-level validation, code generation, and publishing the
//! rendered output to disk.
//!
//! ## Module Organization
//!
//! - `orchestration` - Main pipeline entry point (`run`)
//! - `publisher` - Writes generated output to disk, skipping unchanged files

use analysis::{SchemaError, ValidationIssue};
use thiserror::Error;

/// Convenient result type for pipeline operations.
pub type Result<T> = std::result::Result<T, PipelineError>;

/// Errors that can occur while running the generation pipeline.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The protocol document does not conform to the protocol schema.
    #[error("protocol document does not conform to the schema ({} issue(s) found)", .0.len())]
    InvalidProtocol(Vec<ValidationIssue>),
    /// The protocol model is internally inconsistent.
    #[error("protocol model is invalid ({} error(s) found)", .0.len())]
    InvalidModel(Vec<String>),
    /// Error loading or compiling the protocol schema.
    #[error(transparent)]
    Schema(#[from] SchemaError),
    /// Error propagated from the codegen crate.
    #[error(transparent)]
    Codegen(#[from] codegen::CodegenError),
    /// JSON deserialization error for the protocol document.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    /// I/O error while preparing or writing output files.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub mod orchestration;
pub mod publisher;

pub use orchestration::run;
pub use publisher::{publish, PublishReport};
