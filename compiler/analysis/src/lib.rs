#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! Protocol validation.
//!
//! Two layers guard the generation pipeline:
//!
//! - [`SchemaValidator`] checks the raw protocol document against the
//!   expected shape before any deserialization takes place.
//! - [`ModelValidator`] checks invariants on the deserialized model
//!   (unique names, well-formed enums, resolvable references).
//!
//! Both report every problem they find; the caller decides whether to
//! abort, and must not proceed to generation on a non-empty report.

pub mod model;
pub mod schema;

pub use model::ModelValidator;
pub use schema::{SchemaError, SchemaValidator, ValidationIssue};
