#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! Code generation for Chrome DevTools Protocol clients.
//!
//! This crate turns a validated protocol model into rendered source
//! files. It focuses solely on code generation: resolving protocol type
//! references to Rust type names, compiling and caching Handlebars
//! templates, and walking the model to accumulate an in-memory mapping
//! from relative output path to file content.
//!
//! Writing the mapping to disk is the pipeline's responsibility.

pub mod generator;
pub mod identifiers;
pub mod templates;
pub mod typemap;

use serde::{Deserialize, Serialize};

pub use generator::{CodeGenerator, CodegenError};
pub use templates::{TemplateError, TemplateManager};
pub use typemap::TypeMapError;

use protocol::{Domain, KnownTypes};

/// Ambient data available to every template render: the domain being
/// processed and the full known-type set across all domains, needed to
/// resolve cross-domain references.
///
/// A context is built once per domain and attached to each render data
/// object under the `context` key, so templates can pass it to the
/// `typemap` helper explicitly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationContext {
    /// The domain currently being generated.
    pub domain: Domain,
    /// Every named type across the protocol, keyed `Domain.Type`.
    #[serde(rename = "knownTypes")]
    pub known_types: KnownTypes,
}

impl GenerationContext {
    /// Create a context scoped to `domain`.
    pub fn new(domain: Domain, known_types: KnownTypes) -> Self { Self { domain, known_types } }
}
