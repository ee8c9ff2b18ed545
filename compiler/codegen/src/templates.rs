//! Template management.
//!
//! The [`TemplateManager`] owns a Handlebars registry with the helper
//! vocabulary registered once at construction, and a compile-once cache
//! of template renderers keyed case-insensitively by the requested
//! path. Template paths resolve against a configured templates root
//! unless absolute.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use handlebars::{Context, Handlebars, Helper, HelperResult, Output, RenderContext, RenderErrorReason};
use protocol::TypeDefinition;
use serde_json::Value;
use thiserror::Error;

use crate::identifiers::dehumanize;
use crate::{typemap, GenerationContext};

/// Errors that can occur while loading, compiling, or rendering templates.
#[derive(Debug, Error)]
pub enum TemplateError {
    /// No template file exists at the resolved path.
    #[error("unable to locate a template at {0} - please ensure that a template file exists at this location")]
    NotFound(PathBuf),
    /// I/O error reading the template source.
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// The template source failed to compile.
    #[error("failed to compile template `{path}`: {source}")]
    Compile {
        /// The template path as requested.
        path: String,
        /// The underlying compile error.
        #[source]
        source: Box<handlebars::TemplateError>,
    },
    /// Rendering failed, e.g. a helper was invoked incorrectly.
    #[error("failed to render template `{path}`: {source}")]
    Render {
        /// The template path as requested.
        path: String,
        /// The underlying render error.
        #[source]
        source: Box<handlebars::RenderError>,
    },
}

/// Manages templates and their compiled renderers.
pub struct TemplateManager {
    templates_root: PathBuf,
    registry: Handlebars<'static>,
    /// Requested path (lowercased) → registered template name.
    compiled: HashMap<String, String>,
    compile_count: usize,
}

impl TemplateManager {
    /// Create a manager resolving relative template paths under
    /// `templates_root`, with the helper vocabulary registered.
    pub fn new<P: Into<PathBuf>>(templates_root: P) -> Self {
        let mut registry = Handlebars::new();
        // Rendered output is source code, not markup
        registry.register_escape_fn(handlebars::no_escape);
        registry.register_helper("dehumanize", Box::new(dehumanize_helper));
        registry.register_helper("typemap", Box::new(typemap_helper));

        Self {
            templates_root: templates_root.into(),
            registry,
            compiled: HashMap::new(),
            compile_count: 0,
        }
    }

    /// Render the template at `template_path` against `data`.
    ///
    /// The first request for a path loads and compiles the template;
    /// subsequent requests (compared case-insensitively) reuse the
    /// cached renderer.
    pub fn render(&mut self, template_path: &str, data: &Value) -> Result<String, TemplateError> {
        let name = self.ensure_compiled(template_path)?;
        self.registry.render(&name, data).map_err(|e| TemplateError::Render {
            path: template_path.to_string(),
            source: Box::new(e),
        })
    }

    /// Number of template compilations performed so far.
    pub fn compile_count(&self) -> usize { self.compile_count }

    fn ensure_compiled(&mut self, template_path: &str) -> Result<String, TemplateError> {
        let key = template_path.to_ascii_lowercase();
        if let Some(name) = self.compiled.get(&key) {
            return Ok(name.clone());
        }

        let requested = Path::new(template_path);
        let resolved = if requested.is_absolute() {
            requested.to_path_buf()
        } else {
            self.templates_root.join(requested)
        };
        if !resolved.is_file() {
            return Err(TemplateError::NotFound(resolved));
        }

        let source = fs::read_to_string(&resolved)?;
        self.registry.register_template_string(&key, source).map_err(|e| {
            TemplateError::Compile { path: template_path.to_string(), source: Box::new(e) }
        })?;
        self.compile_count += 1;
        self.compiled.insert(key.clone(), key.clone());
        Ok(key)
    }
}

/// `{{dehumanize token}}`: normalize a protocol token into a
/// PascalCase identifier fragment (see [`dehumanize`]).
fn dehumanize_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _: &mut RenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    if h.params().len() != 1 {
        return Err(RenderErrorReason::Other(
            "{{dehumanize}} helper must have exactly one argument".to_string(),
        )
        .into());
    }
    let raw = h
        .param(0)
        .and_then(|p| p.value().as_str())
        .ok_or_else(|| {
            RenderErrorReason::Other(
                "{{dehumanize}} helper argument must be a string".to_string(),
            )
        })?;

    out.write(&dehumanize(raw))?;
    Ok(())
}

/// `{{typemap <type> <context>}}`: resolve a type definition to its
/// Rust type name and write it unescaped.
///
/// The type definition is an explicit argument rather than being
/// inferred from the ambient render context, so properties inside an
/// `{{#each}}` block pass `this` and the surrounding `../context`.
fn typemap_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _: &mut RenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    if h.params().len() != 2 {
        return Err(RenderErrorReason::Other(
            "{{typemap}} helper expects exactly two arguments - a type definition and the generation context"
                .to_string(),
        )
        .into());
    }

    let ty: TypeDefinition =
        serde_json::from_value(h.param(0).map(|p| p.value().clone()).unwrap_or(Value::Null))
            .map_err(|e| {
                RenderErrorReason::Other(format!(
                    "{{{{typemap}}}} first argument is not a type definition: {e}"
                ))
            })?;
    let context: GenerationContext =
        serde_json::from_value(h.param(1).map(|p| p.value().clone()).unwrap_or(Value::Null))
            .map_err(|e| {
                RenderErrorReason::Other(format!(
                    "{{{{typemap}}}} second argument is not a generation context: {e}"
                ))
            })?;

    let mapped = typemap::resolve(&ty, &context.domain.name, &context.known_types)
        .map_err(|e| RenderErrorReason::Other(e.to_string()))?;
    out.write(&mapped)?;
    Ok(())
}
