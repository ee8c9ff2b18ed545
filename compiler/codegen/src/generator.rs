//! Walks the protocol model and accumulates rendered output.
//!
//! For each domain, a [`GenerationContext`] is built once; each
//! configured template then renders the applicable units (the domain
//! itself, or each of its types, commands, or events) and records the
//! result under the output path derived from the template's naming
//! rule. The generator performs no disk I/O.

use std::collections::BTreeMap;

use config::{Settings, TemplateSettings, UnitKind};
use protocol::ProtocolDefinition;
use serde_json::Value;
use thiserror::Error;

use crate::identifiers::dehumanize;
use crate::templates::{TemplateError, TemplateManager};
use crate::{GenerationContext, TypeMapError};

/// Errors that can occur during code generation.
#[derive(Debug, Error)]
pub enum CodegenError {
    /// Error loading, compiling, or rendering a template.
    #[error(transparent)]
    Template(#[from] TemplateError),
    /// Error resolving a type reference.
    #[error(transparent)]
    TypeMap(#[from] TypeMapError),
    /// Error serializing model objects into render data.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    /// Two templates produced the same output path. The configuration
    /// must keep output paths unique; nothing is overwritten silently.
    #[error("templates `{first}` and `{second}` both produce output path `{path}`")]
    DuplicateOutputPath {
        /// The colliding relative output path.
        path: String,
        /// Template that produced the path first.
        first: String,
        /// Template that produced it again.
        second: String,
    },
}

/// Mapping from relative output path to rendered file content.
pub type OutputMapping = BTreeMap<String, String>;

/// Renders configured templates against a protocol definition.
pub struct CodeGenerator {
    templates: TemplateManager,
    plan: Vec<TemplateSettings>,
}

impl CodeGenerator {
    /// Create a generator from settings: the templates root and the
    /// per-unit-kind template plan.
    pub fn new(settings: &Settings) -> Self {
        Self {
            templates: TemplateManager::new(settings.templates_root.clone()),
            plan: settings.templates.clone(),
        }
    }

    /// Generate output for every domain in `definition`.
    ///
    /// Returns the in-memory mapping from relative output path to file
    /// content; writing it to disk is the publisher's job.
    pub fn generate(
        &mut self,
        definition: &ProtocolDefinition,
    ) -> Result<OutputMapping, CodegenError> {
        let known_types = definition.known_types();
        let mut outputs = OutputMapping::new();
        // Tracks which template produced each path, for collision reports
        let mut origins: BTreeMap<String, String> = BTreeMap::new();

        for domain in &definition.domains {
            let context =
                GenerationContext::new(domain.clone(), known_types.clone());
            let context_value = serde_json::to_value(&context)?;

            let plan = self.plan.clone();
            for entry in &plan {
                match entry.kind {
                    UnitKind::Domain => {
                        let data = serde_json::to_value(domain)?;
                        self.render_unit(
                            entry,
                            data,
                            &domain.name,
                            &domain.name,
                            &context_value,
                            &mut outputs,
                            &mut origins,
                        )?;
                    }
                    UnitKind::Type => {
                        for ty in &domain.types {
                            let data = serde_json::to_value(ty)?;
                            self.render_unit(
                                entry,
                                data,
                                &domain.name,
                                &ty.name,
                                &context_value,
                                &mut outputs,
                                &mut origins,
                            )?;
                        }
                    }
                    UnitKind::Command => {
                        for command in &domain.commands {
                            let data = serde_json::to_value(command)?;
                            self.render_unit(
                                entry,
                                data,
                                &domain.name,
                                &command.name,
                                &context_value,
                                &mut outputs,
                                &mut origins,
                            )?;
                        }
                    }
                    UnitKind::Event => {
                        for event in &domain.events {
                            let data = serde_json::to_value(event)?;
                            self.render_unit(
                                entry,
                                data,
                                &domain.name,
                                &event.name,
                                &context_value,
                                &mut outputs,
                                &mut origins,
                            )?;
                        }
                    }
                }
            }
        }

        Ok(outputs)
    }

    /// Access to the underlying template manager (compile counters).
    pub fn templates(&self) -> &TemplateManager { &self.templates }

    #[allow(clippy::too_many_arguments)]
    fn render_unit(
        &mut self,
        entry: &TemplateSettings,
        mut data: Value,
        domain_name: &str,
        unit_name: &str,
        context_value: &Value,
        outputs: &mut OutputMapping,
        origins: &mut BTreeMap<String, String>,
    ) -> Result<(), CodegenError> {
        data["context"] = context_value.clone();
        let rendered = self.templates.render(&entry.template, &data)?;

        let path = output_path(&entry.output, domain_name, unit_name);
        if let Some(previous) = origins.insert(path.clone(), entry.template.clone()) {
            return Err(CodegenError::DuplicateOutputPath {
                path,
                first: previous,
                second: entry.template.clone(),
            });
        }
        outputs.insert(path, rendered);
        Ok(())
    }
}

/// Apply a template's output naming rule for the given unit.
fn output_path(rule: &str, domain_name: &str, unit_name: &str) -> String {
    rule.replace("{domain}", &dehumanize(domain_name)).replace("{name}", &dehumanize(unit_name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_path_substitution() {
        assert_eq!(
            output_path("{domain}/types/{name}.rs", "Network", "timeSinceEpoch"),
            "Network/types/TimeSinceEpoch.rs"
        );
        assert_eq!(output_path("{domain}/mod.rs", "DOM", "DOM"), "DOM/mod.rs");
    }
}
