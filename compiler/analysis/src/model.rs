//! Invariant checks on the deserialized protocol model.
//!
//! Runs after schema validation, before code generation. Catches the
//! problems a structurally valid document can still have: duplicate
//! names, degenerate enums, and references that do not resolve.

use std::collections::HashSet;

use protocol::{Domain, KnownTypes, ProtocolDefinition, TypeDefinition};

/// Model validator.
pub struct ModelValidator;

impl Default for ModelValidator {
    fn default() -> Self { Self::new() }
}

impl ModelValidator {
    /// Create a new model validator.
    pub fn new() -> Self { Self }

    /// Validate a protocol definition and return every violation found.
    pub fn validate(&self, definition: &ProtocolDefinition) -> Vec<String> {
        let mut errors = Vec::new();
        let known = definition.known_types();

        // Domain names unique across the definition
        {
            let mut seen = HashSet::new();
            for domain in &definition.domains {
                if !seen.insert(domain.name.clone()) {
                    errors.push(format!("Duplicate domain name: {}", domain.name));
                }
            }
        }

        for domain in &definition.domains {
            self.validate_domain(domain, &known, &mut errors);
        }

        errors
    }

    fn validate_domain(&self, domain: &Domain, known: &KnownTypes, errors: &mut Vec<String>) {
        // Type names unique within their owning domain
        {
            let mut seen = HashSet::new();
            for ty in &domain.types {
                if !seen.insert(ty.name.clone()) {
                    errors.push(format!(
                        "Domain `{}` defines type `{}` more than once",
                        domain.name, ty.name
                    ));
                }
            }
        }

        for ty in &domain.types {
            self.validate_type(&domain.name, &ty.name, ty, known, errors);
        }

        for command in &domain.commands {
            for param in command.parameters.iter().chain(command.returns.iter()) {
                let field = format!("{}.{}", command.name, param.name);
                self.validate_type(&domain.name, &field, param, known, errors);
            }
        }

        for event in &domain.events {
            for param in &event.parameters {
                let field = format!("{}.{}", event.name, param.name);
                self.validate_type(&domain.name, &field, param, known, errors);
            }
        }
    }

    fn validate_type(
        &self,
        domain: &str,
        field: &str,
        ty: &TypeDefinition,
        known: &KnownTypes,
        errors: &mut Vec<String>,
    ) {
        if let Some(reference) = &ty.reference {
            let key = if reference.contains('.') {
                reference.clone()
            } else {
                format!("{domain}.{reference}")
            };
            if !known.contains_key(&key) {
                errors.push(format!(
                    "Domain `{domain}` field `{field}`: reference `{reference}` does not resolve"
                ));
            }
        }

        if ty.is_enum() {
            let mut seen = HashSet::new();
            for value in &ty.enum_values {
                if value.is_empty() {
                    errors.push(format!("Domain `{domain}` field `{field}`: empty enum value"));
                }
                if !seen.insert(value.clone()) {
                    errors.push(format!(
                        "Domain `{domain}` field `{field}`: duplicate enum value `{value}`"
                    ));
                }
            }
        }

        if let Some(items) = &ty.items {
            self.validate_type(domain, &format!("{field}[]"), items, known, errors);
        }

        for property in &ty.properties {
            let nested = format!("{field}.{}", property.name);
            self.validate_type(domain, &nested, property, known, errors);
        }
    }
}
