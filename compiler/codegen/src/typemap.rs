//! Resolution of protocol type definitions to Rust type names.
//!
//! The precedence order is fixed: references, then enumerations, then
//! the primitive table, then composites. Resolution is pure; the same
//! definition in the same context always yields the same name, so
//! repeated generation produces identical output.

use protocol::{KnownTypes, TypeDefinition, TypeKind};
use thiserror::Error;

use crate::identifiers::dehumanize;

/// Errors resolving a type definition to a target type name.
#[derive(Debug, Error)]
pub enum TypeMapError {
    /// A `$ref` did not resolve against the known-types set.
    #[error("unresolved type reference `{reference}` in domain `{domain}`")]
    UnresolvedReference {
        /// The reference as written in the protocol.
        reference: String,
        /// The domain the reference was found in.
        domain: String,
    },
    /// An `array` type without an `items` element type.
    #[error("array type `{name}` in domain `{domain}` is missing an item type")]
    MissingItems {
        /// Name of the offending type, if any.
        name: String,
        /// The owning domain.
        domain: String,
    },
    /// A definition with no `type`, `$ref`, or `enum` to map from.
    #[error("type `{name}` in domain `{domain}` has no type, $ref, or enum")]
    Unmappable {
        /// Name of the offending type, if any.
        name: String,
        /// The owning domain.
        domain: String,
    },
}

/// Resolve `ty` to a Rust type name, in the context of `domain` and the
/// protocol-wide known-types set.
///
/// Named protocol types map to `Dehumanize(domain) + Dehumanize(type)`
/// (e.g. `Page.TransitionType` → `PageTransitionType`); the owning
/// domain is always used, so a definition site and every reference to
/// it agree on the name regardless of which domain is being generated.
pub fn resolve(
    ty: &TypeDefinition,
    domain: &str,
    known_types: &KnownTypes,
) -> Result<String, TypeMapError> {
    if let Some(reference) = &ty.reference {
        let key = if reference.contains('.') {
            reference.clone()
        } else {
            format!("{domain}.{reference}")
        };
        let target = known_types.get(&key).ok_or_else(|| TypeMapError::UnresolvedReference {
            reference: reference.clone(),
            domain: domain.to_string(),
        })?;
        return Ok(qualified_name(&target.domain, &target.definition.name));
    }

    if ty.is_enum() {
        return Ok(qualified_name(domain, &ty.name));
    }

    match ty.kind {
        Some(TypeKind::String) => Ok("String".to_string()),
        Some(TypeKind::Integer) => Ok("i32".to_string()),
        Some(TypeKind::Number) => Ok("f64".to_string()),
        Some(TypeKind::Boolean) => Ok("bool".to_string()),
        Some(TypeKind::Array) => {
            let items = ty.items.as_ref().ok_or_else(|| TypeMapError::MissingItems {
                name: ty.name.clone(),
                domain: domain.to_string(),
            })?;
            Ok(format!("Vec<{}>", resolve(items, domain, known_types)?))
        }
        Some(TypeKind::Object) => {
            if ty.properties.is_empty() {
                Ok("serde_json::Value".to_string())
            } else {
                Ok(qualified_name(domain, &ty.name))
            }
        }
        Some(TypeKind::Any) => Ok("serde_json::Value".to_string()),
        None => Err(TypeMapError::Unmappable {
            name: ty.name.clone(),
            domain: domain.to_string(),
        }),
    }
}

/// The flat generated name for a named protocol type.
fn qualified_name(domain: &str, name: &str) -> String {
    format!("{}{}", dehumanize(domain), dehumanize(name))
}

#[cfg(test)]
mod tests {
    use protocol::ProtocolDefinition;

    use super::*;

    fn fixture() -> ProtocolDefinition {
        serde_json::from_value(serde_json::json!({
            "domains": [
                {
                    "domain": "Network",
                    "types": [
                        { "id": "TimeSinceEpoch", "type": "number" },
                        { "id": "Headers", "type": "object" }
                    ]
                },
                {
                    "domain": "Page",
                    "types": [
                        {
                            "id": "TransitionType",
                            "type": "string",
                            "enum": ["link", "typed"]
                        },
                        {
                            "id": "Frame",
                            "type": "object",
                            "properties": [{ "name": "id", "type": "string" }]
                        }
                    ]
                }
            ]
        }))
        .expect("fixture should deserialize")
    }

    fn shape(value: serde_json::Value) -> TypeDefinition {
        serde_json::from_value(value).expect("type shape should deserialize")
    }

    #[test]
    fn test_primitive_table() {
        let known = KnownTypes::new();
        let cases = [
            ("string", "String"),
            ("integer", "i32"),
            ("number", "f64"),
            ("boolean", "bool"),
            ("any", "serde_json::Value"),
        ];
        for (kind, expected) in cases {
            let ty = shape(serde_json::json!({ "type": kind }));
            let mapped = resolve(&ty, "Page", &known).expect("primitive should map");
            assert_eq!(mapped, expected, "primitive `{kind}`");
        }
    }

    #[test]
    fn test_structureless_object_maps_to_dynamic_value() {
        let ty = shape(serde_json::json!({ "type": "object" }));
        let mapped = resolve(&ty, "Network", &KnownTypes::new()).expect("object should map");
        assert_eq!(mapped, "serde_json::Value");
    }

    #[test]
    fn test_object_with_properties_maps_to_struct_name() {
        let def = fixture();
        let known = def.known_types();
        let frame = &def.domains[1].types[1];
        let mapped = resolve(frame, "Page", &known).expect("struct should map");
        assert_eq!(mapped, "PageFrame");
    }

    #[test]
    fn test_enum_name_uses_owning_domain() {
        let def = fixture();
        let known = def.known_types();
        let transition = &def.domains[1].types[0];
        let mapped = resolve(transition, "Page", &known).expect("enum should map");
        assert_eq!(mapped, "PageTransitionType");
    }

    #[test]
    fn test_array_wraps_item_type() {
        let ty = shape(serde_json::json!({
            "type": "array",
            "items": { "type": "integer" }
        }));
        let mapped = resolve(&ty, "DOM", &KnownTypes::new()).expect("array should map");
        assert_eq!(mapped, "Vec<i32>");
    }

    #[test]
    fn test_array_without_items_is_an_error() {
        let ty = shape(serde_json::json!({ "id": "Broken", "type": "array" }));
        let err = resolve(&ty, "DOM", &KnownTypes::new()).expect_err("expected an error");
        assert!(matches!(err, TypeMapError::MissingItems { .. }));
    }

    #[test]
    fn test_same_domain_reference() {
        let def = fixture();
        let known = def.known_types();
        let ty = shape(serde_json::json!({ "name": "headers", "$ref": "Headers" }));
        let mapped = resolve(&ty, "Network", &known).expect("ref should resolve");
        assert_eq!(mapped, "NetworkHeaders");
    }

    #[test]
    fn test_cross_domain_reference() {
        let def = fixture();
        let known = def.known_types();
        // A Page type referencing Network.TimeSinceEpoch across domains
        let ty = shape(serde_json::json!({ "name": "ts", "$ref": "Network.TimeSinceEpoch" }));
        let mapped = resolve(&ty, "Page", &known).expect("cross-domain ref should resolve");
        assert_eq!(mapped, "NetworkTimeSinceEpoch");
    }

    #[test]
    fn test_reference_to_enum_agrees_with_definition_site() {
        let def = fixture();
        let known = def.known_types();
        let reference = shape(serde_json::json!({ "$ref": "Page.TransitionType" }));
        let via_ref = resolve(&reference, "Network", &known).expect("ref should resolve");
        let at_site =
            resolve(&def.domains[1].types[0], "Page", &known).expect("enum should map");
        assert_eq!(via_ref, at_site);
    }

    #[test]
    fn test_unresolved_reference_is_an_error() {
        let def = fixture();
        let known = def.known_types();
        let ty = shape(serde_json::json!({ "$ref": "Page.DoesNotExist" }));
        let err = resolve(&ty, "Network", &known).expect_err("expected an error");
        assert!(matches!(err, TypeMapError::UnresolvedReference { .. }));
        assert!(err.to_string().contains("Page.DoesNotExist"));
    }

    #[test]
    fn test_resolution_is_deterministic() {
        let def = fixture();
        let known = def.known_types();
        let ty = shape(serde_json::json!({ "$ref": "TimeSinceEpoch" }));

        let first = resolve(&ty, "Network", &known).expect("ref should resolve");
        // Resolve unrelated types in between; prior lookups must not matter
        let _ = resolve(&shape(serde_json::json!({ "type": "string" })), "Page", &known);
        let second = resolve(&ty, "Network", &known).expect("ref should resolve");
        assert_eq!(first, second);
    }
}
