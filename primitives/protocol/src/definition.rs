//! Serde structures mirroring the protocol description document.
//!
//! Field names follow the wire format: a domain's name lives in the
//! `domain` key, a named type's in `id`, and cross-references in `$ref`
//! (optionally qualified as `Domain.Type`).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::ProtocolItem;

/// Root of the protocol description: an ordered sequence of domains.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProtocolDefinition {
    /// Protocol version advertised by the source, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<ProtocolVersion>,
    /// The protocol domains, in document order.
    pub domains: Vec<Domain>,
}

/// Major/minor version pair carried by the protocol document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProtocolVersion {
    /// Major version component.
    pub major: String,
    /// Minor version component.
    pub minor: String,
}

/// A named namespace grouping related types, commands, and events.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Domain {
    /// Domain name (the `domain` key in the wire format).
    #[serde(rename = "domain")]
    pub name: String,
    /// Human-readable description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Whether the domain is deprecated.
    pub deprecated: bool,
    /// Whether the domain is experimental.
    pub experimental: bool,
    /// Names of domains this domain depends on.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<String>,
    /// Named type definitions owned by this domain.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub types: Vec<TypeDefinition>,
    /// Commands exposed by this domain.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub commands: Vec<Command>,
    /// Events emitted by this domain.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub events: Vec<Event>,
}

/// Closed set of primitive/composite kinds a type definition may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeKind {
    /// UTF-8 text.
    String,
    /// Integral number.
    Integer,
    /// Floating-point number.
    Number,
    /// Boolean flag.
    Boolean,
    /// Structured object, possibly with named properties.
    Object,
    /// Ordered sequence; the element type lives in `items`.
    Array,
    /// Opaque value of unspecified shape.
    Any,
}

/// A type used in the protocol: a named domain type, a property, a
/// command/event parameter, a return value, or an array element.
///
/// Exactly one of `reference`, `enum_values`, or `kind` describes the
/// shape; parameters and properties additionally carry `optional`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TypeDefinition {
    /// Type name. Named domain types use the `id` key on the wire,
    /// properties and parameters use `name`.
    #[serde(alias = "id")]
    pub name: String,
    /// Human-readable description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Whether the type is deprecated.
    pub deprecated: bool,
    /// Whether the type is experimental.
    pub experimental: bool,
    /// Primitive or composite kind (the `type` key).
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<TypeKind>,
    /// Reference to another type, optionally qualified as `Domain.Type`.
    #[serde(rename = "$ref", skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    /// Allowed literal values for enumerated string types.
    #[serde(rename = "enum", skip_serializing_if = "Vec::is_empty")]
    pub enum_values: Vec<String>,
    /// Element type for `array` kinds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<TypeDefinition>>,
    /// Named properties for structured `object` kinds.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub properties: Vec<TypeDefinition>,
    /// Whether the value may be omitted (parameters and properties).
    pub optional: bool,
}

/// A named operation with parameters and return values.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Command {
    /// Command name, unqualified (the full method is `Domain.name`).
    pub name: String,
    /// Human-readable description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Whether the command is deprecated.
    pub deprecated: bool,
    /// Whether the command is experimental.
    pub experimental: bool,
    /// Ordered request parameters.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<TypeDefinition>,
    /// Ordered return values.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub returns: Vec<TypeDefinition>,
}

/// A named notification with parameters.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Event {
    /// Event name, unqualified.
    pub name: String,
    /// Human-readable description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Whether the event is deprecated.
    pub deprecated: bool,
    /// Whether the event is experimental.
    pub experimental: bool,
    /// Ordered event parameters.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<TypeDefinition>,
}

/// A named type definition together with its owning domain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnownType {
    /// Name of the domain the type is defined in.
    pub domain: String,
    /// The type definition itself.
    pub definition: TypeDefinition,
}

/// Lookup table from `Domain.Type` keys to their definitions,
/// assembled across the whole protocol.
pub type KnownTypes = BTreeMap<String, KnownType>;

impl ProtocolDefinition {
    /// Assemble the known-types set across all domains, keyed `Domain.Type`.
    pub fn known_types(&self) -> KnownTypes {
        let mut known = KnownTypes::new();
        for domain in &self.domains {
            for ty in &domain.types {
                known.insert(
                    format!("{}.{}", domain.name, ty.name),
                    KnownType { domain: domain.name.clone(), definition: ty.clone() },
                );
            }
        }
        known
    }

    /// Look up a domain by name.
    pub fn get_domain(&self, name: &str) -> Option<&Domain> {
        self.domains.iter().find(|d| d.name == name)
    }
}

impl TypeDefinition {
    /// Whether this definition carries an enumeration.
    pub fn is_enum(&self) -> bool { !self.enum_values.is_empty() }

    /// Whether this definition is a reference to another type.
    pub fn is_reference(&self) -> bool { self.reference.is_some() }
}

impl ProtocolItem for Domain {
    fn name(&self) -> &str { &self.name }

    fn description(&self) -> Option<&str> { self.description.as_deref() }

    fn deprecated(&self) -> bool { self.deprecated }

    fn experimental(&self) -> bool { self.experimental }
}

impl ProtocolItem for TypeDefinition {
    fn name(&self) -> &str { &self.name }

    fn description(&self) -> Option<&str> { self.description.as_deref() }

    fn deprecated(&self) -> bool { self.deprecated }

    fn experimental(&self) -> bool { self.experimental }
}

impl ProtocolItem for Command {
    fn name(&self) -> &str { &self.name }

    fn description(&self) -> Option<&str> { self.description.as_deref() }

    fn deprecated(&self) -> bool { self.deprecated }

    fn experimental(&self) -> bool { self.experimental }
}

impl ProtocolItem for Event {
    fn name(&self) -> &str { &self.name }

    fn description(&self) -> Option<&str> { self.description.as_deref() }

    fn deprecated(&self) -> bool { self.deprecated }

    fn experimental(&self) -> bool { self.experimental }
}
