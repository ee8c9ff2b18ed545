#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! Protocol model for the Chrome DevTools Protocol.
//!
//! This crate defines the in-memory representation of a protocol
//! description: domains containing type definitions, commands, and events.
//! The model is pure data: it is deserialized once from a validated
//! protocol document, stays immutable for the duration of a generation
//! run, and exposes only accessors.

pub mod definition;

pub use definition::{
    Command, Domain, Event, KnownType, KnownTypes, ProtocolDefinition, ProtocolVersion,
    TypeDefinition, TypeKind,
};

/// Capability shared by every named protocol item.
///
/// Domains, type definitions, commands, and events all carry a name,
/// an optional description, and deprecation/experimental markers.
pub trait ProtocolItem {
    /// The item's protocol name.
    fn name(&self) -> &str;
    /// Human-readable description, if the protocol provides one.
    fn description(&self) -> Option<&str>;
    /// Whether the item is marked deprecated.
    fn deprecated(&self) -> bool;
    /// Whether the item is marked experimental.
    fn experimental(&self) -> bool;
}
