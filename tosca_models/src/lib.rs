//! Serde models for TOSCA type catalog documents
//!
//! This crate only describes the shape of catalog documents:
//! - `definitions`: data, node and group type definitions and their property schemas
//! - `primitive`: the built-in TOSCA property type names
//! - `unique_map`: map deserialization that rejects repeated keys
//!
//! Resolution and validation live in the `tcat` crate; nothing here looks
//! across definitions.

pub mod definitions;
pub mod primitive;
mod unique_map;

pub use definitions::{
    CatalogDocument, DataTypeDefinition, EntrySchema, EntrySchemaDefinition, Extensions,
    GroupTypeDefinition, NodeTypeDefinition, PropertyDefinition,
};
pub use primitive::PrimitiveType;
