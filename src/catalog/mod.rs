//! TOSCA type catalogs: loading, inheritance resolution and validation
//!
//! Definitions themselves are modelled in the `tosca_models` crate; this
//! module is concerned with how they relate to each other once loaded.

mod error;
mod load;
mod registry;
mod resolve;
mod validate;
mod values;

pub mod builtin;

pub use builtin::builtin_catalog;
pub use error::{CatalogError, TypeKind, ValueError};
pub use load::{load_catalog, load_dir, load_file, parse_document, LoadOptions};
pub use registry::{Catalog, TypeDefinition, TypeEntry};
pub use resolve::{ancestry, primitive_base, resolve, resolve_group_type, ResolvedType};
pub use validate::validate;
pub use values::{check_group_assignments, check_group_members, check_value};
