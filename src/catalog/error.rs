use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Which of the three type namespaces a type name lives in
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeKind {
    Data,
    Node,
    Group,
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TypeKind::Data => "data",
            TypeKind::Node => "node",
            TypeKind::Group => "group",
        })
    }
}

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("could not read catalog {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse catalog {origin}: {source}")]
    Parse {
        origin: String,
        source: serde_json::Error,
    },
    #[error("{kind} type '{name}' is defined in both {first} and {second}")]
    DuplicateType {
        kind: TypeKind,
        name: String,
        first: String,
        second: String,
    },
    #[error("{kind} type '{name}' not found")]
    UnknownType { kind: TypeKind, name: String },
    #[error("{kind} type '{name}' derives from unresolved base type '{base}'")]
    UnresolvedBaseType {
        kind: TypeKind,
        name: String,
        base: String,
    },
    #[error("{kind} type '{name}' has an inheritance cycle: {}", .chain.join(" -> "))]
    InheritanceCycle {
        kind: TypeKind,
        name: String,
        chain: Vec<String>,
    },
    #[error("{kind} type '{name}' has no derived_from but is not a root type")]
    UndeclaredRoot { kind: TypeKind, name: String },
    #[error("{kind} type '{name}' is missing required field '{field}'")]
    MissingRequiredField {
        kind: TypeKind,
        name: String,
        field: &'static str,
    },
    #[error("property '{property}' of '{owner}' has unknown type '{type_name}'")]
    UnknownPropertyType {
        owner: String,
        property: String,
        type_name: String,
    },
    #[error("property '{property}' of '{owner}' is a {type_name} without entry_schema")]
    MissingEntrySchema {
        owner: String,
        property: String,
        type_name: String,
    },
    #[error(
        "property '{property}' of '{owner}' overrides inherited type '{inherited}' with '{declared}'"
    )]
    IncompatibleOverride {
        owner: String,
        property: String,
        inherited: String,
        declared: String,
    },
    #[error("default of property '{property}' of '{owner}' is invalid: {source}")]
    InvalidDefault {
        owner: String,
        property: String,
        source: ValueError,
    },
    #[error("group type '{group}' lists undefined member node type '{member}'")]
    UndefinedMemberType { group: String, member: String },
    #[error("group type '{group}' lists member '{member}' more than once")]
    DuplicateMember { group: String, member: String },
    #[error("type reference '{reference}' is ambiguous: {}", .candidates.join(", "))]
    AmbiguousReference {
        reference: String,
        candidates: Vec<String>,
    },
    #[error("node type '{member}' may not be a member of group type '{group}'")]
    IneligibleMember { group: String, member: String },
    #[error("'{owner}' has no property '{property}'")]
    UnknownProperty { owner: String, property: String },
    #[error("required property '{property}' of '{owner}' is not assigned")]
    MissingRequiredProperty { owner: String, property: String },
    #[error("value of property '{property}' of '{owner}' is invalid: {source}")]
    InvalidValue {
        owner: String,
        property: String,
        source: ValueError,
    },
}

/// Why a JSON value does not fit a property schema
#[derive(Error, Debug, PartialEq)]
pub enum ValueError {
    #[error("expected {expected}, found {found}")]
    TypeMismatch {
        expected: String,
        found: &'static str,
    },
    #[error("'{value}' is not a valid {expected}")]
    Malformed { expected: String, value: String },
    #[error("range lower bound {lower} exceeds upper bound {upper}")]
    InvertedRange { lower: i64, upper: i64 },
    #[error("entry {index}: {source}")]
    Entry {
        index: usize,
        source: Box<ValueError>,
    },
    #[error("key '{key}': {source}")]
    MapEntry {
        key: String,
        source: Box<ValueError>,
    },
    #[error("field '{field}': {source}")]
    Field {
        field: String,
        source: Box<ValueError>,
    },
    #[error("unknown field '{0}'")]
    UnknownField(String),
    #[error("missing required field '{0}'")]
    MissingField(String),
    #[error("type '{0}' cannot be checked")]
    Unresolvable(String),
}
