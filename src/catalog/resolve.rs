//! Inheritance resolution
//!
//! Parents are referenced by name and looked up on demand; nothing is cached
//! because a catalog is small and resolved only a handful of times per run.

use std::collections::BTreeMap;

use serde::Serialize;
use tosca_models::{PrimitiveType, PropertyDefinition};

use super::error::{CatalogError, TypeKind};
use super::registry::Catalog;

/// A type with everything it inherits folded in
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct ResolvedType {
    pub name: String,
    pub kind: TypeKind,
    /// `derived_from` chain, this type first and the root last
    pub ancestry: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub properties: BTreeMap<String, PropertyDefinition>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, PropertyDefinition>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub members: Vec<String>,
}

/// Walk `derived_from` from `name` up to its root
///
/// A data type may derive from a primitive type name such as `string`; the
/// chain stops there without including it.
pub fn ancestry<'a>(
    catalog: &'a Catalog,
    kind: TypeKind,
    name: &'a str,
) -> Result<Vec<&'a str>, CatalogError> {
    if !catalog.contains(kind, name) {
        return Err(CatalogError::UnknownType {
            kind,
            name: name.to_string(),
        });
    }

    let mut chain = vec![name];
    let mut current = name;
    while let Some(parent) = catalog.parent_of(kind, current) {
        if let Some(pos) = chain.iter().position(|t| *t == parent) {
            let mut cycle: Vec<String> = chain[pos..].iter().map(|t| t.to_string()).collect();
            cycle.push(parent.to_string());
            return Err(CatalogError::InheritanceCycle {
                kind,
                name: name.to_string(),
                chain: cycle,
            });
        }
        if !catalog.contains(kind, parent) {
            if kind == TypeKind::Data && parent.parse::<PrimitiveType>().is_ok() {
                break;
            }
            return Err(CatalogError::UnresolvedBaseType {
                kind,
                name: current.to_string(),
                base: parent.to_string(),
            });
        }
        chain.push(parent);
        current = parent;
    }
    Ok(chain)
}

/// The primitive type a data type ultimately derives from, if any
pub fn primitive_base(catalog: &Catalog, data_type: &str) -> Option<PrimitiveType> {
    let chain = ancestry(catalog, TypeKind::Data, data_type).ok()?;
    let root = chain.last()?;
    catalog
        .parent_of(TypeKind::Data, root)
        .and_then(|p| p.parse().ok())
}

/// Whether `declared` may replace an inherited property of type `inherited`
pub fn is_compatible_override(catalog: &Catalog, inherited: &str, declared: &str) -> bool {
    if inherited == declared {
        return true;
    }
    if ancestry(catalog, TypeKind::Data, declared).is_ok_and(|chain| chain.contains(&inherited)) {
        return true;
    }
    primitive_base(catalog, declared).is_some_and(|base| base.as_str() == inherited)
}

pub fn resolve(catalog: &Catalog, kind: TypeKind, name: &str) -> Result<ResolvedType, CatalogError> {
    let chain = ancestry(catalog, kind, name)?;

    let properties = merge(catalog, &chain, |owner| own_properties(catalog, kind, owner))?;
    let attributes = merge(catalog, &chain, |owner| {
        (kind == TypeKind::Node)
            .then(|| catalog.node_type(owner).map(|n| &n.attributes))
            .flatten()
    })?;

    let members = match kind {
        TypeKind::Group => chain
            .iter()
            .filter_map(|owner| catalog.group_type(owner))
            .map(|g| &g.members)
            .find(|m| !m.is_empty())
            .cloned()
            .unwrap_or_default(),
        _ => Vec::new(),
    };

    Ok(ResolvedType {
        name: name.to_string(),
        kind,
        ancestry: chain.iter().map(|t| t.to_string()).collect(),
        description: description(catalog, kind, name).map(str::to_string),
        properties,
        attributes,
        members,
    })
}

pub fn resolve_group_type(catalog: &Catalog, name: &str) -> Result<ResolvedType, CatalogError> {
    resolve(catalog, TypeKind::Group, name)
}

/// Properties a type declares itself, without inherited ones
pub fn own_properties<'a>(
    catalog: &'a Catalog,
    kind: TypeKind,
    name: &str,
) -> Option<&'a BTreeMap<String, PropertyDefinition>> {
    match kind {
        TypeKind::Data => catalog.data_type(name).map(|d| &d.properties),
        TypeKind::Node => catalog.node_type(name).map(|d| &d.properties),
        TypeKind::Group => catalog.group_type(name).map(|d| &d.properties),
    }
}

fn description<'a>(catalog: &'a Catalog, kind: TypeKind, name: &str) -> Option<&'a str> {
    match kind {
        TypeKind::Data => catalog.data_type(name)?.description.as_deref(),
        TypeKind::Node => catalog.node_type(name)?.description.as_deref(),
        TypeKind::Group => catalog.group_type(name)?.description.as_deref(),
    }
}

// Root first, so that each type overrides what its parent declared
fn merge<'a, F>(
    catalog: &Catalog,
    chain: &[&str],
    declared_by: F,
) -> Result<BTreeMap<String, PropertyDefinition>, CatalogError>
where
    F: Fn(&str) -> Option<&'a BTreeMap<String, PropertyDefinition>>,
{
    let mut merged: BTreeMap<String, PropertyDefinition> = BTreeMap::new();
    for owner in chain.iter().rev() {
        for (name, prop) in declared_by(owner).into_iter().flatten() {
            if let Some(inherited) = merged.get(name) {
                if !is_compatible_override(catalog, &inherited.type_name, &prop.type_name) {
                    return Err(CatalogError::IncompatibleOverride {
                        owner: owner.to_string(),
                        property: name.clone(),
                        inherited: inherited.type_name.clone(),
                        declared: prop.type_name.clone(),
                    });
                }
            }
            merged.insert(name.clone(), prop.clone());
        }
    }
    Ok(merged)
}
