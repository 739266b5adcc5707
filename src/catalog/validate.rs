use std::collections::BTreeMap;

use itertools::Itertools;
use tosca_models::{EntrySchema, GroupTypeDefinition, PrimitiveType, PropertyDefinition};

use super::error::{CatalogError, TypeKind};
use super::registry::Catalog;
use super::resolve::{ancestry, is_compatible_override, resolve, ResolvedType};
use super::values::check_value;
use crate::constants::keywords::ROOT_TYPE_SEGMENT;

/// Check every type in the catalog and return all problems found
///
/// Types are visited data first, then node, then group, each kind in name
/// order. A broken base type or cycle is reported once, against the type
/// that declares the broken link, not against each of its descendants.
pub fn validate(catalog: &Catalog) -> Vec<CatalogError> {
    let mut issues = Vec::new();

    for (name, entry) in catalog.data_types() {
        check_type(catalog, TypeKind::Data, name, &entry.definition.properties, &mut issues);
    }
    for (name, entry) in catalog.node_types() {
        let node = &entry.definition;
        if check_type(catalog, TypeKind::Node, name, &node.properties, &mut issues) {
            check_properties(catalog, name, &node.attributes, &mut issues);
            if let Some(parent) = inherited(catalog, TypeKind::Node, name) {
                check_overrides(catalog, name, &parent.attributes, &node.attributes, &mut issues);
            }
        }
    }
    for (name, entry) in catalog.group_types() {
        let group = &entry.definition;
        let resolvable = check_type(catalog, TypeKind::Group, name, &group.properties, &mut issues);
        check_members(catalog, name, &group.members, &mut issues);
        if group.derived_from.is_some() {
            check_required_fields(catalog, name, group, resolvable, &mut issues);
        }
    }

    log::debug!("Validation found {} issue(s)", issues.len());
    issues
}

// Returns whether the ancestry of the type resolves
fn check_type(
    catalog: &Catalog,
    kind: TypeKind,
    name: &str,
    properties: &BTreeMap<String, PropertyDefinition>,
    issues: &mut Vec<CatalogError>,
) -> bool {
    if catalog.parent_of(kind, name).is_none() && !is_root_name(name) {
        issues.push(CatalogError::UndeclaredRoot {
            kind,
            name: name.to_string(),
        });
    }
    let resolvable = check_ancestry(catalog, kind, name, issues);
    check_properties(catalog, name, properties, issues);
    if resolvable {
        if let Some(parent) = inherited(catalog, kind, name) {
            check_overrides(catalog, name, &parent.properties, properties, issues);
        }
    }
    resolvable
}

fn check_ancestry(
    catalog: &Catalog,
    kind: TypeKind,
    name: &str,
    issues: &mut Vec<CatalogError>,
) -> bool {
    let err = match ancestry(catalog, kind, name) {
        Ok(_) => return true,
        Err(err) => err,
    };
    let reported_here = match &err {
        CatalogError::UnresolvedBaseType { name: broken, .. } => broken == name,
        // Report a cycle once, from its lexically smallest member
        CatalogError::InheritanceCycle { chain, .. } => {
            chain.first().map(String::as_str) == Some(name)
                && chain.iter().min().map(String::as_str) == Some(name)
        }
        _ => true,
    };
    if reported_here {
        issues.push(err);
    }
    false
}

/// Only types named `<namespace>.Root` may start an inheritance tree
fn is_root_name(name: &str) -> bool {
    name.rsplit('.').next() == Some(ROOT_TYPE_SEGMENT)
}

// Derived group types must describe themselves and admit some member, either
// their own or inherited
fn check_required_fields(
    catalog: &Catalog,
    name: &str,
    group: &GroupTypeDefinition,
    resolvable: bool,
    issues: &mut Vec<CatalogError>,
) {
    let missing = |field| CatalogError::MissingRequiredField {
        kind: TypeKind::Group,
        name: name.to_string(),
        field,
    };
    if group.description.as_deref().map_or(true, |d| d.trim().is_empty()) {
        issues.push(missing("description"));
    }
    if resolvable && resolve(catalog, TypeKind::Group, name).is_ok_and(|r| r.members.is_empty()) {
        issues.push(missing("members"));
    }
}

/// Resolved parent of a type, if it has one that resolves cleanly
fn inherited(catalog: &Catalog, kind: TypeKind, name: &str) -> Option<ResolvedType> {
    let parent = catalog.parent_of(kind, name)?;
    if !catalog.contains(kind, parent) {
        return None;
    }
    resolve(catalog, kind, parent).ok()
}

fn check_properties(
    catalog: &Catalog,
    owner: &str,
    properties: &BTreeMap<String, PropertyDefinition>,
    issues: &mut Vec<CatalogError>,
) {
    for (property, prop) in properties {
        let schema_ok = check_schema(
            catalog,
            owner,
            property,
            &prop.type_name,
            prop.entry_schema.as_ref(),
            issues,
        );
        let Some(default) = prop.default.as_ref().filter(|_| schema_ok) else {
            continue;
        };
        if let Err(source) = check_value(catalog, &prop.type_name, prop.entry_schema.as_ref(), default)
        {
            issues.push(CatalogError::InvalidDefault {
                owner: owner.to_string(),
                property: property.clone(),
                source,
            });
        }
    }
}

// Walks nested entry schemas; returns whether the whole schema is usable
fn check_schema(
    catalog: &Catalog,
    owner: &str,
    property: &str,
    type_name: &str,
    entry_schema: Option<&EntrySchema>,
    issues: &mut Vec<CatalogError>,
) -> bool {
    let is_collection = match type_name.parse::<PrimitiveType>() {
        Ok(primitive) => primitive.is_collection(),
        Err(_) if catalog.contains(TypeKind::Data, type_name) => false,
        Err(_) => {
            issues.push(CatalogError::UnknownPropertyType {
                owner: owner.to_string(),
                property: property.to_string(),
                type_name: type_name.to_string(),
            });
            return false;
        }
    };

    match (is_collection, entry_schema) {
        (true, Some(entry)) => check_schema(
            catalog,
            owner,
            property,
            entry.type_name(),
            entry.entry_schema(),
            issues,
        ),
        (true, None) => {
            issues.push(CatalogError::MissingEntrySchema {
                owner: owner.to_string(),
                property: property.to_string(),
                type_name: type_name.to_string(),
            });
            false
        }
        (false, Some(entry)) => {
            log::warn!(
                "Ignoring entry_schema '{}' of property '{}' of '{}': {} is not a collection type",
                entry.type_name(),
                property,
                owner,
                type_name
            );
            true
        }
        (false, None) => true,
    }
}

fn check_overrides(
    catalog: &Catalog,
    owner: &str,
    inherited: &BTreeMap<String, PropertyDefinition>,
    declared: &BTreeMap<String, PropertyDefinition>,
    issues: &mut Vec<CatalogError>,
) {
    for (property, prop) in declared {
        let Some(parent_prop) = inherited.get(property) else {
            continue;
        };
        if !is_compatible_override(catalog, &parent_prop.type_name, &prop.type_name) {
            issues.push(CatalogError::IncompatibleOverride {
                owner: owner.to_string(),
                property: property.clone(),
                inherited: parent_prop.type_name.clone(),
                declared: prop.type_name.clone(),
            });
        }
    }
}

fn check_members(
    catalog: &Catalog,
    group: &str,
    members: &[String],
    issues: &mut Vec<CatalogError>,
) {
    for member in members.iter().duplicates() {
        issues.push(CatalogError::DuplicateMember {
            group: group.to_string(),
            member: member.clone(),
        });
    }
    for member in members.iter().unique() {
        if !catalog.contains(TypeKind::Node, member) {
            issues.push(CatalogError::UndefinedMemberType {
                group: group.to_string(),
                member: member.clone(),
            });
        }
    }
}
