use std::collections::BTreeMap;

use tosca_models::{
    CatalogDocument, DataTypeDefinition, Extensions, GroupTypeDefinition, NodeTypeDefinition,
};

use super::error::{CatalogError, TypeKind};

/// A loaded type definition and the document it came from
#[derive(Clone, Debug, PartialEq)]
pub struct TypeEntry<T> {
    pub origin: String,
    pub definition: T,
}

/// Fields shared by every kind of type definition
pub trait TypeDefinition {
    const KIND: TypeKind;
    fn derived_from(&self) -> Option<&str>;
    fn extensions(&self) -> Option<&Extensions>;
}

macro_rules! impl_type_definition {
    ($ty:ty, $kind:expr) => {
        impl TypeDefinition for $ty {
            const KIND: TypeKind = $kind;
            fn derived_from(&self) -> Option<&str> {
                self.derived_from.as_deref()
            }
            fn extensions(&self) -> Option<&Extensions> {
                self.extensions.as_ref()
            }
        }
    };
}

impl_type_definition!(DataTypeDefinition, TypeKind::Data);
impl_type_definition!(NodeTypeDefinition, TypeKind::Node);
impl_type_definition!(GroupTypeDefinition, TypeKind::Group);

/// The combined set of type definitions from every loaded document
///
/// Built once by the loader and only read afterwards.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    data_types: BTreeMap<String, TypeEntry<DataTypeDefinition>>,
    node_types: BTreeMap<String, TypeEntry<NodeTypeDefinition>>,
    group_types: BTreeMap<String, TypeEntry<GroupTypeDefinition>>,
}

impl Catalog {
    pub fn new() -> Self {
        Catalog::default()
    }

    /// Merge a document into the catalog
    ///
    /// Fails without adding anything if any of its type names is already taken
    /// within the same kind.
    pub fn add_document(&mut self, origin: &str, doc: CatalogDocument) -> Result<(), CatalogError> {
        check_vacant(&self.data_types, &doc.data_types, origin)?;
        check_vacant(&self.node_types, &doc.node_types, origin)?;
        check_vacant(&self.group_types, &doc.group_types, origin)?;

        log::debug!(
            "Adding {} data, {} node and {} group types from {}",
            doc.data_types.len(),
            doc.node_types.len(),
            doc.group_types.len(),
            origin
        );
        insert_all(&mut self.data_types, doc.data_types, origin);
        insert_all(&mut self.node_types, doc.node_types, origin);
        insert_all(&mut self.group_types, doc.group_types, origin);
        Ok(())
    }

    pub fn data_type(&self, name: &str) -> Option<&DataTypeDefinition> {
        self.data_types.get(name).map(|e| &e.definition)
    }

    pub fn node_type(&self, name: &str) -> Option<&NodeTypeDefinition> {
        self.node_types.get(name).map(|e| &e.definition)
    }

    pub fn group_type(&self, name: &str) -> Option<&GroupTypeDefinition> {
        self.group_types.get(name).map(|e| &e.definition)
    }

    pub fn data_types(&self) -> &BTreeMap<String, TypeEntry<DataTypeDefinition>> {
        &self.data_types
    }

    pub fn node_types(&self) -> &BTreeMap<String, TypeEntry<NodeTypeDefinition>> {
        &self.node_types
    }

    pub fn group_types(&self) -> &BTreeMap<String, TypeEntry<GroupTypeDefinition>> {
        &self.group_types
    }

    pub fn contains(&self, kind: TypeKind, name: &str) -> bool {
        match kind {
            TypeKind::Data => self.data_types.contains_key(name),
            TypeKind::Node => self.node_types.contains_key(name),
            TypeKind::Group => self.group_types.contains_key(name),
        }
    }

    /// Parent of a type, or `None` for a root or an unknown name
    pub fn parent_of(&self, kind: TypeKind, name: &str) -> Option<&str> {
        match kind {
            TypeKind::Data => self.data_type(name).and_then(|d| d.derived_from()),
            TypeKind::Node => self.node_type(name).and_then(|d| d.derived_from()),
            TypeKind::Group => self.group_type(name).and_then(|d| d.derived_from()),
        }
    }

    pub fn len(&self) -> usize {
        self.data_types.len() + self.node_types.len() + self.group_types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Look a type up by qualified name, then by its `shorthand_name` or
    /// `type_qualified_name` extension
    ///
    /// Aliases are only unique within a profile: the root data, node and group
    /// types are all `tosca:Root`. A reference matching more than one type is
    /// an error rather than a guess. Returns the qualified name.
    pub fn find(&self, reference: &str) -> Result<Option<(TypeKind, &str)>, CatalogError> {
        let mut found = self.matching(&|name: &str, _: Option<&Extensions>| name == reference);
        if found.is_empty() {
            found = self.matching(&|_: &str, ext: Option<&Extensions>| {
                ext.is_some_and(|ext| {
                    ext.shorthand_name.as_deref() == Some(reference)
                        || ext.type_qualified_name.as_deref() == Some(reference)
                })
            });
        }
        if found.len() > 1 {
            return Err(CatalogError::AmbiguousReference {
                reference: reference.to_string(),
                candidates: found
                    .iter()
                    .map(|(kind, name)| format!("{kind} {name}"))
                    .collect(),
            });
        }
        Ok(found.pop())
    }

    // Kinds in group, node, data order
    fn matching(&self, is_match: &MatchFn) -> Vec<(TypeKind, &str)> {
        let mut found = matches_in(&self.group_types, is_match);
        found.extend(matches_in(&self.node_types, is_match));
        found.extend(matches_in(&self.data_types, is_match));
        found
    }

    /// Every type as (kind, name, origin), kinds in data, node, group order
    pub fn entries(&self) -> impl Iterator<Item = (TypeKind, &str, &str)> {
        let data = self
            .data_types
            .iter()
            .map(|(n, e)| (TypeKind::Data, n.as_str(), e.origin.as_str()));
        let node = self
            .node_types
            .iter()
            .map(|(n, e)| (TypeKind::Node, n.as_str(), e.origin.as_str()));
        let group = self
            .group_types
            .iter()
            .map(|(n, e)| (TypeKind::Group, n.as_str(), e.origin.as_str()));
        data.chain(node).chain(group)
    }

    /// Rebuild a single document holding every loaded definition
    pub fn to_document(&self) -> CatalogDocument {
        CatalogDocument {
            data_types: definitions(&self.data_types),
            node_types: definitions(&self.node_types),
            group_types: definitions(&self.group_types),
            ..Default::default()
        }
    }
}

fn check_vacant<T: TypeDefinition, U>(
    existing: &BTreeMap<String, TypeEntry<T>>,
    incoming: &BTreeMap<String, U>,
    origin: &str,
) -> Result<(), CatalogError> {
    match incoming.keys().find_map(|name| existing.get_key_value(name)) {
        Some((name, entry)) => Err(CatalogError::DuplicateType {
            kind: T::KIND,
            name: name.clone(),
            first: entry.origin.clone(),
            second: origin.to_string(),
        }),
        None => Ok(()),
    }
}

fn insert_all<T>(
    target: &mut BTreeMap<String, TypeEntry<T>>,
    definitions: BTreeMap<String, T>,
    origin: &str,
) {
    target.extend(definitions.into_iter().map(|(name, definition)| {
        let entry = TypeEntry {
            origin: origin.to_string(),
            definition,
        };
        (name, entry)
    }));
}

type MatchFn<'r> = dyn Fn(&str, Option<&Extensions>) -> bool + 'r;

fn matches_in<'a, T: TypeDefinition>(
    types: &'a BTreeMap<String, TypeEntry<T>>,
    is_match: &MatchFn,
) -> Vec<(TypeKind, &'a str)> {
    types
        .iter()
        .filter(|(name, entry)| is_match(name, entry.definition.extensions()))
        .map(|(name, _)| (T::KIND, name.as_str()))
        .collect()
}

fn definitions<T: Clone>(types: &BTreeMap<String, TypeEntry<T>>) -> BTreeMap<String, T> {
    types
        .iter()
        .map(|(name, entry)| (name.clone(), entry.definition.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: serde_json::Value) -> CatalogDocument {
        serde_json::from_value(value).unwrap()
    }

    fn roots() -> CatalogDocument {
        doc(json!({
            "node_types": { "tosca.nodes.Root": {} },
            "group_types": {
                "tosca.groups.Root": {
                    "_extensions": { "shorthand_name": "Root", "type_qualified_name": "tosca:Root" }
                }
            }
        }))
    }

    #[test]
    fn test_add_document() {
        let mut catalog = Catalog::new();
        catalog.add_document("roots.json", roots()).unwrap();

        assert_eq!(catalog.len(), 2);
        assert!(catalog.contains(TypeKind::Group, "tosca.groups.Root"));
        assert!(!catalog.contains(TypeKind::Node, "tosca.groups.Root"));
        assert_eq!(
            catalog.group_types()["tosca.groups.Root"].origin,
            "roots.json"
        );
    }

    #[test]
    fn test_duplicate_type_across_documents() {
        let mut catalog = Catalog::new();
        catalog.add_document("a.json", roots()).unwrap();

        let extra = doc(json!({
            "node_types": { "tosca.nodes.Other": {} },
            "group_types": { "tosca.groups.Root": {} }
        }));
        let err = catalog.add_document("b.json", extra).unwrap_err();

        match err {
            CatalogError::DuplicateType {
                kind,
                name,
                first,
                second,
            } => {
                assert_eq!(kind, TypeKind::Group);
                assert_eq!(name, "tosca.groups.Root");
                assert_eq!(first, "a.json");
                assert_eq!(second, "b.json");
            }
            other => panic!("unexpected error: {other}"),
        }
        // Nothing from the rejected document is kept
        assert!(!catalog.contains(TypeKind::Node, "tosca.nodes.Other"));
    }

    #[test]
    fn test_same_name_in_different_kinds() {
        let mut catalog = Catalog::new();
        catalog
            .add_document("a.json", doc(json!({ "node_types": { "x.Root": {} } })))
            .unwrap();
        catalog
            .add_document("b.json", doc(json!({ "group_types": { "x.Root": {} } })))
            .unwrap();
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn test_find_by_alias() {
        let mut catalog = Catalog::new();
        catalog.add_document("roots.json", roots()).unwrap();

        assert_eq!(
            catalog.find("tosca.groups.Root").unwrap(),
            Some((TypeKind::Group, "tosca.groups.Root"))
        );
        assert_eq!(
            catalog.find("tosca:Root").unwrap(),
            Some((TypeKind::Group, "tosca.groups.Root"))
        );
        assert_eq!(
            catalog.find("tosca.nodes.Root").unwrap(),
            Some((TypeKind::Node, "tosca.nodes.Root"))
        );
        assert_eq!(catalog.find("Nope").unwrap(), None);
    }

    #[test]
    fn test_find_ambiguous_alias() {
        let mut catalog = Catalog::new();
        catalog.add_document("roots.json", roots()).unwrap();
        catalog
            .add_document(
                "data.json",
                doc(json!({
                    "data_types": {
                        "tosca.datatypes.Root": {
                            "_extensions": { "shorthand_name": "Root", "type_qualified_name": "tosca:Root" }
                        }
                    }
                })),
            )
            .unwrap();

        let err = catalog.find("tosca:Root").unwrap_err();
        assert_eq!(
            err.to_string(),
            "type reference 'tosca:Root' is ambiguous: group tosca.groups.Root, data tosca.datatypes.Root"
        );
        // A qualified name still wins over any alias
        assert_eq!(
            catalog.find("tosca.datatypes.Root").unwrap(),
            Some((TypeKind::Data, "tosca.datatypes.Root"))
        );
    }

    #[test]
    fn test_find_same_name_in_different_kinds() {
        let mut catalog = Catalog::new();
        catalog
            .add_document(
                "a.json",
                doc(json!({ "node_types": { "x.Root": {} }, "group_types": { "x.Root": {} } })),
            )
            .unwrap();
        assert!(matches!(
            catalog.find("x.Root"),
            Err(CatalogError::AmbiguousReference { candidates, .. }) if candidates == ["group x.Root", "node x.Root"]
        ));
    }

    #[test]
    fn test_to_document_round_trip() {
        let mut catalog = Catalog::new();
        catalog.add_document("roots.json", roots()).unwrap();

        let exported = catalog.to_document();
        let raw = serde_json::to_string(&exported).unwrap();
        let mut reloaded = Catalog::new();
        reloaded
            .add_document("export", serde_json::from_str(&raw).unwrap())
            .unwrap();

        assert_eq!(reloaded.to_document(), exported);
        assert_eq!(exported.group_types, roots().group_types);
    }
}
