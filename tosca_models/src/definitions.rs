use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::unique_map;

/// One catalog file: any number of data, node and group type definitions keyed by
/// their qualified name
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct CatalogDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tosca_definitions_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(
        default,
        deserialize_with = "unique_map::deserialize",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub data_types: BTreeMap<String, DataTypeDefinition>,
    #[serde(
        default,
        deserialize_with = "unique_map::deserialize",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub node_types: BTreeMap<String, NodeTypeDefinition>,
    #[serde(
        default,
        deserialize_with = "unique_map::deserialize",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub group_types: BTreeMap<String, GroupTypeDefinition>,
}

impl CatalogDocument {
    pub fn is_empty(&self) -> bool {
        self.data_types.is_empty() && self.node_types.is_empty() && self.group_types.is_empty()
    }
}

/// Non-normative annotations under `_extensions`
///
/// Keys other than the well-known ones are kept in `extra` so that a loaded
/// definition serializes back unchanged.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct Extensions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shorthand_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_qualified_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specification: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specification_section: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specification_url: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct PropertyDefinition {
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry_schema: Option<EntrySchema>,
}

impl PropertyDefinition {
    pub fn new(type_name: impl Into<String>) -> Self {
        PropertyDefinition {
            type_name: type_name.into(),
            description: None,
            required: None,
            default: None,
            entry_schema: None,
        }
    }

    pub fn with_entry_schema(mut self, entry_schema: impl Into<String>) -> Self {
        self.entry_schema = Some(EntrySchema::Short(entry_schema.into()));
        self
    }

    /// TOSCA properties are required unless they say otherwise
    pub fn is_required(&self) -> bool {
        self.required.unwrap_or(true)
    }
}

/// Element type of a `list` or `map` property, either `entry_schema: string` or
/// the long form `entry_schema: {type: string}`
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(untagged)]
pub enum EntrySchema {
    Short(String),
    Long(EntrySchemaDefinition),
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct EntrySchemaDefinition {
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry_schema: Option<Box<EntrySchema>>,
}

impl EntrySchema {
    pub fn type_name(&self) -> &str {
        match self {
            EntrySchema::Short(type_name) => type_name,
            EntrySchema::Long(def) => &def.type_name,
        }
    }

    /// Element schema of the element, for lists of lists and similar
    pub fn entry_schema(&self) -> Option<&EntrySchema> {
        match self {
            EntrySchema::Short(_) => None,
            EntrySchema::Long(def) => def.entry_schema.as_deref(),
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct DataTypeDefinition {
    #[serde(rename = "_extensions", default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Extensions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub derived_from: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, String>,
    #[serde(
        default,
        deserialize_with = "unique_map::deserialize",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub properties: BTreeMap<String, PropertyDefinition>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct NodeTypeDefinition {
    #[serde(rename = "_extensions", default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Extensions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub derived_from: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, String>,
    #[serde(
        default,
        deserialize_with = "unique_map::deserialize",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub properties: BTreeMap<String, PropertyDefinition>,
    #[serde(
        default,
        deserialize_with = "unique_map::deserialize",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub attributes: BTreeMap<String, PropertyDefinition>,
    // Carried as-is; capability and interface types are not modelled
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub requirements: Vec<BTreeMap<String, Value>>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub capabilities: BTreeMap<String, Value>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub interfaces: BTreeMap<String, Value>,
}

/// A group type: a named, typed grouping of node templates
///
/// `members` is an ordered list of the node types eligible to join groups
/// of this type.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct GroupTypeDefinition {
    #[serde(rename = "_extensions", default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Extensions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub derived_from: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, String>,
    #[serde(
        default,
        deserialize_with = "unique_map::deserialize",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub properties: BTreeMap<String, PropertyDefinition>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub members: Vec<String>,
    // Carried as-is, like the node type interfaces
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub interfaces: BTreeMap<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn vnffg_json() -> Value {
        json!({
            "_extensions": {
                "shorthand_name": "VNFFG",
                "type_qualified_name": "tosca:VNFFG",
                "specification": "tosca-simple-nfv-1.0",
                "specification_section": "10.6.1"
            },
            "description": "The NFV VNFFG group type.",
            "derived_from": "tosca.groups.Root",
            "properties": {
                "vendor": { "description": "Vendor", "type": "string" },
                "number_of_endpoints": { "type": "integer" },
                "connection_point": { "type": "list", "entry_schema": "string" }
            },
            "members": ["tosca.nodes.nfv.FP"]
        })
    }

    #[test]
    fn test_parse_group_type() {
        let group: GroupTypeDefinition = serde_json::from_value(vnffg_json()).unwrap();

        assert_eq!(group.derived_from.as_deref(), Some("tosca.groups.Root"));
        assert_eq!(group.members, ["tosca.nodes.nfv.FP"]);
        assert_eq!(group.properties.len(), 3);
        assert_eq!(group.properties["vendor"].type_name, "string");
        assert!(group.properties["vendor"].is_required());

        let connection_point = &group.properties["connection_point"];
        assert_eq!(
            connection_point.entry_schema.as_ref().map(EntrySchema::type_name),
            Some("string")
        );

        let extensions = group.extensions.unwrap();
        assert_eq!(extensions.shorthand_name.as_deref(), Some("VNFFG"));
        assert_eq!(extensions.specification_url, None);
    }

    #[test]
    fn test_group_type_round_trip() {
        let group: GroupTypeDefinition = serde_json::from_value(vnffg_json()).unwrap();
        let reloaded: GroupTypeDefinition =
            serde_json::from_str(&serde_json::to_string(&group).unwrap()).unwrap();
        assert_eq!(group, reloaded);
        assert_eq!(serde_json::to_value(&reloaded).unwrap(), vnffg_json());
    }

    #[test]
    fn test_unknown_extension_keys_preserved() {
        let group: GroupTypeDefinition = serde_json::from_value(json!({
            "_extensions": { "shorthand_name": "X", "normative": true },
            "derived_from": "tosca.groups.Root"
        }))
        .unwrap();
        let extensions = group.extensions.as_ref().unwrap();
        assert_eq!(extensions.extra.get("normative"), Some(&json!(true)));
        assert_eq!(
            serde_json::to_value(&group).unwrap()["_extensions"]["normative"],
            json!(true)
        );
    }

    #[test]
    fn test_group_type_interfaces() {
        let root = json!({
            "description": "The root group type.",
            "interfaces": {
                "Standard": { "type": "tosca.interfaces.node.lifecycle.Standard" }
            }
        });
        let group: GroupTypeDefinition = serde_json::from_value(root.clone()).unwrap();
        assert_eq!(
            group.interfaces["Standard"]["type"],
            "tosca.interfaces.node.lifecycle.Standard"
        );

        let reloaded: GroupTypeDefinition =
            serde_json::from_str(&serde_json::to_string(&group).unwrap()).unwrap();
        assert_eq!(reloaded, group);
        assert_eq!(serde_json::to_value(&reloaded).unwrap(), root);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result = serde_json::from_value::<GroupTypeDefinition>(json!({
            "derived_from": "tosca.groups.Root",
            "member": ["tosca.nodes.nfv.FP"]
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_property_without_type_rejected() {
        let result = serde_json::from_value::<PropertyDefinition>(json!({
            "description": "no type"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_long_form_entry_schema() {
        let prop: PropertyDefinition = serde_json::from_value(json!({
            "type": "list",
            "entry_schema": {
                "type": "list",
                "entry_schema": { "type": "integer" }
            }
        }))
        .unwrap();

        let entry = prop.entry_schema.as_ref().unwrap();
        assert_eq!(entry.type_name(), "list");
        assert_eq!(entry.entry_schema().map(EntrySchema::type_name), Some("integer"));
        assert!(prop.is_required());
    }

    #[test]
    fn test_duplicate_type_name_rejected() {
        let raw = r#"{
            "group_types": {
                "a.Group": { "description": "first" },
                "a.Group": { "description": "second" }
            }
        }"#;
        let err = serde_json::from_str::<CatalogDocument>(raw).unwrap_err();
        assert!(err.to_string().contains("duplicate key `a.Group`"));
    }

    #[test]
    fn test_empty_document() {
        let doc: CatalogDocument = serde_json::from_str("{}").unwrap();
        assert!(doc.is_empty());
        assert_eq!(serde_json::to_string(&doc).unwrap(), "{}");
    }
}
