#![allow(dead_code)]
// Not every test binary uses every stub

pub const VNFFG_ONLY: &str = r#"
{
  "group_types": {
    "tosca.groups.nfv.VNFFG": {
      "_extensions": {
        "shorthand_name": "VNFFG",
        "type_qualified_name": "tosca:VNFFG",
        "specification": "tosca-simple-nfv-1.0",
        "specification_section": "10.6.1"
      },
      "description": "The NFV VNFFG group type represents a logical VNF forwarding graph entity.",
      "derived_from": "tosca.groups.Root",
      "properties": {
        "vendor": { "description": "Specify the vendor generating this VNFFG.", "type": "string" },
        "version": { "description": "Specify the identifier, version, and description of service.", "type": "string" },
        "number_of_endpoints": { "description": "Count of the external endpoints.", "type": "integer" },
        "dependent_virtual_link": { "description": "List of VLD used.", "type": "list", "entry_schema": "string" },
        "connection_point": { "description": "Connection Points forming the VNFFG.", "type": "list", "entry_schema": "string" },
        "constituent_vnfs": { "description": "List of VNFD used.", "type": "list", "entry_schema": "string" }
      },
      "members": ["tosca.nodes.nfv.FP"]
    }
  }
}
"#;

pub const ROOTS_AND_FP: &str = r#"
{
  "node_types": {
    "tosca.nodes.Root": { "description": "root node type" },
    "tosca.nodes.nfv.FP": {
      "derived_from": "tosca.nodes.Root",
      "properties": { "policy": { "type": "string", "required": false } }
    }
  },
  "group_types": {
    "tosca.groups.Root": { "description": "root group type" }
  }
}
"#;

pub const ACME_GROUPS: &str = r#"
{
  "node_types": {
    "acme.nodes.Monitor": {
      "derived_from": "tosca.nodes.Root",
      "properties": { "interval": { "type": "scalar-unit.time", "default": "10 s" } }
    }
  },
  "group_types": {
    "acme.groups.Monitored": {
      "derived_from": "tosca.groups.nfv.VNFFG",
      "description": "Forwarding graph with monitors attached.",
      "properties": {
        "sample_rate": { "type": "integer", "required": false, "default": 100 }
      },
      "members": ["tosca.nodes.nfv.FP", "acme.nodes.Monitor"]
    }
  }
}
"#;

pub const BROKEN_GROUPS: &str = r#"
{
  "group_types": {
    "acme.groups.Broken": {
      "derived_from": "acme.groups.Missing",
      "properties": {
        "links": { "type": "list" },
        "count": { "type": "number" }
      },
      "members": ["acme.nodes.Ghost"]
    }
  }
}
"#;

pub const VALID_VNFFG_VALUES: &str = r#"
{
  "vendor": "acme",
  "version": "2.1",
  "number_of_endpoints": 2,
  "dependent_virtual_link": ["vl-a", "vl-b"],
  "connection_point": ["cp-1", "cp-2"],
  "constituent_vnfs": ["firewall", "nat"]
}
"#;

pub const BAD_VNFFG_VALUES: &str = r#"
{
  "vendor": "acme",
  "number_of_endpoints": "two",
  "connection_point": "cp-1"
}
"#;
