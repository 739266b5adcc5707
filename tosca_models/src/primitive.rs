use serde::{Deserialize, Serialize};

/// Property types built into TOSCA, as opposed to data types declared in a catalog
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum PrimitiveType {
    #[serde(rename = "string")]
    String,
    #[serde(rename = "integer")]
    Integer,
    #[serde(rename = "float")]
    Float,
    #[serde(rename = "boolean")]
    Boolean,
    #[serde(rename = "timestamp")]
    Timestamp,
    #[serde(rename = "null")]
    Null,
    #[serde(rename = "version")]
    Version,
    #[serde(rename = "range")]
    Range,
    #[serde(rename = "list")]
    List,
    #[serde(rename = "map")]
    Map,
    #[serde(rename = "scalar-unit.size")]
    ScalarUnitSize,
    #[serde(rename = "scalar-unit.time")]
    ScalarUnitTime,
    #[serde(rename = "scalar-unit.frequency")]
    ScalarUnitFrequency,
}

impl PrimitiveType {
    pub const ALL: [PrimitiveType; 13] = [
        Self::String,
        Self::Integer,
        Self::Float,
        Self::Boolean,
        Self::Timestamp,
        Self::Null,
        Self::Version,
        Self::Range,
        Self::List,
        Self::Map,
        Self::ScalarUnitSize,
        Self::ScalarUnitTime,
        Self::ScalarUnitFrequency,
    ];

    pub fn as_str(&self) -> &'static str {
        match *self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Boolean => "boolean",
            Self::Timestamp => "timestamp",
            Self::Null => "null",
            Self::Version => "version",
            Self::Range => "range",
            Self::List => "list",
            Self::Map => "map",
            Self::ScalarUnitSize => "scalar-unit.size",
            Self::ScalarUnitTime => "scalar-unit.time",
            Self::ScalarUnitFrequency => "scalar-unit.frequency",
        }
    }

    /// Collection kinds carry an `entry_schema` naming their element type
    pub fn is_collection(&self) -> bool {
        matches!(self, Self::List | Self::Map)
    }
}

impl std::fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PrimitiveType {
    type Err = &'static str;
    fn from_str(value: &str) -> Result<Self, &'static str> {
        Self::ALL
            .iter()
            .find(|p| p.as_str() == value)
            .copied()
            .ok_or("invalid value")
    }
}

impl std::convert::TryFrom<&str> for PrimitiveType {
    type Error = &'static str;
    fn try_from(value: &str) -> Result<Self, &'static str> {
        value.parse()
    }
}
