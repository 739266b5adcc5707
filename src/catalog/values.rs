//! Checking JSON values against property schemas
//!
//! Used for property defaults in type definitions and for the property
//! assignments of a group template.

use chrono::{DateTime, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};
use tosca_models::{EntrySchema, PrimitiveType};

use super::error::{CatalogError, TypeKind, ValueError};
use super::registry::Catalog;
use super::resolve::{ancestry, primitive_base, resolve, resolve_group_type};
use crate::constants::keywords::UNBOUNDED;

static VERSION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d+\.\d+(\.\d+(\.[A-Za-z0-9_]+(-\d+)?)?)?$").unwrap()
});
static SCALAR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(\d+(?:\.\d+)?)\s*([A-Za-z]+)\s*$").unwrap());

const SIZE_UNITS: &[&str] = &["B", "kB", "KiB", "MB", "MiB", "GB", "GiB", "TB", "TiB"];
const TIME_UNITS: &[&str] = &["d", "h", "m", "s", "ms", "us", "ns"];
const FREQUENCY_UNITS: &[&str] = &["Hz", "kHz", "MHz", "GHz"];

pub fn check_value(
    catalog: &Catalog,
    type_name: &str,
    entry_schema: Option<&EntrySchema>,
    value: &Value,
) -> Result<(), ValueError> {
    if let Ok(primitive) = type_name.parse::<PrimitiveType>() {
        return check_primitive(catalog, primitive, entry_schema, value);
    }
    if catalog.data_type(type_name).is_none() {
        return Err(ValueError::Unresolvable(type_name.to_string()));
    }
    if let Some(primitive) = primitive_base(catalog, type_name) {
        return check_primitive(catalog, primitive, entry_schema, value);
    }

    let fields = value.as_object().ok_or_else(|| mismatch(type_name, value))?;
    let resolved = resolve(catalog, TypeKind::Data, type_name)
        .map_err(|_| ValueError::Unresolvable(type_name.to_string()))?;

    for (field, field_value) in fields {
        let prop = resolved
            .properties
            .get(field)
            .ok_or_else(|| ValueError::UnknownField(field.clone()))?;
        check_value(
            catalog,
            &prop.type_name,
            prop.entry_schema.as_ref(),
            field_value,
        )
        .map_err(|source| ValueError::Field {
            field: field.clone(),
            source: Box::new(source),
        })?;
    }
    match resolved
        .properties
        .iter()
        .find(|(name, prop)| is_mandatory(prop) && !fields.contains_key(*name))
    {
        Some((name, _)) => Err(ValueError::MissingField(name.clone())),
        None => Ok(()),
    }
}

/// Check a group template's property assignments against its group type
///
/// Returns every problem found; an empty list means the assignments fit.
pub fn check_group_assignments(
    catalog: &Catalog,
    group_type: &str,
    assignments: &Map<String, Value>,
) -> Vec<CatalogError> {
    let resolved = match resolve_group_type(catalog, group_type) {
        Ok(resolved) => resolved,
        Err(err) => return vec![err],
    };

    let mut issues = Vec::new();
    for (name, value) in assignments {
        let Some(prop) = resolved.properties.get(name) else {
            issues.push(CatalogError::UnknownProperty {
                owner: group_type.to_string(),
                property: name.clone(),
            });
            continue;
        };
        if let Err(source) = check_value(catalog, &prop.type_name, prop.entry_schema.as_ref(), value)
        {
            issues.push(CatalogError::InvalidValue {
                owner: group_type.to_string(),
                property: name.clone(),
                source,
            });
        }
    }
    for (name, prop) in &resolved.properties {
        if is_mandatory(prop) && !assignments.contains_key(name) {
            issues.push(CatalogError::MissingRequiredProperty {
                owner: group_type.to_string(),
                property: name.clone(),
            });
        }
    }
    issues
}

/// Check the node types of a group template's members against its group type
///
/// A member fits when its node type is one the group type lists, or derives
/// from one.
pub fn check_group_members(
    catalog: &Catalog,
    group_type: &str,
    member_types: &[String],
) -> Vec<CatalogError> {
    let resolved = match resolve_group_type(catalog, group_type) {
        Ok(resolved) => resolved,
        Err(err) => return vec![err],
    };

    let mut issues = Vec::new();
    for member in member_types {
        let chain = match ancestry(catalog, TypeKind::Node, member) {
            Ok(chain) => chain,
            Err(err) => {
                issues.push(err);
                continue;
            }
        };
        if !chain.iter().any(|t| resolved.members.iter().any(|m| m == t)) {
            issues.push(CatalogError::IneligibleMember {
                group: group_type.to_string(),
                member: member.clone(),
            });
        }
    }
    issues
}

fn is_mandatory(prop: &tosca_models::PropertyDefinition) -> bool {
    prop.is_required() && prop.default.is_none()
}

fn check_primitive(
    catalog: &Catalog,
    primitive: PrimitiveType,
    entry_schema: Option<&EntrySchema>,
    value: &Value,
) -> Result<(), ValueError> {
    let expected = primitive.as_str();
    let ok = match primitive {
        PrimitiveType::String => value.is_string(),
        PrimitiveType::Integer => value.is_i64() || value.is_u64(),
        PrimitiveType::Float => value.is_number(),
        PrimitiveType::Boolean => value.is_boolean(),
        PrimitiveType::Null => value.is_null(),
        PrimitiveType::Timestamp => {
            let text = value.as_str().ok_or_else(|| mismatch(expected, value))?;
            return check_text(expected, text, is_timestamp);
        }
        PrimitiveType::Version => {
            let text = match value {
                Value::String(s) => s.clone(),
                Value::Number(n) => n.to_string(),
                _ => return Err(mismatch(expected, value)),
            };
            return check_text(expected, &text, |t| VERSION_RE.is_match(t));
        }
        PrimitiveType::Range => return check_range(value),
        PrimitiveType::ScalarUnitSize => return check_scalar(expected, SIZE_UNITS, value),
        PrimitiveType::ScalarUnitTime => return check_scalar(expected, TIME_UNITS, value),
        PrimitiveType::ScalarUnitFrequency => {
            return check_scalar(expected, FREQUENCY_UNITS, value)
        }
        PrimitiveType::List => {
            let items = value.as_array().ok_or_else(|| mismatch(expected, value))?;
            if let Some(entry) = entry_schema {
                for (index, item) in items.iter().enumerate() {
                    check_entry(catalog, entry, item).map_err(|source| ValueError::Entry {
                        index,
                        source: Box::new(source),
                    })?;
                }
            }
            true
        }
        PrimitiveType::Map => {
            let entries = value.as_object().ok_or_else(|| mismatch(expected, value))?;
            if let Some(entry) = entry_schema {
                for (key, item) in entries {
                    check_entry(catalog, entry, item).map_err(|source| ValueError::MapEntry {
                        key: key.clone(),
                        source: Box::new(source),
                    })?;
                }
            }
            true
        }
    };
    if ok {
        Ok(())
    } else {
        Err(mismatch(expected, value))
    }
}

fn check_entry(catalog: &Catalog, entry: &EntrySchema, item: &Value) -> Result<(), ValueError> {
    check_value(catalog, entry.type_name(), entry.entry_schema(), item)
}

fn check_text(expected: &str, text: &str, valid: impl Fn(&str) -> bool) -> Result<(), ValueError> {
    if valid(text) {
        Ok(())
    } else {
        Err(ValueError::Malformed {
            expected: expected.to_string(),
            value: text.to_string(),
        })
    }
}

fn is_timestamp(text: &str) -> bool {
    DateTime::parse_from_rfc3339(text).is_ok() || NaiveDate::parse_from_str(text, "%Y-%m-%d").is_ok()
}

fn check_range(value: &Value) -> Result<(), ValueError> {
    let malformed = || ValueError::Malformed {
        expected: PrimitiveType::Range.to_string(),
        value: value.to_string(),
    };
    let bounds = value
        .as_array()
        .ok_or_else(|| mismatch(PrimitiveType::Range.as_str(), value))?;
    let [lower, upper] = bounds.as_slice() else {
        return Err(malformed());
    };
    let lower = lower.as_i64().ok_or_else(malformed)?;
    match upper {
        Value::String(s) if s == UNBOUNDED => Ok(()),
        _ => {
            let upper = upper.as_i64().ok_or_else(malformed)?;
            if lower > upper {
                Err(ValueError::InvertedRange { lower, upper })
            } else {
                Ok(())
            }
        }
    }
}

fn check_scalar(expected: &str, units: &[&str], value: &Value) -> Result<(), ValueError> {
    let text = value.as_str().ok_or_else(|| mismatch(expected, value))?;
    check_text(expected, text, |t| {
        SCALAR_RE.captures(t).is_some_and(|caps| {
            units
                .iter()
                .any(|unit| unit.eq_ignore_ascii_case(&caps[2]))
        })
    })
}

fn mismatch(expected: &str, value: &Value) -> ValueError {
    ValueError::TypeMismatch {
        expected: expected.to_string(),
        found: json_kind(value),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "map",
    }
}
