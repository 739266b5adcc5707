//! Profiles compiled into the binary
//!
//! The TOSCA simple profile supplies the root types every other profile
//! derives from, so it is always loaded first.

use tosca_models::CatalogDocument;

use super::error::CatalogError;
use super::load::parse_document;
use super::registry::Catalog;
use crate::constants::keywords::BUILTIN_ORIGIN_PREFIX;

const PROFILES: &[(&str, &str)] = &[
    (
        "tosca-simple-1.0",
        include_str!("../../resources/profiles/tosca-simple-1.0/types.json"),
    ),
    (
        "tosca-simple-nfv-1.0",
        include_str!("../../resources/profiles/tosca-simple-nfv-1.0/types.json"),
    ),
];

pub fn profile_names() -> impl Iterator<Item = &'static str> {
    PROFILES.iter().map(|(name, _)| *name)
}

/// Parse one built-in profile by name
pub fn profile(name: &str) -> Option<Result<CatalogDocument, CatalogError>> {
    PROFILES
        .iter()
        .find(|(profile, _)| *profile == name)
        .map(|(profile, raw)| parse_document(&origin(profile), raw))
}

/// Add every built-in profile to `catalog`
pub fn add_builtin_profiles(catalog: &mut Catalog) -> Result<(), CatalogError> {
    for (name, raw) in PROFILES {
        let origin = origin(name);
        catalog.add_document(&origin, parse_document(&origin, raw)?)?;
    }
    Ok(())
}

pub fn builtin_catalog() -> Result<Catalog, CatalogError> {
    let mut catalog = Catalog::new();
    add_builtin_profiles(&mut catalog)?;
    Ok(catalog)
}

fn origin(profile: &str) -> String {
    format!("{BUILTIN_ORIGIN_PREFIX}{profile}")
}
