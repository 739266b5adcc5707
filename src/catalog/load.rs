use std::fs;
use std::path::{Path, PathBuf};

use tosca_models::CatalogDocument;

use super::builtin::add_builtin_profiles;
use super::error::CatalogError;
use super::registry::Catalog;
use crate::constants::defaults;

/// Where catalog documents come from, loaded in field order
#[derive(Clone, Debug, Default)]
pub struct LoadOptions {
    pub include_builtin: bool,
    pub profile_dir: Option<PathBuf>,
    pub files: Vec<PathBuf>,
}

pub fn parse_document(origin: &str, raw: &str) -> Result<CatalogDocument, CatalogError> {
    serde_json::from_str(raw).map_err(|source| CatalogError::Parse {
        origin: origin.to_string(),
        source,
    })
}

pub fn load_file(path: &Path) -> Result<CatalogDocument, CatalogError> {
    log::debug!("Loading catalog file {}", path.display());
    let raw = fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let doc = parse_document(&path.display().to_string(), &raw)?;
    if doc.is_empty() {
        log::warn!("Catalog file {} defines no types", path.display());
    }
    Ok(doc)
}

/// Load every `*.json` document in `dir`, sorted by file name
pub fn load_dir(dir: &Path) -> Result<Vec<(PathBuf, CatalogDocument)>, CatalogError> {
    let io_err = |source| CatalogError::Io {
        path: dir.to_path_buf(),
        source,
    };
    let mut paths = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_err)? {
        let path = entry.map_err(io_err)?.path();
        let is_catalog = path
            .extension()
            .is_some_and(|ext| ext == defaults::CATALOG_FILE_EXTENSION);
        if path.is_file() && is_catalog {
            paths.push(path);
        }
    }
    paths.sort();

    paths
        .into_iter()
        .map(|path| {
            let doc = load_file(&path)?;
            Ok((path, doc))
        })
        .collect()
}

pub fn load_catalog(options: &LoadOptions) -> Result<Catalog, CatalogError> {
    let mut catalog = Catalog::new();

    if options.include_builtin {
        add_builtin_profiles(&mut catalog)?;
    }
    if let Some(dir) = &options.profile_dir {
        log::info!("Loading profiles from {}", dir.display());
        for (path, doc) in load_dir(dir)? {
            catalog.add_document(&path.display().to_string(), doc)?;
        }
    }
    for path in &options.files {
        catalog.add_document(&path.display().to_string(), load_file(path)?)?;
    }

    log::info!("Loaded {} types", catalog.len());
    Ok(catalog)
}
