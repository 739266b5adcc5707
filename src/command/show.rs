use anyhow::{anyhow, Result};
use tcat::catalog::{load_catalog, resolve};

use crate::argsets::{CatalogArgs, ShowArgs};

/// Print a type with its inherited properties folded in
pub fn show(args: ShowArgs) -> Result<()> {
    let catalog = load_catalog(&args.catalog.load_options())?;
    let (kind, name) = catalog
        .find(&args.type_name)?
        .ok_or_else(|| anyhow!("No type named '{}'", args.type_name))?;
    log::debug!("Resolving {kind} type {name}");

    let resolved = resolve(&catalog, kind, name)?;
    println!("{}", serde_json::to_string_pretty(&resolved)?);
    Ok(())
}

/// Print the merged catalog as a single document
pub fn export(args: CatalogArgs) -> Result<()> {
    let catalog = load_catalog(&args.load_options())?;
    println!("{}", serde_json::to_string_pretty(&catalog.to_document())?);
    Ok(())
}
