use anyhow::{anyhow, Result};
use tcat::catalog::{load_catalog, validate};

use crate::argsets::CatalogArgs;

pub fn check(args: CatalogArgs) -> Result<()> {
    let catalog = load_catalog(&args.load_options())?;

    let issues = validate(&catalog);
    for issue in &issues {
        log::error!("{issue}");
    }
    if !issues.is_empty() {
        return Err(anyhow!("{} issue(s) found", issues.len()));
    }

    println!(
        "OK: {} data types, {} node types, {} group types",
        catalog.data_types().len(),
        catalog.node_types().len(),
        catalog.group_types().len()
    );
    Ok(())
}
