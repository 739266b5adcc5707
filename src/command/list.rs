use anyhow::Result;
use tcat::catalog::load_catalog;

use crate::argsets::CatalogArgs;

pub fn list(args: CatalogArgs) -> Result<()> {
    let catalog = load_catalog(&args.load_options())?;
    for (kind, name, origin) in catalog.entries() {
        println!("{kind}\t{name}\t{origin}");
    }
    Ok(())
}
