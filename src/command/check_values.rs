use std::fs;

use anyhow::{anyhow, Result};
use serde_json::{Map, Value};
use tcat::catalog::{check_group_assignments, check_group_members, load_catalog, TypeKind};

use crate::argsets::CheckValuesArgs;

pub fn check_values(args: CheckValuesArgs) -> Result<()> {
    let catalog = load_catalog(&args.catalog.load_options())?;
    let group_type = match catalog.find(&args.group_type)? {
        Some((TypeKind::Group, name)) => name,
        Some((kind, name)) => return Err(anyhow!("'{name}' is a {kind} type, not a group type")),
        None => return Err(anyhow!("No group type named '{}'", args.group_type)),
    };

    let raw = fs::read_to_string(&args.values)
        .map_err(|e| anyhow!("Failed to read values file {}: {}", args.values.display(), e))?;
    let values: Map<String, Value> = serde_json::from_str(&raw).map_err(|e| {
        anyhow!(
            "Values file {} is not a JSON object: {}",
            args.values.display(),
            e
        )
    })?;

    let mut issues = check_group_assignments(&catalog, group_type, &values);
    if let Some(members) = &args.members {
        issues.extend(check_group_members(&catalog, group_type, members));
    }
    for issue in &issues {
        log::error!("{issue}");
    }
    if !issues.is_empty() {
        return Err(anyhow!("{} issue(s) found", issues.len()));
    }

    match &args.members {
        Some(members) => println!(
            "OK: {} property value(s) and {} member(s) fit {}",
            values.len(),
            members.len(),
            group_type
        ),
        None => println!("OK: {} property value(s) fit {}", values.len(), group_type),
    }
    Ok(())
}
