mod argsets;
mod command;

use std::path::PathBuf;

use anyhow::{anyhow, Result};
use dotenv::dotenv;
use env_logger::Env;
use tcat::constants::{defaults, envvars};

use argsets::{CatalogArgs, CheckValuesArgs, ShowArgs};

const CMD_CHECK: &str = "check";
const CMD_LIST: &str = "list";
const CMD_SHOW: &str = "show";
const CMD_EXPORT: &str = "export";
const CMD_CHECK_VALUES: &str = "check-values";

const NO_BUILTIN_FLAG: &str = "--no-builtin";
const MEMBERS_OPTION: &str = "--members";

fn main() -> Result<()> {
    let _ = dotenv();
    env_logger::Builder::from_env(Env::default().filter_or(envvars::LOG_LEVEL, defaults::LOG_LEVEL))
        .init();

    let mut args = pico_args::Arguments::from_env();
    let subcommand = args.subcommand()?;
    let include_builtin = !args.contains(NO_BUILTIN_FLAG);

    match subcommand.as_deref() {
        Some(CMD_CHECK) => command::check(catalog_args(args, include_builtin)?),
        Some(CMD_LIST) => command::list(catalog_args(args, include_builtin)?),
        Some(CMD_EXPORT) => command::export(catalog_args(args, include_builtin)?),
        Some(CMD_SHOW) => command::show(ShowArgs {
            type_name: args.free_from_str()?,
            catalog: catalog_args(args, include_builtin)?,
        }),
        Some(CMD_CHECK_VALUES) => command::check_values(CheckValuesArgs {
            // Take options before the positional arguments
            members: args
                .opt_value_from_str::<_, String>(MEMBERS_OPTION)?
                .map(|list| list.split(',').map(|m| m.trim().to_string()).collect()),
            group_type: args.free_from_str()?,
            values: args.free_from_str()?,
            catalog: catalog_args(args, include_builtin)?,
        }),
        _ => Err(anyhow!(
            "Subcommand must be one of 'check', 'list', 'show', 'export', 'check-values'"
        )),
    }
}

// Whatever is left after the subcommand's own arguments names catalog files
fn catalog_args(args: pico_args::Arguments, include_builtin: bool) -> Result<CatalogArgs> {
    let files: Vec<PathBuf> = args.finish().into_iter().map(PathBuf::from).collect();
    if let Some(flag) = files
        .iter()
        .find(|f| f.to_string_lossy().starts_with("--"))
    {
        return Err(anyhow!("Unknown option '{}'", flag.display()));
    }
    Ok(CatalogArgs {
        include_builtin,
        files,
    })
}
