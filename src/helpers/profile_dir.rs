use std::{env, path::PathBuf};

use crate::constants::envvars;

/// Directory of extra catalog documents, taken from `TCAT_PROFILE_DIR`
///
/// An unset or empty variable means no extra profiles.
pub fn profile_dir() -> Option<PathBuf> {
    match env::var(envvars::PROFILE_DIR) {
        Ok(dir) if !dir.trim().is_empty() => Some(dir.into()),
        _ => None,
    }
}
