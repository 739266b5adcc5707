use std::path::PathBuf;

use tcat::catalog::LoadOptions;
use tcat::helpers::profile_dir;

pub struct CatalogArgs {
    pub include_builtin: bool,
    pub files: Vec<PathBuf>,
}

impl CatalogArgs {
    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            include_builtin: self.include_builtin,
            profile_dir: profile_dir(),
            files: self.files.clone(),
        }
    }
}

pub struct ShowArgs {
    pub type_name: String,
    pub catalog: CatalogArgs,
}

pub struct CheckValuesArgs {
    pub members: Option<Vec<String>>,
    pub group_type: String,
    pub values: PathBuf,
    pub catalog: CatalogArgs,
}
