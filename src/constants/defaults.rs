pub const LOG_LEVEL: &str = "INFO";
pub const CATALOG_FILE_EXTENSION: &str = "json";
