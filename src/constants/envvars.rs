pub const LOG_LEVEL: &str = "LOGGING_LEVEL";
pub const PROFILE_DIR: &str = "TCAT_PROFILE_DIR";
