// Upper bound of an open `range` value
pub const UNBOUNDED: &str = "UNBOUNDED";

pub const BUILTIN_ORIGIN_PREFIX: &str = "builtin:";

// Last name segment of a type allowed to omit `derived_from`
pub const ROOT_TYPE_SEGMENT: &str = "Root";
