pub const FUNCTION_PATH: &str = "system/function";
pub const SCALE_PATH: &str = "system/scale-function";
pub const NAMESPACE_KEY: &str = "namespace";
pub const USAGE_KEY: &str = "usage";
