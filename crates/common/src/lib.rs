pub mod types;
pub mod utils;
pub mod env;

/// Global prefix every REST route is mounted under.
pub const APP_GLOBAL_PREFIX: &str = "api";
