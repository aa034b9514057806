use std::sync::{Arc, OnceLock};

use super::StaticConfig;

static CONFIG: OnceLock<Arc<StaticConfig>> = OnceLock::new();

/// Get the global configuration instance
///
/// Falls back to defaults if `init_config_from` was never called, so library
/// users and tests don't have to initialize anything.
pub fn get_config() -> Arc<StaticConfig> {
    CONFIG
        .get_or_init(|| Arc::new(StaticConfig::default()))
        .clone()
}

/// Initialize the global configuration from the given TOML path
///
/// Only the first call wins.
pub fn init_config_from(path: &str) {
    CONFIG.get_or_init(|| Arc::new(StaticConfig::load_from(path)));
}
