pub mod types;

use std::path::Path;

use crate::error::{FundaError, Result};
use types::Config;

pub const API_KEY_ENV: &str = "FUNDA_API_KEY";
pub const BASE_URL_ENV: &str = "FUNDA_BASE_URL";

pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        tracing::info!(
            "Config file not found at {}, using defaults",
            path.display()
        );
        return Ok(Config::default());
    }

    let content = std::fs::read_to_string(path).map_err(|e| {
        FundaError::Config(format!(
            "failed to read config file {}: {e}",
            path.display()
        ))
    })?;
    // An empty file deserializes to unit, not to a mapping
    if content.trim().is_empty() {
        return Ok(Config::default());
    }
    let config: Config = serde_yml::from_str(&content)?;
    Ok(config)
}

/// Override file settings with `FUNDA_API_KEY` / `FUNDA_BASE_URL`.
pub fn apply_env_overrides(config: &mut Config) {
    apply_overrides_from(config, |name| std::env::var(name).ok());
}

fn apply_overrides_from(config: &mut Config, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(key) = lookup(API_KEY_ENV).filter(|v| !v.is_empty()) {
        config.api.api_key = key;
    }
    if let Some(url) = lookup(BASE_URL_ENV).filter(|v| !v.is_empty()) {
        config.api.base_url = url;
    }
}
