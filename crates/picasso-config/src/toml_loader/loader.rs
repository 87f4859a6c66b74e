//! Core TOML config loading: read from path or platform default.

use picasso_common::ConfigError;
use std::path::Path;
use tracing::{info, warn};

use super::paths::{create_default_config, default_config_path};
use crate::schema::PicassoConfig;
use crate::validation;

pub const ENV_BASE_URL: &str = "PICASSO_BASE_URL";
pub const ENV_API_KEY: &str = "PICASSO_API_KEY";

/// Load config from a specific TOML file path.
///
/// Missing fields take serde defaults. Validation failures are logged and
/// the parsed config is returned as-is; `crate::load_config` is the strict
/// entry point.
pub fn load_from_path(path: &Path) -> Result<PicassoConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::ParseError(format!("failed to read {}: {e}", path.display())))?;

    let config: PicassoConfig = toml::from_str(&content)
        .map_err(|e| ConfigError::ParseError(format!("failed to parse TOML: {e}")))?;

    if let Err(e) = validation::validate(&config) {
        warn!("config validation warning: {e}");
    }

    info!("loaded config from {}", path.display());
    Ok(config)
}

/// Load config from the platform default path, creating it on first run.
pub fn load_default() -> Result<PicassoConfig, ConfigError> {
    let path = default_config_path()?;

    match load_from_path(&path) {
        Ok(config) => Ok(config),
        Err(ConfigError::FileNotFound(_)) => {
            info!("no config found at {}, creating default", path.display());
            if let Err(e) = create_default_config(&path) {
                warn!("could not write default config: {e}");
            }
            Ok(PicassoConfig::default())
        }
        Err(e) => Err(e),
    }
}

/// Overlay `PICASSO_BASE_URL` / `PICASSO_API_KEY` from the process environment.
pub fn apply_env_overrides(config: &mut PicassoConfig) {
    apply_overrides(config, |key| std::env::var(key).ok());
}

pub(super) fn apply_overrides(
    config: &mut PicassoConfig,
    lookup: impl Fn(&str) -> Option<String>,
) {
    if let Some(url) = lookup(ENV_BASE_URL).filter(|v| !v.trim().is_empty()) {
        config.endpoints.base_url = url;
    }
    if let Some(key) = lookup(ENV_API_KEY).filter(|v| !v.trim().is_empty()) {
        config.endpoints.api_key = key;
    }
}
