//! Picasso client configuration.
//!
//! Provides TOML-based configuration for the gateway endpoints, HTTP
//! transport and storage location, plus the user-facing voice/theme
//! settings. All sections use sensible defaults so partial configs work.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use picasso_config::load_config;
//!
//! let config = load_config().expect("failed to load config");
//! println!("{}", config.endpoints.chat_url());
//! ```

pub mod schema;
pub mod settings;
pub mod toml_loader;
pub mod validation;

pub use schema::{
    EndpointConfig, HttpConfig, PicassoConfig, StorageConfig, CONFIG_SCHEMA_VERSION,
};
pub use settings::{AppSettings, SettingUpdate, Theme};

use picasso_common::ConfigError;

/// Load config from the platform default path, apply env overrides and
/// validate the result.
pub fn load_config() -> Result<PicassoConfig, ConfigError> {
    let mut config = toml_loader::load_default()?;
    toml_loader::apply_env_overrides(&mut config);
    validation::validate(&config)?;
    Ok(config)
}

/// Serialize a config to a pretty-printed JSON string.
pub fn config_to_json(config: &PicassoConfig) -> String {
    serde_json::to_string_pretty(config)
        .unwrap_or_else(|e| format!("{{\"error\": \"failed to serialize config: {e}\"}}"))
}
