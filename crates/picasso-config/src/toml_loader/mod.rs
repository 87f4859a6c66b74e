//! TOML config file loading and creation.

mod loader;
mod paths;

#[cfg(test)]
mod tests;

pub use loader::{apply_env_overrides, load_default, load_from_path, ENV_API_KEY, ENV_BASE_URL};
pub use paths::{create_default_config, default_config_path};
