//! Configuration schema types for the Picasso chat client.
//!
//! All structs use `serde(default)` so partial configs work correctly.

use serde::{Deserialize, Serialize};

/// Current config schema version.
pub const CONFIG_SCHEMA_VERSION: u32 = 1;

/// Root configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct PicassoConfig {
    pub endpoints: EndpointConfig,
    pub http: HttpConfig,
    pub storage: StorageConfig,
}

/// Remote gateway endpoints.
#[derive(Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EndpointConfig {
    pub base_url: String,
    pub chat_path: String,
    pub mood_path: String,
    /// Bearer token sent with both requests. Empty means no auth header.
    pub api_key: String,
}

impl std::fmt::Debug for EndpointConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EndpointConfig")
            .field("base_url", &self.base_url)
            .field("chat_path", &self.chat_path)
            .field("mood_path", &self.mood_path)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:54321".into(),
            chat_path: "functions/v1/chat".into(),
            mood_path: "functions/v1/analyze-mood".into(),
            api_key: String::new(),
        }
    }
}

impl EndpointConfig {
    pub fn chat_url(&self) -> String {
        join_url(&self.base_url, &self.chat_path)
    }

    pub fn mood_url(&self) -> String {
        join_url(&self.base_url, &self.mood_path)
    }
}

fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// HTTP transport settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct HttpConfig {
    pub connect_timeout_secs: u64,
    /// Whole-request timeout. 0 leaves it to the transport, so a hung
    /// stream keeps the session loading.
    pub request_timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: 10,
            request_timeout_secs: 0,
        }
    }
}

/// Where chat history and settings are kept.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StorageConfig {
    /// Storage directory. `None` uses the platform data directory.
    pub dir: Option<std::path::PathBuf>,
    pub history_key: String,
    pub settings_key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            dir: None,
            history_key: "picasso-chat-history".into(),
            settings_key: "picasso-settings".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_urls_normalise_slashes() {
        let endpoints = EndpointConfig {
            base_url: "https://example.supabase.co/".into(),
            chat_path: "/functions/v1/chat".into(),
            ..Default::default()
        };
        assert_eq!(
            endpoints.chat_url(),
            "https://example.supabase.co/functions/v1/chat"
        );
        assert_eq!(
            endpoints.mood_url(),
            "https://example.supabase.co/functions/v1/analyze-mood"
        );
    }

    #[test]
    fn debug_redacts_api_key() {
        let endpoints = EndpointConfig {
            api_key: "sk-secret".into(),
            ..Default::default()
        };
        let debug = format!("{endpoints:?}");
        assert!(!debug.contains("sk-secret"));
        assert!(debug.contains("REDACTED"));
    }

    #[test]
    fn storage_keys_default() {
        let storage = StorageConfig::default();
        assert_eq!(storage.history_key, "picasso-chat-history");
        assert_eq!(storage.settings_key, "picasso-settings");
        assert!(storage.dir.is_none());
    }
}
