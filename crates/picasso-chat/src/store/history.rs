//! Chat history codec: a JSON array of messages under one key.

use picasso_common::{Message, StoreError};
use tracing::warn;

use super::KeyValueStore;

/// Load the persisted history. Read or parse failures yield an empty
/// history (a fresh session).
pub fn load(store: &dyn KeyValueStore, key: &str) -> Vec<Message> {
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(e) => {
            warn!(key = %key, "failed to read chat history: {e}");
            return Vec::new();
        }
    };

    match serde_json::from_str(&raw) {
        Ok(messages) => messages,
        Err(e) => {
            warn!(key = %key, "discarding unreadable chat history: {e}");
            Vec::new()
        }
    }
}

pub fn save(store: &dyn KeyValueStore, key: &str, messages: &[Message]) -> Result<(), StoreError> {
    let json =
        serde_json::to_string(messages).map_err(|e| StoreError::Serialization(e.to_string()))?;
    store.set(key, &json)
}

pub fn erase(store: &dyn KeyValueStore, key: &str) -> Result<(), StoreError> {
    store.remove(key)
}
