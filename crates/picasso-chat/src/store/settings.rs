//! App settings persisted under their own key.

use picasso_common::StoreError;
use picasso_config::{AppSettings, SettingUpdate};
use tracing::warn;

use super::KeyValueStore;

/// Load settings, merging stored fields over defaults.
pub fn load(store: &dyn KeyValueStore, key: &str) -> AppSettings {
    match store.get(key) {
        Ok(Some(raw)) => AppSettings::from_stored(&raw),
        Ok(None) => AppSettings::default(),
        Err(e) => {
            warn!(key = %key, "failed to read settings: {e}");
            AppSettings::default()
        }
    }
}

pub fn save(store: &dyn KeyValueStore, key: &str, settings: &AppSettings) -> Result<(), StoreError> {
    store.set(key, &settings.to_stored())
}

/// Apply one change and persist the result immediately.
pub fn update(
    store: &dyn KeyValueStore,
    key: &str,
    update: SettingUpdate,
) -> Result<AppSettings, StoreError> {
    let mut settings = load(store, key);
    settings.apply(update);
    save(store, key, &settings)?;
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use picasso_config::Theme;

    const KEY: &str = "picasso-settings";

    #[test]
    fn defaults_when_absent() {
        assert_eq!(load(&MemoryStore::new(), KEY), AppSettings::default());
    }

    #[test]
    fn update_persists() {
        let store = MemoryStore::new();
        let updated = update(&store, KEY, SettingUpdate::Theme(Theme::Light)).unwrap();
        assert_eq!(updated.theme, Theme::Light);

        let reloaded = load(&store, KEY);
        assert_eq!(reloaded, updated);
        assert_eq!(reloaded.voice_rate, 0.9);
    }

    #[test]
    fn partial_stored_object_keeps_defaults() {
        let store = MemoryStore::new();
        store.set(KEY, r#"{"voiceRate":1.5}"#).unwrap();
        let settings = load(&store, KEY);
        assert_eq!(settings.voice_rate, 1.5);
        assert_eq!(settings.voice_pitch, 1.0);
        assert_eq!(settings.theme, Theme::System);
    }
}
