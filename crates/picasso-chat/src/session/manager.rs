//! `ChatSession`: construction, accessors, and the non-streaming operations.

use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, MutexGuard};

use picasso_common::{Message, MessageId, MoodData, PicassoError};
use picasso_config::{validation, AppSettings, PicassoConfig, SettingUpdate, StorageConfig};
use tracing::{debug, info, warn};

use crate::completion::{CompletionClient, HttpCompletionClient};
use crate::mood::{HttpMoodClassifier, MoodClassifier};
use crate::store::{self, FileStore, KeyValueStore};

use super::state::SessionState;

/// The stateful chat orchestrator.
///
/// Methods take `&self`; the state mutex is never held across an await.
/// Every state mutation is followed by a synchronous write of the full
/// history to the store.
pub struct ChatSession {
    pub(super) state: Mutex<SessionState>,
    pub(super) store: Arc<dyn KeyValueStore>,
    pub(super) mood: Arc<dyn MoodClassifier>,
    pub(super) completion: Arc<dyn CompletionClient>,
    pub(super) history_key: String,
    pub(super) settings_key: String,
    /// Set for the whole duration of a `send_message` call.
    pub(super) busy: AtomicBool,
}

impl ChatSession {
    /// Build a session, reloading history from `store`.
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        mood: Arc<dyn MoodClassifier>,
        completion: Arc<dyn CompletionClient>,
        storage: &StorageConfig,
    ) -> Self {
        let messages = store::history::load(store.as_ref(), &storage.history_key);
        debug!(restored = messages.len(), "chat session created");

        Self {
            state: Mutex::new(SessionState::restore(messages)),
            store,
            mood,
            completion,
            history_key: storage.history_key.clone(),
            settings_key: storage.settings_key.clone(),
            busy: AtomicBool::new(false),
        }
    }

    /// Wire the HTTP clients and the on-disk store from config.
    pub fn from_config(config: &PicassoConfig) -> Result<Self, PicassoError> {
        let store = match &config.storage.dir {
            Some(dir) => FileStore::open(dir)?,
            None => FileStore::open_default()?,
        };
        info!(dir = %store.dir().display(), "using file store");

        let mood = HttpMoodClassifier::new(&config.endpoints, &config.http)?;
        let completion = HttpCompletionClient::new(&config.endpoints, &config.http)?;

        Ok(Self::new(
            Arc::new(store),
            Arc::new(mood),
            Arc::new(completion),
            &config.storage,
        ))
    }

    pub(super) fn lock(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Apply a mutation and persist the resulting history.
    pub(super) fn mutate<R>(&self, f: impl FnOnce(&mut SessionState) -> R) -> R {
        let mut state = self.lock();
        let result = f(&mut state);
        self.persist(&state);
        result
    }

    fn persist(&self, state: &SessionState) {
        if let Err(e) = store::history::save(self.store.as_ref(), &self.history_key, state.messages())
        {
            warn!("failed to persist chat history: {e}");
        }
    }

    /// Snapshot of the ordered history.
    pub fn messages(&self) -> Vec<Message> {
        self.lock().messages().to_vec()
    }

    /// Snapshot of the whole session state.
    pub fn snapshot(&self) -> SessionState {
        self.lock().clone()
    }

    pub fn current_mood(&self) -> MoodData {
        self.lock().current_mood().clone()
    }

    /// True while a streamed reply is in flight.
    pub fn is_loading(&self) -> bool {
        self.lock().is_loading()
    }

    /// Empty the history, reset the mood and erase the persisted history.
    pub fn clear_chat(&self) {
        let mut state = self.lock();
        state.clear();
        if let Err(e) = store::history::erase(self.store.as_ref(), &self.history_key) {
            warn!("failed to erase chat history: {e}");
        }
        info!("chat cleared");
    }

    /// Remove one message. Returns false (and changes nothing) when absent.
    pub fn delete_message(&self, id: &MessageId) -> bool {
        let mut state = self.lock();
        if !state.delete(id) {
            return false;
        }
        self.persist(&state);
        true
    }

    pub fn settings(&self) -> AppSettings {
        store::settings::load(self.store.as_ref(), &self.settings_key)
    }

    /// Validate and persist a single settings change.
    pub fn update_setting(&self, update: SettingUpdate) -> Result<AppSettings, PicassoError> {
        let mut candidate = self.settings();
        candidate.apply(update);
        validation::validate_settings(&candidate)?;
        Ok(store::settings::update(
            self.store.as_ref(),
            &self.settings_key,
            update,
        )?)
    }
}
