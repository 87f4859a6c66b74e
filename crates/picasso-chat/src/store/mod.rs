//! Durable key-value text storage for chat history and settings.
//!
//! The session writes through a [`KeyValueStore`]; [`FileStore`] keeps one
//! file per key on disk, [`MemoryStore`] keeps everything in process.

mod file;
pub mod history;
mod memory;
pub mod settings;

pub use file::FileStore;
pub use memory::MemoryStore;

use picasso_common::StoreError;

/// Process-local, single-writer, last-write-wins text storage.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}
