pub mod errors;
pub mod id;
pub mod logging;
pub mod types;

pub use errors::{ChatError, ConfigError, PicassoError, StoreError};
pub use id::{new_id, MessageId};
pub use types::{Message, Mood, MoodData, Role};
