//! Chat engine for the Picasso companion.
//!
//! Provides:
//! - SSE fragment decoding tolerant of arbitrary chunk boundaries
//! - A mood classifier client with a neutral fallback
//! - A streaming completion client for the chat gateway
//! - `ChatSession`, which reconciles the streamed reply into a
//!   mood-tagged history kept in a key-value store

pub mod completion;
pub mod http;
pub mod mood;
pub mod session;
pub mod store;
pub mod streaming;

pub use completion::{ChatTurn, CompletionClient, CompletionRequest, HttpCompletionClient};
pub use mood::{FixedMoodClassifier, HttpMoodClassifier, MoodClassifier};
pub use session::{ChatSession, SendOutcome, SessionState, FALLBACK_REPLY};
pub use store::{FileStore, KeyValueStore, MemoryStore};
pub use streaming::{fragment_stream, ByteStream, FrameDecoder};

pub use picasso_common::{ChatError, Message, MessageId, Mood, MoodData, Role};
