//! Chat session management.
//!
//! A `ChatSession` owns the mood-tagged message history, drives the
//! request cycle for each user message and keeps the persisted copy of
//! the history in step with every change.

mod chat;
mod manager;
mod state;
mod types;


pub use manager::ChatSession;
pub use state::SessionState;
pub use types::{SendOutcome, FALLBACK_REPLY};
