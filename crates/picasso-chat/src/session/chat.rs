//! `send_message`: mood, user message, streamed reply.

use futures_util::StreamExt;
use picasso_common::ChatError;
use tracing::{debug, info, warn};

use crate::completion::CompletionRequest;
use crate::streaming::fragment_stream;

use super::manager::ChatSession;
use super::types::{InFlight, SendOutcome, FALLBACK_REPLY};

/// Clears `loading` if a send is dropped mid-stream.
struct ReplyGuard<'a> {
    session: &'a ChatSession,
}

impl Drop for ReplyGuard<'_> {
    fn drop(&mut self) {
        if self.session.lock().is_loading() {
            self.session.mutate(|state| state.finish_reply());
        }
    }
}

impl ChatSession {
    /// Send a user message and stream the assistant's reply into the history.
    ///
    /// No-op for blank input or while another send is in flight. Failures
    /// never propagate: a failed request leaves a fixed fallback reply in
    /// the transcript, after whatever partial reply had already streamed.
    pub async fn send_message(&self, text: &str) -> SendOutcome {
        if text.trim().is_empty() {
            return SendOutcome::Ignored;
        }
        let Some(_in_flight) = InFlight::claim(&self.busy) else {
            debug!("send ignored, a reply is already in flight");
            return SendOutcome::Ignored;
        };

        let mood = self.mood.classify(text).await;
        debug!(mood = %mood.mood, confidence = mood.confidence, "classified user message");

        let request = self.mutate(|state| {
            state.set_mood(mood.clone());
            state.push_user(text, mood.clone());
            state.begin_reply();
            CompletionRequest::from_history(state.messages(), mood.mood)
        });
        let _reply = ReplyGuard { session: self };

        let (fragments, result) = self.stream_reply(&request).await;

        self.mutate(|state| {
            if result.is_err() {
                state.push_fallback(FALLBACK_REPLY);
            }
            state.finish_reply();
        });

        match result {
            Ok(()) => {
                info!(fragments, "assistant reply complete");
                SendOutcome::Completed { fragments }
            }
            Err(e) => {
                warn!(fragments, "chat request failed: {e}");
                SendOutcome::Failed(e)
            }
        }
    }

    /// Consume the completion stream, folding each fragment in before the
    /// next one is read. Returns the fragment count and how the stream ended.
    async fn stream_reply(&self, request: &CompletionRequest) -> (usize, Result<(), ChatError>) {
        let body = match self.completion.stream(request).await {
            Ok(body) => body,
            Err(e) => return (0, Err(e)),
        };

        let mut fragments = std::pin::pin!(fragment_stream(body));
        let mut count = 0;
        while let Some(item) = fragments.next().await {
            match item {
                Ok(fragment) => {
                    self.mutate(|state| state.apply_fragment(&fragment));
                    count += 1;
                }
                Err(e) => return (count, Err(e)),
            }
        }
        (count, Ok(()))
    }
}
