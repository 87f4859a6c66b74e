//! Streaming chat-completion client.
//!
//! `POST {messages: [{role, content}], mood}`; a successful response is a
//! `text/event-stream` decoded by [`crate::streaming`]. Error responses are
//! JSON `{error}` with 429 meaning "retry later" and 402 "add credits".

use async_trait::async_trait;
use futures_util::StreamExt;
use picasso_common::{ChatError, Message, Mood, Role};
use picasso_config::{EndpointConfig, HttpConfig};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::http::{build_client, with_auth};
use crate::streaming::ByteStream;

/// One history entry as sent upstream: mood and identity stripped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: Role,
    pub content: String,
}

impl From<&Message> for ChatTurn {
    fn from(message: &Message) -> Self {
        Self {
            role: message.role,
            content: message.content.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionRequest {
    pub messages: Vec<ChatTurn>,
    pub mood: Mood,
}

impl CompletionRequest {
    pub fn from_history(history: &[Message], mood: Mood) -> Self {
        Self {
            messages: history.iter().map(ChatTurn::from).collect(),
            mood,
        }
    }
}

#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Open the response stream. Errors here mean no byte was received.
    async fn stream(&self, request: &CompletionRequest) -> Result<ByteStream, ChatError>;
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// Map a non-success status and its body onto the error taxonomy.
pub fn classify_error(status: u16, body: &str) -> ChatError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .map(|b| b.error)
        .unwrap_or_else(|_| body.chars().take(200).collect());

    match status {
        429 => ChatError::RateLimited(message),
        402 => ChatError::QuotaExhausted(message),
        _ => ChatError::Status { status, message },
    }
}

/// Completion client backed by the gateway's chat function.
pub struct HttpCompletionClient {
    url: String,
    api_key: String,
    http: reqwest::Client,
}

impl HttpCompletionClient {
    pub fn new(endpoints: &EndpointConfig, http: &HttpConfig) -> Result<Self, ChatError> {
        Ok(Self::with_client(endpoints, build_client(http)?))
    }

    pub fn with_client(endpoints: &EndpointConfig, http: reqwest::Client) -> Self {
        Self {
            url: endpoints.chat_url(),
            api_key: endpoints.api_key.clone(),
            http,
        }
    }
}

#[async_trait]
impl CompletionClient for HttpCompletionClient {
    async fn stream(&self, request: &CompletionRequest) -> Result<ByteStream, ChatError> {
        debug!(
            turns = request.messages.len(),
            mood = %request.mood,
            "completion streaming request"
        );

        let response = with_auth(self.http.post(&self.url), &self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| ChatError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(classify_error(status.as_u16(), &text));
        }

        if response.content_length() == Some(0) {
            return Err(ChatError::MissingBody);
        }

        let bytes = response
            .bytes_stream()
            .map(|chunk| chunk.map_err(|e| ChatError::Network(e.to_string())));
        Ok(Box::pin(bytes))
    }
}
