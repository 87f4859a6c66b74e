//! Mood classification client.
//!
//! One `POST {text}` per user utterance; the endpoint answers
//! `{mood, confidence, emoji}`. Any failure degrades to
//! [`MoodData::fallback`] so classification can never block sending.

use async_trait::async_trait;
use picasso_common::{ChatError, Mood, MoodData};
use picasso_config::{EndpointConfig, HttpConfig};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::http::{build_client, with_auth};

#[async_trait]
pub trait MoodClassifier: Send + Sync {
    /// Classify `text`. Infallible: failures yield the neutral fallback.
    async fn classify(&self, text: &str) -> MoodData;
}

/// Response body as sent by the endpoint, before normalisation.
#[derive(Debug, Deserialize)]
struct RawMood {
    mood: String,
    #[serde(default)]
    confidence: Option<f64>,
    #[serde(default)]
    emoji: Option<String>,
}

/// Normalise an endpoint response. `None` when the label is unknown.
fn normalize(raw: RawMood) -> Option<MoodData> {
    let mood: Mood = raw.mood.parse().ok()?;
    let confidence = match raw.confidence {
        Some(c) if c.is_finite() => c.clamp(0.0, 1.0),
        _ => MoodData::FALLBACK_CONFIDENCE,
    };
    let emoji = raw
        .emoji
        .map(|e| e.trim().to_string())
        .filter(|e| !e.is_empty())
        .unwrap_or_else(|| mood.default_emoji().to_string());

    Some(MoodData {
        mood,
        confidence,
        emoji,
    })
}

/// Parse a response body into a `MoodData`, or the fallback.
pub fn parse_mood_response(body: &str) -> MoodData {
    match serde_json::from_str::<RawMood>(body) {
        Ok(raw) => normalize(raw).unwrap_or_else(|| {
            warn!("mood endpoint returned an unknown label");
            MoodData::fallback()
        }),
        Err(e) => {
            warn!("unreadable mood response: {e}");
            MoodData::fallback()
        }
    }
}

/// Mood classifier backed by the gateway's analyze-mood function.
pub struct HttpMoodClassifier {
    url: String,
    api_key: String,
    http: reqwest::Client,
}

impl HttpMoodClassifier {
    pub fn new(endpoints: &EndpointConfig, http: &HttpConfig) -> Result<Self, ChatError> {
        Ok(Self::with_client(endpoints, build_client(http)?))
    }

    pub fn with_client(endpoints: &EndpointConfig, http: reqwest::Client) -> Self {
        Self {
            url: endpoints.mood_url(),
            api_key: endpoints.api_key.clone(),
            http,
        }
    }

    async fn request(&self, text: &str) -> Result<String, ChatError> {
        let response = with_auth(self.http.post(&self.url), &self.api_key)
            .json(&serde_json::json!({ "text": text }))
            .send()
            .await
            .map_err(|e| ChatError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ChatError::Status {
                status: status.as_u16(),
                message: String::new(),
            });
        }

        response
            .text()
            .await
            .map_err(|e| ChatError::Network(e.to_string()))
    }
}

#[async_trait]
impl MoodClassifier for HttpMoodClassifier {
    async fn classify(&self, text: &str) -> MoodData {
        debug!(len = text.len(), "mood classification request");
        match self.request(text).await {
            Ok(body) => parse_mood_response(&body),
            Err(e) => {
                warn!("mood classification failed, using fallback: {e}");
                MoodData::fallback()
            }
        }
    }
}

/// Classifier that always answers the same mood. Useful offline.
#[derive(Debug, Clone, Default)]
pub struct FixedMoodClassifier(pub MoodData);

#[async_trait]
impl MoodClassifier for FixedMoodClassifier {
    async fn classify(&self, _text: &str) -> MoodData {
        self.0.clone()
    }
}
