//! Chat domain types shared by the store, the clients and the session.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::MessageId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// Coarse sentiment attached to user input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Happy,
    Sad,
    Anxious,
    Calm,
    Angry,
    #[default]
    Neutral,
}

impl Mood {
    pub const ALL: [Mood; 6] = [
        Mood::Happy,
        Mood::Sad,
        Mood::Anxious,
        Mood::Calm,
        Mood::Angry,
        Mood::Neutral,
    ];

    /// Wire label, as sent to the completion endpoint.
    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Happy => "happy",
            Mood::Sad => "sad",
            Mood::Anxious => "anxious",
            Mood::Calm => "calm",
            Mood::Angry => "angry",
            Mood::Neutral => "neutral",
        }
    }

    /// Emoji used when the classifier omits one.
    pub fn default_emoji(&self) -> &'static str {
        match self {
            Mood::Happy => "😊",
            Mood::Sad => "😢",
            Mood::Anxious => "😰",
            Mood::Calm => "😌",
            Mood::Angry => "😠",
            Mood::Neutral => "🙂",
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown mood label: {0}")]
pub struct UnknownMood(pub String);

impl FromStr for Mood {
    type Err = UnknownMood;

    /// Case-insensitive, surrounding whitespace ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Mood::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(needle))
            .ok_or_else(|| UnknownMood(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodData {
    pub mood: Mood,
    pub confidence: f64,
    pub emoji: String,
}

impl MoodData {
    pub const FALLBACK_CONFIDENCE: f64 = 0.5;

    /// `{neutral, 0.5, "🙂"}`: used whenever classification fails and as
    /// the session's initial mood.
    pub fn fallback() -> Self {
        Self {
            mood: Mood::Neutral,
            confidence: Self::FALLBACK_CONFIDENCE,
            emoji: Mood::Neutral.default_emoji().to_string(),
        }
    }
}

impl Default for MoodData {
    fn default() -> Self {
        Self::fallback()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    pub role: Role,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mood: Option<MoodData>,
    #[serde(with = "rfc3339")]
    pub timestamp: DateTime<Utc>,
}

impl Message {
    pub fn user(content: impl Into<String>, mood: MoodData) -> Self {
        Self {
            id: MessageId::new(),
            role: Role::User,
            content: content.into(),
            mood: Some(mood),
            timestamp: Utc::now(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            id: MessageId::new(),
            role: Role::Assistant,
            content: content.into(),
            mood: None,
            timestamp: Utc::now(),
        }
    }
}

/// Timestamps as RFC 3339 UTC strings with a `Z` suffix.
///
/// Sub-second digits are kept as-is so a save/load cycle is lossless;
/// millisecond strings such as `2024-05-01T10:00:00.123Z` parse too.
mod rfc3339 {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&ts.to_rfc3339_opts(SecondsFormat::AutoSi, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mood_parses_case_insensitively() {
        assert_eq!("Happy".parse::<Mood>().unwrap(), Mood::Happy);
        assert_eq!("  ANXIOUS ".parse::<Mood>().unwrap(), Mood::Anxious);
        assert!("ecstatic".parse::<Mood>().is_err());
    }

    #[test]
    fn mood_serializes_lowercase() {
        let json = serde_json::to_string(&Mood::Calm).unwrap();
        assert_eq!(json, "\"calm\"");
    }

    #[test]
    fn fallback_mood_is_neutral() {
        let fallback = MoodData::fallback();
        assert_eq!(fallback.mood, Mood::Neutral);
        assert_eq!(fallback.confidence, 0.5);
        assert_eq!(fallback.emoji, "🙂");
        assert_eq!(MoodData::default(), fallback);
    }

    #[test]
    fn assistant_message_has_no_mood() {
        let msg = Message::assistant("hi");
        assert_eq!(msg.role, Role::Assistant);
        assert!(msg.mood.is_none());
        let json = serde_json::to_value(&msg).unwrap();
        assert!(json.get("mood").is_none());
    }

    #[test]
    fn message_timestamp_is_rfc3339_with_z() {
        let msg = Message::user("hello", MoodData::fallback());
        let json = serde_json::to_value(&msg).unwrap();
        let ts = json["timestamp"].as_str().unwrap();
        assert!(ts.ends_with('Z'));
        let back: Message = serde_json::from_value(json).unwrap();
        assert_eq!(back, msg);
    }

    #[test]
    fn message_accepts_millisecond_iso_timestamps() {
        let json = r#"{
            "id": "m1",
            "role": "user",
            "content": "hey",
            "mood": {"mood": "sad", "confidence": 0.8, "emoji": "😢"},
            "timestamp": "2024-05-01T10:00:00.123Z"
        }"#;
        let msg: Message = serde_json::from_str(json).unwrap();
        assert_eq!(msg.id.as_str(), "m1");
        assert_eq!(msg.mood.unwrap().mood, Mood::Sad);
        assert_eq!(msg.timestamp.timestamp_subsec_millis(), 123);
    }

    #[test]
    fn message_rejects_garbage_timestamp() {
        let json = r#"{"id":"m1","role":"assistant","content":"","timestamp":"yesterday"}"#;
        assert!(serde_json::from_str::<Message>(json).is_err());
    }
}
