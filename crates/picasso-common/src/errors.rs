use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("storage io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage serialization error: {0}")]
    Serialization(String),

    #[error("storage location unavailable: {0}")]
    Unavailable(String),
}

/// Failures of the completion request cycle.
///
/// Mood classification never produces one of these; it degrades to the
/// neutral fallback instead.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChatError {
    #[error("network error: {0}")]
    Network(String),

    #[error("rate limited: {0}")]
    RateLimited(String),

    #[error("usage quota exhausted: {0}")]
    QuotaExhausted(String),

    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("response has no body")]
    MissingBody,
}

impl ChatError {
    /// Short text a presentation layer can show next to the transcript.
    pub fn user_message(&self) -> &'static str {
        match self {
            ChatError::RateLimited(_) => "Rate limit exceeded. Please try again in a moment.",
            ChatError::QuotaExhausted(_) => "Usage limit reached. Please add credits to continue.",
            _ => "Something went wrong. Please try again.",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PicassoError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Chat(#[from] ChatError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_display() {
        let err = ConfigError::FileNotFound(PathBuf::from("/tmp/missing.toml"));
        assert_eq!(err.to_string(), "config file not found: /tmp/missing.toml");

        let err = ConfigError::ValidationError("endpoints.base_url is empty".into());
        assert_eq!(
            err.to_string(),
            "config validation error: endpoints.base_url is empty"
        );
    }

    #[test]
    fn chat_error_display() {
        let err = ChatError::Status {
            status: 500,
            message: "boom".into(),
        };
        assert_eq!(err.to_string(), "HTTP 500: boom");
        assert_eq!(ChatError::MissingBody.to_string(), "response has no body");
    }

    #[test]
    fn user_message_distinguishes_rate_limit_and_quota() {
        let rate = ChatError::RateLimited("slow down".into());
        let quota = ChatError::QuotaExhausted("pay up".into());
        assert!(rate.user_message().contains("try again"));
        assert!(quota.user_message().contains("add credits"));
        assert_eq!(
            ChatError::Network("reset".into()).user_message(),
            ChatError::MissingBody.user_message()
        );
    }

    #[test]
    fn picasso_error_from_store() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
        let store_err: StoreError = io_err.into();
        let err: PicassoError = store_err.into();
        assert!(matches!(err, PicassoError::Store(StoreError::Io(_))));
        assert!(err.to_string().contains("read-only"));
    }

    #[test]
    fn picasso_error_from_chat() {
        let err: PicassoError = ChatError::RateLimited("slow down".into()).into();
        assert!(matches!(err, PicassoError::Chat(ChatError::RateLimited(_))));
        assert_eq!(err.to_string(), "rate limited: slow down");
    }
}
