//! Shared reqwest plumbing for the gateway clients.

use std::time::Duration;

use picasso_common::ChatError;
use picasso_config::HttpConfig;

/// Build the HTTP client used by both gateway clients.
///
/// A zero request timeout installs none, so a hung stream only ends when
/// the transport itself gives up.
pub fn build_client(config: &HttpConfig) -> Result<reqwest::Client, ChatError> {
    let mut builder =
        reqwest::Client::builder().connect_timeout(Duration::from_secs(config.connect_timeout_secs));
    if config.request_timeout_secs > 0 {
        builder = builder.timeout(Duration::from_secs(config.request_timeout_secs));
    }
    builder
        .build()
        .map_err(|e| ChatError::Network(format!("failed to build HTTP client: {e}")))
}

/// Attach `Authorization: Bearer` when a key is configured.
pub(crate) fn with_auth(request: reqwest::RequestBuilder, api_key: &str) -> reqwest::RequestBuilder {
    if api_key.is_empty() {
        request
    } else {
        request.bearer_auth(api_key)
    }
}
