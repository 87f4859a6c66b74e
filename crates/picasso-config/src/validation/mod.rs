//! Configuration and settings validation.
//!
//! Every check pushes onto a shared error list; the orchestrators join
//! them into a single `ConfigError::ValidationError`.

mod helpers;


use picasso_common::ConfigError;

use crate::schema::PicassoConfig;
use crate::settings::AppSettings;
use helpers::{validate_non_empty, validate_range, validate_range_f64};

pub const VOICE_RANGE: (f64, f64) = (0.5, 2.0);

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &PicassoConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    validate_endpoints(&mut errors, config);
    validate_http(&mut errors, config);
    validate_storage(&mut errors, config);

    finish(errors)
}

/// Validate user settings against the ranges the settings panel offers.
pub fn validate_settings(settings: &AppSettings) -> Result<(), ConfigError> {
    let mut errors = Vec::new();
    let (min, max) = VOICE_RANGE;
    validate_range_f64(&mut errors, "voiceRate", settings.voice_rate, min, max);
    validate_range_f64(&mut errors, "voicePitch", settings.voice_pitch, min, max);
    finish(errors)
}

fn finish(errors: Vec<String>) -> Result<(), ConfigError> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}

fn validate_endpoints(errors: &mut Vec<String>, config: &PicassoConfig) {
    let endpoints = &config.endpoints;
    validate_non_empty(errors, "endpoints.base_url", &endpoints.base_url);
    if !endpoints.base_url.trim().is_empty()
        && !(endpoints.base_url.starts_with("http://") || endpoints.base_url.starts_with("https://"))
    {
        errors.push(format!(
            "endpoints.base_url = {} must start with http:// or https://",
            endpoints.base_url
        ));
    }
    validate_non_empty(errors, "endpoints.chat_path", &endpoints.chat_path);
    validate_non_empty(errors, "endpoints.mood_path", &endpoints.mood_path);
}

fn validate_http(errors: &mut Vec<String>, config: &PicassoConfig) {
    validate_range(
        errors,
        "http.connect_timeout_secs",
        config.http.connect_timeout_secs,
        1,
        300,
    );
    validate_range(
        errors,
        "http.request_timeout_secs",
        config.http.request_timeout_secs,
        0,
        3600,
    );
}

fn validate_storage(errors: &mut Vec<String>, config: &PicassoConfig) {
    let storage = &config.storage;
    validate_non_empty(errors, "storage.history_key", &storage.history_key);
    validate_non_empty(errors, "storage.settings_key", &storage.settings_key);
    if storage.history_key == storage.settings_key {
        errors.push("storage.history_key and storage.settings_key must differ".into());
    }
}
