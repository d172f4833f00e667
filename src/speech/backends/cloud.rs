//! Cloud TTS backend
//!
//! Speaks through an ElevenLabs-style HTTPS API: POST the word as JSON,
//! get raw MP3 bytes back. The API key is read once at startup; when it
//! is missing the backend still constructs, but every synthesis attempt
//! short-circuits with the same credential error instead of touching
//! the network.

use crate::session::config::Config;
use crate::speech::{AudioArtifact, AudioEncoding, Synthesizer};
use crate::{Result, SpellError};
use log::{debug, error, warn};
use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde::Serialize;
use std::time::Duration;

/// Request body for the synthesis endpoint
#[derive(Debug, Serialize)]
struct SynthesisRequest<'a> {
    text: &'a str,
    model_id: &'a str,
}

/// Cloud synthesizer over a blocking HTTP client
pub struct CloudSynth {
    client: Client,

    /// Full URL for the configured voice
    url: String,

    /// API key, if configured. None degrades every call to a
    /// credential error.
    api_key: Option<String>,

    /// TTS model identifier sent with each request
    model_id: String,

    /// Backend name for logs/UI
    description: String,
}

impl CloudSynth {
    /// Create a new cloud synthesizer from configuration
    ///
    /// Never fails on a missing key; that is reported per-call so the
    /// rest of the quiz stays usable.
    pub fn new(config: &Config) -> Result<Self> {
        let timeout = Duration::from_secs(config.timeout_secs());
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SpellError::Backend(format!("failed to build HTTP client: {}", e)))?;

        let url = format!(
            "{}/{}",
            config.cloud_endpoint().trim_end_matches('/'),
            config.cloud_voice_id()
        );

        let api_key = config.api_key();
        if api_key.is_none() {
            warn!("No TTS API key configured; synthesis will be unavailable");
        }

        debug!("Cloud TTS endpoint: {} (timeout {:?})", url, timeout);

        Ok(Self {
            client,
            url,
            api_key,
            model_id: config.cloud_model_id(),
            description: "cloud TTS API".to_string(),
        })
    }

    /// Whether an API key is configured
    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }

    /// The warning shown when no key is configured
    pub fn missing_credential_error() -> SpellError {
        SpellError::MissingCredential(
            "set SPELLDRILL_API_KEY or [cloud] api_key in the config file".to_string(),
        )
    }
}

impl Synthesizer for CloudSynth {
    fn synthesize(&mut self, word: &str) -> Result<AudioArtifact> {
        if word.is_empty() {
            return Err(SpellError::Backend("cannot synthesize an empty word".to_string()));
        }

        let Some(api_key) = self.api_key.as_deref() else {
            debug!("Skipping synthesis of {:?}: no API key", word);
            return Err(Self::missing_credential_error());
        };

        let body = SynthesisRequest {
            text: word,
            model_id: &self.model_id,
        };

        debug!("Requesting synthesis of {:?} from {}", word, self.url);
        let response = self
            .client
            .post(&self.url)
            .header("xi-api-key", api_key)
            .json(&body)
            .send()
            .map_err(|e| {
                error!("TTS request for {:?} failed: {}", word, e);
                if e.is_timeout() {
                    SpellError::Backend("TTS request timed out".to_string())
                } else {
                    SpellError::Backend("could not reach the TTS service".to_string())
                }
            })?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            let detail = response.text().unwrap_or_default();
            error!("TTS service rejected the API key ({}): {}", status, detail);
            return Err(SpellError::Config(format!(
                "the TTS service rejected the configured API key (HTTP {})",
                status.as_u16()
            )));
        }

        if !status.is_success() {
            // Error bodies are JSON on this API; decode best-effort for the log
            let detail = response
                .text()
                .ok()
                .and_then(|t| serde_json::from_str::<serde_json::Value>(&t).ok())
                .map(|v| v.to_string())
                .unwrap_or_else(|| "<no body>".to_string());
            error!("TTS service returned {} for {:?}: {}", status, word, detail);
            return Err(SpellError::Backend(format!(
                "the TTS service failed (HTTP {})",
                status.as_u16()
            )));
        }

        let bytes = response.bytes().map_err(|e| {
            error!("Failed to read TTS response body: {}", e);
            SpellError::Backend("failed to read audio from the TTS service".to_string())
        })?;

        debug!("Received {} bytes of MP3 for {:?}", bytes.len(), word);
        Ok(AudioArtifact::from_bytes(bytes.to_vec(), AudioEncoding::Mp3))
    }

    fn describe(&self) -> &str {
        &self.description
    }
}
