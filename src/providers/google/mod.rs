//! Google Cloud Text-to-Speech client

pub mod auth;

use crate::config::GoogleTtsConfig;
use crate::error::{GatewayError, Result};
use crate::providers::SpeechBackend;
use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

pub use auth::{GoogleAuth, GoogleCredentials};

/// Text-to-speech synthesis request
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct SynthesizeSpeechRequest {
    input: SynthesisInput,
    voice: VoiceSelectionParams,
    audio_config: AudioConfig,
}

#[derive(Debug, Clone, Serialize)]
struct SynthesisInput {
    text: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct VoiceSelectionParams {
    language_code: String,
    name: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct AudioConfig {
    audio_encoding: &'static str,
}

/// Synthesis response; audio content is base64 encoded on the wire
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SynthesizeSpeechResponse {
    audio_content: String,
}

/// Google Cloud Text-to-Speech REST client
pub struct GoogleTtsClient {
    client: reqwest::Client,
    api_base: String,
    auth: GoogleAuth,
}

impl GoogleTtsClient {
    /// Create a client, resolving credentials once at startup
    pub async fn new(config: &GoogleTtsConfig, timeout: Duration) -> Result<Self> {
        let auth = GoogleAuth::discover(config.credentials_json.as_deref()).await?;
        Self::with_auth(config, timeout, auth)
    }

    /// Create a client with pre-resolved credentials
    pub fn with_auth(
        config: &GoogleTtsConfig,
        timeout: Duration,
        auth: GoogleAuth,
    ) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            auth,
        })
    }

    async fn upstream_error(response: reqwest::Response) -> GatewayError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        // Google error envelope: {"error": {"message": ..., "status": ...}}
        let message = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|v| {
                v.pointer("/error/message")
                    .and_then(|m| m.as_str())
                    .map(str::to_string)
            })
            .unwrap_or_else(|| format!("Speech synthesis failed with status {}", status));

        GatewayError::Upstream(message)
    }
}

#[async_trait]
impl SpeechBackend for GoogleTtsClient {
    async fn synthesize(
        &self,
        text: &str,
        language_code: &str,
        voice_name: &str,
    ) -> Result<Vec<u8>> {
        let url = format!("{}/text:synthesize", self.api_base);
        debug!("Synthesizing {} chars with voice {}", text.len(), voice_name);

        let request = SynthesizeSpeechRequest {
            input: SynthesisInput {
                text: text.to_string(),
            },
            voice: VoiceSelectionParams {
                language_code: language_code.to_string(),
                name: voice_name.to_string(),
            },
            audio_config: AudioConfig {
                audio_encoding: "MP3",
            },
        };

        let token = self.auth.access_token().await?;

        let response = self
            .client
            .post(&url)
            .bearer_auth(token)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GatewayError::Timeout("Speech synthesis request timed out".to_string())
                } else {
                    GatewayError::Upstream(format!("Speech synthesis request failed: {}", e))
                }
            })?;

        if !response.status().is_success() {
            return Err(Self::upstream_error(response).await);
        }

        let body: SynthesizeSpeechResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::Upstream(format!("Invalid synthesis response: {}", e)))?;

        general_purpose::STANDARD
            .decode(&body.audio_content)
            .map_err(|e| GatewayError::Upstream(format!("Invalid audio content encoding: {}", e)))
    }
}
