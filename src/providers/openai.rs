//! OpenAI client (Whisper transcription and chat completions)

use crate::config::OpenAiConfig;
use crate::error::{GatewayError, Result};
use crate::providers::{ChatBackend, TranscriptionBackend};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// Fixed transcription model identifier
pub const WHISPER_MODEL: &str = "whisper-1";

/// OpenAI API client
pub struct OpenAiClient {
    client: reqwest::Client,
    api_base: String,
    api_key: String,
}

/// Transcription response body; segments, timestamps, and confidence are
/// discarded
#[derive(Debug, Deserialize)]
struct TranscriptionResponse {
    text: String,
}

impl OpenAiClient {
    /// Create a new client with the configured upstream timeout
    pub fn new(config: &OpenAiConfig, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    /// Create multipart form for audio upload.
    ///
    /// The original filename is always sent as the file part name; the
    /// provider infers the audio format from its extension.
    fn transcription_form(
        audio: Vec<u8>,
        filename: &str,
        mime_type: &str,
    ) -> Result<reqwest::multipart::Form> {
        use reqwest::multipart;

        let file_part = multipart::Part::bytes(audio)
            .file_name(filename.to_string())
            .mime_str(mime_type)
            .map_err(|e| GatewayError::internal(format!("Invalid MIME type: {}", e)))?;

        Ok(multipart::Form::new()
            .part("file", file_part)
            .text("model", WHISPER_MODEL))
    }

    fn map_reqwest_error(e: reqwest::Error, operation: &str) -> GatewayError {
        if e.is_timeout() {
            GatewayError::Timeout(format!("{} request timed out", operation))
        } else {
            GatewayError::Upstream(format!("{} request failed: {}", operation, e))
        }
    }

    /// Extract the provider's error message from a non-success response body.
    ///
    /// OpenAI wraps errors as `{"error": {"message": ...}}`; fall back to the
    /// raw body, then to the status code.
    async fn upstream_error(response: reqwest::Response, operation: &str) -> GatewayError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        let message = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|v| {
                v.pointer("/error/message")
                    .and_then(|m| m.as_str())
                    .map(str::to_string)
            })
            .unwrap_or_else(|| {
                if body.trim().is_empty() {
                    format!("{} failed with status {}", operation, status)
                } else {
                    body
                }
            });

        GatewayError::Upstream(message)
    }
}

#[async_trait]
impl TranscriptionBackend for OpenAiClient {
    async fn transcribe(
        &self,
        audio: Vec<u8>,
        filename: &str,
        mime_type: &str,
    ) -> Result<String> {
        let url = format!("{}/audio/transcriptions", self.api_base);
        debug!("Forwarding {} byte upload to {}", audio.len(), url);

        let form = Self::transcription_form(audio, filename, mime_type)?;

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| Self::map_reqwest_error(e, "Transcription"))?;

        if !response.status().is_success() {
            return Err(Self::upstream_error(response, "Transcription").await);
        }

        let transcript: TranscriptionResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::Upstream(format!("Invalid transcription response: {}", e)))?;

        Ok(transcript.text)
    }
}

#[async_trait]
impl ChatBackend for OpenAiClient {
    async fn complete(&self, request: serde_json::Value) -> Result<serde_json::Value> {
        let url = format!("{}/chat/completions", self.api_base);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| Self::map_reqwest_error(e, "Chat completion"))?;

        if !response.status().is_success() {
            return Err(Self::upstream_error(response, "Chat completion").await);
        }

        response
            .json()
            .await
            .map_err(|e| GatewayError::Upstream(format!("Invalid chat response: {}", e)))
    }
}
