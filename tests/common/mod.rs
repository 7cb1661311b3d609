//! Shared test fixtures: substitute provider backends and request builders

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::Mutex;
use voice_gateway::config::{Config, OpenAiConfig, UploadConfig, UploadStrategy};
use voice_gateway::error::{GatewayError, Result};
use voice_gateway::providers::{ChatBackend, SpeechBackend, TranscriptionBackend};
use voice_gateway::server::AppState;

/// Transcriber that returns the uploaded bytes as UTF-8, counting calls.
///
/// Echoing the payload back lets tests verify that concurrent uploads are
/// not cross-delivered.
#[derive(Default)]
pub struct EchoTranscriber {
    pub calls: AtomicUsize,
}

#[async_trait]
impl TranscriptionBackend for EchoTranscriber {
    async fn transcribe(&self, audio: Vec<u8>, _filename: &str, _mime: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        // Interleave with the sibling request before responding
        tokio::task::yield_now().await;
        String::from_utf8(audio).map_err(|e| GatewayError::internal(e.to_string()))
    }
}

/// Transcriber that always returns a fixed transcript
pub struct FixedTranscriber {
    pub text: String,
    pub calls: AtomicUsize,
}

impl FixedTranscriber {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl TranscriptionBackend for FixedTranscriber {
    async fn transcribe(&self, _audio: Vec<u8>, _filename: &str, _mime: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.text.clone())
    }
}

/// Transcriber that always fails upstream
pub struct FailingTranscriber;

#[async_trait]
impl TranscriptionBackend for FailingTranscriber {
    async fn transcribe(&self, _audio: Vec<u8>, _filename: &str, _mime: &str) -> Result<String> {
        Err(GatewayError::upstream("Transcription failed"))
    }
}

/// Speech backend returning fixed audio bytes, counting calls
pub struct FixedSpeech {
    pub audio: Vec<u8>,
    pub calls: AtomicUsize,
}

impl FixedSpeech {
    pub fn new(audio: &[u8]) -> Self {
        Self {
            audio: audio.to_vec(),
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl SpeechBackend for FixedSpeech {
    async fn synthesize(&self, _text: &str, _language: &str, _voice: &str) -> Result<Vec<u8>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.audio.clone())
    }
}

/// Chat backend that captures the forwarded request and returns a canned
/// response
pub struct CapturingChat {
    pub response: Value,
    pub captured: Mutex<Option<Value>>,
    pub calls: AtomicUsize,
}

impl CapturingChat {
    pub fn new(response: Value) -> Self {
        Self {
            response,
            captured: Mutex::new(None),
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl ChatBackend for CapturingChat {
    async fn complete(&self, request: Value) -> Result<Value> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.captured.lock().await = Some(request);
        Ok(self.response.clone())
    }
}

/// Test configuration with the given upload strategy
pub fn test_config(strategy: UploadStrategy, dir: &std::path::Path) -> Config {
    Config {
        upload: UploadConfig {
            strategy,
            dir: dir.to_path_buf(),
            max_bytes: 1024 * 1024,
        },
        openai: OpenAiConfig {
            api_key: "sk-test".to_string(),
            ..Default::default()
        },
        ..Default::default()
    }
}

/// Build an AppState over substitute backends
pub fn test_state(
    config: Config,
    transcription: Arc<dyn TranscriptionBackend>,
    speech: Arc<dyn SpeechBackend>,
    chat: Arc<dyn ChatBackend>,
) -> AppState {
    AppState::new(config, transcription, speech, chat)
}

/// Build a multipart/form-data body with a single file field
pub fn multipart_body(boundary: &str, field: &str, filename: &str, content: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"{field}\"; \
             filename=\"{filename}\"\r\nContent-Type: audio/wav\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());
    body
}

/// Content-Type header value for a multipart body
pub fn multipart_content_type(boundary: &str) -> String {
    format!("multipart/form-data; boundary={boundary}")
}
