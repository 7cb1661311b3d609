//! Upstream provider clients
//!
//! Each capability the gateway proxies is a trait, so handlers depend on the
//! seam instead of a concrete client and can be exercised with substitutes
//! in tests. Real clients are constructed once at startup and shared.

pub mod google;
pub mod openai;

use crate::error::Result;
use async_trait::async_trait;

pub use google::GoogleTtsClient;
pub use openai::OpenAiClient;

/// Speech-to-text transcription
#[async_trait]
pub trait TranscriptionBackend: Send + Sync {
    /// Transcribe an audio payload to plain text.
    ///
    /// `filename` and `mime_type` are hints for the provider's format
    /// inference; some integrations require the filename extension even for
    /// in-memory buffers.
    async fn transcribe(&self, audio: Vec<u8>, filename: &str, mime_type: &str)
    -> Result<String>;
}

/// Text-to-speech synthesis
#[async_trait]
pub trait SpeechBackend: Send + Sync {
    /// Synthesize text to MP3-encoded audio bytes
    async fn synthesize(
        &self,
        text: &str,
        language_code: &str,
        voice_name: &str,
    ) -> Result<Vec<u8>>;
}

/// Chat completion
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Forward a chat completion request and return the provider response
    /// verbatim
    async fn complete(&self, request: serde_json::Value) -> Result<serde_json::Value>;
}
