//! Application state shared across HTTP handlers

use crate::config::Config;
use crate::ingest::UploadStorage;
use crate::providers::{ChatBackend, SpeechBackend, TranscriptionBackend};
use std::sync::Arc;

/// HTTP server state shared across handlers.
///
/// The provider clients are immutable, constructed once at startup, and
/// injected as trait objects so handlers can be tested with substitutes.
#[derive(Clone)]
pub struct AppState {
    /// Gateway configuration (shared read-only)
    pub config: Arc<Config>,
    /// Speech-to-text backend
    pub transcription: Arc<dyn TranscriptionBackend>,
    /// Text-to-speech backend
    pub speech: Arc<dyn SpeechBackend>,
    /// Chat completion backend
    pub chat: Arc<dyn ChatBackend>,
    /// Upload storage strategy
    pub storage: Arc<UploadStorage>,
}

impl AppState {
    /// Create a new AppState with shared resources
    pub fn new(
        config: Config,
        transcription: Arc<dyn TranscriptionBackend>,
        speech: Arc<dyn SpeechBackend>,
        chat: Arc<dyn ChatBackend>,
    ) -> Self {
        let storage = Arc::new(UploadStorage::from_config(&config.upload));
        Self {
            config: Arc::new(config),
            transcription,
            speech,
            chat,
            storage,
        }
    }
}
