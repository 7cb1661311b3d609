//! Audio transcription endpoint
//!
//! Accepts a multipart audio upload, forwards it to the transcription
//! backend, and returns `{"transcript": text}`. The ingested payload is
//! cleaned up exactly once per request, on success and failure paths alike.

use crate::error::Result;
use crate::ingest::{self, UploadedAudio};
use crate::server::routes::errors;
use crate::server::state::AppState;
use actix_multipart::Multipart;
use actix_web::{HttpResponse, Result as ActixResult, web};
use serde::Serialize;
use tracing::{error, info, warn};

/// Successful transcription response body
#[derive(Debug, Serialize)]
pub struct TranscriptBody {
    /// Plain-text transcript from the upstream service
    pub transcript: String,
}

/// Audio transcription endpoint
pub async fn transcribe(
    state: web::Data<AppState>,
    mut payload: Multipart,
) -> ActixResult<HttpResponse> {
    let audio = match ingest::receive_upload(
        &mut payload,
        &state.storage,
        state.config.upload.max_bytes,
    )
    .await
    {
        Ok(audio) => audio,
        Err(e) => {
            warn!("Rejected upload: {}", e);
            return Ok(errors::error_response(&e));
        }
    };

    info!("Received file: {}", audio.filename());

    // The upstream call happens between ingestion and cleanup; cleanup runs
    // regardless of how the call resolved.
    let result = forward_transcription(&state, &audio).await;
    audio.cleanup().await;

    match result {
        Ok(transcript) => Ok(HttpResponse::Ok().json(TranscriptBody { transcript })),
        Err(e) => {
            error!("Transcription error: {}", e);
            Ok(errors::error_response(&e))
        }
    }
}

async fn forward_transcription(state: &AppState, audio: &UploadedAudio) -> Result<String> {
    let bytes = audio.bytes().await?;
    state
        .transcription
        .transcribe(bytes, audio.filename(), audio.mime_type())
        .await
}
