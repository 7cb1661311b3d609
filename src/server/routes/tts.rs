//! Speech synthesis endpoint

use crate::server::routes::errors;
use crate::server::state::AppState;
use actix_web::{HttpResponse, Result as ActixResult, web};
use serde::Deserialize;
use tracing::{error, info, warn};

const MISSING_FIELD_MESSAGE: &str = "Missing text, languageCode or voiceName";

/// Speech synthesis request body.
///
/// All fields are validated for presence here so a malformed request is
/// never forwarded upstream.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SynthesizeBody {
    /// Text to synthesize
    pub text: Option<String>,
    /// BCP-47 language tag, e.g. "en-US"
    pub language_code: Option<String>,
    /// Provider-specific voice identifier
    pub voice_name: Option<String>,
}

/// Speech synthesis endpoint; returns raw MP3 bytes
pub async fn synthesize(
    state: web::Data<AppState>,
    body: web::Json<SynthesizeBody>,
) -> ActixResult<HttpResponse> {
    let body = body.into_inner();

    let (text, language_code, voice_name) = match (
        non_empty(body.text),
        non_empty(body.language_code),
        non_empty(body.voice_name),
    ) {
        (Some(text), Some(language_code), Some(voice_name)) => (text, language_code, voice_name),
        _ => {
            warn!("Rejected synthesis request with missing fields");
            return Ok(errors::validation_error(MISSING_FIELD_MESSAGE));
        }
    };

    info!(
        "Speech synthesis request: language={}, voice={}, text_len={}",
        language_code,
        voice_name,
        text.len()
    );

    match state
        .speech
        .synthesize(&text, &language_code, &voice_name)
        .await
    {
        Ok(audio) => Ok(HttpResponse::Ok().content_type("audio/mpeg").body(audio)),
        Err(e) => {
            error!("TTS error: {}", e);
            Ok(errors::error_response(&e))
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}
