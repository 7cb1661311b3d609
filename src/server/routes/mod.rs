//! HTTP route handlers
//!
//! One module per endpoint, plus the error-to-response mapping every
//! handler uses. Every failure yields a JSON body with an `error` field;
//! no fault escapes a handler without a body.

pub mod chat;
pub mod health;
pub mod tts;
pub mod whisper;

use actix_web::web;
use serde::Serialize;

/// Structured error body returned for every failure
#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    /// Description of the failure
    pub error: String,
}

impl ErrorBody {
    /// Create an error body
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

/// Register all routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(health::liveness))
        .route("/whisper", web::post().to(whisper::transcribe))
        .route("/tts", web::post().to(tts::synthesize))
        .route("/chat", web::post().to(chat::completions));
}

/// JSON extractor configuration whose rejections carry the same error body
/// as handler failures instead of the default plain-text response
pub fn json_config(limit: usize) -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(limit)
        .error_handler(|err, _req| errors::json_payload_error(err))
}

/// Error response helpers
pub mod errors {
    use super::ErrorBody;
    use crate::error::GatewayError;
    use actix_web::HttpResponse;
    use actix_web::http::StatusCode;

    /// Convert a GatewayError to an HTTP response.
    ///
    /// Client input errors map to 400, oversized bodies to 413, everything
    /// else (upstream, auth, timeout, local resource failures) to 500 with
    /// the upstream message when available.
    pub fn error_response(error: &GatewayError) -> HttpResponse {
        let status = match error {
            GatewayError::Validation(_) => StatusCode::BAD_REQUEST,
            GatewayError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        HttpResponse::build(status).json(ErrorBody::new(error.public_message()))
    }

    /// Create a validation error response
    pub fn validation_error(message: &str) -> HttpResponse {
        HttpResponse::BadRequest().json(ErrorBody::new(message))
    }

    /// Convert a rejected JSON payload into an error with a structured body.
    ///
    /// Oversized bodies map to 413, malformed or mistyped ones to 400.
    pub fn json_payload_error(err: actix_web::error::JsonPayloadError) -> actix_web::Error {
        use actix_web::error::JsonPayloadError;

        let status = match &err {
            JsonPayloadError::Overflow { .. } | JsonPayloadError::OverflowKnownLength { .. } => {
                StatusCode::PAYLOAD_TOO_LARGE
            }
            _ => StatusCode::BAD_REQUEST,
        };
        let response = HttpResponse::build(status).json(ErrorBody::new(err.to_string()));

        actix_web::error::InternalError::from_response(err, response).into()
    }
}
