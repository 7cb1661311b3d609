//! Chat completion endpoint
//!
//! Forwards the request body to the chat backend and mirrors the upstream
//! response verbatim. Only presence of `model` and `messages` is checked;
//! `temperature` defaults to 0.7 when absent.

use crate::server::routes::errors;
use crate::server::state::AppState;
use actix_web::{HttpResponse, Result as ActixResult, web};
use serde_json::{Value, json};
use tracing::{error, info, warn};

const MISSING_FIELD_MESSAGE: &str = "Missing model or messages in request";

const DEFAULT_TEMPERATURE: f64 = 0.7;

/// Chat completion endpoint
pub async fn completions(
    state: web::Data<AppState>,
    body: web::Json<Value>,
) -> ActixResult<HttpResponse> {
    let mut body = body.into_inner();

    let Some(request) = body.as_object_mut() else {
        warn!("Rejected chat request: body is not a JSON object");
        return Ok(errors::validation_error(MISSING_FIELD_MESSAGE));
    };

    let model_missing = request
        .get("model")
        .and_then(Value::as_str)
        .map_or(true, str::is_empty);
    let messages_missing = request.get("messages").map_or(true, Value::is_null);
    if model_missing || messages_missing {
        warn!("Rejected chat request with missing fields");
        return Ok(errors::validation_error(MISSING_FIELD_MESSAGE));
    }

    // A null temperature counts as absent
    if request.get("temperature").map_or(true, Value::is_null) {
        request.insert("temperature".to_string(), json!(DEFAULT_TEMPERATURE));
    }

    info!(
        "Chat completion request for model: {}",
        request["model"].as_str().unwrap_or_default()
    );

    match state.chat.complete(body).await {
        Ok(response) => Ok(HttpResponse::Ok().json(response)),
        Err(e) => {
            error!("Chat proxy error: {}", e);
            Ok(errors::error_response(&e))
        }
    }
}
