//! # voice-gateway
//!
//! Minimal HTTP gateway that accepts audio uploads and JSON payloads and
//! forwards them to third-party cloud APIs, returning the provider's
//! response to the caller.
//!
//! ## Endpoints
//!
//! - `POST /whisper` — multipart audio upload, forwarded to OpenAI Whisper,
//!   returns `{"transcript": "..."}`
//! - `POST /tts` — `{text, languageCode, voiceName}`, forwarded to Google
//!   Cloud Text-to-Speech, returns raw MP3 bytes
//! - `POST /chat` — `{model, messages, temperature?}`, forwarded to the
//!   OpenAI chat completions API, upstream response mirrored verbatim
//! - `GET /` — liveness check
//!
//! There is no original processing logic: each handler validates its input,
//! performs exactly one outbound call, and writes exactly one response.
//! Temporary uploaded files are deleted after the call completes.

pub mod config;
pub mod error;
pub mod ingest;
pub mod providers;
pub mod server;

pub use config::Config;
pub use error::{GatewayError, Result};
