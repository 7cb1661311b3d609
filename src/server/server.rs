//! HTTP server core implementation

use crate::config::{Config, ServerConfig, UploadStrategy};
use crate::error::{GatewayError, Result};
use crate::providers::{GoogleTtsClient, OpenAiClient};
use crate::server::routes;
use crate::server::state::AppState;
use actix_cors::Cors;
use actix_web::dev::Service;
use actix_web::http::{Method, StatusCode};
use actix_web::{App, HttpServer as ActixHttpServer, middleware::Logger, web};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// HTTP server
pub struct HttpServer {
    config: ServerConfig,
    state: AppState,
}

impl HttpServer {
    /// Create a new HTTP server, constructing the provider clients from
    /// configuration
    pub async fn new(config: &Config) -> Result<Self> {
        info!("Creating HTTP server");

        if config.upload.strategy == UploadStrategy::Disk {
            tokio::fs::create_dir_all(&config.upload.dir).await?;
        }

        let timeout = Duration::from_secs(config.server.upstream_timeout_secs);
        let openai = Arc::new(OpenAiClient::new(&config.openai, timeout)?);
        let google = Arc::new(GoogleTtsClient::new(&config.google, timeout).await?);

        let state = AppState::new(config.clone(), openai.clone(), google, openai);

        Ok(Self {
            config: config.server.clone(),
            state,
        })
    }

    /// Create the Actix-web application
    fn create_app(
        state: web::Data<AppState>,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        let max_bytes = state.config.upload.max_bytes;

        // All responses permit cross-origin access from any origin
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header()
            .send_wildcard()
            .max_age(3600);

        App::new()
            .app_data(state)
            .app_data(routes::json_config(max_bytes))
            .app_data(web::PayloadConfig::new(max_bytes))
            .wrap(cors)
            // The Cors layer answers preflights with 200; rewrite to 204
            .wrap_fn(|req, srv| {
                let is_preflight = req.method() == Method::OPTIONS;
                let fut = srv.call(req);
                async move {
                    let mut res = fut.await?;
                    if is_preflight && res.status().is_success() {
                        *res.response_mut().status_mut() = StatusCode::NO_CONTENT;
                    }
                    Ok(res)
                }
            })
            .wrap(Logger::default())
            .configure(routes::configure)
    }

    /// Start the HTTP server
    pub async fn start(self) -> Result<()> {
        let bind_addr = self.config.address();
        info!("Starting HTTP server on {}", bind_addr);

        let state = web::Data::new(self.state);

        let server = ActixHttpServer::new(move || Self::create_app(state.clone()))
            .bind(&bind_addr)
            .map_err(|e| {
                GatewayError::config(format!("Failed to bind to {}: {}", bind_addr, e))
            })?
            .run();

        info!("HTTP server listening on {}", bind_addr);

        server
            .await
            .map_err(|e| GatewayError::internal(format!("Server error: {}", e)))?;

        info!("HTTP server stopped");
        Ok(())
    }

    /// Get server configuration
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::UploadConfig;
    use crate::providers::{ChatBackend, SpeechBackend, TranscriptionBackend};
    use actix_web::test;
    use async_trait::async_trait;

    struct NoopBackend;

    #[async_trait]
    impl TranscriptionBackend for NoopBackend {
        async fn transcribe(
            &self,
            _audio: Vec<u8>,
            _filename: &str,
            _mime_type: &str,
        ) -> Result<String> {
            Ok(String::new())
        }
    }

    #[async_trait]
    impl SpeechBackend for NoopBackend {
        async fn synthesize(
            &self,
            _text: &str,
            _language_code: &str,
            _voice_name: &str,
        ) -> Result<Vec<u8>> {
            Ok(Vec::new())
        }
    }

    #[async_trait]
    impl ChatBackend for NoopBackend {
        async fn complete(&self, _request: serde_json::Value) -> Result<serde_json::Value> {
            Ok(serde_json::Value::Null)
        }
    }

    fn noop_state() -> AppState {
        let backend = Arc::new(NoopBackend);
        let config = Config {
            upload: UploadConfig {
                strategy: UploadStrategy::Memory,
                ..Default::default()
            },
            ..Default::default()
        };
        AppState::new(config, backend.clone(), backend.clone(), backend)
    }

    #[actix_web::test]
    async fn test_preflight_answers_204_with_cors_headers() {
        let app =
            test::init_service(HttpServer::create_app(web::Data::new(noop_state()))).await;

        let req = test::TestRequest::with_uri("/whisper")
            .method(Method::OPTIONS)
            .insert_header(("Origin", "https://example.com"))
            .insert_header(("Access-Control-Request-Method", "POST"))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::NO_CONTENT);
        assert_eq!(
            resp.headers()
                .get("access-control-allow-origin")
                .and_then(|v| v.to_str().ok()),
            Some("*")
        );
    }

    #[actix_web::test]
    async fn test_non_preflight_status_untouched() {
        let app =
            test::init_service(HttpServer::create_app(web::Data::new(noop_state()))).await;

        let req = test::TestRequest::get().uri("/").to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
    }
}
