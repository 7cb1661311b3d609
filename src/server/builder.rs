//! Server startup from environment configuration

use crate::config::Config;
use crate::error::Result;
use crate::server::server::HttpServer;
use tracing::info;

/// Run the server with configuration loaded from the environment
pub async fn run_server() -> Result<()> {
    info!("Starting voice-gateway");

    let config = Config::from_env()?;

    let server = HttpServer::new(&config).await?;
    info!(
        "Server starting at: http://{}",
        config.server.address()
    );
    info!("API Endpoints:");
    info!("   GET  /        - Health check");
    info!("   POST /whisper - Audio transcription");
    info!("   POST /tts     - Speech synthesis");
    info!("   POST /chat    - Chat completion");

    server.start().await
}
