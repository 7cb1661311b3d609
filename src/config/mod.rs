//! Configuration management for the gateway
//!
//! All configuration comes from environment variables (plus an optional
//! `.env` file loaded at startup). There is no config file.

use crate::error::{GatewayError, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

/// Main configuration struct for the gateway
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Upload ingestion configuration
    #[serde(default)]
    pub upload: UploadConfig,
    /// OpenAI configuration (transcription and chat)
    #[serde(default)]
    pub openai: OpenAiConfig,
    /// Google Text-to-Speech configuration
    #[serde(default)]
    pub google: GoogleTtsConfig,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let config = Self {
            server: ServerConfig {
                host: env_or("HOST", default_host),
                port: parse_env("PORT", default_port)?,
                upstream_timeout_secs: parse_env("UPSTREAM_TIMEOUT_SECS", default_timeout)?,
            },
            upload: UploadConfig {
                strategy: parse_env("UPLOAD_STORAGE", UploadStrategy::default)?,
                dir: PathBuf::from(env_or("UPLOAD_DIR", default_upload_dir)),
                max_bytes: parse_env("MAX_UPLOAD_BYTES", default_max_upload_bytes)?,
            },
            openai: OpenAiConfig {
                api_key: env::var("OPENAI_API_KEY").unwrap_or_default(),
                api_base: env_or("OPENAI_API_BASE", default_openai_api_base),
            },
            google: GoogleTtsConfig {
                api_base: env_or("GOOGLE_TTS_API_BASE", default_google_api_base),
                credentials_json: env::var("GOOGLE_CREDENTIALS_JSON").ok(),
            },
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(GatewayError::config("Server port cannot be 0"));
        }
        if self.server.upstream_timeout_secs == 0 {
            return Err(GatewayError::config("Upstream timeout cannot be 0"));
        }
        if self.upload.max_bytes == 0 {
            return Err(GatewayError::config("Max upload size cannot be 0"));
        }
        if self.upload.dir.as_os_str().is_empty() {
            return Err(GatewayError::config("Upload directory cannot be empty"));
        }
        if self.openai.api_key.is_empty() {
            return Err(GatewayError::config(
                "OPENAI_API_KEY is required for transcription and chat",
            ));
        }
        Ok(())
    }
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host
    #[serde(default = "default_host")]
    pub host: String,
    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
    /// Upper bound on upstream call duration in seconds
    #[serde(default = "default_timeout")]
    pub upstream_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            upstream_timeout_secs: default_timeout(),
        }
    }
}

impl ServerConfig {
    /// Get the server bind address
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Upload ingestion configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    /// Where uploaded payloads are materialized before forwarding
    #[serde(default)]
    pub strategy: UploadStrategy,
    /// Directory for disk-backed uploads
    #[serde(default = "default_upload_dir_path")]
    pub dir: PathBuf,
    /// Maximum inbound body size in bytes
    #[serde(default = "default_max_upload_bytes")]
    pub max_bytes: usize,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            strategy: UploadStrategy::default(),
            dir: default_upload_dir_path(),
            max_bytes: default_max_upload_bytes(),
        }
    }
}

/// Upload storage strategy, selected at configuration time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UploadStrategy {
    /// Write the payload to a temporary file under the upload directory
    #[default]
    Disk,
    /// Hold the payload entirely in memory
    Memory,
}

impl std::str::FromStr for UploadStrategy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "disk" => Ok(Self::Disk),
            "memory" => Ok(Self::Memory),
            other => Err(format!("Unknown upload storage strategy: {}", other)),
        }
    }
}

/// OpenAI configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAiConfig {
    /// API key (Bearer credential)
    #[serde(default)]
    pub api_key: String,
    /// API base URL
    #[serde(default = "default_openai_api_base")]
    pub api_base: String,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_base: default_openai_api_base(),
        }
    }
}

/// Google Text-to-Speech configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoogleTtsConfig {
    /// API base URL
    #[serde(default = "default_google_api_base")]
    pub api_base: String,
    /// Inline service-account JSON; absent means ambient credential discovery
    #[serde(default)]
    pub credentials_json: Option<String>,
}

impl Default for GoogleTtsConfig {
    fn default() -> Self {
        Self {
            api_base: default_google_api_base(),
            credentials_json: None,
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_timeout() -> u64 {
    60
}

fn default_upload_dir() -> String {
    "uploads".to_string()
}

fn default_upload_dir_path() -> PathBuf {
    PathBuf::from(default_upload_dir())
}

fn default_max_upload_bytes() -> usize {
    10 * 1024 * 1024
}

fn default_openai_api_base() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_google_api_base() -> String {
    "https://texttospeech.googleapis.com/v1".to_string()
}

fn env_or(key: &str, default: fn() -> String) -> String {
    env::var(key).unwrap_or_else(|_| default())
}

fn parse_env<T>(key: &str, default: fn() -> T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .parse()
            .map_err(|e| GatewayError::config(format!("Invalid {}: {}", key, e))),
        Err(_) => Ok(default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> Config {
        Config {
            openai: OpenAiConfig {
                api_key: "sk-test".to_string(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.address(), "0.0.0.0:3000");
        assert_eq!(config.server.upstream_timeout_secs, 60);
        assert_eq!(config.upload.strategy, UploadStrategy::Disk);
        assert_eq!(config.upload.max_bytes, 10 * 1024 * 1024);
        assert_eq!(config.openai.api_base, "https://api.openai.com/v1");
        assert!(config.google.credentials_json.is_none());
    }

    #[test]
    fn test_validate_rejects_missing_api_key() {
        let config = Config::default();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("OPENAI_API_KEY"));
    }

    #[test]
    fn test_validate_rejects_zero_limits() {
        let mut config = valid_config();
        config.upload.max_bytes = 0;
        assert!(config.validate().is_err());

        let mut config = valid_config();
        config.server.port = 0;
        assert!(config.validate().is_err());

        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn test_upload_strategy_parsing() {
        assert_eq!("disk".parse::<UploadStrategy>().unwrap(), UploadStrategy::Disk);
        assert_eq!("MEMORY".parse::<UploadStrategy>().unwrap(), UploadStrategy::Memory);
        assert!("tape".parse::<UploadStrategy>().is_err());
    }
}
