//! Upload ingestion
//!
//! Receives a multipart audio upload and materializes it either as a
//! temporary on-disk file or as an in-memory buffer, behind one interface.
//! Both variants satisfy the same post-condition: the payload is available
//! as a byte source and `cleanup` discharges any filesystem obligation.

use crate::config::{UploadConfig, UploadStrategy};
use crate::error::{GatewayError, Result};
use actix_multipart::Multipart;
use futures::StreamExt;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};
use uuid::Uuid;

/// Multipart field names accepted for the audio payload.
///
/// Deployments of the original service disagreed on the field name, so the
/// gateway accepts both.
const AUDIO_FIELD_NAMES: &[&str] = &["file", "audio"];

const DEFAULT_FILENAME: &str = "audio.mp3";
const DEFAULT_MIME_TYPE: &str = "audio/mpeg";

/// Where uploaded payloads are materialized before forwarding
#[derive(Debug, Clone)]
pub enum UploadStorage {
    /// Temporary file under `dir`, removed after the request
    Disk {
        /// Directory holding temporary upload files
        dir: PathBuf,
    },
    /// In-memory buffer, no cleanup obligation
    Memory,
}

impl UploadStorage {
    /// Build the storage backend selected by configuration
    pub fn from_config(config: &UploadConfig) -> Self {
        match config.strategy {
            UploadStrategy::Disk => Self::Disk {
                dir: config.dir.clone(),
            },
            UploadStrategy::Memory => Self::Memory,
        }
    }
}

/// An ingested audio upload, scoped to a single request.
///
/// `filename` and `mime_type` are caller-supplied and untrusted; they are
/// used only as metadata hints for the upstream provider, never as storage
/// keys.
#[derive(Debug)]
pub struct UploadedAudio {
    filename: String,
    mime_type: String,
    payload: AudioPayload,
}

#[derive(Debug)]
enum AudioPayload {
    Memory(Vec<u8>),
    Disk(PathBuf),
}

impl UploadedAudio {
    /// Caller-supplied original filename
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Caller-supplied MIME type
    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// Read the full payload back as bytes for forwarding
    pub async fn bytes(&self) -> Result<Vec<u8>> {
        match &self.payload {
            AudioPayload::Memory(data) => Ok(data.clone()),
            AudioPayload::Disk(path) => Ok(tokio::fs::read(path).await?),
        }
    }

    /// Remove the temporary file, if any.
    ///
    /// Best-effort: a delete failure is logged and never surfaced to the
    /// caller. Must be called exactly once per request, on success and
    /// failure paths alike.
    pub async fn cleanup(&self) {
        if let AudioPayload::Disk(path) = &self.payload {
            match tokio::fs::remove_file(path).await {
                Ok(()) => debug!("Removed temporary upload file: {}", path.display()),
                Err(e) => warn!(
                    "Failed to remove temporary upload file {}: {}",
                    path.display(),
                    e
                ),
            }
        }
    }
}

/// Receive a multipart upload and materialize its audio field.
///
/// Streams the first `file` / `audio` field into the configured storage.
/// A missing field is a client error; exceeding `max_bytes` aborts the
/// transfer and removes any partial file.
pub async fn receive_upload(
    payload: &mut Multipart,
    storage: &UploadStorage,
    max_bytes: usize,
) -> Result<UploadedAudio> {
    while let Some(item) = payload.next().await {
        let mut field = item.map_err(|e| {
            GatewayError::validation(format!("Invalid multipart data: {}", e))
        })?;

        let field_name = match field.name() {
            Some(name) => name.to_string(),
            None => continue,
        };

        if !AUDIO_FIELD_NAMES.contains(&field_name.as_str()) {
            // Drain unknown fields
            while field.next().await.is_some() {}
            continue;
        }

        let mut filename = DEFAULT_FILENAME.to_string();
        if let Some(cd) = field.content_disposition() {
            if let Some(fname) = cd.get_filename() {
                filename = fname.to_string();
            }
        }
        let mime_type = field
            .content_type()
            .map(|mime| mime.to_string())
            .unwrap_or_else(|| DEFAULT_MIME_TYPE.to_string());

        let stored = match storage {
            UploadStorage::Memory => {
                let mut data = Vec::new();
                while let Some(chunk) = field.next().await {
                    let bytes = chunk.map_err(|e| {
                        GatewayError::validation(format!("Error reading file: {}", e))
                    })?;
                    if data.len() + bytes.len() > max_bytes {
                        return Err(payload_too_large(max_bytes));
                    }
                    data.extend_from_slice(&bytes);
                }
                AudioPayload::Memory(data)
            }
            UploadStorage::Disk { dir } => {
                let path = dir.join(storage_key(&filename));
                write_to_disk(&mut field, &path, max_bytes).await?;
                AudioPayload::Disk(path)
            }
        };

        return Ok(UploadedAudio {
            filename,
            mime_type,
            payload: stored,
        });
    }

    Err(GatewayError::validation("No audio file provided"))
}

/// Generate a unique storage key for a disk-backed upload.
///
/// The caller's filename is never used as the key, so concurrent uploads
/// sharing a filename cannot collide; its extension is kept because some
/// tooling infers the audio format from it.
fn storage_key(original_filename: &str) -> String {
    let key = Uuid::new_v4().to_string();
    match Path::new(original_filename)
        .extension()
        .and_then(|ext| ext.to_str())
    {
        Some(ext) if !ext.is_empty() => format!("{}.{}", key, ext),
        _ => key,
    }
}

async fn write_to_disk(
    field: &mut actix_multipart::Field,
    path: &Path,
    max_bytes: usize,
) -> Result<()> {
    let mut file = tokio::fs::File::create(path).await?;
    let mut written = 0usize;

    while let Some(chunk) = field.next().await {
        let bytes = match chunk {
            Ok(bytes) => bytes,
            Err(e) => {
                remove_partial(path).await;
                return Err(GatewayError::validation(format!("Error reading file: {}", e)));
            }
        };

        written += bytes.len();
        if written > max_bytes {
            remove_partial(path).await;
            return Err(payload_too_large(max_bytes));
        }

        if let Err(e) = file.write_all(&bytes).await {
            remove_partial(path).await;
            return Err(e.into());
        }
    }

    file.flush().await?;
    Ok(())
}

async fn remove_partial(path: &Path) {
    if let Err(e) = tokio::fs::remove_file(path).await {
        warn!("Failed to remove partial upload {}: {}", path.display(), e);
    }
}

fn payload_too_large(max_bytes: usize) -> GatewayError {
    GatewayError::PayloadTooLarge(format!("Audio file too large (max {} bytes)", max_bytes))
}
