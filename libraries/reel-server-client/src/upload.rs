//! Media upload operations for the Reel catalog server.

use crate::client::error_from_response;
use crate::error::{Result, ServerClientError};
use crate::types::{UploadOutcome, UploadProgress, UploadResponse, UploadSummary};
use reel_core::MediaKind;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Upload client for the Reel catalog server.
pub struct UploadClient<'a> {
    http: &'a Client,
    base_url: &'a str,
    upload_delay: Duration,
}

impl<'a> UploadClient<'a> {
    pub(crate) fn new(http: &'a Client, base_url: &'a str, upload_delay: Duration) -> Self {
        Self {
            http,
            base_url,
            upload_delay,
        }
    }

    /// Upload a single video or audio file.
    ///
    /// Files whose extension the server does not accept are rejected
    /// before any request is made.
    pub async fn upload_file(&self, file_path: &Path) -> Result<UploadResponse> {
        if !file_path.exists() {
            return Err(ServerClientError::FileNotFound(
                file_path.display().to_string(),
            ));
        }

        let file_name = file_path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("upload")
            .to_string();

        if !MediaKind::is_supported_upload(&file_name) {
            return Err(ServerClientError::UnsupportedFile(file_name));
        }

        debug!(file = %file_path.display(), "Uploading file");

        let contents = tokio::fs::read(file_path).await?;
        let file_size = contents.len();

        let file_part = Part::bytes(contents)
            .file_name(file_name.clone())
            .mime_str(mime_type_for_file(file_path))?;

        let form = Form::new().part("file", file_part);

        let url = format!("{}/upload", self.base_url);

        let response = self
            .http
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(ServerClientError::from_send)?;

        let status = response.status();

        if status.is_success() {
            let upload_response: UploadResponse = response.json().await.map_err(|e| {
                ServerClientError::ParseError(format!("Failed to parse upload response: {}", e))
            })?;

            info!(
                item_id = %upload_response.id,
                file = %file_name,
                size = file_size,
                "File uploaded"
            );

            Ok(upload_response)
        } else if status.as_u16() == 413 {
            Err(ServerClientError::ServerError {
                status: 413,
                message: "File too large".to_string(),
            })
        } else {
            Err(error_from_response(response).await)
        }
    }

    /// Upload several files one after another.
    ///
    /// Unsupported files are skipped without a request. After every
    /// attempted upload except the last the client waits for the configured
    /// upload delay. `progress_callback` is called once per file, after it
    /// has been handled.
    pub async fn upload_batch<F>(&self, files: Vec<PathBuf>, mut progress_callback: F) -> UploadSummary
    where
        F: FnMut(UploadProgress),
    {
        let total = files.len();
        let mut summary = UploadSummary::default();

        for (index, file_path) in files.into_iter().enumerate() {
            let file_name = file_path
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or("unknown")
                .to_string();

            let outcome = if MediaKind::is_supported_upload(&file_name) {
                let outcome = match self.upload_file(&file_path).await {
                    Ok(response) => UploadOutcome::Uploaded { id: response.id },
                    Err(e) => {
                        warn!(file = %file_name, error = %e, "Upload failed");
                        UploadOutcome::Failed {
                            reason: e.to_string(),
                        }
                    }
                };

                if index + 1 < total && !self.upload_delay.is_zero() {
                    tokio::time::sleep(self.upload_delay).await;
                }

                outcome
            } else {
                debug!(file = %file_name, "Skipping unsupported file");
                UploadOutcome::Skipped
            };

            summary.record(&outcome);

            progress_callback(UploadProgress {
                processed: index + 1,
                total,
                current_file: file_name,
                outcome,
            });
        }

        info!(
            uploaded = summary.uploaded,
            failed = summary.failed,
            skipped = summary.skipped,
            "Batch upload finished"
        );

        summary
    }
}

/// Get MIME type for a media file.
fn mime_type_for_file(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    match ext.as_deref() {
        Some("mp4") => "video/mp4",
        Some("avi") => "video/x-msvideo",
        Some("mov") => "video/quicktime",
        Some("mkv") => "video/x-matroska",
        Some("webm") => "video/webm",
        Some("mp3") => "audio/mpeg",
        Some("wav") => "audio/wav",
        Some("ogg") => "audio/ogg",
        _ => "application/octet-stream",
    }
}
