//! Types for Reel server API requests and responses.

use reel_core::ItemId;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Pause between consecutive uploads in a batch
pub const DEFAULT_UPLOAD_DELAY: Duration = Duration::from_millis(100);

/// Configuration for connecting to a Reel server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Base URL of the server (e.g., "http://localhost:5000")
    pub url: String,
    /// Whole-request timeout
    pub timeout: Duration,
    /// Delay between files in a batch upload
    pub upload_delay: Duration,
}

impl ServerConfig {
    /// Create a new server config with default timings.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            timeout: DEFAULT_TIMEOUT,
            upload_delay: DEFAULT_UPLOAD_DELAY,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_upload_delay(mut self, delay: Duration) -> Self {
        self.upload_delay = delay;
        self
    }
}

// =============================================================================
// Health
// =============================================================================

/// Response from `GET /health`.
#[derive(Debug, Clone, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub video_count: u64,
    #[serde(default)]
    pub thumbnail_count: u64,
}

impl HealthStatus {
    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}

// =============================================================================
// Upload Types
// =============================================================================

/// Response from a successful `POST /upload`.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadResponse {
    pub id: ItemId,
    /// Stored (unique) file name
    pub filename: String,
    /// Display name (original name without extension)
    pub name: String,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub thumbnail: Option<String>,
}

/// What happened to one file of a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum UploadOutcome {
    Uploaded { id: ItemId },
    Failed { reason: String },
    /// Not a supported video/audio file; no request was made
    Skipped,
}

/// Progress information after each file of a batch.
#[derive(Debug, Clone)]
pub struct UploadProgress {
    /// Files handled so far, including this one
    pub processed: usize,
    pub total: usize,
    pub current_file: String,
    pub outcome: UploadOutcome,
}

impl UploadProgress {
    /// Progress bar fill, 0 - 100
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            100.0
        } else {
            self.processed as f64 / self.total as f64 * 100.0
        }
    }
}

/// Totals for a finished batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct UploadSummary {
    pub uploaded: usize,
    pub failed: usize,
    pub skipped: usize,
}

impl UploadSummary {
    pub(crate) fn record(&mut self, outcome: &UploadOutcome) {
        match outcome {
            UploadOutcome::Uploaded { .. } => self.uploaded += 1,
            UploadOutcome::Failed { .. } => self.failed += 1,
            UploadOutcome::Skipped => self.skipped += 1,
        }
    }

    /// The catalog changed and should be fetched again
    pub fn needs_refresh(&self) -> bool {
        self.uploaded > 0
    }

    pub fn total(&self) -> usize {
        self.uploaded + self.failed + self.skipped
    }
}

// =============================================================================
// Error Types
// =============================================================================

/// Error body returned by the server: `{"error": "..."}`.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiError {
    pub error: String,
}
