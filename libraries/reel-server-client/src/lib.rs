//! Reel Server Client
//!
//! HTTP client library for the Reel catalog server.
//!
//! # Features
//!
//! - **Catalog**: List items, delete items, build media and thumbnail URLs
//! - **Upload**: Upload single files or batches with progress reporting
//! - **Health**: Check that the server is reachable
//!
//! `ReelServerClient` also implements [`reel_core::MediaLibrary`], so it can
//! be handed straight to the playback controller's refresh and delete flows.
//!
//! # Example
//!
//! ```ignore
//! use reel_server_client::{ReelServerClient, ServerConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ReelServerClient::new(ServerConfig::new("http://localhost:5000"))?;
//!
//!     let health = client.health().await?;
//!     println!("Server has {} items", health.video_count);
//!
//!     for item in client.library().fetch_items().await? {
//!         println!("{} -> {}", item.display_name, client.media_url(&item));
//!     }
//!
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod library;
mod types;
mod upload;

// Re-export main types
pub use client::ReelServerClient;
pub use error::{Result, ServerClientError};
pub use types::{
    ApiError, HealthStatus, ServerConfig, UploadOutcome, UploadProgress, UploadResponse,
    UploadSummary, DEFAULT_TIMEOUT, DEFAULT_UPLOAD_DELAY,
};

// Re-export sub-clients for direct use if needed
pub use library::LibraryClient;
pub use upload::UploadClient;
