//! Main Reel server client.

use crate::error::{Result, ServerClientError};
use crate::library::LibraryClient;
use crate::types::{ApiError, HealthStatus, ServerConfig};
use crate::upload::UploadClient;
use async_trait::async_trait;
use reel_core::{CatalogItem, ItemId, MediaLibrary};
use reqwest::{Client, Response};
use std::time::Duration;
use tracing::{debug, info};

/// Client for a Reel catalog server.
///
/// Cheap to share by reference; sub-clients borrow the underlying
/// connection pool.
///
/// # Example
///
/// ```ignore
/// use reel_server_client::{ReelServerClient, ServerConfig};
///
/// let client = ReelServerClient::new(ServerConfig::new("http://localhost:5000"))?;
///
/// let items = client.library().fetch_items().await?;
/// println!("Found {} items", items.len());
/// ```
#[derive(Debug, Clone)]
pub struct ReelServerClient {
    http: Client,
    config: ServerConfig,
}

impl ReelServerClient {
    /// Create a new client with the given configuration.
    pub fn new(config: ServerConfig) -> Result<Self> {
        if config.url.is_empty() {
            return Err(ServerClientError::InvalidUrl("URL cannot be empty".into()));
        }

        let url = config.url.trim_end_matches('/').to_string();
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ServerClientError::InvalidUrl(
                "URL must start with http:// or https://".into(),
            ));
        }
        url::Url::parse(&url).map_err(|e| ServerClientError::InvalidUrl(e.to_string()))?;

        let http = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(Duration::from_secs(10))
            .user_agent(format!("Reel/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            config: ServerConfig { url, ..config },
        })
    }

    /// Normalized server URL (no trailing slash).
    pub fn url(&self) -> &str {
        &self.config.url
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Check that the server is up.
    pub async fn health(&self) -> Result<HealthStatus> {
        let url = format!("{}/health", self.config.url);
        debug!(url = %url, "Checking server health");

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(ServerClientError::from_send)?;

        let status = response.status();
        if status.is_success() {
            let health: HealthStatus = response.json().await.map_err(|e| {
                ServerClientError::ParseError(format!("Failed to parse health response: {}", e))
            })?;

            info!(
                status = %health.status,
                videos = health.video_count,
                "Server reachable"
            );

            Ok(health)
        } else {
            Err(error_from_response(response).await)
        }
    }

    /// Catalog listing and deletion.
    pub fn library(&self) -> LibraryClient<'_> {
        LibraryClient::new(&self.http, &self.config.url)
    }

    /// File uploads.
    pub fn uploads(&self) -> UploadClient<'_> {
        UploadClient::new(&self.http, &self.config.url, self.config.upload_delay)
    }

    /// Absolute URL of an item's media file.
    pub fn media_url(&self, item: &CatalogItem) -> String {
        item.media_url(&format!("{}/video", self.config.url))
    }
}

#[async_trait(?Send)]
impl MediaLibrary for ReelServerClient {
    async fn fetch_items(&self) -> reel_core::Result<Vec<CatalogItem>> {
        Ok(self.library().fetch_items().await?)
    }

    async fn delete_item(&self, id: ItemId) -> reel_core::Result<()> {
        Ok(self.library().delete_item(id).await?)
    }
}

/// Turn a non-success response into `ServerError`
///
/// Uses the server's `{"error": ...}` message when the body has one.
pub(crate) async fn error_from_response(response: Response) -> ServerClientError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ApiError>(&body)
        .map(|api| api.error)
        .unwrap_or(body);

    ServerClientError::ServerError { status, message }
}
