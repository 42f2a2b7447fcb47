//! Catalog listing and deletion.

use crate::client::error_from_response;
use crate::error::{Result, ServerClientError};
use reel_core::{CatalogItem, ItemId};
use reqwest::Client;
use tracing::{debug, info};

/// Library client for the Reel catalog server.
pub struct LibraryClient<'a> {
    http: &'a Client,
    base_url: &'a str,
}

impl<'a> LibraryClient<'a> {
    pub(crate) fn new(http: &'a Client, base_url: &'a str) -> Self {
        Self { http, base_url }
    }

    /// Fetch the whole catalog, in the order the server lists it.
    pub async fn fetch_items(&self) -> Result<Vec<CatalogItem>> {
        let url = format!("{}/videos", self.base_url);
        debug!(url = %url, "Fetching catalog");

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(ServerClientError::from_send)?;

        let status = response.status();

        if status.is_success() {
            let items: Vec<CatalogItem> = response.json().await.map_err(|e| {
                ServerClientError::ParseError(format!("Failed to parse catalog response: {}", e))
            })?;

            debug!(items = items.len(), "Fetched catalog");

            Ok(items)
        } else {
            Err(error_from_response(response).await)
        }
    }

    /// Delete an item from the server.
    pub async fn delete_item(&self, id: ItemId) -> Result<()> {
        let url = format!("{}/video/{}", self.base_url, id);
        debug!(url = %url, item_id = %id, "Deleting item");

        let response = self
            .http
            .delete(&url)
            .send()
            .await
            .map_err(ServerClientError::from_send)?;

        let status = response.status();

        if status.is_success() {
            info!(item_id = %id, "Item deleted");
            Ok(())
        } else if status.as_u16() == 404 {
            Err(ServerClientError::ServerError {
                status: 404,
                message: format!("Item not found: {}", id),
            })
        } else {
            Err(error_from_response(response).await)
        }
    }

    /// URL the media elements load for `item`.
    pub fn media_url(&self, item: &CatalogItem) -> String {
        item.media_url(&format!("{}/video", self.base_url))
    }

    /// Absolute thumbnail URL, if the item has one.
    ///
    /// The server lists thumbnails as paths relative to its root.
    pub fn thumbnail_url(&self, item: &CatalogItem) -> Option<String> {
        item.thumbnail_url.as_deref().map(|thumb| {
            if thumb.starts_with("http://") || thumb.starts_with("https://") {
                thumb.to_string()
            } else {
                format!("{}/{}", self.base_url, thumb.trim_start_matches('/'))
            }
        })
    }
}
