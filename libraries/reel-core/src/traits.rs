//! Core traits for Reel

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{CatalogItem, ItemId};

/// Catalog server collaborator
///
/// Implementers fetch the catalog listing and delete items on the server.
/// The playback controller runs on a single cooperative execution context
/// (a browser tab or one async task), so futures are not required to be `Send`.
#[async_trait(?Send)]
pub trait MediaLibrary {
    /// Fetch every catalog item, in server order
    ///
    /// # Errors
    /// Returns an error on transport failure, a non-success status,
    /// or a body that is not a JSON array of items
    async fn fetch_items(&self) -> Result<Vec<CatalogItem>>;

    /// Delete one item by id
    ///
    /// # Errors
    /// Returns an error if the server refused or could not be reached
    async fn delete_item(&self, id: ItemId) -> Result<()>;
}
