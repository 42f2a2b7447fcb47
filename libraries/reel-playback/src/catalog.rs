//! Catalog and playlist
//!
//! The catalog is the last list fetched from the server. The playlist is an
//! ordered snapshot of it taken on every successful load; navigation only
//! ever looks at the playlist.

use crate::error::{PlaybackError, Result};
use reel_core::{CatalogItem, ItemId, MediaLibrary};
use tracing::{debug, warn};

/// Items as last fetched from the server
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: Vec<CatalogItem>,
}

impl Catalog {
    pub fn new(items: Vec<CatalogItem>) -> Self {
        Self { items }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Fetch the full catalog from a library
    ///
    /// Any failure, including a body that is not a list, becomes
    /// [`PlaybackError::Load`].
    pub async fn load<L: MediaLibrary + ?Sized>(library: &L) -> Result<Self> {
        match library.fetch_items().await {
            Ok(items) => {
                debug!(count = items.len(), "Catalog fetched");
                Ok(Self::new(items))
            }
            Err(e) => {
                warn!(error = %e, "Catalog fetch failed");
                Err(PlaybackError::Load(e.to_string()))
            }
        }
    }

    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&CatalogItem> {
        self.items.get(index)
    }

    pub fn find_by_id(&self, id: ItemId) -> Option<&CatalogItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Ordered copy used for navigation
    pub fn snapshot(&self) -> Playlist {
        Playlist::new(self.items.clone())
    }
}

/// Ordered item list used for next/previous
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Playlist {
    items: Vec<CatalogItem>,
}

impl Playlist {
    pub fn new(items: Vec<CatalogItem>) -> Self {
        Self { items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&CatalogItem> {
        self.items.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CatalogItem> {
        self.items.iter()
    }

    /// Position of an item, if present
    pub fn index_of(&self, id: ItemId) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }

    /// Index after `current`, wrapping to the start
    ///
    /// With nothing current, the first item is next.
    pub fn next_index(&self, current: Option<usize>) -> Option<usize> {
        let len = self.len();
        if len == 0 {
            return None;
        }
        Some(current.map_or(0, |index| (index + 1) % len))
    }

    /// Index before `current`, wrapping to the end
    ///
    /// Nothing current counts as index -1, so `(-1 - 1 + len) mod len`
    /// lands on the second-to-last item rather than the last one.
    pub fn previous_index(&self, current: Option<usize>) -> Option<usize> {
        let len = self.len();
        if len == 0 {
            return None;
        }
        Some(current.map_or((2 * len - 2) % len, |index| (index % len + len - 1) % len))
    }
}
