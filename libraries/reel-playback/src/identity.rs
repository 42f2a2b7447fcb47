//! Current-item identity and play request tracking

use crate::catalog::Playlist;
use crate::error::{PlaybackError, Result};
use crate::types::{PlayRequest, SurfaceKind};
use reel_core::ItemId;

/// Which item is current and where it sits in the playlist
///
/// The id is the source of truth. The index is derived from it on every
/// assignment and playlist swap: its position when present, otherwise the
/// first slot of a non-empty playlist, otherwise nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaybackIdentity {
    current_id: Option<ItemId>,
    current_index: Option<usize>,
}

impl PlaybackIdentity {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_id(&self) -> Option<ItemId> {
        self.current_id
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current_index
    }

    /// Make `id` current
    pub(crate) fn assign(&mut self, id: ItemId, playlist: &Playlist) {
        self.current_id = Some(id);
        self.current_index = Self::resolve(id, playlist);
    }

    /// Recompute the index after the playlist was replaced
    pub(crate) fn revalidate(&mut self, playlist: &Playlist) {
        self.current_index = self.current_id.and_then(|id| Self::resolve(id, playlist));
    }

    /// Forget the current item
    pub(crate) fn clear(&mut self) {
        self.current_id = None;
        self.current_index = None;
    }

    fn resolve(id: ItemId, playlist: &Playlist) -> Option<usize> {
        match playlist.index_of(id) {
            Some(index) => Some(index),
            None if playlist.is_empty() => None,
            None => Some(0),
        }
    }
}

/// Hands out play request tickets and checks returning callbacks
#[derive(Debug, Clone, Default)]
pub struct RequestTracker {
    generation: u64,
    latest: Option<PlayRequest>,
}

impl RequestTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a fresh request, superseding every earlier one
    pub fn issue(&mut self, item_id: ItemId, surface: SurfaceKind) -> PlayRequest {
        self.generation += 1;
        let request = PlayRequest {
            generation: self.generation,
            item_id,
            surface,
        };
        self.latest = Some(request);
        request
    }

    /// Supersede every outstanding request without issuing a new one
    pub fn invalidate(&mut self) {
        self.generation += 1;
        self.latest = None;
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn latest(&self) -> Option<PlayRequest> {
        self.latest
    }

    /// Accept a callback only if it belongs to the latest request
    pub fn check(&self, request: &PlayRequest) -> Result<()> {
        if self.latest.as_ref() == Some(request) {
            Ok(())
        } else {
            Err(PlaybackError::StaleCallback {
                generation: request.generation,
                latest: self.generation,
            })
        }
    }
}
