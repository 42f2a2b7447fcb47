//! Error types for playback control

use reel_core::ItemId;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Playback errors
///
/// None of these are fatal: every failure leaves the controller paused,
/// with catalog and playlist intact.
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// Catalog fetch failed or returned something that is not a list of items
    #[error("Could not load the catalog: {0}")]
    Load(String),

    /// Host refused to start playback (autoplay policy and the like)
    #[error("Playback of item {item_id} was rejected: {reason}")]
    PlaybackRejected { item_id: ItemId, reason: String },

    /// Decode or network failure while playing
    #[error("Playback error: {0}")]
    Media(String),

    /// Completion callback for a request that has since been superseded
    #[error("Stale callback for request {generation} (latest is {latest})")]
    StaleCallback { generation: u64, latest: u64 },

    /// Server refused to delete an item
    #[error("Could not delete item {item_id}: {reason}")]
    DeleteFailed { item_id: ItemId, reason: String },

    /// Navigation on an empty playlist
    #[error("No items in the playlist")]
    EmptyPlaylist,

    /// Operation needs a current item and there is none
    #[error("No item is selected")]
    NoCurrentItem,

    /// Item id not present in the catalog
    #[error("Unknown item: {0}")]
    UnknownItem(ItemId),

    /// Item has no usable source path
    #[error("Item {0} has no playable source")]
    InvalidSource(ItemId),
}

/// Error category carried by events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Load,
    PlaybackRejected,
    Media,
    StaleCallback,
    DeleteFailed,
    Navigation,
}

impl PlaybackError {
    /// Category of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Load(_) => ErrorKind::Load,
            Self::PlaybackRejected { .. } => ErrorKind::PlaybackRejected,
            Self::Media(_) | Self::InvalidSource(_) => ErrorKind::Media,
            Self::StaleCallback { .. } => ErrorKind::StaleCallback,
            Self::DeleteFailed { .. } => ErrorKind::DeleteFailed,
            Self::EmptyPlaylist | Self::NoCurrentItem | Self::UnknownItem(_) => {
                ErrorKind::Navigation
            }
        }
    }

    /// Whether the UI should show this error to the user
    pub fn is_user_visible(&self) -> bool {
        !matches!(self, Self::StaleCallback { .. })
    }
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
