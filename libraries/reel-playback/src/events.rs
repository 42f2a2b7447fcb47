//! Playback Events
//!
//! Event-based communication for UI synchronization. The controller queues
//! events as it changes state; the host drains them after each call and
//! re-renders whatever they touch.

use crate::error::{ErrorKind, PlaybackError};
use crate::progress::ProgressSnapshot;
use crate::types::SurfaceKind;
use reel_core::ItemId;
use serde::{Deserialize, Serialize};

/// Severity of a user-facing notice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// Events emitted by the playback controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PlaybackEvent {
    /// Playing flag flipped (play/pause button icon)
    StateChanged {
        /// The new value of the playing flag
        is_playing: bool,
    },

    /// Current item changed (title label, active card highlight)
    ItemChanged {
        /// New current item, `None` once it was deleted
        item_id: Option<ItemId>,
        /// Item that was current before
        previous_item_id: Option<ItemId>,
    },

    /// Active surface or visibility changed
    SurfaceChanged {
        /// Surface that now has audio
        active: SurfaceKind,
        /// Whether the full-size player is shown
        main_visible: bool,
        /// Whether the mini-player is shown
        mini_visible: bool,
    },

    /// Progress readout changed
    ProgressUpdated {
        /// Elapsed time as `mm:ss`
        elapsed_text: String,
        /// Duration as `mm:ss`
        duration_text: String,
        /// Elapsed / duration, 0.0 - 1.0
        fraction: f64,
    },

    /// Catalog replaced (cards rebuilt)
    CatalogLoaded {
        /// Number of items in the new playlist
        count: usize,
    },

    /// Volume level changed
    VolumeChanged {
        /// New level, 0.0 - 1.0
        level: f64,
    },

    /// Transient message for the notification area
    Notice {
        level: NoticeLevel,
        message: String,
    },

    /// A non-fatal error the user should hear about
    Error { kind: ErrorKind, message: String },
}

impl PlaybackEvent {
    pub(crate) fn progress(snapshot: &ProgressSnapshot) -> Self {
        Self::ProgressUpdated {
            elapsed_text: snapshot.elapsed_text.clone(),
            duration_text: snapshot.duration_text.clone(),
            fraction: snapshot.fraction,
        }
    }

    pub(crate) fn error(err: &PlaybackError) -> Self {
        Self::Error {
            kind: err.kind(),
            message: err.to_string(),
        }
    }

    pub(crate) fn notice(level: NoticeLevel, message: impl Into<String>) -> Self {
        Self::Notice {
            level,
            message: message.into(),
        }
    }
}
