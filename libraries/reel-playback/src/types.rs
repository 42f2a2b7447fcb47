//! Core types for playback control

use reel_core::ItemId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the two output surfaces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SurfaceKind {
    /// Full-size player
    Main,
    /// Floating mini-player
    Mini,
}

impl SurfaceKind {
    /// The opposite surface
    pub const fn other(self) -> Self {
        match self {
            Self::Main => Self::Mini,
            Self::Mini => Self::Main,
        }
    }

    /// Lowercase name, as used by the web bindings
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Main => "main",
            Self::Mini => "mini",
        }
    }
}

impl fmt::Display for SurfaceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SurfaceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "main" => Ok(Self::Main),
            "mini" => Ok(Self::Mini),
            other => Err(format!("unknown surface: {other}")),
        }
    }
}

/// Ticket for one play request
///
/// Every request to start playback gets a fresh generation. Completion
/// callbacks carry the ticket back so the controller can tell whether
/// they still describe the latest request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayRequest {
    /// Monotonic request counter
    pub generation: u64,
    /// Item the request was issued for
    pub item_id: ItemId,
    /// Surface asked to play
    pub surface: SurfaceKind,
}

/// Notifications reported by a surface's host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "detail", rename_all = "snake_case")]
pub enum MediaEvent {
    /// Playback position advanced
    TimeUpdate,
    /// Surface started playing
    Playing,
    /// Surface paused
    Paused,
    /// Surface reached the end of its media
    Ended,
    /// Decode or network failure
    Error(String),
}

impl MediaEvent {
    /// Parse a DOM event name (`timeupdate`, `play`, `pause`, `ended`, `error`)
    pub fn from_dom(name: &str, detail: Option<String>) -> Option<Self> {
        match name {
            "timeupdate" => Some(Self::TimeUpdate),
            "play" | "playing" => Some(Self::Playing),
            "pause" => Some(Self::Paused),
            "ended" => Some(Self::Ended),
            "error" => Some(Self::Error(
                detail.unwrap_or_else(|| "media element error".to_string()),
            )),
            _ => None,
        }
    }
}

/// Controller configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    /// Volume used when nothing is persisted (0.0 - 1.0)
    pub default_volume: f64,

    /// Preference key the volume is stored under
    pub volume_key: String,

    /// Base path media files are served from
    pub media_base_path: String,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            default_volume: 0.5,
            volume_key: "volume".to_string(),
            media_base_path: "/video".to_string(),
        }
    }
}
