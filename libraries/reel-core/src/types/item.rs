//! Catalog item as listed by the server

use serde::{Deserialize, Serialize};

use super::ids::ItemId;
use super::media::{extension_of, MediaKind};
use crate::display::format_file_size;

/// One playable file in the catalog
///
/// Immutable once fetched. The server JSON carries more fields
/// (`original_filename`, `created_at`, `url`, `thumbnail`); only the ones
/// the player needs are kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItem {
    /// Server-assigned unique id
    pub id: ItemId,

    /// Human-readable title (file name without extension)
    #[serde(rename = "name")]
    pub display_name: String,

    /// Stored file name, resolved against the media base path for playback
    #[serde(rename = "filename")]
    pub source_path: String,

    /// File size in bytes, when known
    #[serde(rename = "file_size", default)]
    pub size_bytes: Option<u64>,

    /// Thumbnail URL, only present for videos with a generated frame
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
}

impl CatalogItem {
    /// Create an item with no size or thumbnail
    pub fn new(id: ItemId, display_name: impl Into<String>, source_path: impl Into<String>) -> Self {
        Self {
            id,
            display_name: display_name.into(),
            source_path: source_path.into(),
            size_bytes: None,
            thumbnail_url: None,
        }
    }

    /// Set the file size
    #[must_use]
    pub fn with_size(mut self, size_bytes: u64) -> Self {
        self.size_bytes = Some(size_bytes);
        self
    }

    /// Set the thumbnail URL
    #[must_use]
    pub fn with_thumbnail(mut self, url: impl Into<String>) -> Self {
        self.thumbnail_url = Some(url.into());
        self
    }

    /// Extension of the stored file, lower-cased
    pub fn extension(&self) -> Option<String> {
        extension_of(&self.source_path).map(str::to_ascii_lowercase)
    }

    /// Video, audio or other
    pub fn media_kind(&self) -> MediaKind {
        MediaKind::from_file_name(&self.source_path)
    }

    /// Card type label ("MP4", "MP3", ...), empty when the file has no extension
    pub fn type_label(&self) -> String {
        self.extension()
            .map(|ext| MediaKind::type_label(&ext))
            .unwrap_or_default()
    }

    /// Source URI handed to the media elements: `{base}/{filename}`
    pub fn media_url(&self, base: &str) -> String {
        format!("{}/{}", base.trim_end_matches('/'), self.source_path)
    }

    /// Thumbnail to show on the card; audio and other files never show one
    pub fn card_thumbnail(&self) -> Option<&str> {
        match self.media_kind() {
            MediaKind::Video => self.thumbnail_url.as_deref(),
            MediaKind::Audio | MediaKind::Other => None,
        }
    }

    /// Human-readable size, "Unknown" when the server did not report one
    pub fn size_label(&self) -> String {
        match self.size_bytes {
            Some(bytes) if bytes > 0 => format_file_size(bytes),
            _ => "Unknown".to_string(),
        }
    }
}
