//! Media classification by file extension

use serde::{Deserialize, Serialize};

const VIDEO_EXTENSIONS: [&str; 5] = ["mp4", "avi", "mov", "mkv", "webm"];
const AUDIO_EXTENSIONS: [&str; 3] = ["mp3", "wav", "ogg"];

/// Broad kind of a catalog file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    /// Video container (mp4, avi, mov, mkv, webm)
    Video,
    /// Audio file (mp3, wav, ogg)
    Audio,
    /// Anything else the server happens to list
    Other,
}

impl MediaKind {
    /// Classify a bare extension (case-insensitive, without the dot)
    pub fn from_extension(ext: &str) -> Self {
        let ext = ext.to_ascii_lowercase();
        if VIDEO_EXTENSIONS.contains(&ext.as_str()) {
            Self::Video
        } else if AUDIO_EXTENSIONS.contains(&ext.as_str()) {
            Self::Audio
        } else {
            Self::Other
        }
    }

    /// Classify a file name by its last extension
    pub fn from_file_name(name: &str) -> Self {
        extension_of(name).map_or(Self::Other, Self::from_extension)
    }

    /// Whether the server accepts uploads of this extension
    pub fn is_supported_extension(ext: &str) -> bool {
        Self::from_extension(ext) != Self::Other
    }

    /// Whether a file name carries one of the uploadable extensions
    pub fn is_supported_upload(file_name: &str) -> bool {
        extension_of(file_name).is_some_and(Self::is_supported_extension)
    }

    /// Label shown on catalog cards ("MP4", "OGG", or the upper-cased extension)
    pub fn type_label(ext: &str) -> String {
        ext.to_ascii_uppercase()
    }
}

/// Last extension of a file name, without the dot
pub(crate) fn extension_of(name: &str) -> Option<&str> {
    let (_, ext) = name.rsplit_once('.')?;
    if ext.is_empty() {
        None
    } else {
        Some(ext)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_known_extensions() {
        for ext in ["mp4", "avi", "mov", "mkv", "webm", "MP4"] {
            assert_eq!(MediaKind::from_extension(ext), MediaKind::Video, "{ext}");
        }
        for ext in ["mp3", "wav", "ogg", "Ogg"] {
            assert_eq!(MediaKind::from_extension(ext), MediaKind::Audio, "{ext}");
        }
        assert_eq!(MediaKind::from_extension("flac"), MediaKind::Other);
        assert_eq!(MediaKind::from_extension(""), MediaKind::Other);
    }

    #[test]
    fn classifies_file_names() {
        assert_eq!(
            MediaKind::from_file_name("concert.final_a1b2c3d4.mkv"),
            MediaKind::Video
        );
        assert_eq!(MediaKind::from_file_name("song.mp3"), MediaKind::Audio);
        assert_eq!(MediaKind::from_file_name("README"), MediaKind::Other);
        assert_eq!(MediaKind::from_file_name("trailing."), MediaKind::Other);
    }

    #[test]
    fn upload_support_matches_server_whitelist() {
        assert!(MediaKind::is_supported_extension("webm"));
        assert!(MediaKind::is_supported_extension("WAV"));
        assert!(!MediaKind::is_supported_extension("flac"));
        assert!(!MediaKind::is_supported_extension("exe"));

        assert!(MediaKind::is_supported_upload("holiday.MOV"));
        assert!(!MediaKind::is_supported_upload("notes.txt"));
        assert!(!MediaKind::is_supported_upload("mp4"));
    }

    #[test]
    fn type_labels() {
        assert_eq!(MediaKind::type_label("mp4"), "MP4");
        assert_eq!(MediaKind::type_label("flac"), "FLAC");
    }
}
