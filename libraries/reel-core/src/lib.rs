//! Reel Core
//!
//! Platform-agnostic core types, traits, and error handling for the Reel media catalog.
//!
//! This crate provides the building blocks shared by the playback controller,
//! the server client and the command-line front end.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `CatalogItem`, `ItemId`, `MediaKind`
//! - **Core Traits**: `MediaLibrary` (the catalog server collaborator)
//! - **Display Helpers**: file size and title formatting used by catalog cards
//! - **Error Handling**: Unified `ReelError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use reel_core::{CatalogItem, ItemId, MediaKind};
//!
//! let item = CatalogItem::new(ItemId::new(7), "Intro", "intro_3f2a9c1b.mp4").with_size(1_572_864);
//!
//! assert_eq!(item.media_kind(), MediaKind::Video);
//! assert_eq!(item.media_url("/video"), "/video/intro_3f2a9c1b.mp4");
//! assert_eq!(item.size_label(), "1.5 MB");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod display;
pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use display::{format_file_size, truncate_text};
pub use error::{ReelError, Result};
pub use traits::MediaLibrary;
pub use types::{CatalogItem, ItemId, MediaKind};
