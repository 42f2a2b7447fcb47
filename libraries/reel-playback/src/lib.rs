//! Reel - Playback Control
//!
//! Platform-agnostic playback controller for the Reel media catalog.
//!
//! This crate provides:
//! - Catalog loading and an ordered playlist snapshot
//! - Current-item identity that survives catalog refreshes
//! - Two output surfaces (full-size player and mini-player) sharing one source
//! - Play/pause, wrap-around next/previous, seek by fraction
//! - Minimize/maximize handoff that carries position and playing state
//! - Progress readout (`mm:ss`) and a persisted volume preference
//! - Stale-callback protection for asynchronous play requests
//!
//! # Architecture
//!
//! `reel-playback` does not touch the DOM. Media elements are reached
//! through the [`MediaSurface`] trait and the server through
//! [`reel_core::MediaLibrary`]. The optional `wasm` feature adds browser
//! bindings over `HTMLMediaElement` and `localStorage`.
//!
//! The controller is single-threaded. Every operation runs to completion
//! before the next one starts; host callbacks arrive later and are checked
//! against the latest [`PlayRequest`] before they change anything.
//!
//! # Example
//!
//! ```rust,ignore
//! use reel_playback::{Catalog, ControllerConfig, PlaybackController, SurfaceKind};
//!
//! let mut controller = PlaybackController::new(main, mini, ControllerConfig::default());
//!
//! // Load the catalog from the server
//! controller.refresh_catalog(&client).await;
//!
//! // Play the first card, then hand it to the mini-player
//! controller.select_by_id(first_id)?;
//! controller.minimize();
//! assert_eq!(controller.active_surface(), SurfaceKind::Mini);
//!
//! // Render whatever changed
//! for event in controller.drain_events() {
//!     ui.apply(event);
//! }
//! ```

#![forbid(unsafe_code)]

pub mod catalog;
pub mod controller;
pub mod error;
pub mod events;
pub mod identity;
pub mod progress;
pub mod relay;
pub mod surface;
pub mod types;
pub mod volume;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use catalog::{Catalog, Playlist};
pub use controller::PlaybackController;
pub use error::{ErrorKind, PlaybackError, Result};
pub use events::{NoticeLevel, PlaybackEvent};
pub use identity::{PlaybackIdentity, RequestTracker};
pub use progress::{format_time, ProgressReporter, ProgressSnapshot};
pub use relay::{EventListener, Relay};
pub use surface::{Handoff, MediaSurface, SurfaceSelector};
pub use types::{ControllerConfig, MediaEvent, PlayRequest, SurfaceKind};
pub use volume::{MemoryVolumeStore, Volume, VolumeStore};
