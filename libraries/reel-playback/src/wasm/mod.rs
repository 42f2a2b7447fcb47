//! WASM bindings for reel-playback
//!
//! Drives two `HTMLMediaElement`s from the browser. The page wires each
//! element's `timeupdate`, `play`, `pause`, `ended` and `error` events to
//! `handleMediaEvent`, and renders from the events passed to `onEvent`.

pub mod controller;
pub mod storage;
pub mod surface;

pub use controller::WasmPlaybackController;
pub use storage::LocalStorageVolumeStore;
pub use surface::HtmlMediaSurface;
