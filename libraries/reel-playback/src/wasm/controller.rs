//! WASM-compatible PlaybackController wrapper

use super::storage::LocalStorageVolumeStore;
use super::surface::{HtmlMediaSurface, RejectionRouter};
use crate::relay::{self, EventListener, Relay};
use crate::{
    Catalog, ControllerConfig, MediaEvent, PlaybackController, PlaybackError, PlaybackEvent,
    SurfaceKind,
};
use js_sys::Function;
use reel_core::{CatalogItem, ItemId, ReelError};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;

/// Controller shared with the surfaces' rejection router, so late `play()`
/// failures reach the same page callback as everything else
pub(crate) type SharedRelay = Rc<RefCell<Relay<HtmlMediaSurface, Function>>>;

impl EventListener for Function {
    fn notify(&self, event: &PlaybackEvent) {
        if let Ok(value) = serde_wasm_bindgen::to_value(event) {
            self.call1(&JsValue::NULL, &value).ok();
        }
    }
}

/// WASM-compatible playback controller
///
/// Wraps the core PlaybackController with a JavaScript-friendly API.
#[wasm_bindgen]
pub struct WasmPlaybackController {
    relay: SharedRelay,
}

#[wasm_bindgen]
impl WasmPlaybackController {
    /// Create a controller over the main and mini players
    #[wasm_bindgen(constructor)]
    pub fn new(
        main_media: web_sys::HtmlMediaElement,
        main_container: web_sys::HtmlElement,
        mini_media: web_sys::HtmlMediaElement,
        mini_container: web_sys::HtmlElement,
    ) -> Self {
        // Enable panic hooks for better error messages in console
        console_error_panic_hook::set_once();

        let router = RejectionRouter::default();
        let main = HtmlMediaSurface::new(main_media, main_container, "flex", router.clone());
        let mini = HtmlMediaSurface::new(mini_media, mini_container, "block", router.clone());

        let mut controller = PlaybackController::new(main, mini, ControllerConfig::default());
        if let Some(store) = LocalStorageVolumeStore::from_window() {
            controller = controller.with_volume_store(Box::new(store));
        }

        let relay = Rc::new(RefCell::new(Relay::new(controller)));
        router.connect(&relay);

        Self { relay }
    }

    // ===== Catalog =====

    /// Replace the catalog with the `/videos` response body
    #[wasm_bindgen(js_name = loadCatalog)]
    pub fn load_catalog(&self, items: JsValue) {
        let result = serde_wasm_bindgen::from_value::<Vec<CatalogItem>>(items)
            .map(Catalog::new)
            .map_err(|e| PlaybackError::Load(e.to_string()));
        self.with(|controller| {
            controller.apply_catalog(result);
        });
    }

    /// Report that the catalog fetch itself failed
    #[wasm_bindgen(js_name = catalogLoadFailed)]
    pub fn catalog_load_failed(&self, message: String) {
        self.with(|controller| {
            controller.apply_catalog(Err(PlaybackError::Load(message)));
        });
    }

    /// Report the outcome of `DELETE /video/{id}`
    #[wasm_bindgen(js_name = itemDeleted)]
    pub fn item_deleted(&self, id: f64, success: bool, message: Option<String>) {
        let result = if success {
            Ok(())
        } else {
            Err(ReelError::Other(message.unwrap_or_else(|| "delete failed".to_string())))
        };
        self.with(|controller| {
            controller.apply_delete(item_id(id), result).ok();
        });
    }

    // ===== Playback Control =====

    /// Play a catalog item by id
    #[wasm_bindgen(js_name = selectById)]
    pub fn select_by_id(&self, id: f64) -> Result<(), JsValue> {
        self.try_with(|controller| controller.select_by_id(item_id(id)))
    }

    /// Play a catalog item by id in the mini-player
    #[wasm_bindgen(js_name = selectByIdMinimized)]
    pub fn select_by_id_minimized(&self, id: f64) -> Result<(), JsValue> {
        self.try_with(|controller| {
            let item = controller
                .catalog()
                .find_by_id(item_id(id))
                .cloned()
                .ok_or(PlaybackError::UnknownItem(item_id(id)))?;
            controller.select_and_play_minimized(&item)
        })
    }

    #[wasm_bindgen(js_name = togglePlayPause)]
    pub fn toggle_play_pause(&self) {
        self.with(PlaybackController::toggle_play_pause);
    }

    /// Skip to next item (wraps)
    pub fn next(&self) {
        self.with(|controller| {
            controller.next().ok();
        });
    }

    /// Go to previous item (wraps)
    pub fn previous(&self) {
        self.with(|controller| {
            controller.previous().ok();
        });
    }

    /// Seek by fraction (0.0 - 1.0); returns whether it applied
    pub fn seek(&self, fraction: f64) -> bool {
        self.with(|controller| controller.seek(fraction))
    }

    pub fn stop(&self) {
        self.with(PlaybackController::stop);
    }

    pub fn minimize(&self) {
        self.with(PlaybackController::minimize);
    }

    pub fn maximize(&self) {
        self.with(PlaybackController::maximize);
    }

    pub fn hide(&self) {
        self.with(PlaybackController::hide);
    }

    /// Set volume (0.0 - 1.0)
    #[wasm_bindgen(js_name = setVolume)]
    pub fn set_volume(&self, level: f64) {
        self.with(|controller| controller.set_volume(level));
    }

    /// Forward a DOM media event from one of the surfaces
    #[wasm_bindgen(js_name = handleMediaEvent)]
    pub fn handle_media_event(&self, surface: &str, event: &str, detail: Option<String>) -> Result<(), JsValue> {
        let surface: SurfaceKind = surface.parse().map_err(|e: String| JsValue::from_str(&e))?;
        let Some(event) = MediaEvent::from_dom(event, detail) else {
            return Ok(());
        };
        self.with(|controller| controller.handle_media_event(surface, event));
        Ok(())
    }

    // ===== State Queries =====

    #[wasm_bindgen(js_name = isPlaying)]
    pub fn is_playing(&self) -> bool {
        self.relay.borrow().controller().is_playing()
    }

    #[wasm_bindgen(js_name = currentId)]
    pub fn current_id(&self) -> Option<f64> {
        self.relay
            .borrow()
            .controller()
            .current_id()
            .map(|id| id.get() as f64)
    }

    /// Index of the current item, -1 when none
    #[wasm_bindgen(js_name = currentIndex)]
    pub fn current_index(&self) -> i32 {
        self.relay
            .borrow()
            .controller()
            .current_index()
            .map_or(-1, |index| i32::try_from(index).unwrap_or(i32::MAX))
    }

    #[wasm_bindgen(js_name = progressFraction)]
    pub fn progress_fraction(&self) -> f64 {
        self.relay.borrow().controller().progress_fraction()
    }

    #[wasm_bindgen(js_name = elapsedText)]
    pub fn elapsed_text(&self) -> String {
        self.relay.borrow().controller().elapsed_text().to_string()
    }

    #[wasm_bindgen(js_name = durationText)]
    pub fn duration_text(&self) -> String {
        self.relay.borrow().controller().duration_text().to_string()
    }

    /// "main" or "mini"
    #[wasm_bindgen(js_name = activeSurface)]
    pub fn active_surface(&self) -> String {
        self.relay.borrow().controller().active_surface().to_string()
    }

    #[wasm_bindgen(js_name = getVolume)]
    pub fn get_volume(&self) -> f64 {
        self.relay.borrow().controller().volume()
    }

    // ===== Event Listeners =====

    /// Register the event callback; queued events are delivered immediately
    #[wasm_bindgen(js_name = onEvent)]
    pub fn on_event(&self, callback: Function) {
        relay::connect_listener(&self.relay, callback);
    }

    /// Take queued events (when no callback is registered)
    #[wasm_bindgen(js_name = drainEvents)]
    pub fn drain_events(&self) -> JsValue {
        let events = self.relay.borrow_mut().drain_events();
        serde_wasm_bindgen::to_value(&events).unwrap_or(JsValue::NULL)
    }
}

impl WasmPlaybackController {
    /// Run `f` against the controller, then deliver the events it queued
    ///
    /// Exported methods take `&self`, so the page callback may query the
    /// controller while events are being delivered.
    fn with<R>(&self, f: impl FnOnce(&mut PlaybackController<HtmlMediaSurface>) -> R) -> R {
        relay::dispatch(&self.relay, f)
    }

    fn try_with(
        &self,
        f: impl FnOnce(&mut PlaybackController<HtmlMediaSurface>) -> crate::Result<()>,
    ) -> Result<(), JsValue> {
        self.with(f).map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

fn item_id(id: f64) -> ItemId {
    ItemId::new(id as i64)
}
