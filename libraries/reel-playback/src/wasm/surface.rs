//! `HTMLMediaElement` surface

use super::controller::SharedRelay;
use crate::relay::{self, Relay};
use crate::surface::MediaSurface;
use crate::types::PlayRequest;
use js_sys::Function;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use tracing::{debug, warn};
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use web_sys::{HtmlElement, HtmlMediaElement};

/// Routes rejected `play()` promises back to the controller
///
/// Surfaces are owned by the controller, so they hold only a weak handle
/// that is connected once the controller exists.
#[derive(Clone, Default)]
pub struct RejectionRouter {
    target: Rc<RefCell<Weak<RefCell<Relay<HtmlMediaSurface, Function>>>>>,
}

impl RejectionRouter {
    pub(crate) fn connect(&self, relay: &SharedRelay) {
        *self.target.borrow_mut() = Rc::downgrade(relay);
    }

    fn deliver(&self, request: PlayRequest, reason: String) {
        let Some(shared) = self.target.borrow().upgrade() else {
            return;
        };

        let generation = request.generation;
        let handled = relay::try_dispatch(&shared, |controller| {
            controller.handle_play_rejected(request, reason)
        });
        if handled.is_none() {
            warn!(generation, "Controller busy, dropping play rejection");
        }
    }
}

/// One media element and the container that shows it
pub struct HtmlMediaSurface {
    element: HtmlMediaElement,
    container: HtmlElement,
    visible_display: String,
    visible: bool,
    router: RejectionRouter,
}

impl HtmlMediaSurface {
    /// Wrap an element; `visible_display` is the CSS `display` used when shown
    pub fn new(
        element: HtmlMediaElement,
        container: HtmlElement,
        visible_display: &str,
        router: RejectionRouter,
    ) -> Self {
        Self {
            element,
            container,
            visible_display: visible_display.to_string(),
            visible: false,
            router,
        }
    }

    fn reject_later(&self, request: PlayRequest, reason: &JsValue) {
        let router = self.router.clone();
        let reason = describe_rejection(reason);
        wasm_bindgen_futures::spawn_local(async move {
            router.deliver(request, reason);
        });
    }
}

impl MediaSurface for HtmlMediaSurface {
    fn set_source(&mut self, uri: &str) {
        self.element.set_src(uri);
    }

    fn source(&self) -> Option<String> {
        let src = self.element.src();
        (!src.is_empty()).then_some(src)
    }

    fn load(&mut self) {
        self.element.load();
    }

    fn play(&mut self, request: PlayRequest) {
        match self.element.play() {
            Ok(promise) => {
                let router = self.router.clone();
                wasm_bindgen_futures::spawn_local(async move {
                    match JsFuture::from(promise).await {
                        Ok(_) => debug!(generation = request.generation, "play() resolved"),
                        Err(reason) => router.deliver(request, describe_rejection(&reason)),
                    }
                });
            }
            Err(reason) => self.reject_later(request, &reason),
        }
    }

    fn pause(&mut self) {
        if let Err(e) = self.element.pause() {
            warn!(error = ?e, "pause() failed");
        }
    }

    fn is_paused(&self) -> bool {
        self.element.paused()
    }

    fn set_muted(&mut self, muted: bool) {
        self.element.set_muted(muted);
    }

    fn is_muted(&self) -> bool {
        self.element.muted()
    }

    fn position(&self) -> f64 {
        self.element.current_time()
    }

    fn set_position(&mut self, seconds: f64) {
        self.element.set_current_time(seconds);
    }

    fn duration(&self) -> f64 {
        self.element.duration()
    }

    fn set_volume(&mut self, level: f64) {
        self.element.set_volume(level);
    }

    fn set_visible(&mut self, visible: bool) {
        let display = if visible {
            self.visible_display.as_str()
        } else {
            "none"
        };
        if let Err(e) = self.container.style().set_property("display", display) {
            warn!(error = ?e, "Could not change surface visibility");
        }
        self.visible = visible;
    }

    fn is_visible(&self) -> bool {
        self.visible
    }
}

/// `DOMException.name` when available (`NotAllowedError`, `AbortError`, ...)
fn describe_rejection(reason: &JsValue) -> String {
    js_sys::Reflect::get(reason, &JsValue::from_str("name"))
        .ok()
        .and_then(|name| name.as_string())
        .or_else(|| reason.as_string())
        .unwrap_or_else(|| "play() rejected".to_string())
}
