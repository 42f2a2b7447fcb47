//! Shared controller handle for callback-driven hosts
//!
//! A page keeps one controller behind `Rc<RefCell<..>>` so that late host
//! callbacks (rejected `play()` promises) can reach it. Queued events are
//! taken out under the borrow and handed to the listener only after the
//! borrow is released, so a listener may call back into the relay.

use crate::controller::PlaybackController;
use crate::events::PlaybackEvent;
use crate::surface::MediaSurface;
use std::cell::RefCell;

/// Receives controller events as they are flushed
pub trait EventListener: Clone {
    fn notify(&self, event: &PlaybackEvent);
}

/// Controller plus the listener its events go to
pub struct Relay<S: MediaSurface, L: EventListener> {
    controller: PlaybackController<S>,
    listener: Option<L>,
}

/// Events taken out of the controller, ready for delivery
struct Outgoing<L> {
    listener: L,
    events: Vec<PlaybackEvent>,
}

impl<L: EventListener> Outgoing<L> {
    fn deliver(self) {
        for event in &self.events {
            self.listener.notify(event);
        }
    }
}

impl<S: MediaSurface, L: EventListener> Relay<S, L> {
    pub fn new(controller: PlaybackController<S>) -> Self {
        Self {
            controller,
            listener: None,
        }
    }

    pub fn controller(&self) -> &PlaybackController<S> {
        &self.controller
    }

    /// Take queued events while no listener is registered
    pub fn drain_events(&mut self) -> Vec<PlaybackEvent> {
        self.controller.drain_events()
    }

    fn take_outgoing(&mut self) -> Option<Outgoing<L>> {
        let listener = self.listener.clone()?;
        if !self.controller.has_pending_events() {
            return None;
        }
        Some(Outgoing {
            listener,
            events: self.controller.drain_events(),
        })
    }
}

/// Register the listener and deliver anything already queued
pub fn connect_listener<S: MediaSurface, L: EventListener>(shared: &RefCell<Relay<S, L>>, listener: L) {
    let outgoing = {
        let mut relay = shared.borrow_mut();
        relay.listener = Some(listener);
        relay.take_outgoing()
    };
    if let Some(outgoing) = outgoing {
        outgoing.deliver();
    }
}

/// Run `f` against the controller, then deliver the events it queued
pub fn dispatch<S, L, R>(shared: &RefCell<Relay<S, L>>, f: impl FnOnce(&mut PlaybackController<S>) -> R) -> R
where
    S: MediaSurface,
    L: EventListener,
{
    let (result, outgoing) = {
        let mut relay = shared.borrow_mut();
        let result = f(&mut relay.controller);
        (result, relay.take_outgoing())
    };
    if let Some(outgoing) = outgoing {
        outgoing.deliver();
    }
    result
}

/// Like [`dispatch`], but gives up when the controller is already borrowed
///
/// Used from asynchronous host callbacks, which must never panic.
pub fn try_dispatch<S, L, R>(
    shared: &RefCell<Relay<S, L>>,
    f: impl FnOnce(&mut PlaybackController<S>) -> R,
) -> Option<R>
where
    S: MediaSurface,
    L: EventListener,
{
    let (result, outgoing) = {
        let Ok(mut relay) = shared.try_borrow_mut() else {
            return None;
        };
        let result = f(&mut relay.controller);
        (result, relay.take_outgoing())
    };
    if let Some(outgoing) = outgoing {
        outgoing.deliver();
    }
    Some(result)
}
