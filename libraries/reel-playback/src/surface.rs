//! Output surfaces and the active-surface selector
//!
//! A surface is one media element plus the container that shows it. The
//! controller owns two of them, both loaded with the same source. Exactly
//! one is active: it is the only one unmuted and the only one whose events
//! matter. The other is kept muted and paused.

use crate::types::{PlayRequest, SurfaceKind};
use tracing::debug;

/// Platform-agnostic media surface
///
/// Implemented over `HTMLMediaElement` in the browser and by fakes in tests.
/// Positions and durations are seconds; a duration is NaN until the
/// metadata has loaded.
pub trait MediaSurface {
    /// Point the surface at a new source URI
    fn set_source(&mut self, uri: &str);

    /// Current source URI, if any
    fn source(&self) -> Option<String>;

    /// Start loading the current source (resets position to 0)
    fn load(&mut self);

    /// Ask the host to start playback
    ///
    /// The host may refuse asynchronously; it reports that back through
    /// [`PlaybackController::handle_play_rejected`](crate::PlaybackController::handle_play_rejected)
    /// together with `request`.
    fn play(&mut self, request: PlayRequest);

    fn pause(&mut self);

    fn is_paused(&self) -> bool;

    fn set_muted(&mut self, muted: bool);

    fn is_muted(&self) -> bool;

    /// Current position in seconds
    fn position(&self) -> f64;

    /// Seek to a position in seconds
    fn set_position(&mut self, seconds: f64);

    /// Duration in seconds, NaN while unknown
    fn duration(&self) -> f64;

    /// Set output level (0.0 - 1.0)
    fn set_volume(&mut self, level: f64);

    fn set_visible(&mut self, visible: bool);

    fn is_visible(&self) -> bool;
}

/// What a surface switch carried over
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Handoff {
    /// The outgoing surface was playing, so the incoming one should resume
    pub resume: bool,
    /// Position copied to the incoming surface
    pub position: f64,
}

/// Owns both surfaces and keeps the mute and visibility rules
pub struct SurfaceSelector<S> {
    main: S,
    mini: S,
    active: SurfaceKind,
    main_visible: bool,
    mini_visible: bool,
}

impl<S: MediaSurface> SurfaceSelector<S> {
    /// Take ownership of both surfaces; Main is active and nothing is shown
    pub fn new(main: S, mini: S) -> Self {
        let mut selector = Self {
            main,
            mini,
            active: SurfaceKind::Main,
            main_visible: false,
            mini_visible: false,
        };
        selector.main.set_visible(false);
        selector.mini.set_visible(false);
        selector.apply_mute_policy();
        selector
    }

    pub fn active(&self) -> SurfaceKind {
        self.active
    }

    pub fn surface(&self, kind: SurfaceKind) -> &S {
        match kind {
            SurfaceKind::Main => &self.main,
            SurfaceKind::Mini => &self.mini,
        }
    }

    pub(crate) fn surface_mut(&mut self, kind: SurfaceKind) -> &mut S {
        match kind {
            SurfaceKind::Main => &mut self.main,
            SurfaceKind::Mini => &mut self.mini,
        }
    }

    pub fn active_surface(&self) -> &S {
        self.surface(self.active)
    }

    pub(crate) fn active_surface_mut(&mut self) -> &mut S {
        self.surface_mut(self.active)
    }

    pub fn is_main_visible(&self) -> bool {
        self.main_visible
    }

    pub fn is_mini_visible(&self) -> bool {
        self.mini_visible
    }

    pub fn is_any_visible(&self) -> bool {
        self.main_visible || self.mini_visible
    }

    pub(crate) fn pause_all(&mut self) {
        self.main.pause();
        self.mini.pause();
    }

    /// Give both surfaces the same source and start loading it
    pub(crate) fn assign_source(&mut self, uri: &str) {
        for surface in [&mut self.main, &mut self.mini] {
            surface.set_source(uri);
            surface.load();
        }
    }

    /// Active surface unmuted, the other muted
    pub(crate) fn apply_mute_policy(&mut self) {
        let active = self.active;
        self.surface_mut(active).set_muted(false);
        self.surface_mut(active.other()).set_muted(true);
    }

    pub(crate) fn set_volume(&mut self, level: f64) {
        self.main.set_volume(level);
        self.mini.set_volume(level);
    }

    /// Show the full-size player and make it active
    pub(crate) fn reveal_main(&mut self) {
        self.active = SurfaceKind::Main;
        self.show(SurfaceKind::Main, true);
        self.show(SurfaceKind::Mini, false);
        self.apply_mute_policy();
    }

    /// Move audio and visibility to `target`
    ///
    /// The outgoing surface is muted and paused first. The incoming one is
    /// unmuted and seeked to the outgoing position. It is left paused: the
    /// caller resumes it when [`Handoff::resume`] is set, since that needs a
    /// fresh play request. Returns `None` when `target` is already active.
    pub(crate) fn switch_to(&mut self, target: SurfaceKind) -> Option<Handoff> {
        let from = self.active;
        if from == target {
            return None;
        }

        let outgoing = self.surface_mut(from);
        let resume = !outgoing.is_paused();
        let position = outgoing.position();
        outgoing.set_muted(true);
        outgoing.pause();

        let incoming = self.surface_mut(target);
        incoming.set_muted(false);
        if position.is_finite() {
            incoming.set_position(position);
        }

        self.show(from, false);
        self.show(target, true);
        self.active = target;

        debug!(from = %from, to = %target, resume, position, "Surface switched");
        Some(Handoff { resume, position })
    }

    /// Hide both surfaces; Main becomes active again for the next selection
    pub(crate) fn hide_all(&mut self) {
        self.show(SurfaceKind::Main, false);
        self.show(SurfaceKind::Mini, false);
        self.active = SurfaceKind::Main;
        self.apply_mute_policy();
    }

    fn show(&mut self, kind: SurfaceKind, visible: bool) {
        match kind {
            SurfaceKind::Main => self.main_visible = visible,
            SurfaceKind::Mini => self.mini_visible = visible,
        }
        self.surface_mut(kind).set_visible(visible);
    }
}

/// Dummy surface for unit tests
///
/// Starts paused with an unknown duration. `set_source` resets position
/// like a real element does.
#[cfg(test)]
#[derive(Debug, Clone)]
pub struct DummySurface {
    pub source: Option<String>,
    pub paused: bool,
    pub muted: bool,
    pub visible: bool,
    pub position: f64,
    pub duration: f64,
    pub volume: f64,
    pub requests: Vec<PlayRequest>,
}

#[cfg(test)]
impl Default for DummySurface {
    fn default() -> Self {
        Self {
            source: None,
            paused: true,
            muted: false,
            visible: false,
            position: 0.0,
            duration: f64::NAN,
            volume: 1.0,
            requests: Vec::new(),
        }
    }
}

#[cfg(test)]
impl DummySurface {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
impl MediaSurface for DummySurface {
    fn set_source(&mut self, uri: &str) {
        self.source = Some(uri.to_string());
        self.position = 0.0;
        self.duration = f64::NAN;
    }

    fn source(&self) -> Option<String> {
        self.source.clone()
    }

    fn load(&mut self) {
        self.position = 0.0;
    }

    fn play(&mut self, request: PlayRequest) {
        self.paused = false;
        self.requests.push(request);
    }

    fn pause(&mut self) {
        self.paused = true;
    }

    fn is_paused(&self) -> bool {
        self.paused
    }

    fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn is_muted(&self) -> bool {
        self.muted
    }

    fn position(&self) -> f64 {
        self.position
    }

    fn set_position(&mut self, seconds: f64) {
        self.position = seconds;
    }

    fn duration(&self) -> f64 {
        self.duration
    }

    fn set_volume(&mut self, level: f64) {
        self.volume = level;
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn is_visible(&self) -> bool {
        self.visible
    }
}
