//! Headless playback walk-through
//!
//! Drives a `PlaybackController` over the live catalog with two simulated
//! surfaces, the way a browser page would drive it over two media elements.

use reel_core::MediaLibrary;
use reel_playback::{
    ControllerConfig, MediaEvent, MediaSurface, PlayRequest, PlaybackController, PlaybackEvent,
    Result, SurfaceKind,
};
use tracing::debug;

/// A media surface with no renderer
///
/// Starts accept immediately and metadata is known as soon as a source
/// loads, with every clip lasting `clip_seconds`.
#[derive(Debug)]
pub struct HeadlessSurface {
    kind: SurfaceKind,
    clip_seconds: f64,
    source: Option<String>,
    paused: bool,
    muted: bool,
    position: f64,
    duration: f64,
    visible: bool,
}

impl HeadlessSurface {
    pub fn new(kind: SurfaceKind, clip_seconds: f64) -> Self {
        Self {
            kind,
            clip_seconds,
            source: None,
            paused: true,
            muted: false,
            position: 0.0,
            duration: f64::NAN,
            visible: false,
        }
    }
}

impl MediaSurface for HeadlessSurface {
    fn set_source(&mut self, uri: &str) {
        self.source = Some(uri.to_string());
    }

    fn source(&self) -> Option<String> {
        self.source.clone()
    }

    fn load(&mut self) {
        self.position = 0.0;
        self.duration = self.clip_seconds;
        self.paused = true;
    }

    fn play(&mut self, request: PlayRequest) {
        debug!(
            surface = %self.kind,
            generation = request.generation,
            item_id = %request.item_id,
            "Play"
        );
        self.paused = false;
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
        debug!(surface = %self.kind, level, "Volume");
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn is_visible(&self) -> bool {
        self.visible
    }
}

/// Run the walk-through and return every event the controller emitted
///
/// Loads the catalog, plays the first item, hands it to the mini-player and
/// back, steps forward and back, lets the item end and finally hides the
/// player. An empty catalog stops after the "no items" notice.
pub async fn run<L: MediaLibrary + ?Sized>(
    library: &L,
    config: ControllerConfig,
    clip_seconds: f64,
) -> Result<Vec<PlaybackEvent>> {
    let mut controller = PlaybackController::new(
        HeadlessSurface::new(SurfaceKind::Main, clip_seconds),
        HeadlessSurface::new(SurfaceKind::Mini, clip_seconds),
        config,
    );
    let mut transcript = Vec::new();

    let first = controller.refresh_catalog(library).await.get(0).cloned();
    transcript.append(&mut controller.drain_events());

    let Some(first) = first else {
        // Nothing to play; surfaces the same notice the player shows
        controller.next().ok();
        transcript.append(&mut controller.drain_events());
        return Ok(transcript);
    };

    controller.select_and_play(&first)?;
    advance(&mut controller, 0.25);
    transcript.append(&mut controller.drain_events());

    controller.minimize();
    advance(&mut controller, 0.5);
    controller.maximize();
    transcript.append(&mut controller.drain_events());

    controller.toggle_play_pause();
    controller.toggle_play_pause();
    transcript.append(&mut controller.drain_events());

    controller.next()?;
    controller.previous()?;
    transcript.append(&mut controller.drain_events());

    advance(&mut controller, 1.0);
    let active = controller.active_surface();
    controller.handle_media_event(active, MediaEvent::Ended);
    transcript.append(&mut controller.drain_events());

    controller.hide();
    transcript.append(&mut controller.drain_events());

    Ok(transcript)
}

/// Move the active surface to `fraction` and deliver a time update
fn advance(controller: &mut PlaybackController<HeadlessSurface>, fraction: f64) {
    controller.seek(fraction);
    let active = controller.active_surface();
    controller.handle_media_event(active, MediaEvent::TimeUpdate);
}

/// One line per event for the terminal
pub fn describe(event: &PlaybackEvent) -> String {
    match event {
        PlaybackEvent::StateChanged { is_playing } => {
            format!("state     {}", if *is_playing { "playing" } else { "paused" })
        }
        PlaybackEvent::ItemChanged {
            item_id,
            previous_item_id,
        } => format!(
            "item      {} -> {}",
            previous_item_id.map_or_else(|| "-".to_string(), |id| id.to_string()),
            item_id.map_or_else(|| "-".to_string(), |id| id.to_string()),
        ),
        PlaybackEvent::SurfaceChanged {
            active,
            main_visible,
            mini_visible,
        } => format!(
            "surface   active={} main={} mini={}",
            active,
            visibility(*main_visible),
            visibility(*mini_visible)
        ),
        PlaybackEvent::ProgressUpdated {
            elapsed_text,
            duration_text,
            fraction,
        } => format!(
            "progress  {} / {} ({:.0}%)",
            elapsed_text,
            duration_text,
            fraction * 100.0
        ),
        PlaybackEvent::CatalogLoaded { count } => format!("catalog   {} items", count),
        PlaybackEvent::VolumeChanged { level } => format!("volume    {:.0}%", level * 100.0),
        PlaybackEvent::Notice { level, message } => format!("notice    [{:?}] {}", level, message),
        PlaybackEvent::Error { kind, message } => format!("error     [{:?}] {}", kind, message),
    }
}

fn visibility(visible: bool) -> &'static str {
    if visible {
        "shown"
    } else {
        "hidden"
    }
}
