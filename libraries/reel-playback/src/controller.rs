//! Playback controller - core orchestration
//!
//! Coordinates catalog, playlist, current-item identity, the two output
//! surfaces, progress and volume. All operations are synchronous and run on
//! the UI thread; the only asynchronous inputs are host callbacks (play
//! rejections, media events), which are matched against the latest play
//! request before they touch any state.

use crate::{
    catalog::{Catalog, Playlist},
    error::{PlaybackError, Result},
    events::{NoticeLevel, PlaybackEvent},
    identity::{PlaybackIdentity, RequestTracker},
    progress::{is_known_duration, ProgressReporter, ProgressSnapshot},
    surface::{Handoff, MediaSurface, SurfaceSelector},
    types::{ControllerConfig, MediaEvent, PlayRequest, SurfaceKind},
    volume::{Volume, VolumeStore},
};
use reel_core::{CatalogItem, ItemId, MediaLibrary};
use tracing::{debug, error, info, warn};

const EMPTY_PLAYLIST_NOTICE: &str = "No items in the playlist";
const DELETED_NOTICE: &str = "Deleted successfully";

#[derive(Debug, Clone, Copy)]
enum Direction {
    Forward,
    Backward,
}

/// Dual-surface playback controller
///
/// Generic over the surface implementation so the same logic drives
/// browser media elements and test fakes.
pub struct PlaybackController<S: MediaSurface> {
    config: ControllerConfig,

    catalog: Catalog,
    playlist: Playlist,
    identity: PlaybackIdentity,
    requests: RequestTracker,

    surfaces: SurfaceSelector<S>,
    progress: ProgressReporter,
    volume: Volume,
    volume_store: Option<Box<dyn VolumeStore>>,

    is_playing: bool,

    // Events for UI synchronization
    pending_events: Vec<PlaybackEvent>,
}

impl<S: MediaSurface> PlaybackController<S> {
    /// Create a controller over two surfaces
    ///
    /// Main starts active and unmuted, Mini muted, both hidden and paused.
    pub fn new(main: S, mini: S, config: ControllerConfig) -> Self {
        let mut surfaces = SurfaceSelector::new(main, mini);
        surfaces.pause_all();

        let volume = Volume::new(config.default_volume);
        surfaces.set_volume(volume.level());

        Self {
            config,
            catalog: Catalog::empty(),
            playlist: Playlist::default(),
            identity: PlaybackIdentity::new(),
            requests: RequestTracker::new(),
            surfaces,
            progress: ProgressReporter::new(),
            volume,
            volume_store: None,
            is_playing: false,
            pending_events: Vec::new(),
        }
    }

    /// Attach a preference store and restore the persisted volume from it
    pub fn with_volume_store(mut self, store: Box<dyn VolumeStore>) -> Self {
        let stored = store
            .load(&self.config.volume_key)
            .and_then(|value| Volume::from_stored(&value));

        if let Some(volume) = stored {
            debug!(level = volume.level(), "Restored persisted volume");
            self.volume = volume;
        }
        self.surfaces.set_volume(self.volume.level());
        self.volume_store = Some(store);
        self
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    // ===== Catalog =====

    /// Replace the catalog with a load result
    ///
    /// On failure the playlist becomes empty and a load error is reported.
    /// Either way the current item keeps its id and its index is
    /// recomputed against the new playlist.
    pub fn apply_catalog(&mut self, result: Result<Catalog>) -> &Playlist {
        match result {
            Ok(catalog) => {
                info!(count = catalog.len(), "Catalog loaded");
                self.catalog = catalog;
            }
            Err(err) => {
                error!(error = %err, "Catalog load failed");
                self.catalog = Catalog::empty();
                self.report(&err);
            }
        }

        self.playlist = self.catalog.snapshot();
        self.identity.revalidate(&self.playlist);
        self.pending_events.push(PlaybackEvent::CatalogLoaded {
            count: self.playlist.len(),
        });

        &self.playlist
    }

    /// Fetch the catalog from `library` and apply it
    pub async fn refresh_catalog<L: MediaLibrary + ?Sized>(&mut self, library: &L) -> &Playlist {
        let result = Catalog::load(library).await;
        self.apply_catalog(result)
    }

    /// Delete an item on the server, then refresh the catalog
    ///
    /// Nothing changes locally when the server refuses.
    pub async fn delete_item<L: MediaLibrary + ?Sized>(
        &mut self,
        library: &L,
        id: ItemId,
    ) -> Result<()> {
        let result = library.delete_item(id).await;
        self.apply_delete(id, result)?;
        self.refresh_catalog(library).await;
        Ok(())
    }

    /// Apply the outcome of a delete request
    ///
    /// On success, if `id` is the current item, playback stops, both
    /// surfaces are hidden, and the current item is cleared. The caller is
    /// expected to refresh the catalog afterwards.
    pub fn apply_delete(&mut self, id: ItemId, result: reel_core::Result<()>) -> Result<()> {
        if let Err(e) = result {
            let err = PlaybackError::DeleteFailed {
                item_id: id,
                reason: e.to_string(),
            };
            warn!(item_id = %id, error = %e, "Delete failed");
            self.report(&err);
            return Err(err);
        }

        info!(item_id = %id, "Item deleted");
        self.notify(NoticeLevel::Success, DELETED_NOTICE);

        if self.identity.current_id() == Some(id) {
            self.hide();
            self.identity.clear();
            self.pending_events.push(PlaybackEvent::ItemChanged {
                item_id: None,
                previous_item_id: Some(id),
            });
        }

        Ok(())
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    // ===== Transport =====

    /// Make `item` current and start playing it on the active surface
    ///
    /// Both surfaces are paused and reloaded with the item's source. If no
    /// surface is visible, the full-size player is shown. Whether playback
    /// actually starts is up to the host; a refusal comes back through
    /// [`handle_play_rejected`](Self::handle_play_rejected).
    pub fn select_and_play(&mut self, item: &CatalogItem) -> Result<()> {
        if item.source_path.trim().is_empty() {
            let err = PlaybackError::InvalidSource(item.id);
            warn!(item_id = %item.id, "Item has no source path");
            self.report(&err);
            return Err(err);
        }

        let uri = item.media_url(&self.config.media_base_path);
        let previous_item_id = self.identity.current_id();

        self.surfaces.pause_all();
        self.surfaces.assign_source(&uri);
        self.identity.assign(item.id, &self.playlist);

        if !self.surfaces.is_any_visible() {
            self.surfaces.reveal_main();
            self.emit_surface_changed();
        }
        self.surfaces.apply_mute_policy();

        self.progress.reset();
        self.pending_events
            .push(PlaybackEvent::progress(self.progress.snapshot()));

        info!(
            item_id = %item.id,
            name = %item.display_name,
            surface = %self.surfaces.active(),
            "Loading item"
        );
        self.start_active(item.id);

        self.pending_events.push(PlaybackEvent::ItemChanged {
            item_id: Some(item.id),
            previous_item_id,
        });

        Ok(())
    }

    /// Look an item up in the catalog and play it
    pub fn select_by_id(&mut self, id: ItemId) -> Result<()> {
        let item = self
            .catalog
            .find_by_id(id)
            .cloned()
            .ok_or(PlaybackError::UnknownItem(id))?;
        self.select_and_play(&item)
    }

    /// Switch to the mini-player (if needed) and play `item` there
    pub fn select_and_play_minimized(&mut self, item: &CatalogItem) -> Result<()> {
        if self.surfaces.active() != SurfaceKind::Mini {
            self.minimize();
        }
        self.select_and_play(item)
    }

    /// Play if the active surface is paused, pause otherwise
    ///
    /// Ignored while both surfaces are hidden. Pausing supersedes the
    /// outstanding play request, so the host's abort of that request is
    /// treated as stale.
    pub fn toggle_play_pause(&mut self) {
        let Some(item_id) = self.identity.current_id() else {
            debug!("Toggle ignored, nothing selected");
            return;
        };

        if !self.surfaces.is_any_visible() {
            debug!(item_id = %item_id, "Toggle ignored, player hidden");
            return;
        }

        if self.surfaces.active_surface().is_paused() {
            self.start_active(item_id);
        } else {
            self.surfaces.active_surface_mut().pause();
            self.requests.invalidate();
            self.set_playing(false);
        }
    }

    /// Advance to the next item, wrapping to the first
    pub fn next(&mut self) -> Result<()> {
        self.navigate(Direction::Forward)
    }

    /// Go back to the previous item, wrapping to the last
    pub fn previous(&mut self) -> Result<()> {
        self.navigate(Direction::Backward)
    }

    /// Restart the current item from the beginning
    pub fn replay(&mut self) -> Result<()> {
        let item = self
            .identity
            .current_index()
            .and_then(|index| self.playlist.get(index))
            .cloned()
            .ok_or(PlaybackError::NoCurrentItem)?;
        self.select_and_play(&item)
    }

    /// Seek the active surface to a fraction of its duration
    ///
    /// The fraction is clamped to 0.0 - 1.0. Returns `false` (and changes
    /// nothing) when the fraction is NaN or the duration is not known yet.
    pub fn seek(&mut self, fraction: f64) -> bool {
        if fraction.is_nan() {
            return false;
        }

        let fraction = fraction.clamp(0.0, 1.0);
        let surface = self.surfaces.active_surface_mut();
        let duration = surface.duration();
        if !is_known_duration(duration) {
            debug!(fraction, "Seek ignored, duration unknown");
            return false;
        }

        surface.set_position(fraction * duration);
        self.refresh_progress();
        true
    }

    /// Pause both surfaces and zero the progress readout
    ///
    /// The current item is kept; outstanding play requests are superseded.
    pub fn stop(&mut self) {
        self.surfaces.pause_all();
        self.requests.invalidate();
        self.set_playing(false);
        self.progress.reset();
        self.pending_events
            .push(PlaybackEvent::progress(self.progress.snapshot()));
    }

    // ===== Surfaces =====

    /// Hand playback from the full-size player to the mini-player
    pub fn minimize(&mut self) {
        if let Some(handoff) = self.surfaces.switch_to(SurfaceKind::Mini) {
            self.finish_handoff(handoff);
        }
    }

    /// Hand playback from the mini-player back to the full-size player
    pub fn maximize(&mut self) {
        match self.surfaces.switch_to(SurfaceKind::Main) {
            Some(handoff) => self.finish_handoff(handoff),
            None if !self.surfaces.is_main_visible() => {
                self.surfaces.reveal_main();
                self.emit_surface_changed();
            }
            None => {}
        }
    }

    /// Stop playback and hide both surfaces
    pub fn hide(&mut self) {
        self.stop();
        self.surfaces.hide_all();
        self.emit_surface_changed();
    }

    // ===== Volume =====

    /// Set the volume on both surfaces and persist it
    pub fn set_volume(&mut self, level: f64) {
        self.volume.set_level(level);
        let level = self.volume.level();
        self.surfaces.set_volume(level);

        if let Some(store) = self.volume_store.as_mut() {
            store.save(&self.config.volume_key, &self.volume.to_stored());
        }

        self.pending_events.push(PlaybackEvent::VolumeChanged { level });
    }

    pub fn volume(&self) -> f64 {
        self.volume.level()
    }

    // ===== Host callbacks =====

    /// The host refused to start playback for `request`
    ///
    /// Applied only when `request` is the latest; anything older is
    /// discarded and returned as [`PlaybackError::StaleCallback`].
    pub fn handle_play_rejected(&mut self, request: PlayRequest, reason: impl Into<String>) -> Result<()> {
        if let Err(stale) = self.requests.check(&request) {
            debug!(
                generation = request.generation,
                item_id = %request.item_id,
                "Discarding stale play rejection"
            );
            return Err(stale);
        }

        let reason = reason.into();
        warn!(item_id = %request.item_id, surface = %request.surface, reason = %reason, "Playback rejected");
        self.set_playing(false);
        self.report(&PlaybackError::PlaybackRejected {
            item_id: request.item_id,
            reason,
        });
        Ok(())
    }

    /// A surface reported a media event
    ///
    /// Events from the inactive surface are ignored.
    pub fn handle_media_event(&mut self, surface: SurfaceKind, event: MediaEvent) {
        if surface != self.surfaces.active() {
            return;
        }

        match event {
            MediaEvent::TimeUpdate => self.refresh_progress(),
            MediaEvent::Playing => self.set_playing(true),
            MediaEvent::Paused => self.set_playing(false),
            MediaEvent::Ended => {
                debug!(item_id = ?self.identity.current_id(), "Item ended, advancing");
                if let Err(e) = self.next() {
                    debug!(error = %e, "Auto-advance skipped");
                }
            }
            MediaEvent::Error(message) => {
                error!(surface = %surface, error = %message, "Media error");
                self.stop();
                self.report(&PlaybackError::Media(message));
            }
        }
    }

    // ===== State Queries =====

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn current_id(&self) -> Option<ItemId> {
        self.identity.current_id()
    }

    pub fn current_index(&self) -> Option<usize> {
        self.identity.current_index()
    }

    /// Catalog entry for the current item
    pub fn current_item(&self) -> Option<&CatalogItem> {
        self.identity
            .current_id()
            .and_then(|id| self.catalog.find_by_id(id))
    }

    pub fn progress(&self) -> &ProgressSnapshot {
        self.progress.snapshot()
    }

    pub fn progress_fraction(&self) -> f64 {
        self.progress.snapshot().fraction
    }

    pub fn elapsed_text(&self) -> &str {
        &self.progress.snapshot().elapsed_text
    }

    pub fn duration_text(&self) -> &str {
        &self.progress.snapshot().duration_text
    }

    pub fn active_surface(&self) -> SurfaceKind {
        self.surfaces.active()
    }

    pub fn surface(&self, kind: SurfaceKind) -> &S {
        self.surfaces.surface(kind)
    }

    pub fn is_main_visible(&self) -> bool {
        self.surfaces.is_main_visible()
    }

    pub fn is_mini_visible(&self) -> bool {
        self.surfaces.is_mini_visible()
    }

    /// Latest outstanding play request, if any
    pub fn latest_request(&self) -> Option<PlayRequest> {
        self.requests.latest()
    }

    // ===== Events =====

    /// Take all queued events
    pub fn drain_events(&mut self) -> Vec<PlaybackEvent> {
        std::mem::take(&mut self.pending_events)
    }

    pub fn has_pending_events(&self) -> bool {
        !self.pending_events.is_empty()
    }

    // ===== Internals =====

    fn navigate(&mut self, direction: Direction) -> Result<()> {
        if self.playlist.is_empty() {
            self.notify(NoticeLevel::Warning, EMPTY_PLAYLIST_NOTICE);
            return Err(PlaybackError::EmptyPlaylist);
        }

        // A single-item playlist wraps onto itself, which replays it
        let current = self.identity.current_index();
        let target = match direction {
            Direction::Forward => self.playlist.next_index(current),
            Direction::Backward => self.playlist.previous_index(current),
        };

        let item = target
            .and_then(|index| self.playlist.get(index))
            .cloned()
            .ok_or(PlaybackError::EmptyPlaylist)?;
        self.select_and_play(&item)
    }

    /// Issue a fresh play request on the active surface
    fn start_active(&mut self, item_id: ItemId) {
        let request = self.requests.issue(item_id, self.surfaces.active());
        self.surfaces.active_surface_mut().play(request);
        self.set_playing(true);
    }

    fn finish_handoff(&mut self, handoff: Handoff) {
        if handoff.resume {
            if let Some(item_id) = self.identity.current_id() {
                self.start_active(item_id);
            }
        }
        self.refresh_progress();
        self.emit_surface_changed();
    }

    fn refresh_progress(&mut self) {
        let surface = self.surfaces.active_surface();
        let (position, duration) = (surface.position(), surface.duration());
        if let Some(snapshot) = self.progress.observe(position, duration) {
            self.pending_events.push(PlaybackEvent::progress(snapshot));
        }
    }

    fn set_playing(&mut self, playing: bool) {
        if self.is_playing != playing {
            self.is_playing = playing;
            self.pending_events
                .push(PlaybackEvent::StateChanged { is_playing: playing });
        }
    }

    fn emit_surface_changed(&mut self) {
        self.pending_events.push(PlaybackEvent::SurfaceChanged {
            active: self.surfaces.active(),
            main_visible: self.surfaces.is_main_visible(),
            mini_visible: self.surfaces.is_mini_visible(),
        });
    }

    fn notify(&mut self, level: NoticeLevel, message: &str) {
        self.pending_events
            .push(PlaybackEvent::notice(level, message));
    }

    fn report(&mut self, err: &PlaybackError) {
        if err.is_user_visible() {
            self.pending_events.push(PlaybackEvent::error(err));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::DummySurface;

    fn items(ids: &[i64]) -> Vec<CatalogItem> {
        ids.iter()
            .map(|&id| CatalogItem::new(ItemId::new(id), format!("Item {id}"), format!("item_{id}.mp4")))
            .collect()
    }

    fn controller_with(ids: &[i64]) -> PlaybackController<DummySurface> {
        let mut controller = PlaybackController::new(
            DummySurface::new(),
            DummySurface::new(),
            ControllerConfig::default(),
        );
        controller.apply_catalog(Ok(Catalog::new(items(ids))));
        controller.drain_events();
        controller
    }

    #[test]
    fn test_new_controller() {
        let controller = controller_with(&[]);
        assert!(!controller.is_playing());
        assert_eq!(controller.current_id(), None);
        assert_eq!(controller.current_index(), None);
        assert_eq!(controller.active_surface(), SurfaceKind::Main);
        assert_eq!(controller.volume(), 0.5);
        assert_eq!(controller.surface(SurfaceKind::Mini).volume, 0.5);
    }

    #[test]
    fn test_select_and_play() {
        let mut controller = controller_with(&[1, 2, 3]);
        controller.select_by_id(ItemId::new(2)).unwrap();

        assert!(controller.is_playing());
        assert_eq!(controller.current_id(), Some(ItemId::new(2)));
        assert_eq!(controller.current_index(), Some(1));
        assert!(controller.is_main_visible());

        let main = controller.surface(SurfaceKind::Main);
        let mini = controller.surface(SurfaceKind::Mini);
        assert_eq!(main.source.as_deref(), Some("/video/item_2.mp4"));
        assert_eq!(mini.source, main.source);
        assert!(!main.paused && mini.paused);
        assert!(!main.muted && mini.muted);
    }

    #[test]
    fn test_select_unknown_item() {
        let mut controller = controller_with(&[1]);
        assert!(matches!(
            controller.select_by_id(ItemId::new(9)),
            Err(PlaybackError::UnknownItem(_))
        ));
        assert_eq!(controller.current_id(), None);
    }

    #[test]
    fn test_invalid_source_leaves_state() {
        let mut controller = controller_with(&[1]);
        let broken = CatalogItem::new(ItemId::new(5), "Broken", "  ");
        assert!(matches!(
            controller.select_and_play(&broken),
            Err(PlaybackError::InvalidSource(_))
        ));
        assert_eq!(controller.current_id(), None);
        assert!(controller.surface(SurfaceKind::Main).source.is_none());
    }

    #[test]
    fn test_replay_needs_current_item() {
        let mut controller = controller_with(&[1, 2]);
        assert!(matches!(controller.replay(), Err(PlaybackError::NoCurrentItem)));

        controller.select_by_id(ItemId::new(2)).unwrap();
        controller.replay().unwrap();
        assert_eq!(controller.current_id(), Some(ItemId::new(2)));
        assert_eq!(controller.surface(SurfaceKind::Main).requests.len(), 2);
    }

    #[test]
    fn test_toggle_without_selection_is_noop() {
        let mut controller = controller_with(&[1]);
        controller.toggle_play_pause();
        assert!(!controller.is_playing());
        assert!(!controller.has_pending_events());
    }

    #[test]
    fn test_state_changed_only_on_flip() {
        let mut controller = controller_with(&[1, 2]);
        controller.select_by_id(ItemId::new(1)).unwrap();
        controller.select_by_id(ItemId::new(2)).unwrap();

        let flips = controller
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, PlaybackEvent::StateChanged { .. }))
            .count();
        assert_eq!(flips, 1);
    }

    #[test]
    fn test_volume_restored_from_store() {
        use crate::volume::MemoryVolumeStore;

        let controller = PlaybackController::new(
            DummySurface::new(),
            DummySurface::new(),
            ControllerConfig::default(),
        )
        .with_volume_store(Box::new(MemoryVolumeStore::with_value("volume", "0.2")));

        assert_eq!(controller.volume(), 0.2);
        assert_eq!(controller.surface(SurfaceKind::Main).volume, 0.2);
    }

    #[test]
    fn test_garbage_volume_falls_back_to_default() {
        use crate::volume::MemoryVolumeStore;

        let controller = PlaybackController::new(
            DummySurface::new(),
            DummySurface::new(),
            ControllerConfig::default(),
        )
        .with_volume_store(Box::new(MemoryVolumeStore::with_value("volume", "loud")));

        assert_eq!(controller.volume(), 0.5);
    }
}
