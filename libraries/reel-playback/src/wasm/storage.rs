//! `localStorage` backed volume preference

use crate::volume::VolumeStore;
use tracing::warn;
use web_sys::Storage;

/// Volume preference kept in the browser's `localStorage`
pub struct LocalStorageVolumeStore {
    storage: Storage,
}

impl LocalStorageVolumeStore {
    /// Open the window's `localStorage`
    ///
    /// Returns `None` outside a window or when storage is disabled.
    pub fn from_window() -> Option<Self> {
        let storage = web_sys::window()?.local_storage().ok()??;
        Some(Self { storage })
    }
}

impl VolumeStore for LocalStorageVolumeStore {
    fn load(&self, key: &str) -> Option<String> {
        self.storage.get_item(key).ok().flatten()
    }

    fn save(&mut self, key: &str, value: &str) {
        if let Err(e) = self.storage.set_item(key, value) {
            warn!(key, error = ?e, "Could not persist volume");
        }
    }
}
