//! Volume level and its persisted preference
//!
//! Volume is a linear fraction 0.0 - 1.0 applied to both surfaces. The
//! level survives reloads through a [`VolumeStore`], stored as a decimal
//! string under a fixed key.

use std::collections::HashMap;
use tracing::debug;

/// Volume controller
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Volume {
    /// Level (0.0 - 1.0)
    level: f64,
}

impl Volume {
    /// Create a volume, clamping into range
    ///
    /// NaN falls back to silence rather than poisoning the surfaces.
    pub fn new(level: f64) -> Self {
        Self {
            level: Self::sanitize(level),
        }
    }

    /// Set level (clamped to 0.0 - 1.0)
    pub fn set_level(&mut self, level: f64) {
        self.level = Self::sanitize(level);
    }

    pub fn level(&self) -> f64 {
        self.level
    }

    /// Slider position, 0 - 100
    pub fn percent(&self) -> u8 {
        (self.level * 100.0).round() as u8
    }

    /// Parse a persisted value; `None` for anything that is not a number
    pub fn from_stored(value: &str) -> Option<Self> {
        value
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|level| level.is_finite())
            .map(Self::new)
    }

    /// Value written to the preference store
    pub fn to_stored(self) -> String {
        self.level.to_string()
    }

    fn sanitize(level: f64) -> f64 {
        if level.is_nan() {
            0.0
        } else {
            level.clamp(0.0, 1.0)
        }
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self::new(0.5)
    }
}

/// Key/value preference storage for the volume level
///
/// Browser builds back this with `localStorage`.
pub trait VolumeStore {
    fn load(&self, key: &str) -> Option<String>;

    fn save(&mut self, key: &str, value: &str);
}

/// In-memory store for tests and headless use
#[derive(Debug, Clone, Default)]
pub struct MemoryVolumeStore {
    values: HashMap<String, String>,
}

impl MemoryVolumeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store with one key preset
    pub fn with_value(key: &str, value: &str) -> Self {
        let mut store = Self::new();
        store.save(key, value);
        store
    }
}

impl VolumeStore for MemoryVolumeStore {
    fn load(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn save(&mut self, key: &str, value: &str) {
        debug!(key, value, "Volume preference saved");
        self.values.insert(key.to_string(), value.to_string());
    }
}
