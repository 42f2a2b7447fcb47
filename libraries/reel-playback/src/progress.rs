//! Progress readout for the active surface

use serde::{Deserialize, Serialize};

/// Format seconds as zero-padded `mm:ss`
///
/// Seconds are floored. Minutes are not wrapped into hours, so a two hour
/// file reads `120:00`. Anything that is not a finite, non-negative number
/// formats as `00:00`.
pub fn format_time(seconds: f64) -> String {
    if !seconds.is_finite() || seconds < 0.0 {
        return "00:00".to_string();
    }

    let total = seconds.floor() as u64;
    format!("{:02}:{:02}", total / 60, total % 60)
}

/// Whether a reported duration can be used for progress or seeking
pub(crate) fn is_known_duration(duration: f64) -> bool {
    duration.is_finite() && duration > 0.0
}

/// Point-in-time progress for display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressSnapshot {
    pub elapsed_text: String,
    pub duration_text: String,
    /// Elapsed / duration, 0.0 - 1.0
    pub fraction: f64,
}

impl ProgressSnapshot {
    /// Zeroed readout, shown before anything plays and after stop
    pub fn zero() -> Self {
        Self {
            elapsed_text: "00:00".to_string(),
            duration_text: "00:00".to_string(),
            fraction: 0.0,
        }
    }

    /// Progress bar fill, 0 - 100
    pub fn percent(&self) -> f64 {
        self.fraction * 100.0
    }
}

impl Default for ProgressSnapshot {
    fn default() -> Self {
        Self::zero()
    }
}

/// Tracks the last displayable progress of the active surface
#[derive(Debug, Clone, Default)]
pub struct ProgressReporter {
    current: ProgressSnapshot,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a position/duration sample
    ///
    /// Returns the new snapshot, or `None` when the duration is not known yet
    /// (metadata still loading). In that case the previous readout stays.
    pub fn observe(&mut self, position: f64, duration: f64) -> Option<&ProgressSnapshot> {
        if !is_known_duration(duration) {
            return None;
        }

        let position = if position.is_finite() {
            position.max(0.0)
        } else {
            0.0
        };

        self.current = ProgressSnapshot {
            elapsed_text: format_time(position),
            duration_text: format_time(duration),
            fraction: (position / duration).clamp(0.0, 1.0),
        };

        Some(&self.current)
    }

    /// Back to `00:00 / 00:00`
    pub fn reset(&mut self) {
        self.current = ProgressSnapshot::zero();
    }

    pub fn snapshot(&self) -> &ProgressSnapshot {
        &self.current
    }
}
