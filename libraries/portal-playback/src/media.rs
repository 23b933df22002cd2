//! Media resource boundary
//!
//! The controller never touches a platform media element directly. Each
//! player instance is handed its own `MediaHandle`, and the platform feeds
//! element callbacks back in as `PlaybackEvent` values tagged with the track
//! they were produced for.

use crate::error::ResourceErrorKind;
use serde::{Deserialize, Serialize};

/// Platform-agnostic playable handle
///
/// Mirrors the subset of an HTML media element the player relies on.
/// Loading and decoding happen on the platform side; results come back
/// asynchronously as events, never as return values of `load`.
pub trait MediaHandle {
    /// Point the element at a new source and start fetching it
    fn load(&mut self, source: &str);

    /// Current playback position in seconds
    fn current_time(&self) -> f64;

    /// Move the playhead
    fn set_current_time(&mut self, seconds: f64);

    /// Resource length, once metadata is available
    fn duration(&self) -> Option<f64>;

    /// Output gain in 0.0-1.0 (already accounts for mute)
    fn set_volume(&mut self, gain: f32);

    /// Start or resume output
    ///
    /// # Errors
    /// Autoplay policy or an unplayable resource
    fn play(&mut self) -> std::result::Result<(), ResourceErrorKind>;

    /// Pause output
    fn pause(&mut self);
}

/// Callbacks from the media element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlaybackEvent {
    /// Periodic progress tick
    TimeUpdate { position: f64 },

    /// Metadata arrived, duration is now authoritative
    MetadataLoaded { duration: f64 },

    /// Resource played to its end
    Ended,

    /// Resource failed to load or decode
    Error { kind: ResourceErrorKind },
}

impl PlaybackEvent {
    /// Short name for logging
    pub fn name(&self) -> &'static str {
        match self {
            PlaybackEvent::TimeUpdate { .. } => "time_update",
            PlaybackEvent::MetadataLoaded { .. } => "metadata_loaded",
            PlaybackEvent::Ended => "ended",
            PlaybackEvent::Error { .. } => "error",
        }
    }
}

/// Recording media handle for unit tests
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingMedia {
    pub source: Option<String>,
    pub time: f64,
    pub duration: Option<f64>,
    pub gain: f32,
    pub playing: bool,
    pub loads: usize,
    pub reject_play: bool,
}

#[cfg(test)]
impl MediaHandle for RecordingMedia {
    fn load(&mut self, source: &str) {
        self.source = Some(source.to_string());
        self.time = 0.0;
        self.duration = None;
        self.playing = false;
        self.loads += 1;
    }

    fn current_time(&self) -> f64 {
        self.time
    }

    fn set_current_time(&mut self, seconds: f64) {
        self.time = seconds;
    }

    fn duration(&self) -> Option<f64> {
        self.duration
    }

    fn set_volume(&mut self, gain: f32) {
        self.gain = gain;
    }

    fn play(&mut self) -> std::result::Result<(), ResourceErrorKind> {
        if self.reject_play {
            return Err(ResourceErrorKind::PlayRejected("autoplay blocked".to_string()));
        }
        self.playing = true;
        Ok(())
    }

    fn pause(&mut self) {
        self.playing = false;
    }
}
