//! Core types for playback management

use serde::{Deserialize, Serialize};
use std::fmt;

/// Track identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrackId(String);

impl TrackId {
    /// Create a new track ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the inner string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for TrackId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A playable audio unit
///
/// Everything except `duration` is fixed once the track is built. Duration
/// starts as a hint (or unknown) and is corrected once the media element
/// reports real metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    /// Unique identifier
    pub id: TrackId,

    /// Display title
    pub title: String,

    /// Artist or default attribution
    pub artist: String,

    /// Album name (optional)
    pub album: Option<String>,

    /// Cover art reference (optional)
    pub cover: Option<String>,

    /// Audio source reference handed to the media element
    pub source: String,

    /// Length in seconds, if known
    pub duration: Option<f64>,
}

impl Track {
    /// Create a track with no album, cover or duration
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        artist: impl Into<String>,
        source: impl Into<String>,
    ) -> Self {
        Self {
            id: TrackId::new(id),
            title: title.into(),
            artist: artist.into(),
            album: None,
            cover: None,
            source: source.into(),
            duration: None,
        }
    }

    /// Builder-style duration hint
    #[must_use]
    pub fn with_duration(mut self, seconds: f64) -> Self {
        self.duration = sanitize_duration(seconds);
        self
    }
}

/// Accept only finite, non-negative durations
pub(crate) fn sanitize_duration(seconds: f64) -> Option<f64> {
    (seconds.is_finite() && seconds >= 0.0).then_some(seconds)
}

/// Transport state of a player instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportState {
    /// No track loaded
    Idle,

    /// Track set, position 0, never started
    Loaded,

    /// Currently playing
    Playing,

    /// Paused mid-track
    Paused,
}

/// Repeat mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepeatMode {
    /// Stop after the last track
    #[serde(rename = "none")]
    Off,

    /// Wrap around to the first track
    All,

    /// Loop current track only
    One,
}

impl RepeatMode {
    /// Next mode in the none → all → one → none cycle
    pub fn cycled(self) -> Self {
        match self {
            RepeatMode::Off => RepeatMode::All,
            RepeatMode::All => RepeatMode::One,
            RepeatMode::One => RepeatMode::Off,
        }
    }
}

/// Skip direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Next,
    Previous,
}

/// Why a track is being loaded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadIntent {
    /// User picked it: start playing
    Select,

    /// List refresh or restore: load the track but never start playback
    Passive,
}

/// Configuration for a player instance
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Initial volume (0.0-1.0, default: 1.0)
    pub volume: f32,

    /// Start muted (default: false)
    pub muted: bool,

    /// Initial shuffle flag (default: false)
    pub shuffle: bool,

    /// Initial repeat mode (default: none)
    pub repeat: RepeatMode,

    /// "Previous" restarts the current track past this many seconds (default: 3.0)
    pub restart_threshold_secs: f64,

    /// Tracks remembered for shuffled "previous" (default: 50)
    pub history_size: usize,

    /// Timeline marker hit tolerance in pixels (default: 6.0)
    pub marker_tolerance_px: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            volume: 1.0,
            muted: false,
            shuffle: false,
            repeat: RepeatMode::Off,
            restart_threshold_secs: 3.0,
            history_size: 50,
            marker_tolerance_px: 6.0,
        }
    }
}

impl PlayerConfig {
    /// Reject values that clamping cannot sensibly repair
    pub fn validate(&self) -> crate::Result<()> {
        if !self.volume.is_finite() {
            return Err(crate::PlaybackError::InvalidConfig(
                "volume must be a finite number".to_string(),
            ));
        }
        if !self.restart_threshold_secs.is_finite() || self.restart_threshold_secs < 0.0 {
            return Err(crate::PlaybackError::InvalidConfig(format!(
                "restart threshold must be >= 0, got {}",
                self.restart_threshold_secs
            )));
        }
        if !self.marker_tolerance_px.is_finite() || self.marker_tolerance_px < 0.0 {
            return Err(crate::PlaybackError::InvalidConfig(format!(
                "marker tolerance must be >= 0, got {}",
                self.marker_tolerance_px
            )));
        }
        Ok(())
    }
}
