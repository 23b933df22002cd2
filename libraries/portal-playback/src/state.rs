//! Per-instance playback state
//!
//! Owned and mutated only by `PlaybackController`. Serializable so a host can
//! stash it in local storage between sessions.

use crate::error::ResourceErrorKind;
use crate::types::{RepeatMode, Track, TrackId, TransportState};
use crate::volume::Volume;
use serde::{Deserialize, Serialize};

/// Transport snapshot
///
/// Invariant: `0 <= position <= duration` whenever the duration is known.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybackState {
    pub transport: TransportState,

    /// Current track, `None` while idle
    pub current: Option<Track>,

    /// Elapsed seconds
    pub position: f64,

    /// Authoritative length of the current track
    pub duration: Option<f64>,

    pub volume: Volume,
    pub shuffle: bool,
    pub repeat: RepeatMode,

    /// Resource requested, no metadata or error callback yet
    pub loading: bool,

    /// Last resource failure on the current track
    pub error: Option<ResourceErrorKind>,
}

impl PlaybackState {
    /// Fresh idle state
    pub fn new(volume: Volume, shuffle: bool, repeat: RepeatMode) -> Self {
        Self {
            transport: TransportState::Idle,
            current: None,
            position: 0.0,
            duration: None,
            volume,
            shuffle,
            repeat,
            loading: false,
            error: None,
        }
    }

    /// Identifier of the current track
    pub fn current_id(&self) -> Option<&TrackId> {
        self.current.as_ref().map(|t| &t.id)
    }

    pub fn is_playing(&self) -> bool {
        self.transport == TransportState::Playing
    }

    /// Gain the listener actually hears
    pub fn effective_gain(&self) -> f32 {
        self.volume.gain()
    }

    /// Elapsed fraction in [0, 1], `None` while the duration is unknown
    pub fn progress(&self) -> Option<f64> {
        match self.duration {
            Some(d) if d > 0.0 => Some((self.position / d).clamp(0.0, 1.0)),
            Some(_) => Some(0.0),
            None => None,
        }
    }

    /// Clamp a requested position into [0, duration]
    ///
    /// Only the lower bound applies while the duration is unknown.
    pub fn clamp_position(&self, seconds: f64) -> f64 {
        if seconds.is_nan() {
            return 0.0;
        }
        let upper = self.duration.unwrap_or(f64::INFINITY);
        seconds.clamp(0.0, upper)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_with_duration(duration: Option<f64>) -> PlaybackState {
        let mut s = PlaybackState::new(Volume::default(), false, RepeatMode::Off);
        s.duration = duration;
        s
    }

    #[test]
    fn clamp_with_known_duration() {
        let s = state_with_duration(Some(200.0));
        assert_eq!(s.clamp_position(-5.0), 0.0);
        assert_eq!(s.clamp_position(42.0), 42.0);
        assert_eq!(s.clamp_position(250.0), 200.0);
        assert_eq!(s.clamp_position(f64::NAN), 0.0);
    }

    #[test]
    fn clamp_with_unknown_duration_only_bounds_below() {
        let s = state_with_duration(None);
        assert_eq!(s.clamp_position(-1.0), 0.0);
        assert_eq!(s.clamp_position(9000.0), 9000.0);
    }

    #[test]
    fn progress_fraction() {
        let mut s = state_with_duration(Some(200.0));
        s.position = 50.0;
        assert_eq!(s.progress(), Some(0.25));

        let s = state_with_duration(None);
        assert_eq!(s.progress(), None);

        let s = state_with_duration(Some(0.0));
        assert_eq!(s.progress(), Some(0.0));
    }

    #[test]
    fn state_round_trips_through_json() {
        let mut s = state_with_duration(Some(120.0));
        s.current = Some(Track::new("a", "A", "X", "a.mp3").with_duration(120.0));
        s.position = 12.5;
        s.transport = TransportState::Paused;

        let json = serde_json::to_string(&s).unwrap();
        let back: PlaybackState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, s);
    }
}
