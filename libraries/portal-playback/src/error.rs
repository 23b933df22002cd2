//! Error types for playback management
//!
//! Nothing here is fatal to the host. Precondition failures are no-ops the
//! caller may ignore, resource failures leave the errored track loaded so it
//! can be retried or skipped. Out-of-range values are clamped and never show
//! up as errors at all.

use crate::types::TrackId;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Command issued while the controller is in a state that cannot honour it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Precondition {
    /// No track is currently loaded
    NoTrackLoaded,

    /// Playlist has no entries to navigate
    PlaylistEmpty,

    /// Requested track is not part of the playlist
    UnknownTrack,

    /// Operation needs a duration the media has not reported yet
    DurationUnknown,
}

impl std::fmt::Display for Precondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let msg = match self {
            Precondition::NoTrackLoaded => "no track loaded",
            Precondition::PlaylistEmpty => "playlist is empty",
            Precondition::UnknownTrack => "track is not in the playlist",
            Precondition::DurationUnknown => "track duration is not known yet",
        };
        f.write_str(msg)
    }
}

/// Why a media resource could not be played
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResourceErrorKind {
    /// Source could not be fetched
    Unreachable,

    /// Source was fetched but could not be decoded
    Decode,

    /// Platform refused to start playback (autoplay policy and the like)
    PlayRejected(String),
}

impl std::fmt::Display for ResourceErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResourceErrorKind::Unreachable => f.write_str("media unreachable"),
            ResourceErrorKind::Decode => f.write_str("media could not be decoded"),
            ResourceErrorKind::PlayRejected(reason) => write!(f, "playback rejected: {reason}"),
        }
    }
}

/// Playback errors
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// Command not valid in the current state
    #[error("Precondition failed: {0}")]
    Precondition(Precondition),

    /// Media resource failed to load, decode or start
    #[error("Resource error on {track_id}: {kind}")]
    Resource {
        track_id: TrackId,
        kind: ResourceErrorKind,
    },

    /// Asset list could not be parsed
    #[error("Library error: {0}")]
    Library(#[from] serde_json::Error),

    /// Configuration rejected by validation
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl PlaybackError {
    /// True for errors that only mean "nothing happened"
    pub fn is_precondition(&self) -> bool {
        matches!(self, PlaybackError::Precondition(_))
    }
}

impl From<Precondition> for PlaybackError {
    fn from(p: Precondition) -> Self {
        PlaybackError::Precondition(p)
    }
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
