//! Controller notifications
//!
//! Outbound counterpart to `media::PlaybackEvent`. The controller queues
//! these as it transitions; the UI drains them once per event-loop turn to
//! re-render.

use crate::comments::CommentId;
use crate::types::{RepeatMode, TrackId, TransportState};
use serde::{Deserialize, Serialize};

/// Events emitted by a controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ControllerEvent {
    /// Transport state changed
    StateChanged { state: TransportState },

    /// Current track replaced
    TrackChanged {
        /// New current track, `None` when stopped
        track_id: Option<TrackId>,
        /// Track that was current before
        previous_track_id: Option<TrackId>,
    },

    /// Authoritative duration known for the current track
    DurationChanged { track_id: TrackId, duration: f64 },

    /// Volume or mute changed
    VolumeChanged { level: f32, is_muted: bool },

    /// Shuffle or repeat changed
    ModeChanged { shuffle: bool, repeat: RepeatMode },

    /// Playlist replaced
    PlaylistChanged { length: usize },

    /// Non-fatal resource failure, shown inline to the user
    Error { track_id: TrackId, message: String },

    /// Review comment appended to a track's thread
    CommentAdded {
        track_id: TrackId,
        comment_id: CommentId,
        anchor: Option<f64>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_serialize_with_variant_tag() {
        let ev = ControllerEvent::StateChanged {
            state: TransportState::Playing,
        };
        let json = serde_json::to_string(&ev).unwrap();
        assert_eq!(json, r#"{"StateChanged":{"state":"playing"}}"#);
    }
}
