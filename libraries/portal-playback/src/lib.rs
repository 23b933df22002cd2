//! Agency Portal - Playback Core
//!
//! Platform-agnostic media playback state machine for the agency portal's
//! global music player and A&R demo review panel.
//!
//! This crate provides:
//! - Transport control (play/pause/toggle/stop, optimistic seek)
//! - Volume with mute kept separate from the stored level
//! - Playlist navigation (wrapping next/previous, shuffle, repeat none/all/one)
//! - "Previous" restart affordance past a configurable threshold
//! - Shuffle history so "previous" retraces a shuffled session
//! - Timeline geometry, comment markers and click hit-testing
//! - Timestamped, append-only review comments per demo
//! - Asset list to track mapping
//!
//! # Architecture
//!
//! `portal-playback` never touches a media element itself:
//! - Each controller is handed its own [`MediaHandle`]
//! - Media callbacks come back in as [`PlaybackEvent`] values tagged with the
//!   track they were produced for, so late callbacks for a previous track are
//!   dropped
//! - The UI drains [`ControllerEvent`] notifications after each call
//!
//! Browser bindings over `HtmlAudioElement` live behind the `wasm` feature.
//!
//! # Example: Basic Playback
//!
//! ```rust
//! use portal_playback::{
//!     MediaHandle, PlaybackController, PlaybackEvent, PlayerConfig, RepeatMode,
//!     ResourceErrorKind, Track, TrackId,
//! };
//!
//! // Platforms implement MediaHandle over their media element
//! #[derive(Default)]
//! struct Silent {
//!     time: f64,
//! }
//!
//! impl MediaHandle for Silent {
//!     fn load(&mut self, _source: &str) { self.time = 0.0; }
//!     fn current_time(&self) -> f64 { self.time }
//!     fn set_current_time(&mut self, seconds: f64) { self.time = seconds; }
//!     fn duration(&self) -> Option<f64> { None }
//!     fn set_volume(&mut self, _gain: f32) {}
//!     fn play(&mut self) -> Result<(), ResourceErrorKind> { Ok(()) }
//!     fn pause(&mut self) {}
//! }
//!
//! let mut player = PlaybackController::new(Silent::default(), &PlayerConfig::default());
//! player.set_playlist(vec![
//!     Track::new("a", "Opener", "Neon Lake", "/audio/a.mp3").with_duration(200.0),
//!     Track::new("b", "Closer", "Neon Lake", "/audio/b.mp3").with_duration(150.0),
//! ]);
//! player.set_repeat(RepeatMode::All);
//!
//! let a = TrackId::new("a");
//! player.select(&a).unwrap();
//! player.seek(199.0).unwrap();
//!
//! // The media element reports the end of the resource
//! player.handle_event(&a, PlaybackEvent::Ended);
//!
//! assert_eq!(player.current_track().unwrap().id, TrackId::new("b"));
//! assert_eq!(player.position(), 0.0);
//! assert!(player.is_playing());
//! ```
//!
//! # Example: Review Comments
//!
//! ```rust
//! # use portal_playback::{MediaHandle, ResourceErrorKind};
//! # #[derive(Default)]
//! # struct Silent;
//! # impl MediaHandle for Silent {
//! #     fn load(&mut self, _: &str) {}
//! #     fn current_time(&self) -> f64 { 0.0 }
//! #     fn set_current_time(&mut self, _: f64) {}
//! #     fn duration(&self) -> Option<f64> { None }
//! #     fn set_volume(&mut self, _: f32) {}
//! #     fn play(&mut self) -> Result<(), ResourceErrorKind> { Ok(()) }
//! #     fn pause(&mut self) {}
//! # }
//! use portal_playback::{PlayerConfig, ReviewSession, TimelineView, Track, TrackId};
//!
//! let mut review = ReviewSession::new(Silent, &PlayerConfig::default());
//! review.set_demos(vec![
//!     Track::new("d1", "Demo 1", "Unsigned Act", "/demos/d1.wav").with_duration(200.0),
//! ]);
//!
//! review.select_demo(&TrackId::new("d1")).unwrap();
//! review.controller_mut().seek(42.0).unwrap();
//! let comment = review.add_comment("ar-lead", "vocals too quiet").unwrap();
//! assert_eq!(comment.anchor, Some(42.0));
//!
//! // A 400px bar puts the marker at x = 84
//! let view = TimelineView::new(400.0, 6.0);
//! let marker = review.click_timeline(&view, 85.0).unwrap().unwrap();
//! assert_eq!(marker.text, "vocals too quiet");
//! ```

mod comments;
mod controller;
mod error;
mod events;
mod history;
mod library;
mod media;
mod playlist;
mod review;
mod shuffle;
mod state;
pub mod timeline;
pub mod types;
mod volume;

#[cfg(feature = "wasm")]
pub mod wasm;

// Public exports
pub use comments::{Comment, CommentId, CommentThread};
pub use controller::PlaybackController;
pub use error::{PlaybackError, Precondition, ResourceErrorKind, Result};
pub use events::ControllerEvent;
pub use history::History;
pub use library::{load_library, Asset, UNKNOWN_ARTIST};
pub use media::{MediaHandle, PlaybackEvent};
pub use playlist::Playlist;
pub use review::ReviewSession;
pub use shuffle::random_index;
pub use state::PlaybackState;
pub use timeline::{format_time, Marker, TimelineAction, TimelineView};
pub use types::{
    Direction, LoadIntent, PlayerConfig, RepeatMode, Track, TrackId, TransportState,
};
pub use volume::Volume;
