//! Playback controller - core orchestration
//!
//! Single authoritative state machine for "what is playing and where".
//! User commands arrive as method calls, media element callbacks arrive
//! through `handle_event`. Every transition runs to completion inside one
//! `&mut self` call, so a load issued while a play is pending cannot race.
//!
//! ```text
//! Idle ──load──▶ Loaded ──play──▶ Playing ◀──▶ Paused
//!                                   │
//!                                 ended ──▶ repeat one: restart
//!                                        ├─ repeat all: next (wraps)
//!                                        └─ repeat none: next, or stop on last
//! ```

use crate::{
    error::{Precondition, PlaybackError, ResourceErrorKind, Result},
    events::ControllerEvent,
    history::History,
    media::{MediaHandle, PlaybackEvent},
    playlist::Playlist,
    shuffle::random_index,
    state::PlaybackState,
    types::{
        sanitize_duration, Direction, LoadIntent, PlayerConfig, RepeatMode, Track, TrackId,
        TransportState,
    },
    volume::Volume,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, warn};

/// Central playback management
///
/// Owns:
/// - The injected media handle (one per player instance, never shared)
/// - The playlist used for next/previous resolution
/// - History of played tracks (for shuffled "previous")
/// - Transport, volume, shuffle and repeat state
/// - Pending notifications for the UI
pub struct PlaybackController<M: MediaHandle> {
    media: M,
    playlist: Playlist,
    history: History,
    state: PlaybackState,

    // "Previous" restarts instead of skipping past this position
    restart_threshold: f64,

    rng: StdRng,

    // Event queue for UI synchronization
    pending_events: Vec<ControllerEvent>,
}

impl<M: MediaHandle> PlaybackController<M> {
    /// Create a controller around a media handle
    pub fn new(media: M, config: &PlayerConfig) -> Self {
        let mut volume = Volume::new(config.volume);
        if config.muted {
            volume.mute();
        }

        let mut controller = Self {
            media,
            playlist: Playlist::default(),
            history: History::new(config.history_size),
            state: PlaybackState::new(volume, config.shuffle, config.repeat),
            restart_threshold: config.restart_threshold_secs.max(0.0),
            rng: StdRng::from_entropy(),
            pending_events: Vec::new(),
        };
        controller.push_gain();
        controller
    }

    /// Replace the shuffle RNG with a seeded one (reproducible draws)
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    // ===== Track Loading =====

    /// Make `track` the current track
    ///
    /// Resets position to 0 and clears any previous resource error.
    /// `LoadIntent::Select` starts playback, `LoadIntent::Passive` leaves the
    /// track loaded but silent.
    pub fn load_track(&mut self, track: Track, intent: LoadIntent) -> Result<()> {
        self.switch_to(track, intent == LoadIntent::Select, true)
    }

    /// Load a playlist entry by identifier and start playing it
    pub fn select(&mut self, id: &TrackId) -> Result<()> {
        let Some(track) = self.playlist.find(id).cloned() else {
            debug!(track = %id, "select ignored: not in playlist");
            return Err(Precondition::UnknownTrack.into());
        };
        self.load_track(track, LoadIntent::Select)
    }

    /// Shared path for every track change
    fn switch_to(&mut self, track: Track, autoplay: bool, record_history: bool) -> Result<()> {
        let previous_track_id = self.state.current_id().cloned();
        if record_history {
            if let Some(prev) = previous_track_id.clone() {
                self.history.push(prev);
            }
        }

        info!(track = %track.id, autoplay, "loading track");

        self.media.load(&track.source);
        self.push_gain();

        self.state.position = 0.0;
        self.state.duration = track.duration;
        self.state.loading = true;
        self.state.error = None;
        self.state.transport = TransportState::Loaded;
        let track_id = track.id.clone();
        self.state.current = Some(track);

        self.emit(ControllerEvent::TrackChanged {
            track_id: Some(track_id),
            previous_track_id,
        });

        if autoplay {
            self.start_output()
        } else {
            self.emit_state_changed();
            Ok(())
        }
    }

    // ===== Playback Control =====

    /// Start or resume playback
    ///
    /// Retries the resource if the last attempt failed.
    pub fn play(&mut self) -> Result<()> {
        let Some(track) = self.state.current.as_ref() else {
            debug!("play ignored: no track loaded");
            return Err(Precondition::NoTrackLoaded.into());
        };

        if self.state.is_playing() {
            return Ok(());
        }

        if self.state.error.is_some() {
            info!(track = %track.id, "retrying failed track");
            let source = track.source.clone();
            let resume_at = self.state.position;
            self.media.load(&source);
            self.media.set_current_time(resume_at);
            self.push_gain();
            self.state.loading = true;
            self.state.error = None;
        }

        self.start_output()
    }

    /// Pause playback
    pub fn pause(&mut self) -> Result<()> {
        if self.state.current.is_none() {
            debug!("pause ignored: no track loaded");
            return Err(Precondition::NoTrackLoaded.into());
        }

        if self.state.is_playing() {
            self.media.pause();
            self.state.transport = TransportState::Paused;
            self.emit_state_changed();
        }
        Ok(())
    }

    /// Play if paused, pause if playing
    pub fn toggle(&mut self) -> Result<()> {
        if self.state.is_playing() {
            self.pause()
        } else {
            self.play()
        }
    }

    /// Unload the current track and return to idle
    pub fn stop(&mut self) {
        let previous_track_id = self.state.current_id().cloned();
        self.media.pause();

        self.state.transport = TransportState::Idle;
        self.state.current = None;
        self.state.position = 0.0;
        self.state.duration = None;
        self.state.loading = false;
        self.state.error = None;

        if previous_track_id.is_some() {
            self.emit(ControllerEvent::TrackChanged {
                track_id: None,
                previous_track_id,
            });
        }
        self.emit_state_changed();
    }

    /// Ask the media element to play and record the outcome
    fn start_output(&mut self) -> Result<()> {
        match self.media.play() {
            Ok(()) => {
                self.state.transport = TransportState::Playing;
                self.emit_state_changed();
                Ok(())
            }
            Err(kind) => {
                self.fail(kind.clone());
                let track_id = self
                    .state
                    .current_id()
                    .cloned()
                    .unwrap_or_else(|| TrackId::new(""));
                Err(PlaybackError::Resource { track_id, kind })
            }
        }
    }

    /// Non-fatal resource failure: stay on the track, paused, with a message
    fn fail(&mut self, kind: ResourceErrorKind) {
        let Some(track_id) = self.state.current_id().cloned() else {
            return;
        };
        warn!(track = %track_id, error = %kind, "media resource failed");

        self.media.pause();
        self.state.transport = TransportState::Paused;
        self.state.loading = false;
        self.state.error = Some(kind.clone());

        self.emit(ControllerEvent::Error {
            track_id,
            message: kind.to_string(),
        });
        self.emit_state_changed();
    }

    // ===== Seek =====

    /// Seek to an absolute position in seconds
    ///
    /// The target is clamped into [0, duration] and applied to the state
    /// immediately, even if the media is still buffering.
    pub fn seek(&mut self, seconds: f64) -> Result<()> {
        if self.state.current.is_none() {
            debug!("seek ignored: no track loaded");
            return Err(Precondition::NoTrackLoaded.into());
        }

        let target = self.state.clamp_position(seconds);
        self.state.position = target;
        self.media.set_current_time(target);

        if self.state.transport == TransportState::Loaded {
            self.state.transport = TransportState::Paused;
            self.emit_state_changed();
        }
        Ok(())
    }

    /// Seek to a fraction (0.0-1.0) of the current track
    pub fn seek_fraction(&mut self, fraction: f64) -> Result<()> {
        if self.state.current.is_none() {
            return Err(Precondition::NoTrackLoaded.into());
        }
        let Some(duration) = self.state.duration else {
            debug!("fractional seek ignored: duration unknown");
            return Err(Precondition::DurationUnknown.into());
        };
        let fraction = if fraction.is_nan() { 0.0 } else { fraction.clamp(0.0, 1.0) };
        self.seek(fraction * duration)
    }

    // ===== Volume =====

    /// Set volume (clamped to 0.0-1.0); mute is left as is
    pub fn set_volume(&mut self, level: f32) {
        self.state.volume.set_level(level);
        self.push_gain();
        self.emit_volume_changed();
    }

    /// Mute audio
    pub fn mute(&mut self) {
        self.state.volume.mute();
        self.push_gain();
        self.emit_volume_changed();
    }

    /// Unmute audio
    pub fn unmute(&mut self) {
        self.state.volume.unmute();
        self.push_gain();
        self.emit_volume_changed();
    }

    /// Toggle mute state
    pub fn toggle_mute(&mut self) {
        self.state.volume.toggle_mute();
        self.push_gain();
        self.emit_volume_changed();
    }

    fn push_gain(&mut self) {
        self.media.set_volume(self.state.volume.gain());
    }

    // ===== Navigation =====

    /// Skip to next track
    pub fn next(&mut self) -> Result<()> {
        self.advance(Direction::Next)
    }

    /// Go to previous track
    ///
    /// If past the restart threshold (3 s by default), restarts the current
    /// track instead.
    pub fn previous(&mut self) -> Result<()> {
        self.advance(Direction::Previous)
    }

    /// Resolve the neighbouring track and start playing it
    pub fn advance(&mut self, direction: Direction) -> Result<()> {
        if direction == Direction::Previous
            && self.state.current.is_some()
            && self.state.position > self.restart_threshold
        {
            return self.restart_current();
        }

        if self.playlist.is_empty() {
            debug!(?direction, "advance ignored: playlist empty");
            return Err(Precondition::PlaylistEmpty.into());
        }

        let index = match direction {
            Direction::Next => self.resolve_next(),
            Direction::Previous => self.resolve_previous(),
        };
        let Some(track) = index.and_then(|i| self.playlist.get(i)).cloned() else {
            return Err(Precondition::PlaylistEmpty.into());
        };

        debug!(?direction, track = %track.id, "advancing");
        self.switch_to(track, true, direction == Direction::Next)
    }

    fn resolve_next(&mut self) -> Option<usize> {
        let current = self.current_index();
        if self.state.shuffle {
            random_index(&mut self.rng, self.playlist.len(), current)
        } else {
            self.playlist.next_index(current)
        }
    }

    fn resolve_previous(&mut self) -> Option<usize> {
        let current = self.current_index();
        if self.state.shuffle {
            let current_id = self.state.current_id().cloned();
            let playlist = &self.playlist;
            let from_history = self
                .history
                .pop_until(|id| Some(id) != current_id.as_ref() && playlist.contains(id));
            if let Some(id) = from_history {
                return self.playlist.index_of(&id);
            }
        }
        self.playlist.previous_index(current)
    }

    /// Back to 0 on the same track, playing
    fn restart_current(&mut self) -> Result<()> {
        debug!("restarting current track");
        self.state.position = 0.0;
        self.media.set_current_time(0.0);
        if self.state.is_playing() {
            Ok(())
        } else {
            self.play()
        }
    }

    // ===== Shuffle & Repeat =====

    /// Set shuffle flag
    pub fn set_shuffle(&mut self, shuffle: bool) {
        if self.state.shuffle != shuffle {
            self.state.shuffle = shuffle;
            self.emit_mode_changed();
        }
    }

    /// Flip shuffle flag
    pub fn toggle_shuffle(&mut self) {
        self.set_shuffle(!self.state.shuffle);
    }

    /// Set repeat mode
    pub fn set_repeat(&mut self, mode: RepeatMode) {
        if self.state.repeat != mode {
            self.state.repeat = mode;
            self.emit_mode_changed();
        }
    }

    /// Step repeat through none → all → one
    pub fn cycle_repeat(&mut self) -> RepeatMode {
        let next = self.state.repeat.cycled();
        self.set_repeat(next);
        next
    }

    // ===== Playlist =====

    /// Replace the playlist wholesale
    ///
    /// Playback continues undisturbed unless the current track is gone from
    /// the new list, in which case it is paused (but stays loaded).
    pub fn set_playlist(&mut self, tracks: Vec<Track>) {
        self.playlist = Playlist::new(tracks);
        self.emit(ControllerEvent::PlaylistChanged {
            length: self.playlist.len(),
        });

        let orphaned = self
            .state
            .current_id()
            .is_some_and(|id| !self.playlist.contains(id));
        if orphaned && self.state.is_playing() {
            info!("current track left the playlist, pausing");
            self.media.pause();
            self.state.transport = TransportState::Paused;
            self.emit_state_changed();
        }
    }

    // ===== Media Callbacks =====

    /// Apply a media element callback
    ///
    /// Callbacks for any track other than the current one are stale (the
    /// user moved on while it was loading) and are dropped.
    pub fn handle_event(&mut self, origin: &TrackId, event: PlaybackEvent) {
        if self.state.current_id() != Some(origin) {
            debug!(origin = %origin, event = event.name(), "ignoring stale media event");
            return;
        }

        match event {
            PlaybackEvent::TimeUpdate { position } => {
                if position.is_finite() {
                    self.state.position = self.state.clamp_position(position);
                }
            }
            PlaybackEvent::MetadataLoaded { duration } => {
                self.apply_duration(origin, duration);
            }
            PlaybackEvent::Ended => self.handle_ended(),
            PlaybackEvent::Error { kind } => self.fail(kind),
        }
    }

    fn apply_duration(&mut self, origin: &TrackId, duration: f64) {
        self.state.loading = false;
        let Some(duration) = sanitize_duration(duration) else {
            debug!(track = %origin, duration, "ignoring unusable duration");
            return;
        };

        self.state.duration = Some(duration);
        if let Some(track) = self.state.current.as_mut() {
            track.duration = Some(duration);
        }
        self.playlist.correct_duration(origin, duration);
        self.state.position = self.state.clamp_position(self.state.position);

        self.emit(ControllerEvent::DurationChanged {
            track_id: origin.clone(),
            duration,
        });
    }

    fn handle_ended(&mut self) {
        if let Some(d) = self.state.duration {
            self.state.position = d;
        }

        let outcome = match self.state.repeat {
            RepeatMode::One => {
                self.state.position = 0.0;
                self.media.set_current_time(0.0);
                self.state.transport = TransportState::Paused;
                self.start_output()
            }
            RepeatMode::All => self.advance(Direction::Next),
            RepeatMode::Off => {
                let on_last = !self.state.shuffle
                    && self
                        .current_index()
                        .is_some_and(|i| self.playlist.is_last(i));
                if on_last {
                    self.stop_at_end();
                    Ok(())
                } else {
                    self.advance(Direction::Next)
                }
            }
        };

        if let Err(err) = outcome {
            if err.is_precondition() {
                self.stop_at_end();
            }
        }
    }

    /// End of the line: stay on the track, paused at 0
    fn stop_at_end(&mut self) {
        debug!("end of playlist");
        self.media.pause();
        self.media.set_current_time(0.0);
        self.state.position = 0.0;
        self.state.transport = TransportState::Paused;
        self.emit_state_changed();
    }

    // ===== State Queries =====

    /// Full state snapshot
    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    pub fn transport(&self) -> TransportState {
        self.state.transport
    }

    pub fn is_playing(&self) -> bool {
        self.state.is_playing()
    }

    pub fn is_loading(&self) -> bool {
        self.state.loading
    }

    /// Get currently loaded track
    pub fn current_track(&self) -> Option<&Track> {
        self.state.current.as_ref()
    }

    /// Position of the current track in the playlist
    pub fn current_index(&self) -> Option<usize> {
        self.state
            .current_id()
            .and_then(|id| self.playlist.index_of(id))
    }

    /// Elapsed seconds
    pub fn position(&self) -> f64 {
        self.state.position
    }

    /// Duration of the current track, if known
    pub fn duration(&self) -> Option<f64> {
        self.state.duration
    }

    /// Stored volume (0.0-1.0)
    pub fn volume(&self) -> f32 {
        self.state.volume.level()
    }

    pub fn is_muted(&self) -> bool {
        self.state.volume.is_muted()
    }

    /// Gain actually applied to the output
    pub fn effective_gain(&self) -> f32 {
        self.state.volume.gain()
    }

    pub fn shuffle(&self) -> bool {
        self.state.shuffle
    }

    pub fn repeat(&self) -> RepeatMode {
        self.state.repeat
    }

    /// Last resource error on the current track
    pub fn error(&self) -> Option<&ResourceErrorKind> {
        self.state.error.as_ref()
    }

    pub fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn media(&self) -> &M {
        &self.media
    }

    pub fn media_mut(&mut self) -> &mut M {
        &mut self.media
    }

    // ===== Events =====

    /// Drain all pending events
    ///
    /// The UI should call this once per event-loop turn.
    pub fn drain_events(&mut self) -> Vec<ControllerEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Check if there are pending events
    pub fn has_pending_events(&self) -> bool {
        !self.pending_events.is_empty()
    }

    fn emit(&mut self, event: ControllerEvent) {
        self.pending_events.push(event);
    }

    fn emit_state_changed(&mut self) {
        self.emit(ControllerEvent::StateChanged {
            state: self.state.transport,
        });
    }

    fn emit_volume_changed(&mut self) {
        self.emit(ControllerEvent::VolumeChanged {
            level: self.state.volume.level(),
            is_muted: self.state.volume.is_muted(),
        });
    }

    fn emit_mode_changed(&mut self) {
        self.emit(ControllerEvent::ModeChanged {
            shuffle: self.state.shuffle,
            repeat: self.state.repeat,
        });
    }
}
