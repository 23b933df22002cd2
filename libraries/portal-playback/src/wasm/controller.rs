//! WASM-compatible PlaybackController wrapper

use super::media::AudioElementMedia;
use super::types::WasmTrack;
use crate::{
    ControllerEvent, PlaybackController, PlaybackError, PlaybackEvent, PlayerConfig, RepeatMode,
    ResourceErrorKind, Track, TrackId,
};
use js_sys::Function;
use wasm_bindgen::prelude::*;

/// WASM-compatible playback controller
///
/// Wraps the core controller with a JavaScript-friendly API. Controller
/// events are flushed to the registered callbacks after every call.
#[wasm_bindgen]
pub struct WasmPlaybackController {
    inner: PlaybackController<AudioElementMedia>,

    // Event callbacks
    on_state_change: Option<Function>,
    on_track_change: Option<Function>,
    on_playlist_change: Option<Function>,
    on_error: Option<Function>,
    on_event: Option<Function>,
}

#[wasm_bindgen]
impl WasmPlaybackController {
    /// Create a controller with its own audio element
    ///
    /// `config` is an optional plain object matching `PlayerConfig`.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<WasmPlaybackController, JsValue> {
        console_error_panic_hook::set_once();

        let config: PlayerConfig = if config.is_undefined() || config.is_null() {
            PlayerConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)
                .map_err(|e| JsValue::from_str(&format!("Invalid config: {e}")))?
        };
        config.validate().map_err(|e| JsValue::from_str(&e.to_string()))?;

        Ok(Self {
            inner: PlaybackController::new(AudioElementMedia::new()?, &config),
            on_state_change: None,
            on_track_change: None,
            on_playlist_change: None,
            on_error: None,
            on_event: None,
        })
    }

    // ===== Playback Control =====

    /// Load a track; `autoplay` mirrors an explicit user selection
    #[wasm_bindgen(js_name = loadTrack)]
    pub fn load_track(&mut self, track: JsValue, autoplay: bool) -> Result<(), JsValue> {
        let track: WasmTrack = serde_wasm_bindgen::from_value(track)
            .map_err(|e| JsValue::from_str(&format!("Failed to parse track: {e}")))?;
        let intent = if autoplay {
            crate::LoadIntent::Select
        } else {
            crate::LoadIntent::Passive
        };
        let result = self.inner.load_track(track.into(), intent);
        self.settle(result)
    }

    /// Select a playlist entry by id and play it
    pub fn select(&mut self, id: &str) -> Result<(), JsValue> {
        let result = self.inner.select(&TrackId::new(id));
        self.settle(result)
    }

    /// Start or resume playback
    pub fn play(&mut self) -> Result<(), JsValue> {
        let result = self.inner.play();
        self.settle(result)
    }

    /// Pause playback
    pub fn pause(&mut self) -> Result<(), JsValue> {
        let result = self.inner.pause();
        self.settle(result)
    }

    /// Toggle play/pause
    pub fn toggle(&mut self) -> Result<(), JsValue> {
        let result = self.inner.toggle();
        self.settle(result)
    }

    /// Stop and unload
    pub fn stop(&mut self) {
        self.inner.stop();
        self.flush();
    }

    /// Skip to next track
    pub fn next(&mut self) -> Result<(), JsValue> {
        let result = self.inner.next();
        self.settle(result)
    }

    /// Go to previous track (or restart the current one)
    pub fn previous(&mut self) -> Result<(), JsValue> {
        let result = self.inner.previous();
        self.settle(result)
    }

    // ===== Volume Control =====

    /// Set volume (0.0 - 1.0)
    #[wasm_bindgen(js_name = setVolume)]
    pub fn set_volume(&mut self, level: f32) {
        self.inner.set_volume(level);
        self.flush();
    }

    /// Get stored volume (0.0 - 1.0)
    #[wasm_bindgen(js_name = getVolume)]
    pub fn get_volume(&self) -> f32 {
        self.inner.volume()
    }

    /// Toggle mute
    #[wasm_bindgen(js_name = toggleMute)]
    pub fn toggle_mute(&mut self) {
        self.inner.toggle_mute();
        self.flush();
    }

    /// Check if muted
    #[wasm_bindgen(js_name = isMuted)]
    pub fn is_muted(&self) -> bool {
        self.inner.is_muted()
    }

    // ===== Seeking =====

    /// Seek to position in seconds
    #[wasm_bindgen(js_name = seekTo)]
    pub fn seek_to(&mut self, position_secs: f64) -> Result<(), JsValue> {
        let result = self.inner.seek(position_secs);
        self.settle(result)
    }

    /// Seek to a fraction of the track (0.0 - 1.0)
    #[wasm_bindgen(js_name = seekToFraction)]
    pub fn seek_to_fraction(&mut self, fraction: f64) -> Result<(), JsValue> {
        let result = self.inner.seek_fraction(fraction);
        self.settle(result)
    }

    // ===== State Queries =====

    /// Current transport state ("idle" | "loaded" | "playing" | "paused")
    #[wasm_bindgen(js_name = getState)]
    pub fn get_state(&self) -> JsValue {
        serde_wasm_bindgen::to_value(&self.inner.transport()).unwrap_or(JsValue::NULL)
    }

    /// Full state snapshot, suitable for local storage
    #[wasm_bindgen(js_name = getSnapshot)]
    pub fn get_snapshot(&self) -> JsValue {
        serde_wasm_bindgen::to_value(self.inner.state()).unwrap_or(JsValue::NULL)
    }

    /// Get current position in seconds
    #[wasm_bindgen(js_name = getPosition)]
    pub fn get_position(&self) -> f64 {
        self.inner.position()
    }

    /// Get duration of current track in seconds
    #[wasm_bindgen(js_name = getDuration)]
    pub fn get_duration(&self) -> Option<f64> {
        self.inner.duration()
    }

    /// Id to tag media element callbacks with
    #[wasm_bindgen(js_name = currentTrackId)]
    pub fn current_track_id(&self) -> Option<String> {
        self.inner.current_track().map(|t| t.id.to_string())
    }

    /// Current track as a plain object
    #[wasm_bindgen(js_name = getCurrentTrack)]
    pub fn get_current_track(&self) -> JsValue {
        self.inner
            .current_track()
            .and_then(|t| serde_wasm_bindgen::to_value(&WasmTrack::from(t)).ok())
            .unwrap_or(JsValue::NULL)
    }

    // ===== Playlist =====

    /// Replace the playlist
    #[wasm_bindgen(js_name = setPlaylist)]
    pub fn set_playlist(&mut self, tracks: JsValue) -> Result<(), JsValue> {
        let tracks: Vec<WasmTrack> = serde_wasm_bindgen::from_value(tracks)
            .map_err(|e| JsValue::from_str(&format!("Failed to parse tracks: {e}")))?;
        self.inner
            .set_playlist(tracks.into_iter().map(Track::from).collect());
        self.flush();
        Ok(())
    }

    /// Replace the playlist from a JSON asset list
    #[wasm_bindgen(js_name = setLibrary)]
    pub fn set_library(&mut self, json: &str) -> Result<(), JsValue> {
        let tracks = crate::load_library(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        self.inner.set_playlist(tracks);
        self.flush();
        Ok(())
    }

    /// Get playlist as an array of tracks
    #[wasm_bindgen(js_name = getPlaylist)]
    pub fn get_playlist(&self) -> JsValue {
        let tracks: Vec<WasmTrack> = self.inner.playlist().iter().map(WasmTrack::from).collect();
        serde_wasm_bindgen::to_value(&tracks).unwrap_or(JsValue::NULL)
    }

    // ===== Shuffle & Repeat =====

    #[wasm_bindgen(js_name = setShuffle)]
    pub fn set_shuffle(&mut self, shuffle: bool) {
        self.inner.set_shuffle(shuffle);
        self.flush();
    }

    #[wasm_bindgen(js_name = getShuffle)]
    pub fn get_shuffle(&self) -> bool {
        self.inner.shuffle()
    }

    /// Set repeat mode ("none" | "all" | "one")
    #[wasm_bindgen(js_name = setRepeat)]
    pub fn set_repeat(&mut self, mode: &str) -> Result<(), JsValue> {
        let repeat = match mode {
            "none" => RepeatMode::Off,
            "all" => RepeatMode::All,
            "one" => RepeatMode::One,
            _ => return Err(JsValue::from_str("Invalid repeat mode. Use 'none', 'all', or 'one'")),
        };
        self.inner.set_repeat(repeat);
        self.flush();
        Ok(())
    }

    /// Cycle repeat mode and return the new one
    #[wasm_bindgen(js_name = cycleRepeat)]
    pub fn cycle_repeat(&mut self) -> JsValue {
        let mode = self.inner.cycle_repeat();
        self.flush();
        serde_wasm_bindgen::to_value(&mode).unwrap_or(JsValue::NULL)
    }

    // ===== Media Element Callbacks =====

    #[wasm_bindgen(js_name = onTimeUpdate)]
    pub fn on_time_update(&mut self, track_id: &str, position: f64) {
        self.forward(track_id, PlaybackEvent::TimeUpdate { position });
    }

    #[wasm_bindgen(js_name = onMetadata)]
    pub fn on_metadata(&mut self, track_id: &str, duration: f64) {
        self.forward(track_id, PlaybackEvent::MetadataLoaded { duration });
    }

    #[wasm_bindgen(js_name = onEnded)]
    pub fn on_ended(&mut self, track_id: &str) {
        self.forward(track_id, PlaybackEvent::Ended);
    }

    /// `MediaError.code`: 2 network, 3 decode, 4 unsupported source
    #[wasm_bindgen(js_name = onMediaError)]
    pub fn on_media_error(&mut self, track_id: &str, code: u16) {
        let kind = match code {
            3 => ResourceErrorKind::Decode,
            _ => ResourceErrorKind::Unreachable,
        };
        self.forward(track_id, PlaybackEvent::Error { kind });
    }

    /// Rejection of the promise returned by `play()`
    #[wasm_bindgen(js_name = onPlayRejected)]
    pub fn on_play_rejected(&mut self, track_id: &str, reason: String) {
        self.forward(
            track_id,
            PlaybackEvent::Error {
                kind: ResourceErrorKind::PlayRejected(reason),
            },
        );
    }

    // ===== Event Listeners =====

    /// Register state change callback
    #[wasm_bindgen(js_name = onStateChange)]
    pub fn on_state_change(&mut self, callback: Function) {
        self.on_state_change = Some(callback);
    }

    /// Register track change callback
    #[wasm_bindgen(js_name = onTrackChange)]
    pub fn on_track_change(&mut self, callback: Function) {
        self.on_track_change = Some(callback);
    }

    /// Register playlist change callback
    #[wasm_bindgen(js_name = onPlaylistChange)]
    pub fn on_playlist_change(&mut self, callback: Function) {
        self.on_playlist_change = Some(callback);
    }

    /// Register error callback
    #[wasm_bindgen(js_name = onError)]
    pub fn on_error(&mut self, callback: Function) {
        self.on_error = Some(callback);
    }

    /// Register a catch-all callback receiving every event object
    #[wasm_bindgen(js_name = onEvent)]
    pub fn on_event(&mut self, callback: Function) {
        self.on_event = Some(callback);
    }
}

impl WasmPlaybackController {
    fn forward(&mut self, track_id: &str, event: PlaybackEvent) {
        self.inner.handle_event(&TrackId::new(track_id), event);
        self.flush();
    }

    /// Flush events, then turn the result into a JS value
    ///
    /// Precondition failures are no-ops and resolve successfully.
    fn settle(&mut self, result: crate::Result<()>) -> Result<(), JsValue> {
        self.flush();
        match result {
            Ok(()) | Err(PlaybackError::Precondition(_)) => Ok(()),
            Err(e) => Err(JsValue::from_str(&e.to_string())),
        }
    }

    // ===== Internal Event Emitters =====

    fn flush(&mut self) {
        for event in self.inner.drain_events() {
            if let Some(ref cb) = self.on_event {
                if let Ok(js) = serde_wasm_bindgen::to_value(&event) {
                    cb.call1(&JsValue::NULL, &js).ok();
                }
            }

            match event {
                ControllerEvent::StateChanged { state } => {
                    if let Some(ref cb) = self.on_state_change {
                        if let Ok(js) = serde_wasm_bindgen::to_value(&state) {
                            cb.call1(&JsValue::NULL, &js).ok();
                        }
                    }
                }
                ControllerEvent::TrackChanged { .. } => self.emit_track_change(),
                ControllerEvent::PlaylistChanged { length } => {
                    if let Some(ref cb) = self.on_playlist_change {
                        cb.call1(&JsValue::NULL, &JsValue::from(length as u32)).ok();
                    }
                }
                ControllerEvent::Error { message, .. } => {
                    if let Some(ref cb) = self.on_error {
                        cb.call1(&JsValue::NULL, &JsValue::from_str(&message)).ok();
                    }
                }
                _ => {}
            }
        }
    }

    fn emit_track_change(&self) {
        if let Some(ref cb) = self.on_track_change {
            cb.call1(&JsValue::NULL, &self.get_current_track()).ok();
        }
    }
}
