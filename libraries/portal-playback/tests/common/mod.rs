//! Shared helpers for integration tests

#![allow(dead_code)]

use portal_playback::{
    MediaHandle, PlaybackController, PlayerConfig, ResourceErrorKind, Track,
};
use std::sync::Once;

static INIT: Once = Once::new();

/// Route tracing output to the test harness
pub fn init_tracing() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_max_level(tracing::Level::DEBUG)
            .try_init();
    });
}

/// Mock media element
///
/// Records what the controller asked for; tests play the part of the browser
/// by feeding `PlaybackEvent`s back in.
#[derive(Debug, Default)]
pub struct MockMedia {
    pub source: Option<String>,
    pub time: f64,
    pub gain: f32,
    pub playing: bool,
    pub loads: Vec<String>,
    pub reject_play: bool,
}

impl MediaHandle for MockMedia {
    fn load(&mut self, source: &str) {
        self.source = Some(source.to_string());
        self.loads.push(source.to_string());
        self.time = 0.0;
        self.playing = false;
    }

    fn current_time(&self) -> f64 {
        self.time
    }

    fn set_current_time(&mut self, seconds: f64) {
        self.time = seconds;
    }

    fn duration(&self) -> Option<f64> {
        None
    }

    fn set_volume(&mut self, gain: f32) {
        self.gain = gain;
    }

    fn play(&mut self) -> Result<(), ResourceErrorKind> {
        if self.reject_play {
            return Err(ResourceErrorKind::PlayRejected("NotAllowedError".to_string()));
        }
        self.playing = true;
        Ok(())
    }

    fn pause(&mut self) {
        self.playing = false;
    }
}

pub fn track(id: &str, secs: f64) -> Track {
    Track::new(id, format!("Track {id}"), "Test Artist", format!("/audio/{id}.mp3"))
        .with_duration(secs)
}

/// A(200s), B(150s), C(90s)
pub fn abc() -> Vec<Track> {
    vec![track("A", 200.0), track("B", 150.0), track("C", 90.0)]
}

pub fn controller(tracks: Vec<Track>) -> PlaybackController<MockMedia> {
    init_tracing();
    let mut c = PlaybackController::new(MockMedia::default(), &PlayerConfig::default()).with_seed(7);
    c.set_playlist(tracks);
    c
}
