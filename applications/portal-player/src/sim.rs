//! Simulated media element
//!
//! Stands in for the browser's audio element. Time only moves when the shell
//! ticks it, so sessions are reproducible. Each tick yields the callbacks a
//! real element would have fired in that span.

use portal_playback::{MediaHandle, PlaybackEvent, ResourceErrorKind};
use std::collections::HashMap;
use tracing::debug;

#[derive(Debug, Default)]
pub struct SimulatedMedia {
    /// Real length of every known source
    catalog: HashMap<String, f64>,

    source: Option<String>,
    time: f64,
    duration: Option<f64>,
    gain: f32,
    playing: bool,

    // Metadata or error not yet delivered for the current source
    pending_load: bool,
}

impl SimulatedMedia {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a source and its real length
    pub fn insert(&mut self, source: impl Into<String>, duration: f64) {
        self.catalog.insert(source.into(), duration);
    }

    pub fn gain(&self) -> f32 {
        self.gain
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Advance media time by `secs` and collect element callbacks
    pub fn tick(&mut self, secs: f64) -> Vec<PlaybackEvent> {
        let mut events = Vec::new();
        let Some(source) = self.source.clone() else {
            return events;
        };

        if self.pending_load {
            self.pending_load = false;
            match self.catalog.get(&source) {
                Some(&d) => {
                    self.duration = Some(d);
                    events.push(PlaybackEvent::MetadataLoaded { duration: d });
                }
                None => {
                    debug!(%source, "simulated source is unreachable");
                    self.playing = false;
                    events.push(PlaybackEvent::Error {
                        kind: ResourceErrorKind::Unreachable,
                    });
                    return events;
                }
            }
        }

        if !self.playing || secs <= 0.0 {
            return events;
        }

        let end = self.duration.unwrap_or(f64::INFINITY);
        self.time = (self.time + secs).min(end);
        events.push(PlaybackEvent::TimeUpdate {
            position: self.time,
        });

        if self.time >= end {
            self.playing = false;
            events.push(PlaybackEvent::Ended);
        }
        events
    }
}

impl MediaHandle for SimulatedMedia {
    fn load(&mut self, source: &str) {
        self.source = Some(source.to_string());
        self.time = 0.0;
        self.duration = None;
        self.playing = false;
        self.pending_load = true;
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

    fn play(&mut self) -> Result<(), ResourceErrorKind> {
        match self.source.as_deref() {
            Some("") | None => Err(ResourceErrorKind::Unreachable),
            Some(_) => {
                self.playing = true;
                Ok(())
            }
        }
    }

    fn pause(&mut self) {
        self.playing = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_tick_delivers_metadata() {
        let mut media = SimulatedMedia::new();
        media.insert("a.mp3", 10.0);
        media.load("a.mp3");

        let events = media.tick(1.0);
        assert_eq!(events, vec![PlaybackEvent::MetadataLoaded { duration: 10.0 }]);
    }

    #[test]
    fn playing_reaches_end() {
        let mut media = SimulatedMedia::new();
        media.insert("a.mp3", 2.0);
        media.load("a.mp3");
        media.play().unwrap();

        media.tick(1.0);
        let events = media.tick(5.0);
        assert_eq!(
            events,
            vec![PlaybackEvent::TimeUpdate { position: 2.0 }, PlaybackEvent::Ended]
        );
        assert!(!media.is_playing());
    }

    #[test]
    fn unknown_source_errors() {
        let mut media = SimulatedMedia::new();
        media.load("missing.mp3");
        let events = media.tick(1.0);
        assert!(matches!(events[0], PlaybackEvent::Error { .. }));
    }

    #[test]
    fn empty_source_cannot_play() {
        let mut media = SimulatedMedia::new();
        media.load("");
        assert_eq!(media.play(), Err(ResourceErrorKind::Unreachable));
    }
}
