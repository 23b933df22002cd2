//! Ordered, de-duplicated track list
//!
//! The controller only reads from the playlist. Hosts replace it wholesale
//! when the backing library view changes (filtering, refresh, new demo set).

use crate::types::{sanitize_duration, Track, TrackId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Ordered sequence of tracks, unique by identifier
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Playlist {
    tracks: Vec<Track>,
}

impl Playlist {
    /// Build a playlist, keeping the first occurrence of each identifier
    pub fn new(tracks: Vec<Track>) -> Self {
        let mut seen = HashSet::with_capacity(tracks.len());
        let tracks = tracks
            .into_iter()
            .filter(|t| seen.insert(t.id.clone()))
            .collect();
        Self { tracks }
    }

    /// Number of tracks
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// True when there is nothing to play
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Track at position
    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    /// Position of a track by identifier
    pub fn index_of(&self, id: &TrackId) -> Option<usize> {
        self.tracks.iter().position(|t| &t.id == id)
    }

    /// Look a track up by identifier
    pub fn find(&self, id: &TrackId) -> Option<&Track> {
        self.tracks.iter().find(|t| &t.id == id)
    }

    /// Check membership by identifier
    pub fn contains(&self, id: &TrackId) -> bool {
        self.index_of(id).is_some()
    }

    /// Iterate in order
    pub fn iter(&self) -> std::slice::Iter<'_, Track> {
        self.tracks.iter()
    }

    /// True if `index` is the final entry
    pub fn is_last(&self, index: usize) -> bool {
        !self.tracks.is_empty() && index + 1 == self.tracks.len()
    }

    /// `(i + 1) mod len`, or the first track when nothing is current
    pub fn next_index(&self, current: Option<usize>) -> Option<usize> {
        let len = self.tracks.len();
        if len == 0 {
            return None;
        }
        Some(match current {
            Some(i) => (i + 1) % len,
            None => 0,
        })
    }

    /// `(i - 1 + len) mod len`, or the last track when nothing is current
    pub fn previous_index(&self, current: Option<usize>) -> Option<usize> {
        let len = self.tracks.len();
        if len == 0 {
            return None;
        }
        Some(match current {
            Some(i) => (i % len + len - 1) % len,
            None => len - 1,
        })
    }

    /// Write back a duration reported by the media element
    ///
    /// Returns false when the track is not in the playlist or the value is
    /// not a usable duration.
    pub fn correct_duration(&mut self, id: &TrackId, seconds: f64) -> bool {
        let Some(duration) = sanitize_duration(seconds) else {
            return false;
        };
        match self.tracks.iter_mut().find(|t| &t.id == id) {
            Some(track) => {
                track.duration = Some(duration);
                true
            }
            None => false,
        }
    }
}

impl FromIterator<Track> for Playlist {
    fn from_iter<I: IntoIterator<Item = Track>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Playlist {
    type Item = &'a Track;
    type IntoIter = std::slice::Iter<'a, Track>;

    fn into_iter(self) -> Self::IntoIter {
        self.tracks.iter()
    }
}
