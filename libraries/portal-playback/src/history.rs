//! Playback history tracking
//!
//! Maintains a bounded history of played track identifiers so "previous"
//! can retrace a shuffled session.

use crate::types::TrackId;
use std::collections::VecDeque;

/// Playback history with bounded size
///
/// Ring buffer that automatically discards oldest entries.
#[derive(Debug, Clone)]
pub struct History {
    /// History buffer (most recent = back)
    tracks: VecDeque<TrackId>,

    /// Maximum history size
    max_size: usize,
}

impl History {
    /// Create new history with specified maximum size
    pub fn new(max_size: usize) -> Self {
        Self {
            tracks: VecDeque::with_capacity(max_size),
            max_size,
        }
    }

    /// Add track to history
    ///
    /// If history is full, oldest track is discarded. A zero-sized history
    /// records nothing.
    pub fn push(&mut self, id: TrackId) {
        if self.max_size == 0 {
            return;
        }
        if self.tracks.len() >= self.max_size {
            self.tracks.pop_front();
        }
        self.tracks.push_back(id);
    }

    /// Pop most recent track from history
    pub fn pop(&mut self) -> Option<TrackId> {
        self.tracks.pop_back()
    }

    /// Pop entries until one satisfies `keep`
    ///
    /// Entries rejected along the way are dropped, which is what we want
    /// after a playlist replacement removed them.
    pub fn pop_until(&mut self, mut keep: impl FnMut(&TrackId) -> bool) -> Option<TrackId> {
        while let Some(id) = self.tracks.pop_back() {
            if keep(&id) {
                return Some(id);
            }
        }
        None
    }

    /// All history entries (oldest first)
    pub fn iter(&self) -> impl Iterator<Item = &TrackId> {
        self.tracks.iter()
    }

    /// Get number of tracks in history
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Check if history is empty
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Get maximum history size
    pub fn max_size(&self) -> usize {
        self.max_size
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new(50)
    }
}
