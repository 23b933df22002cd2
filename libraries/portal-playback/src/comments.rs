//! Timestamped review comments
//!
//! Comments are append-only per track. Nothing here edits or deletes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Comment identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommentId(Uuid);

impl CommentId {
    /// Fresh random identifier
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for CommentId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CommentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Free-text note from a reviewer, optionally pinned to a moment in the track
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: CommentId,
    pub author: String,
    pub text: String,

    /// Seconds into the track, within [0, duration] when present
    pub anchor: Option<f64>,

    pub created_at: DateTime<Utc>,
}

impl Comment {
    /// Build a comment stamped with the current time
    ///
    /// The anchor is clamped into [0, duration]. A non-finite anchor is
    /// dropped rather than guessed at.
    pub fn new(
        author: impl Into<String>,
        text: impl Into<String>,
        anchor: Option<f64>,
        duration: Option<f64>,
    ) -> Self {
        Self {
            id: CommentId::new(),
            author: author.into(),
            text: text.into(),
            anchor: anchor.and_then(|a| clamp_anchor(a, duration)),
            created_at: Utc::now(),
        }
    }

    /// Anchor clamped to a duration learned after the comment was made
    pub fn anchor_within(&self, duration: Option<f64>) -> Option<f64> {
        self.anchor.and_then(|a| clamp_anchor(a, duration))
    }
}

fn clamp_anchor(anchor: f64, duration: Option<f64>) -> Option<f64> {
    if !anchor.is_finite() {
        return None;
    }
    let upper = duration.filter(|d| *d >= 0.0).unwrap_or(f64::INFINITY);
    Some(anchor.clamp(0.0, upper))
}

/// Comments on a single track, in submission order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommentThread {
    comments: Vec<Comment>,
}

impl CommentThread {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a comment and hand back a reference to the stored copy
    pub fn push(&mut self, comment: Comment) -> &Comment {
        self.comments.push(comment);
        &self.comments[self.comments.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.comments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.comments.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Comment> {
        self.comments.iter()
    }

    /// Comments that carry an anchor
    pub fn anchored(&self) -> impl Iterator<Item = (&Comment, f64)> {
        self.comments
            .iter()
            .filter_map(|c| c.anchor.map(|a| (c, a)))
    }

    pub fn as_slice(&self) -> &[Comment] {
        &self.comments
    }
}

impl<'a> IntoIterator for &'a CommentThread {
    type Item = &'a Comment;
    type IntoIter = std::slice::Iter<'a, Comment>;

    fn into_iter(self) -> Self::IntoIter {
        self.comments.iter()
    }
}
