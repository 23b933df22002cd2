//! Seek bar geometry and comment markers
//!
//! The view holds no playback state. It maps pixels to fractions and back,
//! and tells the caller what a click means; the caller applies the seek.

use crate::comments::{CommentId, CommentThread};
use serde::{Deserialize, Serialize};

/// A horizontal seek bar of a given pixel width
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimelineView {
    width: f32,

    /// How far from a marker a click still counts as hitting it
    tolerance: f32,
}

/// Comment marker placed on the bar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub comment_id: CommentId,

    /// Position along the bar, 0.0-1.0
    pub fraction: f64,

    /// Seconds into the track
    pub anchor: f64,

    /// Tooltip text
    pub text: String,
}

/// What a click on the bar asks for
#[derive(Debug, Clone, PartialEq)]
pub enum TimelineAction {
    /// Plain seek to a point on the bar
    Seek { seconds: f64 },

    /// Seek to a marker's anchor and surface its comment
    Marker { seconds: f64, marker: Marker },

    /// Duration unknown, nothing to seek to
    None,
}

impl TimelineAction {
    /// Seek target, if the click produced one
    pub fn seek_target(&self) -> Option<f64> {
        match self {
            TimelineAction::Seek { seconds } | TimelineAction::Marker { seconds, .. } => {
                Some(*seconds)
            }
            TimelineAction::None => None,
        }
    }
}

impl TimelineView {
    pub fn new(width: f32, tolerance: f32) -> Self {
        Self {
            width: if width.is_finite() { width.max(0.0) } else { 0.0 },
            tolerance: if tolerance.is_finite() { tolerance.max(0.0) } else { 0.0 },
        }
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn tolerance(&self) -> f32 {
        self.tolerance
    }

    /// Horizontal fraction of the bar at `x`, clamped to [0, 1]
    pub fn fraction_at(&self, x: f32) -> f64 {
        if self.width <= 0.0 || x.is_nan() {
            return 0.0;
        }
        f64::from(x / self.width).clamp(0.0, 1.0)
    }

    /// Pixel offset of a fraction along the bar
    pub fn x_for(&self, fraction: f64) -> f32 {
        let f = fraction.clamp(0.0, 1.0) as f32;
        f * self.width
    }

    /// Seconds a click at `x` seeks to
    pub fn seek_target(&self, x: f32, duration: Option<f64>) -> Option<f64> {
        duration.map(|d| self.fraction_at(x) * d)
    }

    /// Fill fraction for the elapsed part of the bar
    pub fn progress(position: f64, duration: Option<f64>) -> f64 {
        match duration {
            Some(d) if d > 0.0 && position.is_finite() => (position / d).clamp(0.0, 1.0),
            _ => 0.0,
        }
    }

    /// One marker per anchored comment
    ///
    /// Nothing is placed while the duration is unknown. Anchors past the end
    /// are pulled back to it.
    pub fn markers(thread: &CommentThread, duration: Option<f64>) -> Vec<Marker> {
        let Some(duration) = duration.filter(|d| *d > 0.0) else {
            return Vec::new();
        };
        thread
            .anchored()
            .map(|(comment, anchor)| {
                let anchor = anchor.clamp(0.0, duration);
                Marker {
                    comment_id: comment.id,
                    fraction: anchor / duration,
                    anchor,
                    text: comment.text.clone(),
                }
            })
            .collect()
    }

    /// Marker nearest to `x` within the hit tolerance
    pub fn hit_test<'a>(&self, markers: &'a [Marker], x: f32) -> Option<&'a Marker> {
        markers
            .iter()
            .map(|m| ((self.x_for(m.fraction) - x).abs(), m))
            .filter(|(dist, _)| *dist <= self.tolerance)
            .min_by(|a, b| a.0.total_cmp(&b.0))
            .map(|(_, m)| m)
    }

    /// Interpret a click at `x`
    pub fn click(&self, x: f32, duration: Option<f64>, markers: &[Marker]) -> TimelineAction {
        if let Some(marker) = self.hit_test(markers, x) {
            return TimelineAction::Marker {
                seconds: marker.anchor,
                marker: marker.clone(),
            };
        }
        match self.seek_target(x, duration) {
            Some(seconds) => TimelineAction::Seek { seconds },
            None => TimelineAction::None,
        }
    }
}

/// Format seconds as `m:ss`, `h:mm:ss` past an hour, `--:--` when unknown
pub fn format_time(seconds: Option<f64>) -> String {
    let Some(secs) = seconds.filter(|s| s.is_finite() && *s >= 0.0) else {
        return "--:--".to_string();
    };

    let total = secs.floor() as u64;
    let (h, m, s) = (total / 3600, (total % 3600) / 60, total % 60);
    if h > 0 {
        format!("{h}:{m:02}:{s:02}")
    } else {
        format!("{m}:{s:02}")
    }
}

/// "elapsed / total" label for the bar
pub fn format_label(position: f64, duration: Option<f64>) -> String {
    format!("{} / {}", format_time(Some(position)), format_time(duration))
}
