//! A&R demo review session
//!
//! Pairs a playback controller with per-demo comment threads. The demo under
//! review is always the controller's current track, so auto-advance and
//! transport navigation move the comment target along with the playhead.

use crate::{
    comments::{Comment, CommentThread},
    controller::PlaybackController,
    error::{Precondition, Result},
    events::ControllerEvent,
    media::MediaHandle,
    timeline::{Marker, TimelineAction, TimelineView},
    types::{PlayerConfig, Track, TrackId},
};
use std::collections::HashMap;
use tracing::{debug, info};

/// Review panel model
pub struct ReviewSession<M: MediaHandle> {
    controller: PlaybackController<M>,
    threads: HashMap<TrackId, CommentThread>,

    // Comment events are queued here and merged on drain
    pending_events: Vec<ControllerEvent>,
}

impl<M: MediaHandle> ReviewSession<M> {
    pub fn new(media: M, config: &PlayerConfig) -> Self {
        Self::with_controller(PlaybackController::new(media, config))
    }

    pub fn with_controller(controller: PlaybackController<M>) -> Self {
        Self {
            controller,
            threads: HashMap::new(),
            pending_events: Vec::new(),
        }
    }

    /// Replace the demo list
    ///
    /// Comment threads survive. A current track that is no longer listed
    /// stops counting as selected.
    pub fn set_demos(&mut self, demos: Vec<Track>) {
        self.controller.set_playlist(demos);
        if self.selected_demo().is_none() && self.controller.current_track().is_some() {
            debug!("current demo left the list, nothing under review");
        }
    }

    /// Select a demo and start playing it
    pub fn select_demo(&mut self, id: &TrackId) -> Result<()> {
        if !self.controller.playlist().contains(id) {
            return Err(Precondition::UnknownTrack.into());
        }
        info!(demo = %id, "demo selected for review");
        self.controller.select(id)
    }

    /// Demo under review: the controller's current track, if still listed
    pub fn selected_demo(&self) -> Option<&Track> {
        self.controller
            .state()
            .current_id()
            .and_then(|id| self.controller.playlist().find(id))
    }

    pub fn selected_id(&self) -> Option<&TrackId> {
        self.selected_demo().map(|t| &t.id)
    }

    /// Comment on the selected demo, anchored at the current position
    ///
    /// The anchor is whatever the playhead reads at submission time.
    pub fn add_comment(&mut self, author: &str, text: &str) -> Result<&Comment> {
        let anchor = self.controller.position();
        self.add_comment_at(author, text, Some(anchor))
    }

    /// Comment on the selected demo with an explicit (or no) anchor
    pub fn add_comment_at(
        &mut self,
        author: &str,
        text: &str,
        anchor: Option<f64>,
    ) -> Result<&Comment> {
        let Some(track_id) = self.selected_id().cloned() else {
            debug!("comment ignored: no demo selected");
            return Err(Precondition::NoTrackLoaded.into());
        };
        let duration = self.demo_duration(&track_id);
        let comment = Comment::new(author, text, anchor, duration);

        debug!(demo = %track_id, anchor = ?comment.anchor, "comment added");
        self.pending_events.push(ControllerEvent::CommentAdded {
            track_id: track_id.clone(),
            comment_id: comment.id,
            anchor: comment.anchor,
        });

        Ok(self.threads.entry(track_id).or_default().push(comment))
    }

    /// Comments on a demo, in submission order
    ///
    /// Anchors are clamped to the demo's duration as currently known, which
    /// may be shorter than the hint in force when the comment was made.
    pub fn comments_for(&self, id: &TrackId) -> Vec<Comment> {
        let Some(thread) = self.threads.get(id) else {
            return Vec::new();
        };
        let duration = self.demo_duration(id);
        thread
            .iter()
            .map(|c| Comment {
                anchor: c.anchor_within(duration),
                ..c.clone()
            })
            .collect()
    }

    /// Markers for the selected demo
    pub fn markers(&self) -> Vec<Marker> {
        let Some(id) = self.selected_id() else {
            return Vec::new();
        };
        match self.threads.get(id) {
            Some(thread) => TimelineView::markers(thread, self.demo_duration(id)),
            None => Vec::new(),
        }
    }

    /// Apply a click on the selected demo's timeline
    ///
    /// Clicking a marker seeks to its anchor and returns it so the UI can show
    /// the comment text.
    pub fn click_timeline(&mut self, view: &TimelineView, x: f32) -> Result<Option<Marker>> {
        if self.selected_id().is_none() {
            return Err(Precondition::NoTrackLoaded.into());
        }
        let markers = self.markers();
        let action = view.click(x, self.controller.duration(), &markers);
        match action {
            TimelineAction::Marker { seconds, marker } => {
                self.controller.seek(seconds)?;
                Ok(Some(marker))
            }
            TimelineAction::Seek { seconds } => {
                self.controller.seek(seconds)?;
                Ok(None)
            }
            TimelineAction::None => Err(Precondition::DurationUnknown.into()),
        }
    }

    pub fn controller(&self) -> &PlaybackController<M> {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut PlaybackController<M> {
        &mut self.controller
    }

    /// Drain controller and review events together
    pub fn drain_events(&mut self) -> Vec<ControllerEvent> {
        let mut events = self.controller.drain_events();
        events.append(&mut self.pending_events);
        events
    }

    fn demo_duration(&self, id: &TrackId) -> Option<f64> {
        if self.controller.state().current_id() == Some(id) {
            if let Some(d) = self.controller.duration() {
                return Some(d);
            }
        }
        self.controller.playlist().find(id).and_then(|t| t.duration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::RecordingMedia;

    fn demo(id: &str, secs: f64) -> Track {
        Track::new(id, format!("Demo {id}"), "Unsigned Act", format!("/demos/{id}.wav"))
            .with_duration(secs)
    }

    fn session() -> ReviewSession<RecordingMedia> {
        let mut s = ReviewSession::new(RecordingMedia::default(), &PlayerConfig::default());
        s.set_demos(vec![demo("d1", 200.0), demo("d2", 120.0)]);
        s
    }

    #[test]
    fn comment_anchors_at_current_position() {
        let mut s = session();
        s.select_demo(&TrackId::new("d1")).unwrap();
        s.controller_mut().seek(42.0).unwrap();

        let c = s.add_comment("ar-lead", "vocals too quiet").unwrap();
        assert_eq!(c.anchor, Some(42.0));
        assert_eq!(s.comments_for(&TrackId::new("d1")).len(), 1);
        assert!(s.comments_for(&TrackId::new("d2")).is_empty());
    }

    #[test]
    fn explicit_anchor_is_clamped_to_duration() {
        let mut s = session();
        s.select_demo(&TrackId::new("d2")).unwrap();
        let c = s.add_comment_at("ar", "outro", Some(500.0)).unwrap();
        assert_eq!(c.anchor, Some(120.0));
    }

    #[test]
    fn comment_without_selection_is_rejected() {
        let mut s = session();
        assert!(s.add_comment("ar", "x").unwrap_err().is_precondition());
    }

    #[test]
    fn selection_is_resolved_by_lookup() {
        let mut s = session();
        s.select_demo(&TrackId::new("d2")).unwrap();
        assert_eq!(s.selected_demo().unwrap().title, "Demo d2");

        s.set_demos(vec![demo("d1", 200.0)]);
        assert!(s.selected_demo().is_none());
        assert!(s.selected_id().is_none());
    }

    #[test]
    fn click_marker_seeks_and_surfaces_comment() {
        let mut s = session();
        s.select_demo(&TrackId::new("d1")).unwrap();
        s.add_comment_at("ar", "hook lands here", Some(50.0)).unwrap();
        let view = TimelineView::new(400.0, 6.0);

        let marker = s.click_timeline(&view, 101.0).unwrap().unwrap();
        assert_eq!(marker.text, "hook lands here");
        assert_eq!(s.controller().position(), 50.0);

        assert!(s.click_timeline(&view, 300.0).unwrap().is_none());
        assert_eq!(s.controller().position(), 150.0);
    }

    #[test]
    fn selection_follows_transport_navigation() {
        let mut s = session();
        s.select_demo(&TrackId::new("d1")).unwrap();
        s.controller_mut().next().unwrap();
        s.controller_mut().seek(30.0).unwrap();

        assert_eq!(s.selected_id(), Some(&TrackId::new("d2")));
        let c = s.add_comment("ar", "second verse").unwrap();
        assert_eq!(c.anchor, Some(30.0));
        assert!(s.comments_for(&TrackId::new("d1")).is_empty());
        assert_eq!(s.comments_for(&TrackId::new("d2")).len(), 1);
    }

    #[test]
    fn comment_added_event_is_drained() {
        let mut s = session();
        s.select_demo(&TrackId::new("d1")).unwrap();
        s.add_comment("ar", "nice").unwrap();

        let events = s.drain_events();
        assert!(events
            .iter()
            .any(|e| matches!(e, ControllerEvent::CommentAdded { .. })));
        assert!(s.drain_events().is_empty());
    }
}
