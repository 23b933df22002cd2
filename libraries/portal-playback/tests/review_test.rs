//! A&R review flow: select a demo, comment while listening, jump via markers

mod common;

use common::{init_tracing, track, MockMedia};
use portal_playback::{
    format_time, load_library, ControllerEvent, PlaybackEvent, PlayerConfig, RepeatMode,
    ReviewSession, TimelineView, TrackId,
};

fn session() -> ReviewSession<MockMedia> {
    init_tracing();
    let mut s = ReviewSession::new(MockMedia::default(), &PlayerConfig::default());
    s.set_demos(vec![track("demo-1", 200.0), track("demo-2", 95.0)]);
    s
}

#[test]
fn comment_captures_position_at_submission() {
    let mut s = session();
    let demo = TrackId::new("demo-1");
    s.select_demo(&demo).unwrap();
    s.controller_mut()
        .handle_event(&demo, PlaybackEvent::TimeUpdate { position: 42.0 });

    let anchor = s.add_comment("A&R", "bridge drags").unwrap().anchor;

    // playback moves on after submission; the anchor does not
    s.controller_mut()
        .handle_event(&demo, PlaybackEvent::TimeUpdate { position: 60.0 });

    assert_eq!(anchor, Some(42.0));
    assert_eq!(s.comments_for(&demo)[0].anchor, Some(42.0));
}

#[test]
fn comments_keep_submission_order_not_anchor_order() {
    let mut s = session();
    let demo = TrackId::new("demo-1");
    s.select_demo(&demo).unwrap();

    s.controller_mut().seek(150.0).unwrap();
    s.add_comment("A&R", "outro").unwrap();
    s.controller_mut().seek(10.0).unwrap();
    s.add_comment("A&R", "intro").unwrap();

    let anchors: Vec<_> = s.comments_for(&demo).iter().map(|c| c.anchor).collect();
    assert_eq!(anchors, vec![Some(150.0), Some(10.0)]);
}

#[test]
fn unanchored_comment_has_no_marker() {
    let mut s = session();
    s.select_demo(&TrackId::new("demo-2")).unwrap();
    s.add_comment_at("A&R", "overall: strong", None).unwrap();
    s.add_comment_at("A&R", "hook", Some(47.5)).unwrap();

    let markers = s.markers();
    assert_eq!(markers.len(), 1);
    assert_eq!(markers[0].fraction, 0.5);
}

#[test]
fn threads_are_per_demo() {
    let mut s = session();
    s.select_demo(&TrackId::new("demo-1")).unwrap();
    s.add_comment("A&R", "one").unwrap();
    s.select_demo(&TrackId::new("demo-2")).unwrap();

    assert!(s.markers().is_empty());
    assert_eq!(s.comments_for(&TrackId::new("demo-1")).len(), 1);
    assert!(s.comments_for(&TrackId::new("demo-2")).is_empty());
}

#[test]
fn marker_click_seeks_and_plain_click_seeks_by_fraction() {
    let mut s = session();
    s.select_demo(&TrackId::new("demo-1")).unwrap();
    s.add_comment_at("A&R", "drop hits", Some(100.0)).unwrap();
    let view = TimelineView::new(800.0, 6.0);

    // marker at x = 400
    let hit = s.click_timeline(&view, 404.0).unwrap();
    assert_eq!(hit.unwrap().text, "drop hits");
    assert_eq!(s.controller().position(), 100.0);

    let miss = s.click_timeline(&view, 200.0).unwrap();
    assert!(miss.is_none());
    assert_eq!(s.controller().position(), 50.0);
    assert_eq!(format_time(Some(s.controller().position())), "0:50");
}

#[test]
fn auto_advance_moves_the_review_target() {
    let mut s = session();
    s.controller_mut().set_repeat(RepeatMode::All);
    let first = TrackId::new("demo-1");
    let second = TrackId::new("demo-2");
    s.select_demo(&first).unwrap();
    s.add_comment_at("A&R", "first demo note", Some(100.0)).unwrap();

    s.controller_mut().handle_event(&first, PlaybackEvent::Ended);
    s.controller_mut().seek(42.0).unwrap();
    let comment = s.add_comment("A&R", "second demo note").unwrap();

    assert_eq!(comment.anchor, Some(42.0));
    assert_eq!(s.selected_id(), Some(&second));
    assert_eq!(s.comments_for(&first).len(), 1);
    assert_eq!(s.comments_for(&second).len(), 1);

    // x = 400 is where the first demo's marker sat; now it is a plain seek
    let view = TimelineView::new(800.0, 6.0);
    assert!(s.click_timeline(&view, 400.0).unwrap().is_none());
    assert_eq!(s.controller().position(), 47.5);
}

#[test]
fn anchors_follow_a_shorter_reported_duration() {
    init_tracing();
    let mut s = ReviewSession::new(MockMedia::default(), &PlayerConfig::default());
    s.set_demos(vec![track("long-hint", 300.0)]);
    let demo = TrackId::new("long-hint");
    s.select_demo(&demo).unwrap();
    s.controller_mut().seek(250.0).unwrap();
    s.add_comment("A&R", "outro fade").unwrap();

    s.controller_mut()
        .handle_event(&demo, PlaybackEvent::MetadataLoaded { duration: 200.0 });

    assert_eq!(s.comments_for(&demo)[0].anchor, Some(200.0));
    let markers = s.markers();
    assert_eq!(markers[0].anchor, 200.0);
    assert_eq!(markers[0].fraction, 1.0);
}

#[test]
fn click_without_selection_is_a_precondition_failure() {
    let mut s = session();
    let view = TimelineView::new(800.0, 6.0);
    assert!(s.click_timeline(&view, 10.0).unwrap_err().is_precondition());
}

#[test]
fn removing_selected_demo_clears_selection_but_keeps_thread() {
    let mut s = session();
    let demo = TrackId::new("demo-1");
    s.select_demo(&demo).unwrap();
    s.add_comment("A&R", "keep").unwrap();

    s.set_demos(vec![track("demo-2", 95.0)]);

    assert!(s.selected_demo().is_none());
    assert!(!s.controller().is_playing());
    assert_eq!(s.comments_for(&demo).len(), 1);
}

#[test]
fn review_events_include_comment_added() {
    let mut s = session();
    let demo = TrackId::new("demo-1");
    s.select_demo(&demo).unwrap();
    let comment_id = s.add_comment("A&R", "note").unwrap().id;

    let events = s.drain_events();
    assert!(events.contains(&ControllerEvent::CommentAdded {
        track_id: demo,
        comment_id,
        anchor: Some(0.0),
    }));
}

#[test]
fn demos_load_from_asset_json() {
    init_tracing();
    let json = r#"[
        {"id": "d1", "name": "Late Bloom", "artist": "Marrow", "url": "/demos/d1.wav", "duration": 181.0},
        {"id": "d2", "name": "Untitled", "url": "/demos/d2.wav"}
    ]"#;
    let demos = load_library(json).unwrap();

    let mut s = ReviewSession::new(MockMedia::default(), &PlayerConfig::default());
    s.set_demos(demos);
    s.select_demo(&TrackId::new("d2")).unwrap();

    let selected = s.selected_demo().unwrap();
    assert_eq!(selected.artist, "Unknown Artist");
    assert_eq!(selected.duration, None);

    // no duration yet: a comment keeps its raw anchor, no markers drawn
    s.add_comment_at("A&R", "early note", Some(30.0)).unwrap();
    assert!(s.markers().is_empty());
}
