//! End-to-end shell sessions against the simulated media element

use portal_player::{AppConfig, Command, Mode, Shell};
use portal_playback::{RepeatMode, Track, TrackId, TransportState};
use std::io::Cursor;

fn library() -> Vec<Track> {
    portal_playback::load_library(
        r#"[
            {"id": "A", "name": "Glasshouse", "artist": "Neon Lake", "url": "/audio/a.mp3", "duration": 200},
            {"id": "B", "name": "Low Tide", "artist": "Neon Lake", "url": "/audio/b.mp3", "duration": 150},
            {"id": "C", "name": "Sketch", "url": "/audio/c.mp3", "duration": 90}
        ]"#,
    )
    .unwrap()
}

fn run(shell: &mut Shell, script: &str) -> String {
    let mut out = Vec::new();
    shell.run(Cursor::new(script), &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn repeat_all_rolls_into_next_track() {
    let mut shell = Shell::new(library(), &AppConfig::default(), Mode::Player);

    let output = run(&mut shell, "select A\nrepeat all\ntick 1\nseek 199\ntick 5\n");

    let player = shell.session().controller();
    assert_eq!(player.current_track().unwrap().id, TrackId::new("B"));
    assert_eq!(player.repeat(), RepeatMode::All);
    assert!(player.is_playing());
    assert!(output.contains("now: B"));
}

#[test]
fn last_track_stops_with_repeat_none() {
    let mut shell = Shell::new(library(), &AppConfig::default(), Mode::Player);

    run(&mut shell, "select C\ntick 100\n");

    let player = shell.session().controller();
    assert_eq!(player.current_track().unwrap().id, TrackId::new("C"));
    assert_eq!(player.transport(), TransportState::Paused);
    assert_eq!(player.position(), 0.0);
}

#[test]
fn review_session_comments_and_markers() {
    let mut shell = Shell::new(library(), &AppConfig::default(), Mode::Review);

    // 600px bar, 200s demo: 42s sits at x = 126
    let output = run(
        &mut shell,
        "select A\ntick 42\ncomment ar-lead vocals too low\ntick 30\nclick 126\ncomments\n",
    );

    let session = shell.session();
    let comments = session.comments_for(&TrackId::new("A"));
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0].anchor, Some(42.0));
    assert_eq!(session.controller().position(), 42.0);
    assert!(output.contains("[0:42] vocals too low"));
    assert!(output.contains("[0:42] ar-lead: vocals too low"));
}

#[test]
fn comments_are_refused_outside_review_mode() {
    let mut shell = Shell::new(library(), &AppConfig::default(), Mode::Player);
    let output = run(&mut shell, "select A\ncomment me hello\n");
    assert!(output.contains("only available in review mode"));
}

#[test]
fn preconditions_are_reported_not_fatal() {
    let mut shell = Shell::new(library(), &AppConfig::default(), Mode::Player);
    let output = run(&mut shell, "play\nseek 10\nbogus\nstatus\n");

    assert!(output.contains("nothing to do: Precondition failed: no track loaded"));
    assert!(output.contains("Unknown command: bogus"));
    assert!(output.contains("idle"));
}

#[test]
fn quit_stops_reading() {
    let mut shell = Shell::new(library(), &AppConfig::default(), Mode::Player);
    run(&mut shell, "quit\nselect A\n");
    assert!(shell.session().controller().current_track().is_none());
}

#[test]
fn volume_and_mute_reach_the_media_element() {
    let mut shell = Shell::new(library(), &AppConfig::default(), Mode::Player);
    let mut out = Vec::new();
    shell.execute(Command::Volume(0.25), &mut out).unwrap();
    shell.execute(Command::Mute, &mut out).unwrap();

    let player = shell.session().controller();
    assert_eq!(player.volume(), 0.25);
    assert_eq!(player.media().gain(), 0.0);
}

#[test]
fn next_retargets_review_comments() {
    let mut shell = Shell::new(library(), &AppConfig::default(), Mode::Review);

    run(&mut shell, "select A\nnext\ntick 10\ncomment ar-lead hook is late\n");

    let session = shell.session();
    assert!(session.comments_for(&TrackId::new("A")).is_empty());
    let comments = session.comments_for(&TrackId::new("B"));
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0].anchor, Some(10.0));
}
