//! Line-oriented command shell
//!
//! Reads one command per line and drives a review session backed by the
//! simulated media element. The same shell serves both the plain player and
//! the A&R review mode; comment commands are only accepted in review mode.

use crate::config::AppConfig;
use crate::error::{PlayerError, Result};
use crate::sim::SimulatedMedia;
use portal_playback::{
    format_time, ControllerEvent, RepeatMode, ReviewSession, TimelineView, Track, TrackId,
};
use std::io::{BufRead, Write};
use std::str::FromStr;
use tracing::{debug, warn};

/// Which surface the shell is standing in for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Player,
    Review,
}

/// A parsed shell command
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    List,
    Select(TrackId),
    Play,
    Pause,
    Toggle,
    Stop,
    Next,
    Previous,
    Seek(f64),
    SeekFraction(f64),
    Volume(f32),
    Mute,
    Shuffle,
    Repeat(Option<RepeatMode>),
    Tick(Option<f64>),
    Status,
    Comment { author: String, text: String },
    Comments,
    Click(f32),
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = PlayerError;

    fn from_str(line: &str) -> Result<Self> {
        let line = line.trim();
        let (word, rest) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(w, r)| (w, r.trim()));

        let command = match word {
            "list" | "ls" => Command::List,
            "select" => {
                if rest.is_empty() {
                    return Err(bad("select", "expected a track id"));
                }
                Command::Select(TrackId::new(rest))
            }
            "play" => Command::Play,
            "pause" => Command::Pause,
            "toggle" => Command::Toggle,
            "stop" => Command::Stop,
            "next" => Command::Next,
            "prev" | "previous" => Command::Previous,
            "seek" => Command::Seek(number("seek", rest)?),
            "seekf" => Command::SeekFraction(number("seekf", rest)?),
            "vol" | "volume" => Command::Volume(number("volume", rest)?),
            "mute" => Command::Mute,
            "shuffle" => Command::Shuffle,
            "repeat" => Command::Repeat(match rest {
                "" => None,
                "none" | "off" => Some(RepeatMode::Off),
                "all" => Some(RepeatMode::All),
                "one" => Some(RepeatMode::One),
                other => return Err(bad("repeat", format!("unknown mode '{other}'"))),
            }),
            "tick" => Command::Tick(if rest.is_empty() {
                None
            } else {
                Some(number("tick", rest)?)
            }),
            "status" | "st" => Command::Status,
            "comment" => {
                let Some((author, text)) = rest.split_once(char::is_whitespace) else {
                    return Err(bad("comment", "expected <author> <text>"));
                };
                Command::Comment {
                    author: author.to_string(),
                    text: text.trim().to_string(),
                }
            }
            "comments" => Command::Comments,
            "click" => Command::Click(number("click", rest)?),
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            other => return Err(PlayerError::UnknownCommand(other.to_string())),
        };
        Ok(command)
    }
}

fn bad(command: &'static str, reason: impl Into<String>) -> PlayerError {
    PlayerError::BadArgument {
        command,
        reason: reason.into(),
    }
}

fn number<T: FromStr>(command: &'static str, text: &str) -> Result<T> {
    text.parse()
        .map_err(|_| bad(command, format!("expected a number, got '{text}'")))
}

const HELP: &str = "\
commands:
  list                      show the playlist
  select <id>               play a track
  play | pause | toggle | stop
  next | prev
  seek <secs> | seekf <0-1>
  vol <0-1> | mute
  shuffle | repeat [none|all|one]
  tick [secs]               advance simulated time
  status
  comment <author> <text>   (review) comment at the current position
  comments                  (review) list comments on the selected demo
  click <x>                 (review) click the timeline at pixel x
  quit";

/// Interactive driver over a review session
pub struct Shell {
    session: ReviewSession<SimulatedMedia>,
    view: TimelineView,
    tick_secs: f64,
    mode: Mode,
}

impl Shell {
    pub fn new(tracks: Vec<Track>, config: &AppConfig, mode: Mode) -> Self {
        let mut media = SimulatedMedia::new();
        for track in &tracks {
            // Sources without a hint are treated as five minutes long
            media.insert(track.source.clone(), track.duration.unwrap_or(300.0));
        }

        let mut session = ReviewSession::new(media, &config.player);
        session.set_demos(tracks);
        session.drain_events();

        Self {
            session,
            view: TimelineView::new(config.timeline.width, config.player.marker_tolerance_px),
            tick_secs: config.simulation.tick_secs,
            mode,
        }
    }

    pub fn session(&self) -> &ReviewSession<SimulatedMedia> {
        &self.session
    }

    /// Run until `quit` or end of input
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> Result<()> {
        for line in input.lines() {
            let line = line?;
            if line.trim().is_empty() || line.trim_start().starts_with('#') {
                continue;
            }

            match line.parse::<Command>() {
                Ok(Command::Quit) => break,
                Ok(command) => {
                    if let Err(e) = self.execute(command, out) {
                        writeln!(out, "error: {e}")?;
                    }
                }
                Err(e) => writeln!(out, "error: {e}")?,
            }
            self.report_events(out)?;
        }
        Ok(())
    }

    /// Apply one command, writing its output
    pub fn execute<W: Write>(&mut self, command: Command, out: &mut W) -> Result<()> {
        debug!(?command, "executing");

        let outcome = match command {
            Command::List => return self.list(out),
            Command::Status => return self.status(out),
            Command::Help => {
                writeln!(out, "{HELP}")?;
                return Ok(());
            }
            Command::Tick(secs) => {
                self.tick(secs.unwrap_or(self.tick_secs));
                return Ok(());
            }
            Command::Comment { .. } | Command::Comments | Command::Click(_)
                if self.mode != Mode::Review =>
            {
                writeln!(out, "comments are only available in review mode")?;
                return Ok(());
            }
            Command::Comment { author, text } => match self.session.add_comment(&author, &text) {
                Ok(comment) => {
                    writeln!(out, "comment {} at {}", comment.id, format_time(comment.anchor))?;
                    Ok(())
                }
                Err(e) => Err(e),
            },
            Command::Comments => return self.comments(out),
            Command::Click(x) => match self.session.click_timeline(&self.view, x) {
                Ok(Some(marker)) => {
                    writeln!(out, "[{}] {}", format_time(Some(marker.anchor)), marker.text)?;
                    Ok(())
                }
                Ok(None) => Ok(()),
                Err(e) => Err(e),
            },
            Command::Select(id) if self.mode == Mode::Review => self.session.select_demo(&id),
            other => self.control(other),
        };

        match outcome {
            Err(e) if e.is_precondition() => {
                writeln!(out, "nothing to do: {e}")?;
                Ok(())
            }
            other => other.map_err(PlayerError::from),
        }
    }

    /// Transport commands that go straight to the controller
    fn control(&mut self, command: Command) -> portal_playback::Result<()> {
        let player = self.session.controller_mut();
        match command {
            Command::Select(id) => player.select(&id),
            Command::Play => player.play(),
            Command::Pause => player.pause(),
            Command::Toggle => player.toggle(),
            Command::Stop => {
                player.stop();
                Ok(())
            }
            Command::Next => player.next(),
            Command::Previous => player.previous(),
            Command::Seek(secs) => player.seek(secs),
            Command::SeekFraction(f) => player.seek_fraction(f),
            Command::Volume(v) => {
                player.set_volume(v);
                Ok(())
            }
            Command::Mute => {
                player.toggle_mute();
                Ok(())
            }
            Command::Shuffle => {
                player.toggle_shuffle();
                Ok(())
            }
            Command::Repeat(Some(mode)) => {
                player.set_repeat(mode);
                Ok(())
            }
            Command::Repeat(None) => {
                player.cycle_repeat();
                Ok(())
            }
            _ => Ok(()),
        }
    }

    /// Advance simulated time, feeding element callbacks to the controller
    fn tick(&mut self, secs: f64) {
        let player = self.session.controller_mut();
        let Some(origin) = player.current_track().map(|t| t.id.clone()) else {
            return;
        };
        for event in player.media_mut().tick(secs) {
            player.handle_event(&origin, event);
        }
    }

    fn list<W: Write>(&self, out: &mut W) -> Result<()> {
        let player = self.session.controller();
        let current = player.current_track().map(|t| &t.id);
        for track in player.playlist() {
            let marker = if Some(&track.id) == current { ">" } else { " " };
            writeln!(
                out,
                "{marker} {:<12} {} - {} ({})",
                track.id.as_str(),
                track.artist,
                track.title,
                format_time(track.duration)
            )?;
        }
        Ok(())
    }

    fn status<W: Write>(&self, out: &mut W) -> Result<()> {
        let player = self.session.controller();
        let title = player
            .current_track()
            .map_or("-".to_string(), |t| format!("{} - {}", t.artist, t.title));
        let state = serde_json::to_string(&player.transport()).unwrap_or_default();
        let repeat = serde_json::to_string(&player.repeat()).unwrap_or_default();
        writeln!(
            out,
            "{} {} {} / {} vol {:.2}{} shuffle {} repeat {}",
            state.trim_matches('"'),
            title,
            format_time(Some(player.position())),
            format_time(player.duration()),
            player.volume(),
            if player.is_muted() { " (muted)" } else { "" },
            if player.shuffle() { "on" } else { "off" },
            repeat.trim_matches('"'),
        )?;
        if let Some(error) = player.error() {
            writeln!(out, "  ! {error}")?;
        }
        Ok(())
    }

    fn comments<W: Write>(&self, out: &mut W) -> Result<()> {
        let Some(id) = self.session.selected_id() else {
            writeln!(out, "no demo selected")?;
            return Ok(());
        };
        for comment in self.session.comments_for(id) {
            writeln!(
                out,
                "[{}] {}: {}",
                format_time(comment.anchor),
                comment.author,
                comment.text
            )?;
        }
        Ok(())
    }

    fn report_events<W: Write>(&mut self, out: &mut W) -> Result<()> {
        for event in self.session.drain_events() {
            match event {
                ControllerEvent::TrackChanged {
                    track_id: Some(id), ..
                } => writeln!(out, "now: {id}")?,
                ControllerEvent::Error { track_id, message } => {
                    warn!(track = %track_id, %message, "playback error");
                    writeln!(out, "error on {track_id}: {message}")?;
                }
                other => debug!(?other, "event"),
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_commands() {
        assert_eq!("seek 42".parse::<Command>().unwrap(), Command::Seek(42.0));
        assert_eq!(
            "select demo-1".parse::<Command>().unwrap(),
            Command::Select(TrackId::new("demo-1"))
        );
        assert_eq!(
            "repeat all".parse::<Command>().unwrap(),
            Command::Repeat(Some(RepeatMode::All))
        );
        assert_eq!("repeat".parse::<Command>().unwrap(), Command::Repeat(None));
        assert_eq!(
            "comment ar  vocals too quiet".parse::<Command>().unwrap(),
            Command::Comment {
                author: "ar".to_string(),
                text: "vocals too quiet".to_string()
            }
        );
    }

    #[test]
    fn rejects_bad_input() {
        assert!(matches!(
            "dance".parse::<Command>(),
            Err(PlayerError::UnknownCommand(_))
        ));
        assert!(matches!(
            "seek soon".parse::<Command>(),
            Err(PlayerError::BadArgument { command: "seek", .. })
        ));
        assert!("select".parse::<Command>().is_err());
    }
}
