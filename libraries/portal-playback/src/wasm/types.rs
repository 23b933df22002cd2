//! WASM-compatible type definitions

use crate::Track;
use serde::{Deserialize, Serialize};

/// Track as exchanged with JavaScript
///
/// Plain camelCase object; durations are seconds, `null` when unknown.
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct WasmTrack {
    pub id: String,
    pub title: String,
    pub artist: String,
    #[serde(default)]
    pub album: Option<String>,
    #[serde(default)]
    pub cover: Option<String>,
    pub source: String,
    #[serde(default)]
    pub duration_secs: Option<f64>,
}

impl From<&Track> for WasmTrack {
    fn from(track: &Track) -> Self {
        Self {
            id: track.id.to_string(),
            title: track.title.clone(),
            artist: track.artist.clone(),
            album: track.album.clone(),
            cover: track.cover.clone(),
            source: track.source.clone(),
            duration_secs: track.duration,
        }
    }
}

impl From<WasmTrack> for Track {
    fn from(track: WasmTrack) -> Self {
        let mut out = Track::new(track.id, track.title, track.artist, track.source);
        out.album = track.album;
        out.cover = track.cover;
        match track.duration_secs {
            Some(d) => out.with_duration(d),
            None => out,
        }
    }
}
