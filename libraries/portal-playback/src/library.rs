//! Asset list to track mapping
//!
//! The portal hands over its media library as JSON asset records. Mapping is
//! deterministic: the same asset always yields the same track.

use crate::error::Result;
use crate::types::{sanitize_duration, Track, TrackId};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Attribution used when an asset has no artist
pub const UNKNOWN_ARTIST: &str = "Unknown Artist";

/// External library record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub artist: Option<String>,
    #[serde(default)]
    pub album: Option<String>,
    #[serde(default)]
    pub cover: Option<String>,
    pub url: String,

    /// Length hint in seconds
    #[serde(default)]
    pub duration: Option<f64>,
}

impl From<Asset> for Track {
    fn from(asset: Asset) -> Self {
        let artist = asset
            .artist
            .filter(|a| !a.trim().is_empty())
            .unwrap_or_else(|| UNKNOWN_ARTIST.to_string());

        Track {
            id: TrackId::new(asset.id),
            title: asset.name,
            artist,
            album: asset.album,
            cover: asset.cover,
            source: asset.url,
            duration: asset.duration.and_then(sanitize_duration),
        }
    }
}

/// Parse a JSON array of assets into tracks
pub fn load_library(json: &str) -> Result<Vec<Track>> {
    let assets: Vec<Asset> = serde_json::from_str(json)?;
    debug!(count = assets.len(), "parsed asset list");
    Ok(assets.into_iter().map(Track::from).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_all_fields() {
        let asset = Asset {
            id: "a1".into(),
            name: "Night Drive".into(),
            artist: Some("Neon Lake".into()),
            album: Some("Demos".into()),
            cover: Some("/covers/a1.jpg".into()),
            url: "/audio/a1.mp3".into(),
            duration: Some(187.5),
        };
        let track = Track::from(asset);
        assert_eq!(track.id, TrackId::new("a1"));
        assert_eq!(track.title, "Night Drive");
        assert_eq!(track.artist, "Neon Lake");
        assert_eq!(track.album.as_deref(), Some("Demos"));
        assert_eq!(track.source, "/audio/a1.mp3");
        assert_eq!(track.duration, Some(187.5));
    }

    #[test]
    fn missing_artist_gets_default_attribution() {
        let tracks = load_library(r#"[{"id":"x","name":"Untitled","url":"x.mp3"}]"#).unwrap();
        assert_eq!(tracks[0].artist, UNKNOWN_ARTIST);
        assert_eq!(tracks[0].duration, None);
    }

    #[test]
    fn negative_duration_hint_is_unknown() {
        let tracks =
            load_library(r#"[{"id":"x","name":"N","url":"x.mp3","duration":-3.0}]"#).unwrap();
        assert_eq!(tracks[0].duration, None);
    }

    #[test]
    fn malformed_json_is_library_error() {
        let err = load_library("{not json").unwrap_err();
        assert!(matches!(err, crate::PlaybackError::Library(_)));
    }
}
