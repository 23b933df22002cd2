/// Player configuration
use crate::error::{PlayerError, Result};
use portal_playback::PlayerConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file picked up from the working directory when none is given
pub const DEFAULT_CONFIG_FILE: &str = "portal-player.toml";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub player: PlayerConfig,

    #[serde(default = "default_timeline")]
    pub timeline: TimelineSettings,

    #[serde(default = "default_simulation")]
    pub simulation: SimulationSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TimelineSettings {
    /// Seek bar width in pixels, used to interpret `click <x>`
    #[serde(default = "default_width")]
    pub width: f32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SimulationSettings {
    /// Seconds of media time per `tick` without an argument
    #[serde(default = "default_tick_secs")]
    pub tick_secs: f64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            player: PlayerConfig::default(),
            timeline: default_timeline(),
            simulation: default_simulation(),
        }
    }
}

impl AppConfig {
    /// Load configuration from file and environment
    ///
    /// An explicit path must exist. Without one, `portal-player.toml` in the
    /// working directory is used if present. Environment variables override
    /// both, e.g. `PORTAL_PLAYER__VOLUME=0.5` or `PORTAL_TIMELINE__WIDTH=800`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let fallback = PathBuf::from(DEFAULT_CONFIG_FILE);
                if fallback.exists() {
                    settings = settings.add_source(config::File::from(fallback));
                }
            }
        }

        // Override with environment variables (prefixed with PORTAL_)
        settings = settings.add_source(
            config::Environment::with_prefix("PORTAL")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings.build()?;
        Ok(config.try_deserialize()?)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        self.player
            .validate()
            .map_err(|e| PlayerError::Config(e.to_string()))?;

        if !self.timeline.width.is_finite() || self.timeline.width <= 0.0 {
            return Err(PlayerError::Config(format!(
                "timeline width must be positive, got {}",
                self.timeline.width
            )));
        }

        if !self.simulation.tick_secs.is_finite() || self.simulation.tick_secs <= 0.0 {
            return Err(PlayerError::Config(format!(
                "tick length must be positive, got {}",
                self.simulation.tick_secs
            )));
        }

        Ok(())
    }

    /// Render as TOML, for `portal-player config`
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| PlayerError::Config(e.to_string()))
    }
}

// Default values
fn default_timeline() -> TimelineSettings {
    TimelineSettings {
        width: default_width(),
    }
}

fn default_width() -> f32 {
    600.0
}

fn default_simulation() -> SimulationSettings {
    SimulationSettings {
        tick_secs: default_tick_secs(),
    }
}

fn default_tick_secs() -> f64 {
    1.0
}
