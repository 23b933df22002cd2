/// Player application error types
use portal_playback::PlaybackError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, PlayerError>;

#[derive(Debug, Error)]
pub enum PlayerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Playback error: {0}")]
    Playback(#[from] PlaybackError),

    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("Bad argument for {command}: {reason}")]
    BadArgument {
        command: &'static str,
        reason: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<config::ConfigError> for PlayerError {
    fn from(err: config::ConfigError) -> Self {
        PlayerError::Config(err.to_string())
    }
}
