//! Portal Player Library
//!
//! Terminal driver for the agency portal playback core: loads an asset list,
//! simulates the media element and runs a line-oriented command shell.
//!
//! This library exposes the shell and its pieces for testing.

pub mod config;
pub mod error;
pub mod shell;
pub mod sim;

// Re-export commonly used types for convenience
pub use config::AppConfig;
pub use error::{PlayerError, Result};
pub use shell::{Command, Mode, Shell};
pub use sim::SimulatedMedia;

use std::path::Path;

/// Read and map an asset list file
pub fn load_tracks(path: &Path) -> Result<Vec<portal_playback::Track>> {
    let json = std::fs::read_to_string(path)?;
    Ok(portal_playback::load_library(&json)?)
}
