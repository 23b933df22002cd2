//! Volume control
//!
//! Stored volume is linear in [0.0, 1.0], matching what a media element
//! accepts. Mute is a separate flag: it zeroes the effective gain but never
//! touches the stored level.

use serde::{Deserialize, Serialize};

/// Volume controller with independent mute
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Volume {
    /// Volume level (0.0-1.0)
    level: f32,

    /// Mute state (preserves volume level)
    muted: bool,
}

impl Volume {
    /// Create new volume controller
    ///
    /// # Arguments
    /// * `level` - Initial volume, clamped into 0.0-1.0
    pub fn new(level: f32) -> Self {
        Self {
            level: clamp_level(level),
            muted: false,
        }
    }

    /// Set volume level, clamped into 0.0-1.0
    ///
    /// Does not unmute.
    pub fn set_level(&mut self, level: f32) {
        self.level = clamp_level(level);
    }

    /// Get current volume level (0.0-1.0)
    pub fn level(&self) -> f32 {
        self.level
    }

    /// Mute audio (preserves volume level)
    pub fn mute(&mut self) {
        self.muted = true;
    }

    /// Unmute audio
    pub fn unmute(&mut self) {
        self.muted = false;
    }

    /// Toggle mute state
    pub fn toggle_mute(&mut self) {
        self.muted = !self.muted;
    }

    /// Check if muted
    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Gain actually sent to the output
    ///
    /// Returns 0.0 if muted, otherwise the stored level
    pub fn gain(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.level
        }
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self::new(1.0)
    }
}

/// NaN collapses to silence rather than poisoning the stored level
fn clamp_level(level: f32) -> f32 {
    if level.is_nan() {
        0.0
    } else {
        level.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_volume() {
        let vol = Volume::new(0.8);
        assert_eq!(vol.level(), 0.8);
        assert!(!vol.is_muted());
    }

    #[test]
    fn set_volume_level_clamps() {
        let mut vol = Volume::new(0.5);

        vol.set_level(0.75);
        assert_eq!(vol.level(), 0.75);

        vol.set_level(1.5);
        assert_eq!(vol.level(), 1.0);

        vol.set_level(-0.2);
        assert_eq!(vol.level(), 0.0);

        vol.set_level(f32::NAN);
        assert_eq!(vol.level(), 0.0);
    }

    #[test]
    fn mute_preserves_level() {
        let mut vol = Volume::new(0.8);

        vol.mute();
        assert!(vol.is_muted());
        assert_eq!(vol.level(), 0.8);
        assert_eq!(vol.gain(), 0.0);

        vol.unmute();
        assert_eq!(vol.gain(), 0.8);
    }

    #[test]
    fn set_level_does_not_unmute() {
        let mut vol = Volume::new(0.8);
        vol.mute();
        vol.set_level(0.3);
        assert!(vol.is_muted());
        assert_eq!(vol.gain(), 0.0);
        assert_eq!(vol.level(), 0.3);
    }

    #[test]
    fn toggle_mute_twice_restores_gain() {
        let mut vol = Volume::new(0.6);
        let before = vol.gain();

        vol.toggle_mute();
        assert_eq!(vol.gain(), 0.0);

        vol.toggle_mute();
        assert_eq!(vol.gain(), before);
        assert_eq!(vol.level(), 0.6);
    }
}
