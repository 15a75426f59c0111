//! Game settings and preferences
//!
//! Persisted separately from game saves, in their own JSON file.

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// User preferences the host consults each session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Background music on/off
    pub music_enabled: bool,
    /// One-shot sound effects on/off
    pub sound_effects_enabled: bool,
    /// Draw collision boxes over the scene (debug aid)
    pub hitbox_visible: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            music_enabled: true,
            sound_effects_enabled: true,
            hitbox_visible: false,
        }
    }
}

impl Settings {
    /// Load from disk, falling back to defaults on any failure
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(settings) => settings,
                Err(e) => {
                    log::warn!("malformed settings ({e}), using defaults");
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("using default settings");
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> io::Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(io::Error::other)?;
        fs::write(path, json)
    }

    pub fn toggle_music(&mut self) {
        self.music_enabled = !self.music_enabled;
    }

    pub fn toggle_sound_effects(&mut self) {
        self.sound_effects_enabled = !self.sound_effects_enabled;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert!(settings.music_enabled);
        assert!(settings.sound_effects_enabled);
        assert!(!settings.hitbox_visible);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"music_enabled": false}"#).unwrap();
        assert!(!settings.music_enabled);
        assert!(settings.sound_effects_enabled);
    }

    #[test]
    fn test_toggles() {
        let mut settings = Settings::default();
        settings.toggle_music();
        assert!(!settings.music_enabled);
        settings.toggle_sound_effects();
        assert!(!settings.sound_effects_enabled);
    }
}
