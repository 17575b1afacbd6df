//! Game settings and preferences
//!
//! Read from a JSON file next to the executable. Every field has a default,
//! so a partial or missing file still yields a usable configuration.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::audio::MusicTrack;
use crate::consts::FPS;

/// Default settings file name
pub const SETTINGS_FILE: &str = "settings.json";

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Display ===
    /// Window size the world is fitted into
    pub window_w: i32,
    pub window_h: i32,
    /// Frame rate of the outer loop
    pub fps: u32,

    // === Files ===
    /// Root of textures/, sounds/, music/ and stages.json
    pub assets_dir: PathBuf,
    /// Save slot directory
    pub saves_dir: PathBuf,
    /// Stage catalog; relative paths resolve against `assets_dir`
    pub stages_file: PathBuf,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub title_music_volume: f32,
    pub game_music_volume: f32,
    pub muted: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            window_w: 800,
            window_h: 600,
            fps: FPS,

            assets_dir: PathBuf::from("assets"),
            saves_dir: PathBuf::from("saves"),
            stages_file: PathBuf::from("stages.json"),

            master_volume: 0.8,
            sfx_volume: 1.0,
            title_music_volume: 0.35,
            game_music_volume: 0.45,
            muted: false,
        }
    }
}

impl Settings {
    pub fn window(&self) -> (i32, i32) {
        (self.window_w, self.window_h)
    }

    pub fn texture_dir(&self) -> PathBuf {
        self.assets_dir.join("textures")
    }

    pub fn sound_dir(&self) -> PathBuf {
        self.assets_dir.join("sounds")
    }

    pub fn music_dir(&self) -> PathBuf {
        self.assets_dir.join("music")
    }

    pub fn stages_path(&self) -> PathBuf {
        self.assets_dir.join(&self.stages_file)
    }

    pub fn music_path(&self, track: MusicTrack) -> PathBuf {
        self.music_dir().join(track.file_name())
    }

    pub fn music_volume(&self, track: MusicTrack) -> f32 {
        match track {
            MusicTrack::Title => self.title_music_volume,
            MusicTrack::Game => self.game_music_volume,
        }
    }

    /// Load settings from `path`, falling back to defaults
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Ignoring malformed {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Save settings to `path`
    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        log::info!("Settings saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE);
        std::fs::write(&path, r#"{"window_w": 1280, "muted": true}"#).unwrap();

        let settings = Settings::load(&path);
        assert_eq!(settings.window(), (1280, 600));
        assert!(settings.muted);
        assert_eq!(settings.fps, 60);
        assert_eq!(settings.stages_path(), PathBuf::from("assets").join("stages.json"));
    }

    #[test]
    fn test_missing_or_malformed_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE);
        assert_eq!(Settings::load(&path), Settings::default());

        std::fs::write(&path, "window_w = 3").unwrap();
        assert_eq!(Settings::load(&path), Settings::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE);
        let settings = Settings {
            game_music_volume: 0.2,
            saves_dir: dir.path().join("slots"),
            ..Default::default()
        };
        settings.save(&path).unwrap();
        assert_eq!(Settings::load(&path), settings);
    }
}
