//! Audio routing
//!
//! The core never decodes or mixes audio itself. It names a sound effect or
//! a music track and hands the resolved file to an `AudioBackend`, which the
//! windowing layer supplies.

use std::path::Path;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    /// Projectile fired
    Shoot,
    /// Projectile struck an enemy
    Hit,
    /// Collectible picked up
    Collect,
    /// Menu button activated
    Select,
}

impl SoundEffect {
    pub const ALL: [SoundEffect; 4] = [
        SoundEffect::Shoot,
        SoundEffect::Hit,
        SoundEffect::Collect,
        SoundEffect::Select,
    ];

    /// Logical asset key
    pub fn key(&self) -> &'static str {
        match self {
            SoundEffect::Shoot => "shoot",
            SoundEffect::Hit => "hit",
            SoundEffect::Collect => "collect",
            SoundEffect::Select => "select",
        }
    }
}

/// Looping background tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MusicTrack {
    Title,
    Game,
}

impl MusicTrack {
    pub fn file_name(&self) -> &'static str {
        match self {
            MusicTrack::Title => "titlescreen.mp3",
            MusicTrack::Game => "gamemusic.mp3",
        }
    }
}

/// Playback collaborator supplied by the platform layer
pub trait AudioBackend {
    fn play_sound(&mut self, effect: SoundEffect, file: &Path, volume: f32);
    /// Replace whatever is playing with `file`, looping
    fn play_music(&mut self, track: MusicTrack, file: &Path, volume: f32);
    fn stop_music(&mut self);
}

/// Backend that plays nothing
#[derive(Debug, Default)]
pub struct NullAudio;

impl AudioBackend for NullAudio {
    fn play_sound(&mut self, effect: SoundEffect, _file: &Path, _volume: f32) {
        log::debug!("sound: {}", effect.key());
    }

    fn play_music(&mut self, track: MusicTrack, file: &Path, _volume: f32) {
        log::debug!("music: {:?} ({})", track, file.display());
    }

    fn stop_music(&mut self) {
        log::debug!("music stopped");
    }
}

/// Audio manager for the game
pub struct AudioManager {
    backend: Box<dyn AudioBackend>,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
    current_track: Option<MusicTrack>,
}

impl AudioManager {
    pub fn new(backend: Box<dyn AudioBackend>) -> Self {
        Self {
            backend,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            current_track: None,
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Play a sound effect if its file is available
    pub fn play(&mut self, effect: SoundEffect, file: Option<&Path>) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        let Some(file) = file else { return };
        self.backend.play_sound(effect, file, vol);
    }

    /// Start a music track. Missing files leave the current track playing.
    pub fn play_music(&mut self, track: MusicTrack, file: &Path, volume: f32) {
        if !file.exists() {
            log::debug!("Music file missing: {}", file.display());
            return;
        }
        let vol = if self.muted {
            0.0
        } else {
            volume.clamp(0.0, 1.0) * self.master_volume
        };
        log::info!("Playing {:?} music", track);
        self.backend.play_music(track, file, vol);
        self.current_track = Some(track);
    }

    pub fn stop_music(&mut self) {
        self.backend.stop_music();
        self.current_track = None;
    }

    pub fn current_track(&self) -> Option<MusicTrack> {
        self.current_track
    }
}
