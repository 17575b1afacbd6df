//! Asset lookup with guaranteed texture fallbacks
//!
//! Textures always resolve: a missing or unreadable file is replaced by a
//! solid-color placeholder of the entity's size. Sounds may be absent.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::audio::SoundEffect;

/// Logical texture keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureKey {
    Player,
    Enemy,
    Collect,
    Proj,
    Arrow,
}

impl TextureKey {
    pub const ALL: [TextureKey; 5] = [
        TextureKey::Player,
        TextureKey::Enemy,
        TextureKey::Collect,
        TextureKey::Proj,
        TextureKey::Arrow,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            TextureKey::Player => "player",
            TextureKey::Enemy => "enemy",
            TextureKey::Collect => "collect",
            TextureKey::Proj => "proj",
            TextureKey::Arrow => "arrow",
        }
    }

    fn file_name(&self) -> &'static str {
        match self {
            TextureKey::Player => "player.png",
            TextureKey::Enemy => "enemy.png",
            TextureKey::Collect => "collectible.png",
            TextureKey::Proj => "projectile.png",
            TextureKey::Arrow => "arrow.png",
        }
    }

    /// Placeholder color and size
    fn placeholder(&self) -> Texture {
        let (color, size) = match self {
            TextureKey::Player => ([200, 200, 200], (24, 24)),
            TextureKey::Enemy => ([180, 40, 40], (32, 32)),
            TextureKey::Collect => ([200, 170, 80], (20, 20)),
            TextureKey::Proj => ([0, 200, 200], (10, 10)),
            TextureKey::Arrow => ([0, 200, 200], (18, 4)),
        };
        Texture::Placeholder { color, size }
    }
}

fn sound_file_name(effect: SoundEffect) -> &'static str {
    match effect {
        SoundEffect::Shoot => "shoot.wav",
        SoundEffect::Hit => "hit.wav",
        SoundEffect::Collect => "collect.wav",
        SoundEffect::Select => "select.wav",
    }
}

/// A drawable the renderer understands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Texture {
    /// Image file for the renderer to decode
    File(PathBuf),
    /// Solid RGB rectangle
    Placeholder { color: [u8; 3], size: (u32, u32) },
}

impl Texture {
    pub fn is_placeholder(&self) -> bool {
        matches!(self, Texture::Placeholder { .. })
    }
}

/// Resolves logical keys to files on disk
#[derive(Debug, Clone)]
pub struct Assets {
    texture_dir: PathBuf,
    sound_dir: PathBuf,
    textures: HashMap<TextureKey, Texture>,
    sounds: HashMap<SoundEffect, PathBuf>,
}

impl Assets {
    /// Start with placeholders only; call `reload_all` to pick up files
    pub fn new(texture_dir: impl Into<PathBuf>, sound_dir: impl Into<PathBuf>) -> Self {
        let textures = TextureKey::ALL
            .iter()
            .map(|k| (*k, k.placeholder()))
            .collect();
        Self {
            texture_dir: texture_dir.into(),
            sound_dir: sound_dir.into(),
            textures,
            sounds: HashMap::new(),
        }
    }

    /// Re-scan the asset directories
    pub fn reload_all(&mut self) {
        for key in TextureKey::ALL {
            let path = self.texture_dir.join(key.file_name());
            let texture = if path.is_file() {
                Texture::File(path)
            } else {
                key.placeholder()
            };
            self.textures.insert(key, texture);
        }

        self.sounds.clear();
        for effect in SoundEffect::ALL {
            let path = self.sound_dir.join(sound_file_name(effect));
            if path.is_file() {
                self.sounds.insert(effect, path);
            }
        }

        let placeholders = self.textures.values().filter(|t| t.is_placeholder()).count();
        log::info!(
            "Assets reloaded: {} placeholder textures, {} sounds",
            placeholders,
            self.sounds.len()
        );
    }

    pub fn texture(&self, key: TextureKey) -> Texture {
        self.textures
            .get(&key)
            .cloned()
            .unwrap_or_else(|| key.placeholder())
    }

    pub fn sound(&self, effect: SoundEffect) -> Option<&Path> {
        self.sounds.get(&effect).map(PathBuf::as_path)
    }
}
