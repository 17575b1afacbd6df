//! Phobics - a bleak, short single-screen arcade game
//!
//! Core modules:
//! - `sim`: Per-frame simulation (movement, collisions, stage progression)
//! - `mode`: Menu/game mode state machine
//! - `engine`: Owns all state and wires the collaborators together
//! - `persistence`: Save slots (JSON records on disk)
//! - `catalog`: Optional per-stage overrides
//! - `platform`: Input events and frame pacing

pub mod assets;
pub mod audio;
pub mod catalog;
pub mod engine;
pub mod mode;
pub mod persistence;
pub mod platform;
pub mod settings;
pub mod sim;
pub mod ui;

pub use engine::{Control, Engine};
pub use settings::Settings;

use std::time::{SystemTime, UNIX_EPOCH};

/// Game configuration constants
pub mod consts {
    /// Target frame rate of the outer loop
    pub const FPS: u32 = 60;
    /// Highest stage number
    pub const MAX_STAGES: u32 = 10;
    /// Number of save slots (indexed 1..=SLOT_COUNT)
    pub const SLOT_COUNT: usize = 3;

    /// Default world size before growth
    pub const BASE_WORLD_W: i32 = 800;
    pub const BASE_WORLD_H: i32 = 600;
    /// World must leave this much room inside the window
    pub const WORLD_PADDING: i32 = 40;
    /// World growth: base + k * log_{GROWTH_BASE}(stage + 1)
    pub const GROWTH_BASE: f64 = 1.45;
    pub const GROWTH_W: f64 = 180.0;
    pub const GROWTH_H: f64 = 130.0;

    /// Player
    pub const PLAYER_SIZE: i32 = 24;
    pub const PLAYER_START: (i32, i32) = (40, 40);
    /// Units per second on each axis (diagonals are not normalized)
    pub const PLAYER_SPEED: f32 = 250.0;

    /// Enemies
    pub const ENEMY_SIZE: i32 = 32;
    /// Per-tick velocity components are drawn from this set
    pub const ENEMY_SPEEDS: [i32; 4] = [-3, -2, 2, 3];
    /// Spawn margin from the world edge (enemy center)
    pub const ENEMY_MARGIN: i32 = 50;

    /// Collectibles
    pub const COLLECTIBLE_SIZE: i32 = 20;
    pub const COLLECTIBLE_MARGIN: i32 = 30;

    /// Projectile
    pub const PROJECTILE_SIZE: i32 = 10;
    /// Units per tick
    pub const PROJECTILE_SPEED: f32 = 14.0;

    /// Aim indicator length (render only)
    pub const AIM_LENGTH: f32 = 18.0;

    /// Title fade-in duration (seconds)
    pub const TITLE_FADE_SECS: f32 = 1.8;
}

/// Seconds since the Unix epoch, as stored in save records
pub fn now_unix_s() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64())
        .unwrap_or(0.0)
}
