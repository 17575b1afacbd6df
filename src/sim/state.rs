//! Game state and core simulation types
//!
//! Everything `tick` reads or writes lives here. The world is
//! rebuilt wholesale by `reset_stage`; nothing carries over between attempts
//! except the stage number.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::rect::Rect;
use crate::consts::*;

/// A bouncing enemy with a fixed integer per-tick velocity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enemy {
    pub rect: Rect,
    pub vx: i32,
    pub vy: i32,
}

impl Enemy {
    pub fn new(rect: Rect, vx: i32, vy: i32) -> Self {
        Self { rect, vx, vy }
    }
}

/// The single live shot
#[derive(Debug, Clone, PartialEq)]
pub struct Projectile {
    pub rect: Rect,
    /// Units per tick; truncated to integers when applied
    pub vel: Vec2,
}

/// Complete simulation state for the current stage attempt
#[derive(Debug, Clone)]
pub struct GameState {
    /// Current stage number (1..=MAX_STAGES)
    pub stage: u32,
    /// Window size the world has to fit inside
    pub window: (i32, i32),
    /// Playfield size
    pub world_w: i32,
    pub world_h: i32,
    pub player: Rect,
    pub collectibles: Vec<Rect>,
    pub enemies: Vec<Enemy>,
    pub projectile: Option<Projectile>,
    /// False from the moment a shot is fired until the next stage reset
    pub shot_available: bool,
    /// Aim indicator endpoint (render only)
    pub aim_end: Vec2,
    /// Stage generation RNG
    pub rng: Pcg32,
}

impl GameState {
    /// Create an empty stage-1 state; call `reset_stage` to populate it
    pub fn new(window: (i32, i32), seed: u64) -> Self {
        let player = Rect::new(PLAYER_START.0, PLAYER_START.1, PLAYER_SIZE, PLAYER_SIZE);
        Self {
            stage: 1,
            window,
            world_w: BASE_WORLD_W,
            world_h: BASE_WORLD_H,
            player,
            collectibles: Vec::new(),
            enemies: Vec::new(),
            projectile: None,
            shot_available: true,
            aim_end: player.center_vec() + Vec2::new(10.0, 0.0),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// The playfield as a rectangle anchored at the origin
    pub fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.world_w, self.world_h)
    }

    /// Screen-space offset that centers the world in the window
    pub fn world_offset(&self) -> (i32, i32) {
        (
            (self.window.0 - self.world_w).div_euclid(2),
            (self.window.1 - self.world_h).div_euclid(2),
        )
    }

    /// Translate a screen-space point into world space
    pub fn screen_to_world(&self, x: i32, y: i32) -> (i32, i32) {
        let (ox, oy) = self.world_offset();
        (x - ox, y - oy)
    }
}
