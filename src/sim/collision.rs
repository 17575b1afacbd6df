//! Collision helpers for rectangle entities
//!
//! All checks are axis-aligned. Enemies reflect off the world edges, the
//! projectile leaves the world or strikes the first enemy it overlaps.

use super::rect::Rect;
use super::state::Enemy;

/// Move an enemy by its velocity, then flip any axis whose edge touches or
/// crosses the world boundary.
///
/// The comparison is `<=`/`>=`, so an enemy that overshoots far past a wall
/// can flip again on the following tick.
pub fn step_enemy(enemy: &mut Enemy, world_w: i32, world_h: i32) {
    enemy.rect.translate(enemy.vx, enemy.vy);
    if enemy.rect.left() <= 0 || enemy.rect.right() >= world_w {
        enemy.vx = -enemy.vx;
    }
    if enemy.rect.top() <= 0 || enemy.rect.bottom() >= world_h {
        enemy.vy = -enemy.vy;
    }
}

/// True once the rectangle is entirely outside the world
pub fn off_world(rect: &Rect, world_w: i32, world_h: i32) -> bool {
    rect.right() < 0 || rect.left() > world_w || rect.bottom() < 0 || rect.top() > world_h
}

/// Index of the first enemy overlapping `rect`, in iteration order
pub fn first_enemy_hit(rect: &Rect, enemies: &[Enemy]) -> Option<usize> {
    enemies.iter().position(|e| e.rect.overlaps(rect))
}
