//! Per-frame simulation tick
//!
//! Phase order is fixed: player move, enemy move, projectile move/collision,
//! pickups, death check, stage-clear check, aim update. Later phases read
//! state written by earlier ones in the same tick.

use glam::Vec2;

use super::collision::{first_enemy_hit, off_world, step_enemy};
use super::rect::Rect;
use super::stage::reset_stage;
use super::state::{GameState, Projectile};
use crate::audio::SoundEffect;
use crate::catalog::StageCatalogSource;
use crate::consts::*;

/// Input sampled for a single tick
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Pointer position in world space
    pub pointer: Option<(i32, i32)>,
}

/// Stage-level outcome of a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageEvent {
    /// Player touched an enemy; the same stage was rebuilt
    Died { stage: u32 },
    /// Last collectible taken; the world was rebuilt for `to`
    Cleared { from: u32, to: u32 },
}

/// What happened during a tick, for the caller to act on
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickReport {
    pub sounds: Vec<SoundEffect>,
    pub event: Option<StageEvent>,
}

/// Advance the world by one tick
///
/// Callers are responsible for only ticking while the game is actually
/// being played (not on a menu, not paused).
pub fn tick(
    state: &mut GameState,
    input: &TickInput,
    dt: f32,
    stages: &dyn StageCatalogSource,
) -> TickReport {
    let mut report = TickReport::default();

    // Player: each axis independently, so diagonals travel sqrt(2) faster
    let speed = PLAYER_SPEED * dt;
    let dx = (input.right as i32 - input.left as i32) as f32 * speed;
    let dy = (input.down as i32 - input.up as i32) as f32 * speed;
    state.player.translate(dx as i32, dy as i32);
    let bounds = state.bounds();
    state.player.clamp_within(&bounds);

    for enemy in &mut state.enemies {
        step_enemy(enemy, state.world_w, state.world_h);
    }

    advance_projectile(state, &mut report);

    let player = state.player;
    let before = state.collectibles.len();
    state.collectibles.retain(|c| !c.overlaps(&player));
    for _ in state.collectibles.len()..before {
        report.sounds.push(SoundEffect::Collect);
    }

    if state.enemies.iter().any(|e| e.rect.overlaps(&player)) {
        log::debug!("Player caught on stage {}", state.stage);
        reset_stage(state, stages);
        report.event = Some(StageEvent::Died { stage: state.stage });
        return report;
    }

    if state.collectibles.is_empty() {
        let from = state.stage;
        state.stage = (state.stage + 1).min(MAX_STAGES);
        reset_stage(state, stages);
        report.event = Some(StageEvent::Cleared {
            from,
            to: state.stage,
        });
    }

    if let Some((px, py)) = input.pointer {
        update_aim(state, px, py);
    }

    report
}

fn advance_projectile(state: &mut GameState, report: &mut TickReport) {
    let Some(proj) = state.projectile.as_mut() else {
        return;
    };
    proj.rect.translate(proj.vel.x as i32, proj.vel.y as i32);
    let rect = proj.rect;

    if off_world(&rect, state.world_w, state.world_h) {
        state.projectile = None;
        return;
    }

    // One enemy per tick at most
    if let Some(index) = first_enemy_hit(&rect, &state.enemies) {
        state.enemies.remove(index);
        state.projectile = None;
        report.sounds.push(SoundEffect::Hit);
    }
}

/// Point the aim indicator from the player center toward (tx, ty)
pub fn update_aim(state: &mut GameState, tx: i32, ty: i32) {
    let center = state.player.center_vec();
    let dir = direction(center, tx, ty);
    state.aim_end = center + dir * AIM_LENGTH;
}

/// Fire the one shot this stage allows toward a world-space target.
///
/// Returns false (and changes nothing) when the shot was already spent.
pub fn fire_projectile(state: &mut GameState, tx: i32, ty: i32) -> bool {
    if !state.shot_available {
        return false;
    }
    let (cx, cy) = state.player.center();
    let dir = direction(state.player.center_vec(), tx, ty);
    state.projectile = Some(Projectile {
        rect: Rect::centered(cx, cy, PROJECTILE_SIZE),
        vel: dir * PROJECTILE_SPEED,
    });
    state.shot_available = false;
    true
}

/// Unit vector by angle; a target on the origin points along +x
fn direction(from: Vec2, tx: i32, ty: i32) -> Vec2 {
    let angle = (ty as f32 - from.y).atan2(tx as f32 - from.x);
    Vec2::new(angle.cos(), angle.sin())
}
