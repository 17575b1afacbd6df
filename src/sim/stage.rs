//! Stage generation
//!
//! `reset_stage` is the only way a world gets built. Death, stage clear,
//! restart, new game and load all go through it.

use rand::Rng;

use super::rect::Rect;
use super::state::{Enemy, GameState};
use crate::catalog::{StageCatalog, StageCatalogSource};
use crate::consts::*;

/// World size for a stage, clamped to fit the window minus padding. Never
/// smaller than the player, however small the window.
pub fn world_size(stage: u32, catalog: &StageCatalog, window: (i32, i32)) -> (i32, i32) {
    let (w, h) = catalog.world_size(stage).unwrap_or_else(|| {
        let growth = (f64::from(stage) + 1.0).ln() / GROWTH_BASE.ln();
        (
            BASE_WORLD_W + (GROWTH_W * growth) as i32,
            BASE_WORLD_H + (GROWTH_H * growth) as i32,
        )
    });
    (
        w.min(window.0 - WORLD_PADDING).max(PLAYER_SIZE),
        h.min(window.1 - WORLD_PADDING).max(PLAYER_SIZE),
    )
}

pub fn collectible_count(stage: u32, catalog: &StageCatalog) -> usize {
    catalog
        .collectibles(stage)
        .unwrap_or(3 + stage as usize)
}

pub fn enemy_count(stage: u32, catalog: &StageCatalog) -> usize {
    catalog.enemies(stage).unwrap_or(2 + stage as usize)
}

/// Rebuild the world for `state.stage` from a freshly loaded catalog
pub fn reset_stage(state: &mut GameState, stages: &dyn StageCatalogSource) {
    let catalog = stages.load();
    let (world_w, world_h) = world_size(state.stage, &catalog, state.window);
    state.world_w = world_w;
    state.world_h = world_h;

    let bounds = state.bounds();
    state.player = Rect::new(PLAYER_START.0, PLAYER_START.1, PLAYER_SIZE, PLAYER_SIZE);
    state.player.clamp_within(&bounds);
    state.aim_end = state.player.center_vec() + glam::Vec2::new(10.0, 0.0);

    let num_collect = collectible_count(state.stage, &catalog);
    state.collectibles.clear();
    for _ in 0..num_collect {
        let x = random_coord(&mut state.rng, COLLECTIBLE_MARGIN, world_w);
        let y = random_coord(&mut state.rng, COLLECTIBLE_MARGIN, world_h);
        state
            .collectibles
            .push(Rect::centered(x, y, COLLECTIBLE_SIZE));
    }

    let num_enemies = enemy_count(state.stage, &catalog);
    state.enemies.clear();
    for _ in 0..num_enemies {
        let x = random_coord(&mut state.rng, ENEMY_MARGIN, world_w);
        let y = random_coord(&mut state.rng, ENEMY_MARGIN, world_h);
        let vx = ENEMY_SPEEDS[state.rng.random_range(0..ENEMY_SPEEDS.len())];
        let vy = ENEMY_SPEEDS[state.rng.random_range(0..ENEMY_SPEEDS.len())];
        state
            .enemies
            .push(Enemy::new(Rect::centered(x, y, ENEMY_SIZE), vx, vy));
    }

    state.projectile = None;
    state.shot_available = true;

    log::info!(
        "Stage {}: world {}x{}, {} collectibles, {} enemies",
        state.stage,
        world_w,
        world_h,
        num_collect,
        num_enemies
    );
}

/// Uniform in [margin, max(margin, extent - margin)]
fn random_coord(rng: &mut impl Rng, margin: i32, extent: i32) -> i32 {
    let hi = (extent - margin).max(margin);
    rng.random_range(margin..=hi)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::StageConfig;
    use proptest::prelude::*;

    #[test]
    fn test_stage_one_scenario() {
        let catalog = StageCatalog::new();
        // log_1.45(2) ~= 1.865, so the raw size far exceeds the window
        assert_eq!(world_size(1, &catalog, (800, 600)), (760, 560));

        let mut state = GameState::new((800, 600), 7);
        reset_stage(&mut state, &catalog);
        assert_eq!((state.world_w, state.world_h), (760, 560));
        assert_eq!(state.collectibles.len(), 4);
        assert_eq!(state.enemies.len(), 3);
        assert!(state.shot_available);
        assert!(state.projectile.is_none());
    }

    #[test]
    fn test_growth_formula_unclamped() {
        let catalog = StageCatalog::new();
        let (w, h) = world_size(1, &catalog, (4000, 4000));
        let growth = 2f64.ln() / 1.45f64.ln();
        assert_eq!(w, 800 + (180.0 * growth) as i32);
        assert_eq!(h, 600 + (130.0 * growth) as i32);
        assert_eq!((w, h), (1135, 842));
    }

    #[test]
    fn test_tiny_window_still_holds_player() {
        let catalog = StageCatalog::new();
        assert_eq!(world_size(1, &catalog, (30, 30)), (PLAYER_SIZE, PLAYER_SIZE));

        let mut state = GameState::new((30, 30), 9);
        reset_stage(&mut state, &catalog);
        assert!(state.player.is_inside(&state.bounds()));
        assert_eq!((state.player.x, state.player.y), (0, 0));
    }

    #[test]
    fn test_catalog_overrides() {
        let catalog = StageCatalog::from_entries(vec![StageConfig {
            stage: Some(2),
            world_w: Some(400),
            world_h: Some(300),
            collectibles: Some(1),
            enemies: Some(0),
        }]);
        let mut state = GameState::new((1920, 1080), 1);
        state.stage = 2;
        reset_stage(&mut state, &catalog);
        assert_eq!((state.world_w, state.world_h), (400, 300));
        assert_eq!(state.collectibles.len(), 1);
        assert!(state.enemies.is_empty());

        // stage 3 is not in the catalog
        state.stage = 3;
        reset_stage(&mut state, &catalog);
        assert_eq!(state.collectibles.len(), 6);
        assert_eq!(state.enemies.len(), 5);
    }

    #[test]
    fn test_reset_discards_shot_state() {
        let catalog = StageCatalog::new();
        let mut state = GameState::new((800, 600), 3);
        reset_stage(&mut state, &catalog);
        state.shot_available = false;
        state.player.translate(300, 300);
        reset_stage(&mut state, &catalog);
        assert!(state.shot_available);
        assert_eq!((state.player.x, state.player.y), PLAYER_START);
    }

    proptest! {
        #[test]
        fn prop_world_fits_window(
            stage in 1u32..=MAX_STAGES,
            win_w in 200i32..2560,
            win_h in 200i32..1600,
            seed in any::<u64>(),
        ) {
            let catalog = StageCatalog::new();
            let mut state = GameState::new((win_w, win_h), seed);
            state.stage = stage;
            reset_stage(&mut state, &catalog);

            prop_assert!(state.world_w <= win_w - WORLD_PADDING);
            prop_assert!(state.world_h <= win_h - WORLD_PADDING);
            prop_assert!(state.player.is_inside(&state.bounds()));
            prop_assert_eq!(state.collectibles.len(), 3 + stage as usize);
            prop_assert_eq!(state.enemies.len(), 2 + stage as usize);
            for enemy in &state.enemies {
                prop_assert!(ENEMY_SPEEDS.contains(&enemy.vx));
                prop_assert!(ENEMY_SPEEDS.contains(&enemy.vy));
            }
        }
    }
}
