//! Simulation module
//!
//! Advances the playfield one tick at a time and rebuilds it between stage
//! attempts. Nothing in here touches the filesystem except through the
//! `StageCatalogSource` handed to it.

pub mod collision;
pub mod rect;
pub mod stage;
pub mod state;
pub mod tick;

pub use collision::{first_enemy_hit, off_world, step_enemy};
pub use rect::Rect;
pub use stage::{reset_stage, world_size};
pub use state::{Enemy, GameState, Projectile};
pub use tick::{StageEvent, TickInput, TickReport, fire_projectile, tick, update_aim};
