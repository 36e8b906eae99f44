//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Clamped frame delta only
//! - Seeded RNG only
//! - Stable iteration order (container insertion order)
//! - No rendering or device dependencies (audio goes through `AudioManager`)

pub mod aabb;
pub mod collision;
pub mod entity;
pub mod spawn;
pub mod state;
pub mod tick;
pub mod wave;

pub use aabb::Aabb;
pub use collision::{
    HitReport, enemies_touch_avatar, enemy_projectiles_vs_avatar, player_projectiles_vs_enemies,
};
pub use entity::{
    Avatar, Body, Enemy, EnemyKind, EnemyVariant, Entity, EntityIds, Facing, Projectile, Side,
};
pub use spawn::{SpawnDirector, active_wave_enemies};
pub use state::{GameEvent, GameState, HudSnapshot, RunSignal, RunState};
pub use tick::{TickInput, tick};
pub use wave::{FINAL_STAGE, WaveState};
