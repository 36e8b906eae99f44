//! Wave Survivor - a side-on survival shooter simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, spawning, collisions, game state)
//! - `audio`: Audio collaborator boundary (best-effort tracks and one-shots)
//! - `settings`: Player preferences and run configuration

pub mod audio;
pub mod settings;
pub mod sim;

pub use audio::{AudioBackend, AudioError, AudioManager, SoundEffect, Track};
pub use settings::{Settings, SettingsError};

/// Game configuration constants
pub mod consts {
    /// Nominal simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Largest delta a single tick will integrate (stalled frames are clamped)
    pub const MAX_FRAME_DT: f32 = 1.0 / 30.0;

    /// Playfield dimensions (y grows upward, ground at y = 0)
    pub const WORLD_W: f32 = 960.0;
    pub const WORLD_H: f32 = 540.0;
    pub const GROUND_Y: f32 = 0.0;

    /// Avatar defaults
    pub const AVATAR_START_X: f32 = 40.0;
    pub const AVATAR_WIDTH: f32 = 64.0;
    pub const AVATAR_HEIGHT: f32 = 64.0;
    pub const AVATAR_HP: i32 = 10;
    pub const AVATAR_RUN_SPEED: f32 = 240.0;
    pub const AVATAR_JUMP_SPEED: f32 = 620.0;
    pub const GRAVITY: f32 = 1400.0;
    /// Seconds between avatar shots
    pub const FIRE_COOLDOWN: f32 = 0.25;
    /// Hit points lost per tick of enemy contact
    pub const CONTACT_DAMAGE: i32 = 1;
    /// Distance the avatar is pushed back on enemy contact
    pub const CONTACT_KNOCKBACK: f32 = 50.0;

    /// Ground enemy defaults
    pub const GROUND_SPAWN_X: f32 = 900.0;
    pub const GROUND_ENEMY_WIDTH: f32 = 56.0;
    pub const GROUND_ENEMY_HEIGHT: f32 = 56.0;
    pub const GROUND_ENEMY_HP: i32 = 2;
    pub const GROUND_ENEMY_SPEED: f32 = 90.0;

    /// Flying enemy defaults
    pub const FLYING_SPAWN_X: f32 = 980.0;
    pub const FLYING_LANE_MIN: f32 = 140.0;
    pub const FLYING_LANE_MAX: f32 = 220.0;
    pub const FLYING_ENEMY_SIZE: f32 = 60.0;
    pub const FLYING_ENEMY_HP: i32 = 3;
    pub const FLYING_ENEMY_SPEED: f32 = 110.0;
    pub const FLYING_BOB_AMPLITUDE: f32 = 20.0;
    pub const FLYING_BOB_FREQUENCY: f32 = 6.0;
    /// How far past the left edge a flyer may drift before it is gone
    pub const FLYING_ESCAPE_MARGIN: f32 = 16.0;

    /// Boss defaults
    pub const BOSS_SPAWN_X: f32 = 780.0;
    pub const BOSS_WIDTH: f32 = 160.0;
    pub const BOSS_HEIGHT: f32 = 160.0;
    pub const BOSS_HP: i32 = 40;
    pub const BOSS_SPEED: f32 = 60.0;
    /// Horizontal gap the boss keeps from the avatar while pursuing
    pub const BOSS_KEEP_DISTANCE: f32 = 140.0;
    /// Seconds between boss shots
    pub const BOSS_ATTACK_INTERVAL: f32 = 1.4;

    /// Projectile defaults
    pub const PLAYER_BULLET_SPEED: f32 = 520.0;
    pub const PLAYER_BULLET_DAMAGE: i32 = 1;
    pub const PLAYER_BULLET_WIDTH: f32 = 16.0;
    pub const PLAYER_BULLET_HEIGHT: f32 = 6.0;
    pub const BOSS_BULLET_SPEED: f32 = 300.0;
    pub const BOSS_BULLET_DAMAGE: i32 = 2;
    pub const BOSS_BULLET_WIDTH: f32 = 18.0;
    pub const BOSS_BULLET_HEIGHT: f32 = 10.0;

    /// Spawn director
    pub const SPAWN_INTERVAL: f32 = 1.1;
    pub const FLYING_SPAWN_CHANCE: f64 = 0.45;

    /// One-shot volumes
    pub const SHOOT_VOLUME: f32 = 0.8;
    pub const HIT_VOLUME: f32 = 0.9;
    pub const BOSS_ROAR_VOLUME: f32 = 0.9;
}

/// Clamp a raw frame delta into the range a single tick may integrate
#[inline]
pub fn clamp_frame_dt(raw_dt: f32) -> f32 {
    if raw_dt.is_nan() {
        return 0.0;
    }
    raw_dt.clamp(0.0, consts::MAX_FRAME_DT)
}
