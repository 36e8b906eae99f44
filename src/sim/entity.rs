//! Entity model: avatar, enemy variants and projectiles
//!
//! Enemies share one struct and carry their variant-specific motion state in
//! [`EnemyKind`]. Behaviour that only the boss has (pursuit, attack timer) is
//! selected by matching on that tag.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::aabb::Aabb;
use crate::consts::*;

/// Horizontal direction an avatar faces or a projectile travels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

impl Facing {
    /// -1.0 for left, +1.0 for right
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }

    /// Direction pointing from `from` toward `to` along x (right on a tie)
    pub fn toward(from: f32, to: f32) -> Self {
        if to < from { Facing::Left } else { Facing::Right }
    }
}

/// Which side fired a projectile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Player,
    Enemy,
}

/// Allocates entity IDs in creation order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityIds {
    next: u32,
}

impl Default for EntityIds {
    fn default() -> Self {
        Self { next: 1 }
    }
}

impl EntityIds {
    pub fn next_id(&mut self) -> u32 {
        let id = self.next;
        self.next += 1;
        id
    }
}

/// Position, size and health shared by every living thing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub pos: Vec2,
    pub size: Vec2,
    pub hp: i32,
    pub alive: bool,
}

impl Body {
    pub fn new(pos: Vec2, size: Vec2, hp: i32) -> Self {
        let hp = hp.max(0);
        Self {
            pos,
            size,
            hp,
            alive: hp > 0,
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }

    pub fn center_x(&self) -> f32 {
        self.pos.x + self.size.x * 0.5
    }

    /// Subtract hit points, clamping at zero.
    ///
    /// Returns true only for the call that takes the body from alive to dead.
    /// Dead bodies ignore further damage and are never revived.
    pub fn apply_damage(&mut self, amount: i32) -> bool {
        if !self.alive || amount <= 0 {
            return false;
        }
        self.hp = (self.hp - amount).max(0);
        if self.hp == 0 {
            self.alive = false;
            return true;
        }
        false
    }

    /// Keep the body inside the playfield horizontally and above the ground
    fn clamp_to_playfield(&mut self) {
        self.pos.x = self.pos.x.clamp(0.0, (WORLD_W - self.size.x).max(0.0));
        self.pos.y = self.pos.y.max(GROUND_Y);
    }
}

/// Capabilities every simulated entity exposes
pub trait Entity {
    fn body(&self) -> &Body;
    fn body_mut(&mut self) -> &mut Body;

    /// Advance the entity's own motion by `dt` seconds
    fn update(&mut self, dt: f32);

    fn bounding_box(&self) -> Aabb {
        self.body().bounds()
    }

    fn is_alive(&self) -> bool {
        self.body().alive
    }

    fn hp(&self) -> i32 {
        self.body().hp
    }

    /// See [`Body::apply_damage`]
    fn apply_damage(&mut self, amount: i32) -> bool {
        self.body_mut().apply_damage(amount)
    }
}

/// The player-controlled avatar
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Avatar {
    pub body: Body,
    pub vel: Vec2,
    pub facing: Facing,
    /// Seconds until the next shot is allowed
    fire_cooldown: f32,
}

impl Default for Avatar {
    fn default() -> Self {
        Self::new()
    }
}

impl Avatar {
    pub fn new() -> Self {
        Self {
            body: Body::new(
                Vec2::new(AVATAR_START_X, GROUND_Y),
                Vec2::new(AVATAR_WIDTH, AVATAR_HEIGHT),
                AVATAR_HP,
            ),
            vel: Vec2::ZERO,
            facing: Facing::Right,
            fire_cooldown: 0.0,
        }
    }

    pub fn on_ground(&self) -> bool {
        self.body.pos.y <= GROUND_Y
    }

    /// Apply movement input: `move_x` in [-1, 1], `jump` only works grounded
    pub fn steer(&mut self, move_x: f32, jump: bool) {
        let move_x = if move_x.is_finite() { move_x.clamp(-1.0, 1.0) } else { 0.0 };
        self.vel.x = move_x * AVATAR_RUN_SPEED;
        if move_x < 0.0 {
            self.facing = Facing::Left;
        } else if move_x > 0.0 {
            self.facing = Facing::Right;
        }
        if jump && self.on_ground() {
            self.vel.y = AVATAR_JUMP_SPEED;
        }
    }

    pub fn can_shoot(&self) -> bool {
        self.body.alive && self.fire_cooldown <= 0.0
    }

    pub fn did_shoot(&mut self) {
        self.fire_cooldown = FIRE_COOLDOWN;
    }

    /// Fire a projectile from the avatar's front edge if the cooldown allows
    pub fn fire(&mut self) -> Option<Projectile> {
        if !self.can_shoot() {
            return None;
        }
        let front_x = match self.facing {
            Facing::Right => self.body.pos.x + self.body.size.x,
            Facing::Left => self.body.pos.x - PLAYER_BULLET_WIDTH,
        };
        let y = self.body.pos.y + self.body.size.y * 0.6;
        self.did_shoot();
        Some(Projectile::player(Vec2::new(front_x, y), self.facing))
    }

    /// Push the avatar toward the left edge (contact response)
    pub fn knock_back(&mut self, distance: f32) {
        self.body.pos.x = (self.body.pos.x - distance).max(0.0);
    }
}

impl Entity for Avatar {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn update(&mut self, dt: f32) {
        self.fire_cooldown = (self.fire_cooldown - dt).max(0.0);
        if !self.body.alive {
            return;
        }

        if !self.on_ground() || self.vel.y > 0.0 {
            self.vel.y -= GRAVITY * dt;
        }
        self.body.pos += self.vel * dt;
        if self.body.pos.y <= GROUND_Y {
            self.vel.y = 0.0;
        }
        self.body.clamp_to_playfield();
    }
}

/// Enemy variant tag without motion state (for reporting and counting)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyVariant {
    Ground,
    Flying,
    Boss,
}

/// Variant-specific motion state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EnemyKind {
    /// Walks along the ground toward the avatar
    Ground { vx: f32 },
    /// Flies right-to-left, bobbing around its lane height
    Flying { t: f32, base_y: f32 },
    /// Keeps its distance from the avatar and fires on a timer
    Boss { vx: f32, attack_timer: f32 },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub body: Body,
    pub kind: EnemyKind,
    /// Set when a flyer left the playfield without being killed
    #[serde(default)]
    pub escaped: bool,
}

impl Enemy {
    pub fn ground(id: u32) -> Self {
        Self {
            id,
            body: Body::new(
                Vec2::new(GROUND_SPAWN_X, GROUND_Y),
                Vec2::new(GROUND_ENEMY_WIDTH, GROUND_ENEMY_HEIGHT),
                GROUND_ENEMY_HP,
            ),
            kind: EnemyKind::Ground { vx: 0.0 },
            escaped: false,
        }
    }

    pub fn flying(id: u32, lane_y: f32) -> Self {
        Self {
            id,
            body: Body::new(
                Vec2::new(FLYING_SPAWN_X, lane_y),
                Vec2::splat(FLYING_ENEMY_SIZE),
                FLYING_ENEMY_HP,
            ),
            kind: EnemyKind::Flying {
                t: 0.0,
                base_y: lane_y,
            },
            escaped: false,
        }
    }

    pub fn boss(id: u32) -> Self {
        Self {
            id,
            body: Body::new(
                Vec2::new(BOSS_SPAWN_X, GROUND_Y),
                Vec2::new(BOSS_WIDTH, BOSS_HEIGHT),
                BOSS_HP,
            ),
            kind: EnemyKind::Boss {
                vx: 0.0,
                attack_timer: BOSS_ATTACK_INTERVAL,
            },
            escaped: false,
        }
    }

    pub fn variant(&self) -> EnemyVariant {
        match self.kind {
            EnemyKind::Ground { .. } => EnemyVariant::Ground,
            EnemyKind::Flying { .. } => EnemyVariant::Flying,
            EnemyKind::Boss { .. } => EnemyVariant::Boss,
        }
    }

    pub fn is_boss(&self) -> bool {
        self.variant() == EnemyVariant::Boss
    }

    /// Ground and flying enemies count toward wave kills; the boss does not
    pub fn counts_for_wave(&self) -> bool {
        !self.is_boss()
    }

    /// One pursuit step for ground enemies; other variants ignore it
    pub fn steer_toward(&mut self, avatar: &Avatar) {
        if let EnemyKind::Ground { ref mut vx } = self.kind {
            let dx = avatar.body.center_x() - self.body.center_x();
            *vx = if dx.abs() < 1.0 {
                0.0
            } else {
                dx.signum() * GROUND_ENEMY_SPEED
            };
        }
    }

    /// Boss-only: close in on the avatar and fire when the attack timer runs out
    pub fn pursue_and_attack(&mut self, avatar: &Avatar, dt: f32) -> Option<Projectile> {
        let EnemyKind::Boss {
            ref mut vx,
            ref mut attack_timer,
        } = self.kind
        else {
            return None;
        };
        if !self.body.alive {
            return None;
        }

        let dx = avatar.body.center_x() - self.body.center_x();
        *vx = if dx.abs() > BOSS_KEEP_DISTANCE {
            dx.signum() * BOSS_SPEED
        } else {
            0.0
        };

        *attack_timer -= dt;
        if *attack_timer > 0.0 || !avatar.body.alive {
            return None;
        }
        *attack_timer = BOSS_ATTACK_INTERVAL;

        let facing = Facing::toward(self.body.center_x(), avatar.body.center_x());
        let x = match facing {
            Facing::Left => self.body.pos.x - BOSS_BULLET_WIDTH,
            Facing::Right => self.body.pos.x + self.body.size.x,
        };
        let y = self.body.pos.y + self.body.size.y * 0.25;
        Some(Projectile::boss(Vec2::new(x, y), facing))
    }
}

impl Entity for Enemy {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn update(&mut self, dt: f32) {
        if !self.body.alive {
            return;
        }
        match self.kind {
            EnemyKind::Ground { vx } | EnemyKind::Boss { vx, .. } => {
                self.body.pos.x += vx * dt;
                self.body.clamp_to_playfield();
            }
            EnemyKind::Flying {
                ref mut t,
                base_y,
            } => {
                *t += dt;
                self.body.pos.x -= FLYING_ENEMY_SPEED * dt;
                self.body.pos.y =
                    base_y + FLYING_BOB_AMPLITUDE * (FLYING_BOB_FREQUENCY * *t).sin();
                if self.body.pos.x + self.body.size.x < -FLYING_ESCAPE_MARGIN {
                    self.body.alive = false;
                    self.escaped = true;
                }
            }
        }
    }
}

/// A bullet travelling horizontally
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub pos: Vec2,
    pub size: Vec2,
    pub direction: Facing,
    pub speed: f32,
    pub damage: i32,
    pub side: Side,
    pub alive: bool,
}

impl Projectile {
    pub fn player(pos: Vec2, direction: Facing) -> Self {
        Self {
            pos,
            size: Vec2::new(PLAYER_BULLET_WIDTH, PLAYER_BULLET_HEIGHT),
            direction,
            speed: PLAYER_BULLET_SPEED,
            damage: PLAYER_BULLET_DAMAGE,
            side: Side::Player,
            alive: true,
        }
    }

    pub fn boss(pos: Vec2, direction: Facing) -> Self {
        Self {
            pos,
            size: Vec2::new(BOSS_BULLET_WIDTH, BOSS_BULLET_HEIGHT),
            direction,
            speed: BOSS_BULLET_SPEED,
            damage: BOSS_BULLET_DAMAGE,
            side: Side::Enemy,
            alive: true,
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }

    /// Move along x; the projectile dies once it is fully off the playfield
    pub fn update(&mut self, dt: f32) {
        if !self.alive {
            return;
        }
        self.pos.x += self.direction.sign() * self.speed * dt;
        if self.bounds().outside_bounds(WORLD_W, WORLD_H) {
            self.alive = false;
        }
    }
}
