//! Per-frame simulation tick
//!
//! Drives one frame of the game in a fixed order: input, avatar, spawning,
//! boss gate, enemies, projectiles, collisions, progression, death check,
//! cleanup, win check.

use super::collision::{
    enemies_touch_avatar, enemy_projectiles_vs_avatar, player_projectiles_vs_enemies,
};
use super::entity::{Enemy, Entity};
use super::state::{GameEvent, GameState, RunSignal, RunState};
use crate::audio::{AudioManager, SoundEffect};
use crate::clamp_frame_dt;
use crate::consts::*;

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Pause toggle (edge-triggered)
    pub pause: bool,
    /// Fire request (edge-triggered)
    pub fire: bool,
    /// Horizontal movement in [-1, 1]
    pub move_x: f32,
    /// Jump (only honoured on the ground)
    pub jump: bool,
}

/// Advance the game state by one frame.
///
/// `raw_dt` is the wall-clock frame delta; it is clamped to
/// [`MAX_FRAME_DT`] before anything integrates it.
pub fn tick(state: &mut GameState, input: &TickInput, raw_dt: f32, audio: &mut AudioManager) {
    state.events.clear();
    let dt = clamp_frame_dt(raw_dt);

    if input.pause {
        state.apply_signal(RunSignal::TogglePause);
    }

    // Don't tick if paused or finished
    if state.run_state != RunState::Playing {
        return;
    }

    state.time_ticks += 1;
    sync_stage_music(state, audio);

    // Input
    state.avatar.steer(input.move_x, input.jump);
    if input.fire {
        if let Some(shot) = state.avatar.fire() {
            state.projectiles.push(shot);
            audio.play_one_shot(SoundEffect::Shoot, SHOOT_VOLUME);
        }
    }

    // Avatar
    state.avatar.update(dt);

    // Spawning
    if let Some(variant) = state.spawner.tick(
        dt,
        &mut state.enemies,
        &state.avatar,
        &mut state.wave,
        &mut state.ids,
        &mut state.rng,
    ) {
        state.events.push(GameEvent::EnemySpawned { variant });
    }

    spawn_boss_if_due(state, audio);

    // Enemies (boss pursues and attacks before moving)
    for enemy in state.enemies.iter_mut().filter(|e| e.is_alive()) {
        if let Some(shot) = enemy.pursue_and_attack(&state.avatar, dt) {
            state.projectiles.push(shot);
        }
        enemy.update(dt);
    }

    // Projectiles
    for projectile in &mut state.projectiles {
        projectile.update(dt);
    }

    resolve_collisions(state, audio);
    update_progression(state, audio);

    // Single place that decides death, whatever the cause
    if state.avatar.hp() <= 0 || !state.avatar.is_alive() {
        trigger_game_over(state, audio);
    }

    cleanup(state);

    if state.boss_defeated() && state.apply_signal(RunSignal::BossDefeated).is_some() {
        state.boss_music_on = false;
        audio.play_win_track();
        state.events.push(GameEvent::Victory);
        log::info!(
            "Boss defeated after {} ticks ({} kills)",
            state.time_ticks,
            state.wave.total_kills
        );
    }
}

/// Start the current stage's music if it is not already playing
fn sync_stage_music(state: &mut GameState, audio: &mut AudioManager) {
    if state.boss_music_on {
        return;
    }
    let stage = state.wave.effective_stage();
    if state.stage_track != Some(stage) {
        audio.play_track_for_stage(stage);
        state.stage_track = Some(stage);
    }
}

/// Create the boss the first tick the gate is open
fn spawn_boss_if_due(state: &mut GameState, audio: &mut AudioManager) {
    if !state.wave.should_spawn_boss() || state.boss_id.is_some() {
        return;
    }

    let id = state.ids.next_id();
    state.enemies.push(Enemy::boss(id));
    state.boss_id = Some(id);
    state.wave.mark_boss_spawned();
    state.boss_music_on = true;

    audio.play_one_shot(SoundEffect::BossRoar, BOSS_ROAR_VOLUME);
    audio.play_boss_track();
    state.events.push(GameEvent::BossSpawned);
    log::info!("Boss #{} spawned at tick {}", id, state.time_ticks);
}

fn resolve_collisions(state: &mut GameState, audio: &mut AudioManager) {
    let report = player_projectiles_vs_enemies(
        &mut state.projectiles,
        &mut state.enemies,
        &mut state.wave,
        audio,
    );
    if report.hits > 0 {
        log::trace!("Collision report: {:?}", report);
    }

    let dealt = enemy_projectiles_vs_avatar(&mut state.projectiles, &mut state.avatar);
    if dealt > 0 {
        state.events.push(GameEvent::AvatarHit { damage: dealt });
    }

    // Contact damage and knockback are applied here, not by the query
    if state.avatar.is_alive() && enemies_touch_avatar(&state.enemies, &state.avatar) {
        let before = state.avatar.hp();
        state.avatar.apply_damage(CONTACT_DAMAGE);
        state.avatar.knock_back(CONTACT_KNOCKBACK);
        state.events.push(GameEvent::AvatarHit {
            damage: before - state.avatar.hp(),
        });
        state.events.push(GameEvent::AvatarKnockedBack);
    }
}

fn update_progression(state: &mut GameState, audio: &mut AudioManager) {
    for _ in state.enemies.iter().filter(|e| e.escaped) {
        state.wave.on_enemy_escaped();
    }

    if state.wave.advance_if_cleared() {
        log::info!(
            "Stage {} reached ({} total kills)",
            state.wave.stage,
            state.wave.total_kills
        );
        state.events.push(GameEvent::StageAdvanced {
            stage: state.wave.stage,
        });
        sync_stage_music(state, audio);
    }
}

/// Playing -> GameOver. Entry effects run only on the actual transition.
fn trigger_game_over(state: &mut GameState, audio: &mut AudioManager) {
    if state.apply_signal(RunSignal::AvatarDown).is_none() {
        return;
    }
    state.boss_music_on = false;
    // Stops every track, then starts the game-over track
    audio.play_game_over_track();

    state.avatar.body.hp = state.avatar.body.hp.max(0);
    state.avatar.body.alive = false;
    state.events.push(GameEvent::GameOver);
    log::info!(
        "Game over on stage {} after {} ticks ({} kills)",
        state.wave.stage,
        state.time_ticks,
        state.wave.total_kills
    );
}

/// Drop dead projectiles and enemies, reporting kills first
fn cleanup(state: &mut GameState) {
    for enemy in state.enemies.iter().filter(|e| !e.is_alive()) {
        if !enemy.escaped && enemy.counts_for_wave() {
            state.events.push(GameEvent::EnemyKilled {
                variant: enemy.variant(),
            });
        }
    }
    state.projectiles.retain(|p| p.alive);
    state.enemies.retain(|e| e.is_alive());
}
