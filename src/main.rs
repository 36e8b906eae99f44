//! Wave Survivor entry point
//!
//! Runs a headless session: loads settings, drives the simulation with a
//! simple autopilot and a logging audio backend, and reports the outcome.
//!
//! Usage: `wave-survivor [settings.json]` (`RUST_LOG=debug` for more detail)

use std::time::{SystemTime, UNIX_EPOCH};

use wave_survivor::audio::{AudioManager, LogBackend};
use wave_survivor::consts::*;
use wave_survivor::settings::Settings;
use wave_survivor::sim::{Entity, GameEvent, GameState, RunState, Side, TickInput, tick};

const DEFAULT_SETTINGS_PATH: &str = "settings.json";

/// How close (px) an incoming boss bullet gets before the autopilot jumps
const DODGE_RANGE: f32 = 140.0;
/// Gap the autopilot tries to keep from the nearest enemy
const SAFE_GAP: f32 = 160.0;

fn main() {
    env_logger::init();
    log::info!("Wave Survivor (headless) starting...");

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_SETTINGS_PATH.to_string());
    let settings = Settings::load_or_default(&path);

    let seed = settings.seed.unwrap_or_else(clock_seed);
    let mut state = GameState::new(seed);
    let mut audio = AudioManager::new(Box::new(LogBackend));
    settings.apply_audio(&mut audio);
    log::info!("Game initialized with seed: {}", seed);

    let max_ticks = (settings.demo_seconds.max(0.0) / SIM_DT) as u64;
    let mut frames = 0u64;
    while !state.run_state.is_terminal() && frames < max_ticks {
        let input = autopilot(&state);
        tick(&mut state, &input, SIM_DT, &mut audio);
        frames += 1;

        for event in &state.events {
            match event {
                GameEvent::EnemySpawned { .. } | GameEvent::AvatarHit { .. } => {
                    log::trace!("{:?}", event)
                }
                _ => log::debug!("{:?}", event),
            }
        }

        if frames % 60 == 0 {
            let hud = state.hud_snapshot();
            log::info!(
                "t={:>4}s stage {} | kills {} | hp {} | boss {}",
                frames / 60,
                hud.stage,
                hud.total_kills,
                hud.avatar_hp,
                hud.boss_hp.map_or_else(|| "-".to_string(), |hp| hp.to_string())
            );
        }
    }

    let hud = state.hud_snapshot();
    let outcome = match state.run_state {
        RunState::Win => "VICTORY",
        RunState::GameOver => "GAME OVER",
        RunState::Playing | RunState::Paused => "TIME UP",
    };
    println!(
        "{} after {:.1}s (seed {}): stage {}, {} kills, {} hp left",
        outcome,
        frames as f32 * SIM_DT,
        seed,
        hud.stage,
        hud.total_kills,
        hud.avatar_hp
    );
}

/// Seed from the wall clock when the settings don't pin one
fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Keep firing, back off from the nearest enemy, jump over boss bullets
fn autopilot(state: &GameState) -> TickInput {
    let avatar = &state.avatar;
    let ax = avatar.body.center_x();

    let nearest = state
        .enemies
        .iter()
        .filter(|e| e.is_alive())
        .min_by(|a, b| {
            let da = (a.body.center_x() - ax).abs();
            let db = (b.body.center_x() - ax).abs();
            da.total_cmp(&db)
        });

    let move_x = match nearest {
        Some(enemy) => {
            let dx = enemy.body.center_x() - ax;
            if dx.abs() < SAFE_GAP {
                -dx.signum()
            } else {
                // Turn to face it without closing in
                dx.signum() * 0.05
            }
        }
        None => 0.0,
    };

    let incoming = state.projectiles.iter().any(|p| {
        p.alive
            && p.side == Side::Enemy
            && (p.pos.x - ax).abs() < DODGE_RANGE
            && (p.pos.x - ax).signum() == -p.direction.sign()
    });

    TickInput {
        pause: false,
        fire: true,
        move_x,
        jump: incoming,
    }
}
