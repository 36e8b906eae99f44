//! Enemy spawn director
//!
//! Decides when a new ground or flying enemy enters the playfield, and steers
//! the ground enemies toward the avatar afterwards.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::entity::{Avatar, Enemy, EnemyVariant, Entity, EntityIds};
use super::wave::WaveState;
use crate::consts::{FLYING_LANE_MAX, FLYING_LANE_MIN, FLYING_SPAWN_CHANCE, SPAWN_INTERVAL};

/// Spawn pacing state. Holds no references between ticks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpawnDirector {
    /// Seconds until the next spawn is allowed (spawns when <= 0)
    pub cooldown: f32,
    /// Cooldown applied after each spawn
    pub interval: f32,
}

impl Default for SpawnDirector {
    fn default() -> Self {
        Self {
            cooldown: 0.0,
            interval: SPAWN_INTERVAL,
        }
    }
}

/// Alive ground + flying enemies (the boss is not counted)
pub fn active_wave_enemies(enemies: &[Enemy]) -> usize {
    enemies
        .iter()
        .filter(|e| e.is_alive() && e.counts_for_wave())
        .count()
}

impl SpawnDirector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run one spawn decision and the ground pursuit step.
    ///
    /// Returns the variant that was spawned this tick, if any.
    pub fn tick(
        &mut self,
        dt: f32,
        enemies: &mut Vec<Enemy>,
        avatar: &Avatar,
        wave: &mut WaveState,
        ids: &mut EntityIds,
        rng: &mut impl Rng,
    ) -> Option<EnemyVariant> {
        // Boss phase owns enemy creation
        if wave.should_spawn_boss() {
            return None;
        }

        self.cooldown -= dt;

        let active = active_wave_enemies(enemies);
        let can_spawn =
            wave.can_spawn_more() && active < wave.concurrency_cap() && self.cooldown <= 0.0;

        let mut spawned = None;
        if can_spawn {
            let flying = wave.effective_stage() >= 2 && rng.random_bool(FLYING_SPAWN_CHANCE);
            let enemy = if flying {
                let lane_y = rng.random_range(FLYING_LANE_MIN..=FLYING_LANE_MAX);
                Enemy::flying(ids.next_id(), lane_y)
            } else {
                Enemy::ground(ids.next_id())
            };
            log::debug!(
                "Spawned {:?} #{} (stage {}, {}/{})",
                enemy.variant(),
                enemy.id,
                wave.stage,
                wave.spawned_in_wave + 1,
                wave.wave_size()
            );
            spawned = Some(enemy.variant());
            enemies.push(enemy);
            wave.on_enemy_spawned();
            self.cooldown = self.interval;
        }

        for enemy in enemies.iter_mut().filter(|e| e.is_alive()) {
            enemy.steer_toward(avatar);
        }

        spawned
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::entity::EnemyKind;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn rng() -> Pcg32 {
        Pcg32::seed_from_u64(42)
    }

    fn run(
        director: &mut SpawnDirector,
        enemies: &mut Vec<Enemy>,
        wave: &mut WaveState,
        dt: f32,
    ) -> Option<EnemyVariant> {
        let avatar = Avatar::new();
        let mut ids = EntityIds::default();
        director.tick(dt, enemies, &avatar, wave, &mut ids, &mut rng())
    }

    #[test]
    fn test_spawns_ground_enemy_on_first_tick() {
        let mut director = SpawnDirector::new();
        let mut enemies = Vec::new();
        let mut wave = WaveState::new();

        let spawned = run(&mut director, &mut enemies, &mut wave, SIM_DT);
        assert_eq!(spawned, Some(EnemyVariant::Ground));
        assert_eq!(enemies.len(), 1);
        assert_eq!(wave.spawned_in_wave, 1);
        assert_eq!(director.cooldown, SPAWN_INTERVAL);
        assert_eq!(enemies[0].body.pos.x, GROUND_SPAWN_X);
        assert_eq!(enemies[0].body.pos.y, GROUND_Y);
    }

    #[test]
    fn test_cooldown_blocks_spawn() {
        let mut director = SpawnDirector::new();
        let mut enemies = Vec::new();
        let mut wave = WaveState::new();

        run(&mut director, &mut enemies, &mut wave, SIM_DT);
        assert!(run(&mut director, &mut enemies, &mut wave, 0.5).is_none());
        assert_eq!(enemies.len(), 1);
        assert!(run(&mut director, &mut enemies, &mut wave, 0.7).is_some());
        assert_eq!(enemies.len(), 2);
    }

    #[test]
    fn test_cap_blocks_spawn_at_stage_one() {
        let mut director = SpawnDirector::new();
        let mut enemies: Vec<Enemy> = (1..=3).map(Enemy::ground).collect();
        let mut wave = WaveState::new();
        wave.spawned_in_wave = 3;

        for _ in 0..10 {
            assert!(run(&mut director, &mut enemies, &mut wave, 5.0).is_none());
        }
        assert_eq!(enemies.len(), 3);
        assert_eq!(wave.spawned_in_wave, 3);
    }

    #[test]
    fn test_dead_enemies_and_boss_do_not_count_toward_cap() {
        let mut director = SpawnDirector::new();
        let mut enemies: Vec<Enemy> = (1..=3).map(Enemy::ground).collect();
        enemies[0].body.alive = false;
        enemies.push(Enemy::boss(10));
        let mut wave = WaveState::new();

        assert_eq!(active_wave_enemies(&enemies), 2);
        assert!(run(&mut director, &mut enemies, &mut wave, SIM_DT).is_some());
    }

    #[test]
    fn test_wave_allowance_blocks_spawn() {
        let mut director = SpawnDirector::new();
        let mut enemies = Vec::new();
        let mut wave = WaveState::new();
        wave.spawned_in_wave = 5;

        assert!(run(&mut director, &mut enemies, &mut wave, 5.0).is_none());
        assert!(enemies.is_empty());
    }

    #[test]
    fn test_no_spawns_while_boss_gate_open() {
        let mut director = SpawnDirector::new();
        let mut enemies = Vec::new();
        let mut wave = WaveState {
            stage: 3,
            spawned_in_wave: 0,
            killed_in_wave: 15,
            ..WaveState::new()
        };
        assert!(wave.should_spawn_boss());
        assert!(run(&mut director, &mut enemies, &mut wave, 5.0).is_none());
        assert!(enemies.is_empty());
        // Cooldown is left untouched too
        assert_eq!(director.cooldown, 0.0);
    }

    #[test]
    fn test_stage_one_never_spawns_flyers() {
        let mut director = SpawnDirector::new();
        let mut enemies = Vec::new();
        let mut wave = WaveState::new();
        let avatar = Avatar::new();
        let mut ids = EntityIds::default();
        let mut rng = rng();

        for _ in 0..5 {
            let spawned = director.tick(
                SPAWN_INTERVAL,
                &mut enemies,
                &avatar,
                &mut wave,
                &mut ids,
                &mut rng,
            );
            assert_eq!(spawned, Some(EnemyVariant::Ground));
            enemies.clear();
        }
        assert_eq!(wave.spawned_in_wave, 5);
    }

    #[test]
    fn test_later_stages_mix_in_flyers_within_lane_band() {
        let mut director = SpawnDirector::new();
        let avatar = Avatar::new();
        let mut ids = EntityIds::default();
        let mut rng = rng();
        let mut wave = WaveState {
            stage: 2,
            ..WaveState::new()
        };

        let mut flyers = 0;
        let mut grounders = 0;
        for _ in 0..200 {
            let mut enemies = Vec::new();
            wave.spawned_in_wave = 0;
            let spawned = director.tick(
                SPAWN_INTERVAL,
                &mut enemies,
                &avatar,
                &mut wave,
                &mut ids,
                &mut rng,
            );
            match spawned {
                Some(EnemyVariant::Flying) => {
                    flyers += 1;
                    let y = enemies[0].body.pos.y;
                    assert!((FLYING_LANE_MIN..=FLYING_LANE_MAX).contains(&y));
                    assert_eq!(enemies[0].body.pos.x, FLYING_SPAWN_X);
                }
                Some(EnemyVariant::Ground) => grounders += 1,
                other => panic!("unexpected spawn result {other:?}"),
            }
        }
        assert!(flyers > 40, "flyers = {flyers}");
        assert!(grounders > 40, "grounders = {grounders}");
    }

    #[test]
    fn test_ground_enemies_steered_flyers_not() {
        let mut director = SpawnDirector::new();
        director.cooldown = 10.0;
        let mut enemies = vec![Enemy::ground(1), Enemy::flying(2, 150.0)];
        let mut wave = WaveState::new();

        run(&mut director, &mut enemies, &mut wave, SIM_DT);
        assert!(matches!(enemies[0].kind, EnemyKind::Ground { vx } if vx < 0.0));
        assert!(matches!(enemies[1].kind, EnemyKind::Flying { t, .. } if t == 0.0));
    }

    proptest! {
        #[test]
        fn prop_never_exceeds_cap(stage in 0u32..5, alive in 0usize..8, dt in 0.0f32..3.0) {
            let mut director = SpawnDirector::new();
            let mut enemies: Vec<Enemy> = (0..alive as u32).map(Enemy::ground).collect();
            let mut wave = WaveState { stage, ..WaveState::new() };
            let cap = wave.concurrency_cap();

            run(&mut director, &mut enemies, &mut wave, dt);
            prop_assert!(active_wave_enemies(&enemies) <= cap.max(alive));
            if alive >= cap {
                prop_assert_eq!(enemies.len(), alive);
            }
        }
    }
}
