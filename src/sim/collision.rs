//! Collision detection and damage resolution
//!
//! Plain pairwise AABB scans. Live counts are in the tens, so there is no
//! spatial index; iteration follows container (insertion) order, which makes
//! tie-breaks deterministic.

use super::entity::{Avatar, Enemy, Entity, Projectile, Side};
use super::wave::WaveState;
use crate::audio::{AudioManager, SoundEffect};
use crate::consts::HIT_VOLUME;

/// Outcome of resolving player bullets against enemies
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HitReport {
    /// Projectiles that connected with an enemy
    pub hits: u32,
    /// Ground/flying enemies killed (reported to the wave)
    pub kills: u32,
    /// Hits absorbed by the boss
    pub boss_hits: u32,
}

/// Player bullets vs. enemies.
///
/// Each alive player projectile damages at most the first alive enemy it
/// overlaps and is consumed. Ground/flying deaths are reported through
/// [`WaveState::on_enemy_killed`]; boss deaths are not.
pub fn player_projectiles_vs_enemies(
    projectiles: &mut [Projectile],
    enemies: &mut [Enemy],
    wave: &mut WaveState,
    audio: &mut AudioManager,
) -> HitReport {
    let mut report = HitReport::default();

    for bullet in projectiles
        .iter_mut()
        .filter(|p| p.alive && p.side == Side::Player)
    {
        let bullet_box = bullet.bounds();

        let Some(enemy) = enemies
            .iter_mut()
            .find(|e| e.is_alive() && e.bounding_box().overlaps(&bullet_box))
        else {
            continue;
        };

        let died = enemy.apply_damage(bullet.damage);
        bullet.alive = false;
        report.hits += 1;

        // Best-effort: the manager swallows backend failures
        audio.play_one_shot(SoundEffect::Hit, HIT_VOLUME);

        if enemy.is_boss() {
            report.boss_hits += 1;
        } else if died {
            wave.on_enemy_killed();
            report.kills += 1;
            log::debug!(
                "Killed {:?} #{} ({} / {} this wave)",
                enemy.variant(),
                enemy.id,
                wave.killed_in_wave,
                wave.wave_size()
            );
        }
    }

    report
}

/// Enemy bullets vs. the avatar. Returns the total damage dealt.
///
/// Non-positive bullet damage counts as 1. Hit points clamp at 0 and the
/// avatar dies when they get there.
pub fn enemy_projectiles_vs_avatar(projectiles: &mut [Projectile], avatar: &mut Avatar) -> i32 {
    if !avatar.is_alive() {
        return 0;
    }
    let avatar_box = avatar.bounding_box();
    let mut dealt = 0;

    for bullet in projectiles
        .iter_mut()
        .filter(|p| p.alive && p.side == Side::Enemy)
    {
        if !bullet.bounds().overlaps(&avatar_box) {
            continue;
        }
        bullet.alive = false;

        let damage = if bullet.damage > 0 { bullet.damage } else { 1 };
        let before = avatar.hp();
        avatar.apply_damage(damage);
        dealt += before - avatar.hp();
    }

    dealt
}

/// True if any alive enemy touches the avatar. Mutates nothing.
pub fn enemies_touch_avatar(enemies: &[Enemy], avatar: &Avatar) -> bool {
    let avatar_box = avatar.bounding_box();
    enemies
        .iter()
        .any(|e| e.is_alive() && e.bounding_box().overlaps(&avatar_box))
}
