//! Wave and stage progression
//!
//! Tracks how many enemies were spawned and killed in the current wave,
//! advances through the three stages, and opens the boss gate once the final
//! wave is cleared.

use serde::{Deserialize, Serialize};

/// Highest stage; clearing its wave releases the boss
pub const FINAL_STAGE: u32 = 3;

/// Number of enemies in a stage's wave (unknown stages use stage 1)
pub fn wave_size(stage: u32) -> u32 {
    match stage {
        2 => 10,
        3 => 15,
        _ => 5,
    }
}

/// Maximum concurrently alive ground + flying enemies for a stage
pub fn concurrency_cap(stage: u32) -> usize {
    match stage {
        2 => 4,
        3 => 5,
        _ => 3,
    }
}

/// Per-stage counters driving spawning and progression
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaveState {
    /// Current stage (1-based)
    pub stage: u32,
    /// Enemies spawned in the current wave
    pub spawned_in_wave: u32,
    /// Ground/flying enemies killed in the current wave
    pub killed_in_wave: u32,
    /// Kills across all stages (boss excluded)
    pub total_kills: u32,
    /// Set once the boss has been created
    pub boss_spawned: bool,
}

impl Default for WaveState {
    fn default() -> Self {
        Self::new()
    }
}

impl WaveState {
    pub fn new() -> Self {
        Self {
            stage: 1,
            spawned_in_wave: 0,
            killed_in_wave: 0,
            total_kills: 0,
            boss_spawned: false,
        }
    }

    /// Stage used for sizing and difficulty; out-of-range values act as stage 1
    pub fn effective_stage(&self) -> u32 {
        if (1..=FINAL_STAGE).contains(&self.stage) {
            self.stage
        } else {
            1
        }
    }

    pub fn wave_size(&self) -> u32 {
        wave_size(self.effective_stage())
    }

    pub fn concurrency_cap(&self) -> usize {
        concurrency_cap(self.effective_stage())
    }

    pub fn on_enemy_spawned(&mut self) {
        self.spawned_in_wave += 1;
    }

    /// Record a ground/flying kill. The boss is never reported here.
    pub fn on_enemy_killed(&mut self) {
        self.killed_in_wave += 1;
        self.total_kills += 1;
    }

    /// A flyer left the playfield alive; give its slot back to the wave
    pub fn on_enemy_escaped(&mut self) {
        self.spawned_in_wave = self.spawned_in_wave.saturating_sub(1);
    }

    pub fn can_spawn_more(&self) -> bool {
        self.spawned_in_wave < self.wave_size()
    }

    pub fn is_wave_cleared(&self) -> bool {
        self.killed_in_wave >= self.wave_size()
    }

    /// Move to the next stage if the wave is cleared and this is not the
    /// final stage. Returns true when the stage changed.
    pub fn advance_if_cleared(&mut self) -> bool {
        if self.is_wave_cleared() && self.stage < FINAL_STAGE {
            self.stage = self.effective_stage() + 1;
            self.reset_wave();
            return true;
        }
        false
    }

    /// True from the moment the final wave is cleared until the boss is marked
    pub fn should_spawn_boss(&self) -> bool {
        self.stage == FINAL_STAGE && self.is_wave_cleared() && !self.boss_spawned
    }

    pub fn mark_boss_spawned(&mut self) {
        self.boss_spawned = true;
    }

    fn reset_wave(&mut self) {
        self.spawned_in_wave = 0;
        self.killed_in_wave = 0;
    }
}
