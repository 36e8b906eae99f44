//! Game state and the run-state transition table
//!
//! `GameState` owns everything that changes during a run: the avatar, the
//! enemy and projectile containers, wave counters, the spawn director and the
//! seeded RNG.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::entity::{Avatar, Enemy, EnemyVariant, Entity, EntityIds, Projectile};
use super::spawn::SpawnDirector;
use super::wave::WaveState;

/// Top-level run state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RunState {
    #[default]
    Playing,
    Paused,
    /// Boss defeated (terminal)
    Win,
    /// Avatar died (terminal)
    GameOver,
}

/// Inputs to the run-state transition table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunSignal {
    TogglePause,
    AvatarDown,
    BossDefeated,
}

impl RunState {
    /// Transition table. Terminal states absorb every signal.
    pub fn next(self, signal: RunSignal) -> RunState {
        use RunSignal::*;
        use RunState::*;
        match (self, signal) {
            (Playing, TogglePause) => Paused,
            (Paused, TogglePause) => Playing,
            (Playing, AvatarDown) => GameOver,
            (Playing, BossDefeated) => Win,
            (state, _) => state,
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, RunState::Win | RunState::GameOver)
    }
}

/// Things that happened during a tick, for presentation layers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    EnemySpawned { variant: EnemyVariant },
    EnemyKilled { variant: EnemyVariant },
    StageAdvanced { stage: u32 },
    BossSpawned,
    AvatarHit { damage: i32 },
    /// Contact knockback (frontends shake the camera on this)
    AvatarKnockedBack,
    GameOver,
    Victory,
}

/// Read-only numbers the HUD draws each frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HudSnapshot {
    pub stage: u32,
    pub total_kills: u32,
    pub avatar_hp: i32,
    /// `None` while no boss is alive
    pub boss_hp: Option<i32>,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub run_state: RunState,
    pub wave: WaveState,
    pub avatar: Avatar,
    /// Live enemies in spawn order
    pub enemies: Vec<Enemy>,
    /// Live projectiles from both sides, in creation order
    pub projectiles: Vec<Projectile>,
    pub spawner: SpawnDirector,
    pub ids: EntityIds,
    /// ID of the boss once it has been created
    pub boss_id: Option<u32>,
    /// Stage whose music was last started
    pub stage_track: Option<u32>,
    /// Boss music suppresses stage music changes
    pub boss_music_on: bool,
    /// Simulated ticks while Playing
    pub time_ticks: u64,
    /// Events from the most recent tick (cleared at the start of each tick)
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game state with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            run_state: RunState::Playing,
            wave: WaveState::new(),
            avatar: Avatar::new(),
            enemies: Vec::new(),
            projectiles: Vec::new(),
            spawner: SpawnDirector::new(),
            ids: EntityIds::default(),
            boss_id: None,
            stage_track: None,
            boss_music_on: false,
            time_ticks: 0,
            events: Vec::new(),
        }
    }

    /// Feed a signal through the transition table.
    ///
    /// Returns the new state only if the state actually changed, so entry
    /// effects keyed on the return value run exactly once.
    pub fn apply_signal(&mut self, signal: RunSignal) -> Option<RunState> {
        let next = self.run_state.next(signal);
        if next == self.run_state {
            return None;
        }
        log::info!("Run state {:?} -> {:?}", self.run_state, next);
        self.run_state = next;
        Some(next)
    }

    pub fn boss(&self) -> Option<&Enemy> {
        let id = self.boss_id?;
        self.enemies.iter().find(|e| e.id == id)
    }

    /// True once a boss was created and is no longer alive (or was removed)
    pub fn boss_defeated(&self) -> bool {
        self.boss_id.is_some() && !self.boss().is_some_and(|b| b.is_alive())
    }

    pub fn hud_snapshot(&self) -> HudSnapshot {
        HudSnapshot {
            stage: self.wave.effective_stage(),
            total_kills: self.wave.total_kills,
            avatar_hp: self.avatar.hp(),
            boss_hp: self.boss().filter(|b| b.is_alive()).map(|b| b.hp()),
        }
    }
}
