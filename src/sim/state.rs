//! Game state and core simulation types
//!
//! Everything the resolver mutates during a run lives in `GameState`.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::bullet::BulletPool;
use super::buff::{BuffKind, PickupField};
use super::collision::Playfield;
use super::enemy::{EnemyKind, EnemySpawner};
use super::player::Player;
use crate::persistence::ProgressSnapshot;
use crate::tuning::Tuning;

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Level target reached, waiting for the player to continue
    LevelComplete,
    /// Out of lives; only a fresh run leaves this state
    GameOver,
}

/// Things that happened during a tick, drained by the host each frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// Player fired a volley
    Shot { bullets: u32 },
    /// Enemy took damage but survived
    EnemyHit { kind: EnemyKind, hp: u32 },
    EnemyDestroyed { kind: EnemyKind, at: Vec2, points: u64 },
    BuffDropped { kind: BuffKind, at: Vec2 },
    BuffCollected { kind: BuffKind },
    PlayerHit { lives_left: u32 },
    LevelComplete { level: u32 },
    GameOver { score: u64, high_score: u64 },
}

/// Run score counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scoreboard {
    pub score: u64,
    /// Score earned within the current level
    pub level_score: u64,
    /// Best score seen, never decreases
    pub high_score: u64,
}

impl Scoreboard {
    /// Credit a kill to the run and level totals
    pub fn credit(&mut self, points: u64) {
        self.score += points;
        self.level_score += points;
        self.high_score = self.high_score.max(self.score);
    }
}

/// Complete run state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub tuning: Tuning,
    pub field: Playfield,
    pub phase: GamePhase,
    pub scores: Scoreboard,
    /// Current level (1-based)
    pub level: u32,
    pub lives: u32,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub player: Player,
    pub bullets: BulletPool,
    pub enemies: EnemySpawner,
    pub pickups: PickupField,
    pub(super) events: Vec<GameEvent>,
}

impl GameState {
    /// Start a fresh run
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            field: Playfield::new(tuning.width, tuning.height),
            phase: GamePhase::Playing,
            scores: Scoreboard::default(),
            level: 1,
            lives: tuning.starting_lives,
            time_ticks: 0,
            player: Player::new(&tuning),
            bullets: BulletPool::new(tuning.bullet_capacity),
            enemies: EnemySpawner::new(tuning.enemy_capacity),
            pickups: PickupField::new(tuning.pickup_capacity),
            events: Vec::new(),
            tuning,
        }
    }

    /// Start a run from a loaded snapshot.
    ///
    /// The high score always carries over. Progress carries over only when the
    /// snapshot holds it; a snapshot taken at level completion resumes at the
    /// start of the following level.
    pub fn resume(seed: u64, tuning: Tuning, snapshot: &ProgressSnapshot) -> Self {
        let mut state = Self::new(seed, tuning);
        state.scores.high_score = snapshot.high_score;

        if let Some(progress) = snapshot.progress() {
            state.scores.score = progress.score;
            state.scores.level_score = progress.level_score;
            state.scores.high_score = state.scores.high_score.max(progress.score);
            state.lives = progress.lives;
            state.level = progress.level;
            if state.scores.level_score >= state.tuning.level_score_target {
                state.level += 1;
                state.scores.level_score = 0;
            }
            log::info!(
                "Resumed run at level {} (score {}, lives {})",
                state.level,
                state.scores.score,
                state.lives
            );
        }
        state
    }

    /// Take all events recorded since the last drain
    pub fn drain_events(&mut self) -> std::vec::Drain<'_, GameEvent> {
        self.events.drain(..)
    }

    pub fn pending_events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Full progress snapshot (written on level completion)
    pub fn progress_snapshot(&self, timestamp: u64) -> ProgressSnapshot {
        ProgressSnapshot::full(
            self.scores.score,
            self.lives,
            self.level,
            self.scores.level_score,
            self.scores.high_score,
            timestamp,
        )
    }
}
