//! Data-driven game balance
//!
//! Every number the simulation reads comes from a `Tuning`. Defaults match
//! `crate::consts`; hosts can override any subset from JSON.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::consts::*;
use crate::sim::{BuffKind, EnemyKind};

/// Per-type enemy stats, looked up at spawn time
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnemyStats {
    pub width: f32,
    pub height: f32,
    /// Descent speed (px/s)
    pub speed: f32,
    pub hp: u32,
    pub score: u64,
}

/// Enemy type table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnemyTable {
    pub normal: EnemyStats,
    pub elite: EnemyStats,
}

impl Default for EnemyTable {
    fn default() -> Self {
        Self {
            normal: EnemyStats {
                width: 36.0,
                height: 36.0,
                speed: 120.0,
                hp: 1,
                score: 10,
            },
            elite: EnemyStats {
                width: 48.0,
                height: 48.0,
                speed: 80.0,
                hp: 3,
                score: 50,
            },
        }
    }
}

impl EnemyTable {
    pub fn stats(&self, kind: EnemyKind) -> &EnemyStats {
        match kind {
            EnemyKind::Normal => &self.normal,
            EnemyKind::Elite => &self.elite,
        }
    }
}

/// A linear curve in level, clamped at one end
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelCurve {
    pub base: f64,
    pub per_level: f64,
    /// Floor for falling curves, ceiling for rising ones
    pub limit: f64,
}

/// Buff durations in seconds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BuffDurations {
    pub rapid_fire: f32,
    pub speed_up: f32,
    pub shield: f32,
}

impl Default for BuffDurations {
    fn default() -> Self {
        Self {
            rapid_fire: 5.0,
            speed_up: 5.0,
            shield: 3.0,
        }
    }
}

impl BuffDurations {
    pub fn for_kind(&self, kind: BuffKind) -> f32 {
        match kind {
            BuffKind::RapidFire => self.rapid_fire,
            BuffKind::SpeedUp => self.speed_up,
            BuffKind::Shield => self.shield,
        }
    }
}

/// Complete balance table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Playfield ===
    pub width: f32,
    pub height: f32,
    pub level_score_target: u64,
    pub starting_lives: u32,
    pub max_frame_dt: f32,

    // === Pools ===
    pub bullet_capacity: usize,
    pub enemy_capacity: usize,
    pub pickup_capacity: usize,

    // === Player ===
    pub player_size: f32,
    pub player_speed: f32,
    pub fire_interval: f32,
    pub invincibility_secs: f32,
    pub blink_rate_hz: f32,

    // === Bullets ===
    pub bullet_width: f32,
    pub bullet_height: f32,
    pub bullet_speed: f32,
    pub bullet_damage: u32,
    pub rapid_fire_spread: f32,

    // === Enemies ===
    pub enemies: EnemyTable,
    /// Seconds between spawns (falls with level)
    pub spawn_interval: LevelCurve,
    /// Probability a spawn is elite (rises with level)
    pub elite_chance: LevelCurve,

    // === Power-ups ===
    pub pickup_size: f32,
    pub pickup_speed: f32,
    pub drop_chance: f64,
    pub buff_durations: BuffDurations,
    /// Fire interval multiplier while rapid fire is active
    pub rapid_fire_multiplier: f32,
    /// Speed multiplier while speed up is active
    pub speed_up_multiplier: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            width: PLAYFIELD_WIDTH,
            height: PLAYFIELD_HEIGHT,
            level_score_target: LEVEL_SCORE_TARGET,
            starting_lives: STARTING_LIVES,
            max_frame_dt: MAX_FRAME_DT,

            bullet_capacity: BULLET_POOL_SIZE,
            enemy_capacity: ENEMY_POOL_SIZE,
            pickup_capacity: PICKUP_POOL_SIZE,

            player_size: PLAYER_SIZE,
            player_speed: PLAYER_SPEED,
            fire_interval: PLAYER_FIRE_INTERVAL,
            invincibility_secs: INVINCIBILITY_SECS,
            blink_rate_hz: BLINK_RATE_HZ,

            bullet_width: BULLET_WIDTH,
            bullet_height: BULLET_HEIGHT,
            bullet_speed: BULLET_SPEED,
            bullet_damage: BULLET_DAMAGE,
            rapid_fire_spread: RAPID_FIRE_SPREAD,

            enemies: EnemyTable::default(),
            spawn_interval: LevelCurve {
                base: 1.5,
                per_level: -0.1,
                limit: 0.5,
            },
            elite_chance: LevelCurve {
                base: 0.05,
                per_level: 0.03,
                limit: 0.4,
            },

            pickup_size: PICKUP_SIZE,
            pickup_speed: PICKUP_SPEED,
            drop_chance: DROP_CHANCE,
            buff_durations: BuffDurations::default(),
            rapid_fire_multiplier: 0.4,
            speed_up_multiplier: 1.6,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) tuning override. Missing fields, nested
    /// ones included, keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let overrides: Value = serde_json::from_str(json)?;
        let mut merged = serde_json::to_value(Self::default())?;
        overlay(&mut merged, overrides);
        let tuning: Self = serde_json::from_value(merged)?;
        Ok(tuning.sanitized())
    }

    /// Pull probabilities into [0, 1] and the frame clamp to >= 0
    pub fn sanitized(mut self) -> Self {
        self.elite_chance.limit = self.elite_chance.limit.clamp(0.0, 1.0);
        self.drop_chance = self.drop_chance.clamp(0.0, 1.0);
        self.max_frame_dt = self.max_frame_dt.max(0.0);
        self
    }

    /// Seconds between enemy spawns at `level`
    pub fn spawn_interval(&self, level: u32) -> f32 {
        let curve = &self.spawn_interval;
        (curve.base + curve.per_level * level as f64).max(curve.limit) as f32
    }

    /// Probability that a spawn at `level` is elite
    pub fn elite_chance(&self, level: u32) -> f64 {
        let curve = &self.elite_chance;
        let ceiling = curve.limit.clamp(0.0, 1.0);
        (curve.base + curve.per_level * level as f64).clamp(0.0, ceiling)
    }

    /// Player start position (top-left corner)
    pub fn player_start(&self) -> glam::Vec2 {
        glam::Vec2::new(
            self.width / 2.0 - self.player_size / 2.0,
            self.height - self.player_size * 2.0,
        )
    }
}

/// Write `overrides` over `base`, recursing into objects
fn overlay(base: &mut Value, overrides: Value) {
    match (base, overrides) {
        (Value::Object(base), Value::Object(overrides)) => {
            for (key, value) in overrides {
                match base.get_mut(&key) {
                    Some(slot) => overlay(slot, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (base, overrides) => *base = overrides,
    }
}
