//! Enemies and the timed spawner

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::{Aabb, Playfield};
use super::pool::{Pool, Pooled};
use crate::tuning::Tuning;

/// Enemy types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnemyKind {
    #[default]
    Normal,
    Elite,
}

/// A descending enemy ship
#[derive(Debug, Clone, Default)]
pub struct Enemy {
    pub kind: EnemyKind,
    pub pos: Vec2,
    pub w: f32,
    pub h: f32,
    pub speed: f32,
    pub hp: u32,
    pub max_hp: u32,
    /// Points awarded on kill
    pub score: u64,
    pub active: bool,
}

impl Enemy {
    /// Reset this slot as a fresh enemy of `kind` at `pos`
    pub fn init(&mut self, kind: EnemyKind, pos: Vec2, tuning: &Tuning) {
        let stats = tuning.enemies.stats(kind);
        self.kind = kind;
        self.pos = pos;
        self.w = stats.width;
        self.h = stats.height;
        self.speed = stats.speed;
        self.hp = stats.hp;
        self.max_hp = stats.hp;
        self.score = stats.score;
        self.active = true;
    }

    /// Apply damage; returns true once hp is exhausted
    pub fn take_damage(&mut self, amount: u32) -> bool {
        self.hp = self.hp.saturating_sub(amount);
        self.hp == 0
    }
}

impl Pooled for Enemy {
    fn is_active(&self) -> bool {
        self.active
    }

    fn deactivate(&mut self) {
        self.active = false;
    }

    fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, self.w, self.h)
    }

    fn update(&mut self, dt: f32, field: &Playfield) {
        self.pos.y += self.speed * dt;
        if self.pos.y > field.height {
            self.active = false;
        }
    }
}

/// Enemy pool plus the level-scaled spawn timer
#[derive(Debug, Clone)]
pub struct EnemySpawner {
    pub pool: Pool<Enemy>,
    /// Seconds accumulated since the last spawn attempt
    pub spawn_timer: f32,
}

impl EnemySpawner {
    pub fn new(capacity: usize) -> Self {
        Self {
            pool: Pool::new(capacity),
            spawn_timer: 0.0,
        }
    }

    /// Accumulate time, maybe spawn, then advance every active enemy
    pub fn update(
        &mut self,
        dt: f32,
        level: u32,
        rng: &mut Pcg32,
        tuning: &Tuning,
        field: &Playfield,
    ) -> Option<EnemyKind> {
        self.spawn_timer += dt;
        let mut spawned = None;
        if self.spawn_timer >= tuning.spawn_interval(level) {
            // Reset, not subtract
            self.spawn_timer = 0.0;
            spawned = self.spawn(level, rng, tuning);
        }
        self.pool.update(dt, field);
        spawned
    }

    /// One spawn attempt at a random column; no-op when the pool is full
    pub fn spawn(&mut self, level: u32, rng: &mut Pcg32, tuning: &Tuning) -> Option<EnemyKind> {
        if self.pool.is_full() {
            return None;
        }
        let kind = if rng.random_bool(tuning.elite_chance(level)) {
            EnemyKind::Elite
        } else {
            EnemyKind::Normal
        };
        let stats = tuning.enemies.stats(kind);
        let x = rng.random::<f32>() * (tuning.width - stats.width).max(0.0);
        let pos = Vec2::new(x, -stats.height);
        self.pool
            .spawn(|enemy| enemy.init(kind, pos, tuning))
            .then(|| {
                log::debug!("Spawned {:?} enemy at x={:.1} (level {})", kind, x, level);
                kind
            })
    }

    /// Clear the field and restart the spawn timer
    pub fn reset(&mut self) {
        self.pool.clear();
        self.spawn_timer = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn setup() -> (Tuning, Playfield, Pcg32) {
        let tuning = Tuning::default();
        let field = Playfield::new(tuning.width, tuning.height);
        (tuning, field, Pcg32::seed_from_u64(7))
    }

    #[test]
    fn test_spawn_after_interval_and_timer_reset() {
        let (tuning, field, mut rng) = setup();
        let mut spawner = EnemySpawner::new(30);

        // Level 1 interval is 1.4s
        for _ in 0..27 {
            assert!(spawner.update(0.05, 1, &mut rng, &tuning, &field).is_none());
        }
        assert_eq!(spawner.pool.active_count(), 0);
        let mut spawned = None;
        for _ in 0..2 {
            spawned = spawned.or(spawner.update(0.05, 1, &mut rng, &tuning, &field));
        }
        assert!(spawned.is_some());
        assert_eq!(spawner.pool.active_count(), 1);
        assert!(spawner.spawn_timer < 0.1);
    }

    #[test]
    fn test_spawn_inside_playfield_width() {
        let (tuning, _field, mut rng) = setup();
        let mut spawner = EnemySpawner::new(200);
        for _ in 0..200 {
            spawner.spawn(20, &mut rng, &tuning);
        }
        for enemy in spawner.pool.iter_active() {
            assert!(enemy.pos.x >= 0.0);
            assert!(enemy.pos.x + enemy.w <= tuning.width);
            assert_eq!(enemy.pos.y, -enemy.h);
        }
    }

    #[test]
    fn test_spawn_respects_capacity() {
        let (tuning, _field, mut rng) = setup();
        let mut spawner = EnemySpawner::new(2);
        assert!(spawner.spawn(1, &mut rng, &tuning).is_some());
        assert!(spawner.spawn(1, &mut rng, &tuning).is_some());
        assert!(spawner.spawn(1, &mut rng, &tuning).is_none());
        assert_eq!(spawner.pool.active_count(), 2);
    }

    #[test]
    fn test_enemy_stats_from_table() {
        let tuning = Tuning::default();
        let mut enemy = Enemy::default();
        enemy.init(EnemyKind::Elite, Vec2::ZERO, &tuning);
        assert_eq!((enemy.hp, enemy.max_hp, enemy.score), (3, 3, 50));
        assert!(!enemy.take_damage(1));
        assert!(!enemy.take_damage(1));
        assert!(enemy.take_damage(1));
        assert_eq!(enemy.hp, 0);
    }

    #[test]
    fn test_enemy_exits_bottom() {
        let (tuning, field, _rng) = setup();
        let mut enemy = Enemy::default();
        enemy.init(EnemyKind::Normal, Vec2::new(10.0, 630.0), &tuning);
        enemy.update(0.05, &field);
        assert!(!enemy.is_active());
    }

    #[test]
    fn test_reset_clears_field() {
        let (tuning, _field, mut rng) = setup();
        let mut spawner = EnemySpawner::new(5);
        spawner.spawn(1, &mut rng, &tuning);
        spawner.spawn_timer = 0.7;
        spawner.reset();
        assert_eq!(spawner.pool.active_count(), 0);
        assert_eq!(spawner.spawn_timer, 0.0);
    }
}
