//! Power-up pickups and timed player status effects

use std::collections::BTreeMap;

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::{Aabb, Playfield};
use super::pool::{Pool, Pooled};
use crate::tuning::Tuning;

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuffKind {
    #[default]
    RapidFire,
    SpeedUp,
    Shield,
}

impl BuffKind {
    pub const ALL: [BuffKind; 3] = [BuffKind::RapidFire, BuffKind::SpeedUp, BuffKind::Shield];

    pub fn as_str(&self) -> &'static str {
        match self {
            BuffKind::RapidFire => "rapid_fire",
            BuffKind::SpeedUp => "speed_up",
            BuffKind::Shield => "shield",
        }
    }
}

/// A falling power-up
#[derive(Debug, Clone, Default)]
pub struct Pickup {
    pub kind: BuffKind,
    pub pos: Vec2,
    pub w: f32,
    pub h: f32,
    pub speed: f32,
    /// Seconds alive, drives the pulse animation
    pub age: f32,
    pub active: bool,
}

impl Pickup {
    /// Place the pickup horizontally centered on `at.x`, top at `at.y`
    pub fn init(&mut self, kind: BuffKind, at: Vec2, tuning: &Tuning) {
        self.kind = kind;
        self.w = tuning.pickup_size;
        self.h = tuning.pickup_size;
        self.pos = Vec2::new(at.x - self.w / 2.0, at.y);
        self.speed = tuning.pickup_speed;
        self.age = 0.0;
        self.active = true;
    }
}

impl Pooled for Pickup {
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
        self.age += dt;
        if self.pos.y > field.height {
            self.active = false;
        }
    }
}

/// Pickup pool with drop and collection rules
#[derive(Debug, Clone)]
pub struct PickupField {
    pub pool: Pool<Pickup>,
}

impl PickupField {
    pub fn new(capacity: usize) -> Self {
        Self {
            pool: Pool::new(capacity),
        }
    }

    /// Roll for a drop at `at`; returns the kind actually spawned
    pub fn try_drop(&mut self, at: Vec2, rng: &mut Pcg32, tuning: &Tuning) -> Option<BuffKind> {
        if !rng.random_bool(tuning.drop_chance.clamp(0.0, 1.0)) {
            return None;
        }
        let kind = BuffKind::ALL[rng.random_range(0..BuffKind::ALL.len())];
        if self.pool.spawn(|p| p.init(kind, at, tuning)) {
            log::debug!("Dropped {} at ({:.0}, {:.0})", kind.as_str(), at.x, at.y);
            Some(kind)
        } else {
            None
        }
    }

    pub fn update(&mut self, dt: f32, field: &Playfield) {
        self.pool.update(dt, field);
    }

    /// Consume the first pickup overlapping `player`
    pub fn collect(&mut self, player: &Aabb) -> Option<BuffKind> {
        let pickup = self
            .pool
            .iter_active_mut()
            .find(|p| p.aabb().overlaps(player))?;
        pickup.deactivate();
        Some(pickup.kind)
    }
}

/// Remaining seconds per active buff.
///
/// Derived player stats are computed from this map on demand, never cached.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatusEffects {
    remaining: BTreeMap<BuffKind, f32>,
}

impl StatusEffects {
    /// Start or refresh a buff to its full duration (never stacks)
    pub fn apply(&mut self, kind: BuffKind, duration: f32) {
        if duration > 0.0 {
            self.remaining.insert(kind, duration);
        }
    }

    /// Count down every timer and drop the expired ones
    pub fn tick(&mut self, dt: f32) {
        for secs in self.remaining.values_mut() {
            *secs -= dt;
        }
        self.remaining.retain(|_, secs| *secs > 0.0);
    }

    pub fn is_active(&self, kind: BuffKind) -> bool {
        self.remaining.contains_key(&kind)
    }

    pub fn remaining(&self, kind: BuffKind) -> Option<f32> {
        self.remaining.get(&kind).copied()
    }

    /// Active buffs in stable order
    pub fn iter(&self) -> impl Iterator<Item = (BuffKind, f32)> + '_ {
        self.remaining.iter().map(|(k, v)| (*k, *v))
    }

    pub fn is_empty(&self) -> bool {
        self.remaining.is_empty()
    }

    pub fn clear(&mut self) {
        self.remaining.clear();
    }

    // === Derived stats ===

    pub fn speed_multiplier(&self, tuning: &Tuning) -> f32 {
        if self.is_active(BuffKind::SpeedUp) {
            tuning.speed_up_multiplier
        } else {
            1.0
        }
    }

    pub fn fire_interval_multiplier(&self, tuning: &Tuning) -> f32 {
        if self.is_active(BuffKind::RapidFire) {
            tuning.rapid_fire_multiplier
        } else {
            1.0
        }
    }

    pub fn shielded(&self) -> bool {
        self.is_active(BuffKind::Shield)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_refresh_does_not_stack() {
        let mut effects = StatusEffects::default();
        effects.apply(BuffKind::Shield, 3.0);
        effects.tick(1.0);
        assert!((effects.remaining(BuffKind::Shield).unwrap() - 2.0).abs() < 1e-6);
        effects.apply(BuffKind::Shield, 3.0);
        assert_eq!(effects.remaining(BuffKind::Shield), Some(3.0));
    }

    #[test]
    fn test_expired_entries_pruned() {
        let mut effects = StatusEffects::default();
        effects.apply(BuffKind::SpeedUp, 0.1);
        effects.apply(BuffKind::RapidFire, 5.0);
        effects.tick(0.1);
        assert!(!effects.is_active(BuffKind::SpeedUp));
        assert!(effects.is_active(BuffKind::RapidFire));
        let kinds: Vec<_> = effects.iter().map(|(k, _)| k).collect();
        assert_eq!(kinds, vec![BuffKind::RapidFire]);
    }

    #[test]
    fn test_derived_stats_follow_map() {
        let tuning = Tuning::default();
        let mut effects = StatusEffects::default();
        assert_eq!(effects.speed_multiplier(&tuning), 1.0);
        assert!(!effects.shielded());

        effects.apply(BuffKind::SpeedUp, 5.0);
        effects.apply(BuffKind::RapidFire, 5.0);
        effects.apply(BuffKind::Shield, 3.0);
        assert_eq!(effects.speed_multiplier(&tuning), 1.6);
        assert_eq!(effects.fire_interval_multiplier(&tuning), 0.4);
        assert!(effects.shielded());

        effects.tick(3.0);
        assert!(!effects.shielded());
        assert_eq!(effects.speed_multiplier(&tuning), 1.6);
    }

    #[test]
    fn test_collect_first_overlap() {
        let tuning = Tuning::default();
        let mut field = PickupField::new(3);
        field
            .pool
            .spawn(|p| p.init(BuffKind::Shield, Vec2::new(100.0, 100.0), &tuning));
        field
            .pool
            .spawn(|p| p.init(BuffKind::SpeedUp, Vec2::new(105.0, 100.0), &tuning));

        let player = Aabb::new(Vec2::new(90.0, 90.0), 40.0, 40.0);
        assert_eq!(field.collect(&player), Some(BuffKind::Shield));
        assert_eq!(field.pool.active_count(), 1);
        assert_eq!(field.collect(&player), Some(BuffKind::SpeedUp));
        assert_eq!(field.collect(&player), None);
    }

    #[test]
    fn test_drop_with_certain_chance_respects_capacity() {
        let tuning = Tuning {
            drop_chance: 1.0,
            ..Tuning::default()
        };
        let mut rng = Pcg32::seed_from_u64(3);
        let mut field = PickupField::new(1);
        assert!(field.try_drop(Vec2::new(50.0, 50.0), &mut rng, &tuning).is_some());
        assert!(field.try_drop(Vec2::new(60.0, 50.0), &mut rng, &tuning).is_none());
        assert_eq!(field.pool.active_count(), 1);
    }

    #[test]
    fn test_drop_never_with_zero_chance() {
        let tuning = Tuning {
            drop_chance: 0.0,
            ..Tuning::default()
        };
        let mut rng = Pcg32::seed_from_u64(3);
        let mut field = PickupField::new(4);
        for _ in 0..50 {
            assert!(field.try_drop(Vec2::ZERO, &mut rng, &tuning).is_none());
        }
    }

    #[test]
    fn test_pickup_falls_off_screen() {
        let tuning = Tuning::default();
        let playfield = Playfield::new(tuning.width, tuning.height);
        let mut field = PickupField::new(1);
        field
            .pool
            .spawn(|p| p.init(BuffKind::RapidFire, Vec2::new(50.0, 635.0), &tuning));
        field.update(0.05, &playfield);
        assert_eq!(field.pool.active_count(), 0);
    }
}
