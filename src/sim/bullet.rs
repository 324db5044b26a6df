//! Player projectiles

use glam::Vec2;

use super::collision::{Aabb, Playfield};
use super::pool::{Pool, Pooled};
use crate::tuning::Tuning;

/// A player bullet travelling straight up
#[derive(Debug, Clone, Default)]
pub struct Bullet {
    pub pos: Vec2,
    pub w: f32,
    pub h: f32,
    pub speed: f32,
    pub damage: u32,
    pub active: bool,
}

impl Bullet {
    /// Place the bullet with its nose at `(center_x, top)`
    pub fn launch(&mut self, center_x: f32, top: f32, tuning: &Tuning) {
        self.w = tuning.bullet_width;
        self.h = tuning.bullet_height;
        self.pos = Vec2::new(center_x - self.w / 2.0, top);
        self.speed = tuning.bullet_speed;
        self.damage = tuning.bullet_damage;
        self.active = true;
    }
}

impl Pooled for Bullet {
    fn is_active(&self) -> bool {
        self.active
    }

    fn deactivate(&mut self) {
        self.active = false;
    }

    fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, self.w, self.h)
    }

    fn update(&mut self, dt: f32, _field: &Playfield) {
        self.pos.y -= self.speed * dt;
        if self.pos.y + self.h < 0.0 {
            self.active = false;
        }
    }
}

pub type BulletPool = Pool<Bullet>;
