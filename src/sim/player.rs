//! The player ship

use glam::Vec2;

use super::bullet::BulletPool;
use super::buff::{BuffKind, StatusEffects};
use super::collision::{Aabb, Playfield};
use crate::input::TickInput;
use crate::tuning::Tuning;

/// Player ship state
#[derive(Debug, Clone)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    pub w: f32,
    pub h: f32,
    pub base_speed: f32,
    /// Seconds between shots without buffs
    pub base_fire_interval: f32,
    pub effects: StatusEffects,
    /// Seconds until the next shot is allowed
    pub fire_cooldown: f32,
    /// Post-hit damage immunity remaining (seconds)
    pub invincible: f32,
}

impl Player {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: tuning.player_start(),
            w: tuning.player_size,
            h: tuning.player_size,
            base_speed: tuning.player_speed,
            base_fire_interval: tuning.fire_interval,
            effects: StatusEffects::default(),
            fire_cooldown: 0.0,
            invincible: 0.0,
        }
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, self.w, self.h)
    }

    /// Movement speed after buffs
    pub fn effective_speed(&self, tuning: &Tuning) -> f32 {
        self.base_speed * self.effects.speed_multiplier(tuning)
    }

    /// Fire interval after buffs
    pub fn effective_fire_interval(&self, tuning: &Tuning) -> f32 {
        self.base_fire_interval * self.effects.fire_interval_multiplier(tuning)
    }

    pub fn is_shielded(&self) -> bool {
        self.effects.shielded()
    }

    pub fn is_invincible(&self) -> bool {
        self.invincible > 0.0
    }

    /// Refresh a buff to its full configured duration
    pub fn apply_buff(&mut self, kind: BuffKind, tuning: &Tuning) {
        self.effects.apply(kind, tuning.buff_durations.for_kind(kind));
    }

    /// Advance one tick. Returns the number of bullets actually spawned.
    pub fn update(
        &mut self,
        dt: f32,
        input: &TickInput,
        bullets: &mut BulletPool,
        tuning: &Tuning,
        field: &Playfield,
    ) -> u32 {
        self.effects.tick(dt);

        let dir = input.direction();
        if dir != Vec2::ZERO {
            let moved = self.pos + dir * self.effective_speed(tuning) * dt;
            self.pos = field.clamp_box(moved, self.w, self.h);
        }

        self.fire_cooldown -= dt;
        let mut fired = 0;
        if input.fire && self.fire_cooldown <= 0.0 {
            fired = self.fire(bullets, tuning);
            self.fire_cooldown = self.effective_fire_interval(tuning);
        }

        if self.invincible > 0.0 {
            self.invincible = (self.invincible - dt).max(0.0);
        }

        fired
    }

    /// Spawn one volley from the nose; rapid fire adds two side bullets
    fn fire(&self, bullets: &mut BulletPool, tuning: &Tuning) -> u32 {
        let nose_x = self.pos.x + self.w / 2.0;
        let top = self.pos.y;
        let mut fired = u32::from(bullets.spawn(|b| b.launch(nose_x, top, tuning)));

        if self.effects.is_active(BuffKind::RapidFire) {
            let spread = tuning.rapid_fire_spread;
            for x in [nose_x - spread, nose_x + spread] {
                fired += u32::from(bullets.spawn(|b| b.launch(x, top, tuning)));
            }
        }
        fired
    }

    /// Handle an enemy collision. Shield absorbs it entirely; otherwise
    /// invincibility is raised to at least the configured window.
    pub fn on_hit(&mut self, tuning: &Tuning) {
        if self.is_shielded() {
            return;
        }
        self.invincible = self.invincible.max(tuning.invincibility_secs);
    }

    /// Whether the ship should be drawn this frame (blinks while invincible)
    pub fn is_visible(&self, tuning: &Tuning) -> bool {
        if self.is_shielded() || !self.is_invincible() {
            return true;
        }
        let phase = (self.invincible * tuning.blink_rate_hz * 2.0).floor() as i64;
        phase % 2 != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (Tuning, Playfield, BulletPool, Player) {
        let tuning = Tuning::default();
        let field = Playfield::new(tuning.width, tuning.height);
        let bullets = BulletPool::new(tuning.bullet_capacity);
        let player = Player::new(&tuning);
        (tuning, field, bullets, player)
    }

    #[test]
    fn test_moves_and_clamps() {
        let (tuning, field, mut bullets, mut player) = setup();
        let left = TickInput {
            left: true,
            ..Default::default()
        };
        player.update(0.1, &left, &mut bullets, &tuning, &field);
        assert!((player.pos.x - 190.0).abs() < 1e-3);

        for _ in 0..100 {
            player.update(0.05, &left, &mut bullets, &tuning, &field);
        }
        assert_eq!(player.pos.x, 0.0);

        let down = TickInput {
            down: true,
            ..Default::default()
        };
        for _ in 0..100 {
            player.update(0.05, &down, &mut bullets, &tuning, &field);
        }
        assert_eq!(player.pos.y, tuning.height - player.h);
    }

    #[test]
    fn test_speed_up_multiplies_speed() {
        let (tuning, field, mut bullets, mut player) = setup();
        player.apply_buff(BuffKind::SpeedUp, &tuning);
        let right = TickInput {
            right: true,
            ..Default::default()
        };
        player.update(0.05, &right, &mut bullets, &tuning, &field);
        assert!((player.pos.x - (220.0 + 300.0 * 1.6 * 0.05)).abs() < 1e-3);
    }

    #[test]
    fn test_fire_rate_gate() {
        let (tuning, field, mut bullets, mut player) = setup();
        let fire = TickInput {
            fire: true,
            ..Default::default()
        };
        assert_eq!(player.update(0.05, &fire, &mut bullets, &tuning, &field), 1);
        assert_eq!(player.update(0.1, &fire, &mut bullets, &tuning, &field), 0);
        assert_eq!(player.update(0.1, &fire, &mut bullets, &tuning, &field), 1);
        assert_eq!(bullets.active_count(), 2);
    }

    #[test]
    fn test_rapid_fire_triple_shot_and_interval() {
        let (tuning, field, mut bullets, mut player) = setup();
        player.apply_buff(BuffKind::RapidFire, &tuning);
        let fire = TickInput {
            fire: true,
            ..Default::default()
        };
        assert_eq!(player.update(0.01, &fire, &mut bullets, &tuning, &field), 3);
        assert!((player.fire_cooldown - 0.06).abs() < 1e-6);

        let xs: Vec<f32> = bullets.iter_active().map(|b| b.pos.x + b.w / 2.0).collect();
        assert_eq!(xs, vec![240.0, 228.0, 252.0]);
    }

    #[test]
    fn test_on_hit_is_lower_bound() {
        let (tuning, _field, _bullets, mut player) = setup();
        player.on_hit(&tuning);
        assert_eq!(player.invincible, 1.0);
        player.invincible = 2.5;
        player.on_hit(&tuning);
        assert_eq!(player.invincible, 2.5);
        player.invincible = 0.4;
        player.on_hit(&tuning);
        assert_eq!(player.invincible, 1.0);
    }

    #[test]
    fn test_shield_absorbs_hit() {
        let (tuning, _field, _bullets, mut player) = setup();
        player.apply_buff(BuffKind::Shield, &tuning);
        player.on_hit(&tuning);
        assert_eq!(player.invincible, 0.0);
    }

    #[test]
    fn test_invincibility_counts_down() {
        let (tuning, field, mut bullets, mut player) = setup();
        player.on_hit(&tuning);
        let idle = TickInput::default();
        for _ in 0..19 {
            player.update(0.05, &idle, &mut bullets, &tuning, &field);
        }
        assert!(player.is_invincible());
        player.update(0.05, &idle, &mut bullets, &tuning, &field);
        player.update(0.05, &idle, &mut bullets, &tuning, &field);
        assert!(!player.is_invincible());
    }

    #[test]
    fn test_blink_and_shield_visibility() {
        let (tuning, _field, _bullets, mut player) = setup();
        assert!(player.is_visible(&tuning));
        player.invincible = 0.95; // floor(9.5) = 9, odd: visible
        assert!(player.is_visible(&tuning));
        player.invincible = 0.85; // floor(8.5) = 8, even: hidden
        assert!(!player.is_visible(&tuning));
        player.apply_buff(BuffKind::Shield, &tuning);
        assert!(player.is_visible(&tuning));
    }
}
