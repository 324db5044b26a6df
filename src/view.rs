//! Read-only render snapshots
//!
//! Everything a drawing collaborator needs for one frame, copied out of the
//! simulation. Nothing here feeds back into gameplay.

use serde::Serialize;

use crate::sim::{Aabb, BuffKind, EnemyKind, GamePhase, GameState};

#[derive(Debug, Clone, Serialize)]
pub struct PlayerView {
    pub bounds: Aabb,
    /// False on the "off" half of the invincibility blink
    pub visible: bool,
    pub shielded: bool,
    pub invincible: bool,
    /// Active buffs with seconds remaining
    pub buffs: Vec<(BuffKind, f32)>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EnemyView {
    pub kind: EnemyKind,
    pub bounds: Aabb,
    pub hp: u32,
    pub max_hp: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct PickupView {
    pub kind: BuffKind,
    pub bounds: Aabb,
    /// Seconds alive (pulse animation)
    pub age: f32,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Hud {
    pub score: u64,
    pub high_score: u64,
    pub lives: u32,
    pub level: u32,
    pub level_score: u64,
    pub level_target: u64,
}

/// One frame's worth of drawable state
#[derive(Debug, Clone, Serialize)]
pub struct RenderSnapshot {
    pub phase: GamePhase,
    pub player: PlayerView,
    pub enemies: Vec<EnemyView>,
    pub bullets: Vec<Aabb>,
    pub pickups: Vec<PickupView>,
    pub hud: Hud,
}

impl RenderSnapshot {
    pub fn capture(state: &GameState) -> Self {
        use crate::sim::Pooled;

        let player = &state.player;
        Self {
            phase: state.phase,
            player: PlayerView {
                bounds: player.aabb(),
                visible: player.is_visible(&state.tuning),
                shielded: player.is_shielded(),
                invincible: player.is_invincible(),
                buffs: player.effects.iter().collect(),
            },
            enemies: state
                .enemies
                .pool
                .iter_active()
                .map(|e| EnemyView {
                    kind: e.kind,
                    bounds: e.aabb(),
                    hp: e.hp,
                    max_hp: e.max_hp,
                })
                .collect(),
            bullets: state.bullets.iter_active().map(|b| b.aabb()).collect(),
            pickups: state
                .pickups
                .pool
                .iter_active()
                .map(|p| PickupView {
                    kind: p.kind,
                    bounds: p.aabb(),
                    age: p.age,
                })
                .collect(),
            hud: Hud {
                score: state.scores.score,
                high_score: state.scores.high_score,
                lives: state.lives,
                level: state.level,
                level_score: state.scores.level_score,
                level_target: state.tuning.level_score_target,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::tuning::Tuning;

    #[test]
    fn test_capture_lists_only_active() {
        let mut state = GameState::new(5, Tuning::default());
        let tuning = state.tuning.clone();
        state
            .enemies
            .pool
            .spawn(|e| e.init(EnemyKind::Elite, Vec2::new(10.0, 10.0), &tuning));
        state.bullets.spawn(|b| b.launch(50.0, 300.0, &tuning));
        state.bullets.spawn(|b| b.launch(60.0, 300.0, &tuning));
        state.bullets.iter_active_mut().next().unwrap().active = false;

        let snap = RenderSnapshot::capture(&state);
        assert_eq!(snap.enemies.len(), 1);
        assert_eq!(snap.enemies[0].max_hp, 3);
        assert_eq!(snap.bullets.len(), 1);
        assert!(snap.pickups.is_empty());
        assert_eq!(snap.hud.lives, 3);
        assert_eq!(snap.hud.level_target, 500);
        assert!(snap.player.visible);
    }

    #[test]
    fn test_snapshot_serializes() {
        let state = GameState::new(5, Tuning::default());
        let json = serde_json::to_string(&RenderSnapshot::capture(&state)).unwrap();
        assert!(json.contains("\"phase\":\"playing\""));
    }
}
