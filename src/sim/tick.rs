//! Per-frame simulation tick
//!
//! Advances every subsystem by one delta-time step, then resolves
//! collisions in a fixed pass order: projectiles vs enemies, player vs
//! pickups, enemies vs player. An enemy killed in the projectile pass can no
//! longer touch the player in the same tick.

use super::pool::Pooled;
use super::state::{GameEvent, GamePhase, GameState};
use crate::input::TickInput;

/// Advance the game state by one step of `dt` seconds.
///
/// The event queue only holds the latest running tick's events; drain it
/// after each call to see every event.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    // Level complete and game over both freeze the field
    if state.phase != GamePhase::Playing {
        return;
    }

    state.events.clear();
    state.time_ticks += 1;
    let field = state.field;

    // Subsystems: player, spawner, pickups, projectiles
    let fired = state
        .player
        .update(dt, input, &mut state.bullets, &state.tuning, &field);
    if fired > 0 {
        state.events.push(GameEvent::Shot { bullets: fired });
    }
    state
        .enemies
        .update(dt, state.level, &mut state.rng, &state.tuning, &field);
    state.pickups.update(dt, &field);
    state.bullets.update(dt, &field);

    // Collision passes
    if resolve_projectiles(state) {
        return;
    }
    resolve_pickups(state);
    resolve_player_hits(state);
}

/// Bullets vs enemies. Returns true when the level target was reached,
/// which ends this tick's collision work.
fn resolve_projectiles(state: &mut GameState) -> bool {
    for bullet in state.bullets.iter_active_mut() {
        let bullet_box = bullet.aabb();
        let Some(enemy) = state
            .enemies
            .pool
            .iter_active_mut()
            .find(|e| e.aabb().overlaps(&bullet_box))
        else {
            continue;
        };

        // One enemy per bullet
        bullet.deactivate();
        if !enemy.take_damage(bullet.damage) {
            state.events.push(GameEvent::EnemyHit {
                kind: enemy.kind,
                hp: enemy.hp,
            });
            continue;
        }

        enemy.deactivate();
        let at = enemy.aabb().center();
        state.scores.credit(enemy.score);
        state.events.push(GameEvent::EnemyDestroyed {
            kind: enemy.kind,
            at,
            points: enemy.score,
        });

        if let Some(kind) = state.pickups.try_drop(at, &mut state.rng, &state.tuning) {
            state.events.push(GameEvent::BuffDropped { kind, at });
        }

        if state.scores.level_score >= state.tuning.level_score_target {
            state.phase = GamePhase::LevelComplete;
            state.events.push(GameEvent::LevelComplete { level: state.level });
            log::info!(
                "Level {} complete (score {}, high {})",
                state.level,
                state.scores.score,
                state.scores.high_score
            );
            return true;
        }
    }
    false
}

/// Player vs pickups: at most one pickup per tick
fn resolve_pickups(state: &mut GameState) {
    let player_box = state.player.aabb();
    if let Some(kind) = state.pickups.collect(&player_box) {
        state.player.apply_buff(kind, &state.tuning);
        state.events.push(GameEvent::BuffCollected { kind });
        log::debug!("Collected {}", kind.as_str());
    }
}

/// Enemies vs player: at most one life lost per tick
fn resolve_player_hits(state: &mut GameState) {
    if state.player.is_invincible() || state.player.is_shielded() {
        return;
    }

    let player_box = state.player.aabb();
    let Some(enemy) = state
        .enemies
        .pool
        .iter_active_mut()
        .find(|e| e.aabb().overlaps(&player_box))
    else {
        return;
    };

    enemy.deactivate();
    state.lives = state.lives.saturating_sub(1);
    state.player.on_hit(&state.tuning);
    state.events.push(GameEvent::PlayerHit {
        lives_left: state.lives,
    });

    if state.lives == 0 {
        state.phase = GamePhase::GameOver;
        state.events.push(GameEvent::GameOver {
            score: state.scores.score,
            high_score: state.scores.high_score,
        });
        log::info!(
            "Game over at level {} (score {}, high {})",
            state.level,
            state.scores.score,
            state.scores.high_score
        );
    }
}

/// Leave `LevelComplete` for the next level. Returns false in any other phase.
pub fn advance_level(state: &mut GameState) -> bool {
    if state.phase != GamePhase::LevelComplete {
        return false;
    }
    state.level += 1;
    state.scores.level_score = 0;
    state.enemies.reset();
    state.bullets.clear();
    state.pickups.pool.clear();
    state.phase = GamePhase::Playing;
    log::info!("Starting level {}", state.level);
    true
}
