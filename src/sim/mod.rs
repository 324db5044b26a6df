//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Delta time comes from the caller only
//! - Seeded RNG only
//! - Stable iteration order (pool slot order)
//! - No rendering, audio or storage dependencies

pub mod buff;
pub mod bullet;
pub mod collision;
pub mod enemy;
pub mod player;
pub mod pool;
pub mod state;
pub mod tick;

pub use buff::{BuffKind, Pickup, PickupField, StatusEffects};
pub use bullet::{Bullet, BulletPool};
pub use collision::{Aabb, Playfield};
pub use enemy::{Enemy, EnemyKind, EnemySpawner};
pub use player::Player;
pub use pool::{Pool, Pooled};
pub use state::{GameEvent, GamePhase, GameState, Scoreboard};
pub use tick::{advance_level, tick};
