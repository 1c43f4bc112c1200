//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One step per frame, no wall-clock timers
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod effects;
pub mod physics;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{CollisionReport, Rect, resolve_collisions};
pub use state::{
    ActiveEffects, Arena, Coin, GameEvent, GamePhase, GameState, Obstacle, Player, PowerUp,
    PowerUpKind, Snapshot,
};
pub use tick::{TickInput, tick};
