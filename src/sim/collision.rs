//! Axis-aligned collision detection and response
//!
//! The player is tested against every obstacle, coin and power-up once per
//! tick. Consumed entities are dropped by rebuilding each vector, so removal
//! never skips a neighbour.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::effects::{apply_power_up, expire};
use super::state::{GameEvent, GameState, PowerUpKind};
use crate::tuning::ShieldPolicy;

/// Axis-aligned rectangle (top-left corner + size)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    /// Strict overlap: rectangles that only share an edge do not collide
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        let (a_max, b_max) = (self.max(), other.max());
        self.min.x < b_max.x && a_max.x > other.min.x && self.min.y < b_max.y && a_max.y > other.min.y
    }
}

/// What a collision pass did (handy for tests and logging)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollisionReport {
    pub obstacles_hit: u32,
    pub hits_absorbed: u32,
    pub coins_collected: u32,
    pub power_ups_collected: Vec<PowerUpKind>,
}

/// Resolve every player overlap for this tick
///
/// Collections resolve in the order obstacles, coins, power-ups; within a
/// collection, in spawn order.
pub fn resolve_collisions(state: &mut GameState) -> CollisionReport {
    let mut report = CollisionReport::default();
    let player_rect = state.player.rect();

    // --- Obstacles ---
    let obstacles = std::mem::take(&mut state.obstacles);
    let mut survivors = Vec::with_capacity(obstacles.len());
    for obstacle in obstacles {
        if !player_rect.overlaps(&obstacle.rect()) {
            survivors.push(obstacle);
            continue;
        }

        if state.player.shielded {
            report.hits_absorbed += 1;
            state.events.push(GameEvent::ShieldAbsorbed);
            if state.tuning.shield_policy == ShieldPolicy::SingleHit {
                expire(state, PowerUpKind::Shield);
            }
            continue;
        }

        report.obstacles_hit += 1;
        state.lives = state.lives.saturating_sub(1);
        state.events.push(GameEvent::ObstacleHit { lives: state.lives });
        record_high_score(state);
    }
    state.obstacles = survivors;

    // --- Coins ---
    let reward = state.tuning.coin_reward;
    let before = state.coins.len();
    state.coins.retain(|coin| !player_rect.overlaps(&coin.rect()));
    for _ in state.coins.len()..before {
        report.coins_collected += 1;
        state.score = state.score.saturating_add(reward);
        state.events.push(GameEvent::CoinCollected { score: state.score });
    }

    // --- Power-ups ---
    let mut collected = Vec::new();
    state.power_ups.retain(|power_up| {
        if player_rect.overlaps(&power_up.rect()) {
            collected.push(power_up.kind);
            false
        } else {
            true
        }
    });
    for kind in collected {
        apply_power_up(state, kind);
        state.events.push(GameEvent::PowerUpCollected(kind));
        report.power_ups_collected.push(kind);
    }

    report
}

/// Raise the high score if the current score beats it
pub fn record_high_score(state: &mut GameState) {
    if state.score > state.high_score {
        state.high_score = state.score;
        state.events.push(GameEvent::NewHighScore(state.score));
    }
}
