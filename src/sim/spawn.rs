//! Entity spawning
//!
//! All randomness comes from the state's seeded RNG so runs replay exactly.

use glam::Vec2;
use rand::Rng;

use super::state::{Coin, GameState, Obstacle, PowerUp, PowerUpKind};
use crate::tuning::SpawnCadence;

/// Whether a spawner with this cadence fires on the current tick
pub fn should_spawn(state: &mut GameState, cadence: SpawnCadence) -> bool {
    match cadence.sanitized() {
        SpawnCadence::Off => false,
        SpawnCadence::Chance(p) => state.rng.random_bool(f64::from(p)),
        SpawnCadence::Every(n) => n > 0 && state.time_ticks % u64::from(n) == 0,
    }
}

/// Run every spawner once
pub fn spawn_entities(state: &mut GameState) {
    let tuning = &state.tuning;
    let (obstacles, coins, power_ups) = (
        tuning.obstacle_cadence,
        tuning.coin_cadence,
        tuning.power_up_cadence,
    );

    if should_spawn(state, obstacles) {
        spawn_obstacle(state);
    }
    if should_spawn(state, coins) {
        spawn_coin(state, None);
    }
    if should_spawn(state, power_ups) {
        spawn_power_up(state);
    }
}

/// Left edge for an entity of `width`, uniform over the arena.
/// `None` if the entity cannot fit at all.
fn sample_x(state: &mut GameState, width: f32) -> Option<f32> {
    let room = state.arena.width - width;
    if room < 0.0 {
        log::debug!(
            "Skipping spawn: width {} exceeds arena width {}",
            width,
            state.arena.width
        );
        return None;
    }
    Some(state.rng.random::<f32>() * room)
}

/// Spawn an obstacle; speed scales with the current score
pub fn spawn_obstacle(state: &mut GameState) -> Option<u32> {
    let tuning = &state.tuning;
    let (min_w, max_w) = (tuning.obstacle_min_width, tuning.obstacle_max_width);
    let height = tuning.obstacle_height;
    let speed = tuning.obstacle_speed(state.score);
    let spawn_y = tuning.spawn_y;

    let width = min_w + state.rng.random::<f32>() * (max_w - min_w);
    let x = sample_x(state, width)?;
    let id = state.next_entity_id();
    state.obstacles.push(Obstacle {
        id,
        pos: Vec2::new(x, spawn_y),
        size: Vec2::new(width, height),
        speed,
    });
    Some(id)
}

/// Spawn a coin, centered on `lane_center` if given, otherwise anywhere
pub fn spawn_coin(state: &mut GameState, lane_center: Option<f32>) -> Option<u32> {
    let radius = state.tuning.coin_radius;
    let diameter = radius * 2.0;
    let x = match lane_center {
        Some(center) => {
            let room = state.arena.width - diameter;
            if room < 0.0 {
                return None;
            }
            (center - radius).clamp(0.0, room)
        }
        None => sample_x(state, diameter)?,
    };
    let id = state.next_entity_id();
    state.coins.push(Coin {
        id,
        pos: Vec2::new(x, state.tuning.spawn_y),
        radius,
        vy: state.tuning.coin_speed,
    });
    Some(id)
}

/// Spawn a power-up of a uniformly chosen kind
pub fn spawn_power_up(state: &mut GameState) -> Option<u32> {
    let kind = if state.rng.random_bool(0.5) {
        PowerUpKind::SpeedBoost
    } else {
        PowerUpKind::Shield
    };
    let size = state.tuning.power_up_size;
    let x = sample_x(state, size)?;
    let id = state.next_entity_id();
    state.power_ups.push(PowerUp {
        id,
        kind,
        pos: Vec2::new(x, state.tuning.spawn_y),
        size: Vec2::splat(size),
        speed: state.tuning.power_up_speed,
    });
    Some(id)
}
