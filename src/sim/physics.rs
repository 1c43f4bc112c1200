//! Player physics and falling-entity motion

use super::spawn::spawn_coin;
use super::state::{GameEvent, GameState};
use super::tick::TickInput;
use crate::tuning::JumpMode;

/// Integrate the player for one tick and clamp it to the arena
pub fn step_player(state: &mut GameState, input: &TickInput) {
    let tuning = &state.tuning;
    let player = &mut state.player;

    player.moving_left = input.move_left;
    player.moving_right = input.move_right;
    player.floating = match tuning.jump_mode {
        JumpMode::Hover => input.jump_held,
        JumpMode::Impulse => input.jump_pressed,
    };

    // --- Vertical ---
    if player.floating {
        player.dy = tuning.lift;
    } else {
        player.dy = (player.dy + tuning.gravity).min(tuning.max_fall_speed);
    }
    player.pos.y += player.dy;

    let max = player.max_pos(&state.arena);
    if player.pos.y >= max.y {
        player.pos.y = max.y;
        player.dy = player.dy.min(0.0);
    }
    if player.pos.y <= 0.0 {
        player.pos.y = 0.0;
        player.dy = player.dy.max(0.0);
    }

    // --- Horizontal (opposite intents cancel) ---
    match (player.moving_left, player.moving_right) {
        (true, false) => player.pos.x = (player.pos.x - player.speed).max(0.0),
        (false, true) => player.pos.x = (player.pos.x + player.speed).min(max.x),
        _ => {}
    }
}

/// Move obstacles, coins and power-ups down and drop the ones that left
///
/// Obstacles leaving the arena count as dodged.
pub fn advance_falling(state: &mut GameState) {
    let floor = state.arena.height;

    for obstacle in &mut state.obstacles {
        obstacle.pos.y += obstacle.speed;
    }
    let coin_gravity = state.tuning.coin_gravity;
    for coin in &mut state.coins {
        coin.vy += coin_gravity;
        coin.pos.y += coin.vy;
    }
    for power_up in &mut state.power_ups {
        power_up.pos.y += power_up.speed;
    }

    let mut dodged_lanes = Vec::new();
    state.obstacles.retain(|obstacle| {
        if obstacle.pos.y > floor {
            dodged_lanes.push(obstacle.pos.x + obstacle.size.x / 2.0);
            false
        } else {
            true
        }
    });
    state.coins.retain(|coin| coin.pos.y <= floor);
    state.power_ups.retain(|power_up| power_up.pos.y <= floor);

    for lane in dodged_lanes {
        state.score = state.score.saturating_add(state.tuning.dodge_reward);
        state.events.push(GameEvent::ObstacleDodged { score: state.score });
        if state.tuning.coin_on_dodge {
            spawn_coin(state, Some(lane));
        }
    }
}
