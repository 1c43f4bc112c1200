//! Timed power-up effects
//!
//! Each effect is a countdown in [`ActiveEffects`]; nothing here looks at the
//! wall clock.

use super::state::{GameEvent, GameState, PowerUpKind};

/// Start (or restart) an effect after a pickup
pub fn apply_power_up(state: &mut GameState, kind: PowerUpKind) {
    // Re-pickup only refreshes the timer
    *state.effects.ticks_mut(kind) = state.tuning.effect_duration_ticks.max(1);

    match kind {
        PowerUpKind::SpeedBoost => {
            state.player.speed = state.player.base_speed * state.tuning.speed_boost_factor;
        }
        PowerUpKind::Shield => {
            state.player.shielded = true;
        }
    }
}

/// Switch an effect off and restore what it changed
pub fn expire(state: &mut GameState, kind: PowerUpKind) {
    *state.effects.ticks_mut(kind) = 0;
    match kind {
        PowerUpKind::SpeedBoost => state.player.speed = state.player.base_speed,
        PowerUpKind::Shield => state.player.shielded = false,
    }
    state.events.push(GameEvent::PowerUpExpired(kind));
}

/// Count every running effect down by one tick
pub fn tick_effects(state: &mut GameState) {
    for kind in [PowerUpKind::SpeedBoost, PowerUpKind::Shield] {
        let ticks = state.effects.ticks_mut(kind);
        if *ticks == 0 {
            continue;
        }
        *ticks -= 1;
        if *ticks == 0 {
            expire(state, kind);
        }
    }
}
