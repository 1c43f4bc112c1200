//! Simulation tick
//!
//! Core game loop step: one call per animation frame.

use super::collision::{record_high_score, resolve_collisions};
use super::effects::tick_effects;
use super::physics::{advance_falling, step_player};
use super::spawn::spawn_entities;
use super::state::{GameEvent, GamePhase, GameState};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub move_left: bool,
    pub move_right: bool,
    /// Jump key currently down
    pub jump_held: bool,
    /// Jump key went down since the last tick
    pub jump_pressed: bool,
    /// Acknowledge a game over and start again
    pub restart: bool,
}

/// Advance the game state by one tick
pub fn tick(state: &mut GameState, input: &TickInput) {
    // Game over blocks everything until acknowledged
    if let GamePhase::GameOver { final_score } = state.phase {
        if input.restart {
            log::info!("Restarting after game over (final score {})", final_score);
            state.phase = GamePhase::Playing;
        }
        return;
    }

    state.time_ticks += 1;

    tick_effects(state);
    step_player(state, input);
    spawn_entities(state);
    advance_falling(state);
    resolve_collisions(state);
    record_high_score(state);

    if state.lives == 0 {
        end_game(state);
    }
}

/// Emit the final score, reset the run and wait for a restart
fn end_game(state: &mut GameState) {
    let final_score = state.score;
    log::info!(
        "Game over at tick {}: final score {}, high score {}",
        state.time_ticks,
        final_score,
        state.high_score
    );
    state.events.push(GameEvent::GameOver { final_score });
    state.reset();
    state.phase = GamePhase::GameOver { final_score };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Arena, Coin, Obstacle, PowerUp, PowerUpKind};
    use crate::tuning::{SpawnCadence, Tuning};
    use glam::Vec2;

    fn arena() -> Arena {
        Arena::new(800.0, 600.0).unwrap()
    }

    fn quiet_state() -> GameState {
        GameState::new(12345, arena(), Tuning::quiet()).unwrap()
    }

    /// Let the player drop onto the floor
    fn settle(state: &mut GameState) {
        for _ in 0..60 {
            tick(state, &TickInput::default());
        }
        state.take_events();
    }

    fn obstacle_on_player(state: &mut GameState) {
        let id = state.next_entity_id();
        // Placed above the player so that after one tick of motion it overlaps
        state.obstacles.push(Obstacle {
            id,
            pos: state.player.pos - Vec2::new(0.0, 2.0),
            size: Vec2::new(50.0, 40.0),
            speed: 2.0,
        });
    }

    #[test]
    fn test_obstacle_dodged_scenario() {
        let mut state = quiet_state();
        state.obstacles.push(Obstacle {
            id: 500,
            pos: Vec2::new(100.0, -20.0),
            size: Vec2::new(50.0, 40.0),
            speed: 2.0,
        });
        // Keep the player well away from x = 100..150
        state.player.pos.x = 600.0;

        let mut ticks = 0;
        while !state.obstacles.is_empty() {
            tick(&mut state, &TickInput::default());
            ticks += 1;
            assert!(ticks < 1000);
        }
        // -20 + 2 * 311 = 602 is the first position past the floor
        assert_eq!(ticks, 311);
        assert_eq!(state.score, 5);
        assert_eq!(state.lives, 3);
    }

    #[test]
    fn test_coin_overlap_scenario() {
        let mut state = quiet_state();
        settle(&mut state);
        let player = state.player.rect();
        // Offset by one tick of fall so the coin lands on the player's corner
        state.coins.push(Coin {
            id: 900,
            pos: player.min - Vec2::new(0.0, 2.0),
            radius: player.size.x / 2.0,
            vy: 2.0,
        });
        state.coins.push(Coin {
            id: 901,
            pos: Vec2::new(0.0, 0.0),
            radius: 25.0,
            vy: 0.0,
        });

        tick(&mut state, &TickInput::default());
        assert_eq!(state.score, 10);
        assert_eq!(state.coins.len(), 1);

        tick(&mut state, &TickInput::default());
        assert_eq!(state.score, 10);
        assert_eq!(state.coins.len(), 1);
        assert_eq!(state.coins[0].id, 901);
    }

    #[test]
    fn test_game_over_scenario() {
        let mut state = quiet_state();
        settle(&mut state);
        state.score = 70;
        state.coins.push(Coin {
            id: 1,
            pos: Vec2::ZERO,
            radius: 25.0,
            vy: 0.0,
        });

        for expected_lives in [2, 1] {
            obstacle_on_player(&mut state);
            tick(&mut state, &TickInput::default());
            assert_eq!(state.lives, expected_lives);
        }
        obstacle_on_player(&mut state);
        tick(&mut state, &TickInput::default());

        let events = state.take_events();
        assert!(events.contains(&GameEvent::GameOver { final_score: 70 }));
        assert_eq!(state.phase, GamePhase::GameOver { final_score: 70 });
        assert_eq!(state.high_score, 70);

        // Next tick shows a fresh run, and is blocked until restart
        tick(&mut state, &TickInput::default());
        assert_eq!(state.score, 0);
        assert_eq!(state.lives, 3);
        assert!(state.obstacles.is_empty() && state.coins.is_empty() && state.power_ups.is_empty());
        assert!(state.is_game_over());
        assert_eq!(state.time_ticks, 0);

        tick(&mut state, &TickInput::default());
        assert_eq!(state.time_ticks, 0);

        tick(
            &mut state,
            &TickInput {
                restart: true,
                ..Default::default()
            },
        );
        assert_eq!(state.phase, GamePhase::Playing);
        tick(&mut state, &TickInput::default());
        assert_eq!(state.time_ticks, 1);
    }

    #[test]
    fn test_restart_realigns_every_cadence() {
        let tuning = Tuning {
            coin_cadence: SpawnCadence::Every(10),
            ..Tuning::quiet()
        };
        let mut state = GameState::new(5, arena(), tuning).unwrap();
        for _ in 0..53 {
            tick(&mut state, &TickInput::default());
        }
        state.lives = 1;
        obstacle_on_player(&mut state);
        tick(&mut state, &TickInput::default());
        assert!(state.is_game_over());
        assert_eq!(state.time_ticks, 0);

        tick(
            &mut state,
            &TickInput {
                restart: true,
                ..Default::default()
            },
        );
        for _ in 0..9 {
            tick(&mut state, &TickInput::default());
        }
        assert!(state.coins.is_empty());
        tick(&mut state, &TickInput::default());
        assert_eq!(state.time_ticks, 10);
        assert_eq!(state.coins.len(), 1);
    }

    #[test]
    fn test_shielded_hit_keeps_lives() {
        let mut state = quiet_state();
        settle(&mut state);
        let id = state.next_entity_id();
        state.power_ups.push(PowerUp {
            id,
            kind: PowerUpKind::Shield,
            pos: state.player.pos - Vec2::new(0.0, 2.0),
            size: Vec2::splat(40.0),
            speed: 2.0,
        });
        tick(&mut state, &TickInput::default());
        assert!(state.player.shielded);

        obstacle_on_player(&mut state);
        tick(&mut state, &TickInput::default());
        assert_eq!(state.lives, 3);
        assert!(state.obstacles.is_empty());
    }

    #[test]
    fn test_speed_boost_expires_to_base() {
        let tuning = Tuning {
            effect_duration_ticks: 20,
            ..Tuning::quiet()
        };
        let mut state = GameState::new(1, arena(), tuning).unwrap();
        settle(&mut state);
        let base = state.player.speed;

        for _ in 0..3 {
            let id = state.next_entity_id();
            state.power_ups.push(PowerUp {
                id,
                kind: PowerUpKind::SpeedBoost,
                pos: state.player.pos - Vec2::new(0.0, 2.0),
                size: Vec2::splat(40.0),
                speed: 2.0,
            });
            tick(&mut state, &TickInput::default());
            assert_eq!(state.player.speed, base * 1.5);
            for _ in 0..5 {
                tick(&mut state, &TickInput::default());
            }
        }
        for _ in 0..20 {
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(state.player.speed, base);
        assert!(
            state
                .take_events()
                .contains(&GameEvent::PowerUpExpired(PowerUpKind::SpeedBoost))
        );
    }

    #[test]
    fn test_determinism() {
        let tuning = Tuning {
            obstacle_cadence: SpawnCadence::Chance(0.2),
            coin_cadence: SpawnCadence::Chance(0.2),
            power_up_cadence: SpawnCadence::Chance(0.1),
            ..Tuning::default()
        };
        let mut state1 = GameState::new(99999, arena(), tuning.clone()).unwrap();
        let mut state2 = GameState::new(99999, arena(), tuning).unwrap();

        for i in 0..600u32 {
            let input = TickInput {
                move_left: i % 90 < 30,
                move_right: i % 90 > 60,
                jump_held: i % 40 < 10,
                jump_pressed: i % 40 == 0,
                restart: true,
            };
            tick(&mut state1, &input);
            tick(&mut state2, &input);
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.score, state2.score);
        assert_eq!(state1.lives, state2.lives);
        assert_eq!(state1.obstacles.len(), state2.obstacles.len());
        assert_eq!(state1.player.pos, state2.player.pos);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn busy_tuning() -> Tuning {
            Tuning {
                obstacle_cadence: SpawnCadence::Chance(0.3),
                coin_cadence: SpawnCadence::Chance(0.3),
                power_up_cadence: SpawnCadence::Chance(0.1),
                ..Tuning::default()
            }
        }

        fn input_from(bits: u8) -> TickInput {
            TickInput {
                move_left: bits & 1 != 0,
                move_right: bits & 2 != 0,
                jump_held: bits & 4 != 0,
                jump_pressed: bits & 8 != 0,
                restart: bits & 16 != 0,
            }
        }

        proptest! {
            #[test]
            fn player_stays_inside_arena(
                seed in 0u64..1000,
                width in 200.0f32..1600.0,
                height in 200.0f32..1200.0,
                inputs in proptest::collection::vec(any::<u8>(), 50..400)
            ) {
                let arena = Arena::new(width, height).unwrap();
                let mut state = GameState::new(seed, arena, busy_tuning()).unwrap();
                for bits in inputs {
                    tick(&mut state, &input_from(bits));
                    let p = &state.player;
                    prop_assert!(p.pos.x >= 0.0 && p.pos.x <= width - p.size.x);
                    prop_assert!(p.pos.y >= 0.0 && p.pos.y <= height - p.size.y);
                }
            }

            #[test]
            fn high_score_is_running_max(
                seed in 0u64..1000,
                inputs in proptest::collection::vec(any::<u8>(), 50..400)
            ) {
                let mut state = GameState::new(seed, arena(), busy_tuning()).unwrap();
                let mut best = 0u64;
                let mut last_high = 0u64;
                for bits in inputs {
                    tick(&mut state, &input_from(bits));
                    for event in state.take_events() {
                        match event {
                            GameEvent::CoinCollected { score } | GameEvent::ObstacleDodged { score } => {
                                best = best.max(score);
                            }
                            _ => {}
                        }
                    }
                    best = best.max(state.score);
                    prop_assert!(state.high_score >= last_high);
                    prop_assert_eq!(state.high_score, best);
                    last_high = state.high_score;
                }
            }
        }
    }
}
