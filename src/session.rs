//! Game session
//!
//! Wraps the simulation with its persistence collaborator: the high score is
//! read once at startup and written back every time the simulation reports a
//! new one.

use crate::highscores;
use crate::persistence::KeyValueStore;
use crate::sim::{Arena, GameEvent, GameState, Snapshot, TickInput, tick};
use crate::tuning::{ConfigError, Tuning};

pub struct Session<S: KeyValueStore> {
    state: GameState,
    store: S,
}

impl<S: KeyValueStore> Session<S> {
    pub fn new(seed: u64, arena: Arena, tuning: Tuning, store: S) -> Result<Self, ConfigError> {
        let mut state = GameState::new(seed, arena, tuning)?;
        state.high_score = highscores::load(&store);
        log::info!(
            "Session started (seed {}, arena {}x{}, high score {})",
            seed,
            arena.width,
            arena.height,
            state.high_score
        );
        Ok(Self { state, store })
    }

    /// Run one frame and return what happened during it
    pub fn frame(&mut self, input: &TickInput) -> Vec<GameEvent> {
        tick(&mut self.state, input);
        let events = self.state.take_events();

        // Several records in one tick only need the last write
        if let Some(score) = events.iter().rev().find_map(|e| match e {
            GameEvent::NewHighScore(score) => Some(*score),
            _ => None,
        }) {
            highscores::save(&mut self.store, score);
        }

        events
    }

    /// True while the game-over notification waits for acknowledgement
    pub fn awaiting_restart(&self) -> bool {
        self.state.is_game_over()
    }

    /// Acknowledge the game over and resume play on the next frame
    pub fn restart(&mut self) -> Vec<GameEvent> {
        self.frame(&TickInput {
            restart: true,
            ..Default::default()
        })
    }

    pub fn resize(&mut self, width: f32, height: f32) -> Result<(), ConfigError> {
        self.state.resize_arena(width, height)
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        self.state.snapshot()
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
