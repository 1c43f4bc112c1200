//! Game state and core simulation types
//!
//! Everything the tick mutates lives in [`GameState`]; there are no globals.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::consts::PLAYER_FLOOR_GAP;
use crate::tuning::{ConfigError, Tuning};

/// The visible play area, in canvas pixels (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
}

impl Arena {
    /// Fails on non-finite or non-positive dimensions
    pub fn new(width: f32, height: f32) -> Result<Self, ConfigError> {
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(ConfigError::InvalidArena { width, height });
        }
        Ok(Self { width, height })
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }
}

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Run ended; state is already reset and waits for a restart
    GameOver { final_score: u64 },
}

/// The player-controlled sprite
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Vertical velocity (negative is up)
    pub dy: f32,
    /// Current horizontal speed (boosted while SpeedBoost runs)
    pub speed: f32,
    /// Unboosted speed; restored exactly when a boost expires
    pub base_speed: f32,
    pub shielded: bool,
    /// Jump/hover intent seen this tick
    pub floating: bool,
    pub moving_left: bool,
    pub moving_right: bool,
}

impl Player {
    /// Spawn centered horizontally, just above the floor
    pub fn spawn(arena: &Arena, tuning: &Tuning) -> Self {
        let size = arena.size() * tuning.player_scale;
        Self {
            pos: Vec2::new(
                arena.width / 2.0 - size.x / 2.0,
                (arena.height - size.y - PLAYER_FLOOR_GAP).max(0.0),
            ),
            size,
            dy: 0.0,
            speed: tuning.player_speed,
            base_speed: tuning.player_speed,
            shielded: false,
            floating: false,
            moving_left: false,
            moving_right: false,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }

    /// Largest legal top-left corner
    pub fn max_pos(&self, arena: &Arena) -> Vec2 {
        (arena.size() - self.size).max(Vec2::ZERO)
    }
}

/// A falling hazard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub pos: Vec2,
    pub size: Vec2,
    /// Fall speed per tick
    pub speed: f32,
}

impl Obstacle {
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }
}

/// A falling coin
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Coin {
    pub id: u32,
    /// Top-left corner of the bounding box
    pub pos: Vec2,
    pub radius: f32,
    /// Vertical speed per tick
    pub vy: f32,
}

impl Coin {
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, Vec2::splat(self.radius * 2.0))
    }
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    SpeedBoost,
    Shield,
}

/// A falling power-up
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    pub id: u32,
    pub kind: PowerUpKind,
    pub pos: Vec2,
    pub size: Vec2,
    pub speed: f32,
}

impl PowerUp {
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }
}

/// Active power-up effects (ticks remaining, 0 = inactive)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveEffects {
    pub speed_boost_ticks: u32,
    pub shield_ticks: u32,
}

impl ActiveEffects {
    pub fn is_active(&self, kind: PowerUpKind) -> bool {
        self.ticks(kind) > 0
    }

    pub fn ticks(&self, kind: PowerUpKind) -> u32 {
        match kind {
            PowerUpKind::SpeedBoost => self.speed_boost_ticks,
            PowerUpKind::Shield => self.shield_ticks,
        }
    }

    pub fn ticks_mut(&mut self, kind: PowerUpKind) -> &mut u32 {
        match kind {
            PowerUpKind::SpeedBoost => &mut self.speed_boost_ticks,
            PowerUpKind::Shield => &mut self.shield_ticks,
        }
    }
}

/// Notifications for the render, audio and persistence collaborators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    CoinCollected { score: u64 },
    /// Unshielded hit; `lives` is what remains
    ObstacleHit { lives: u8 },
    ShieldAbsorbed,
    ObstacleDodged { score: u64 },
    PowerUpCollected(PowerUpKind),
    PowerUpExpired(PowerUpKind),
    NewHighScore(u64),
    GameOver { final_score: u64 },
}

/// Read-only view handed to the renderer once per tick
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Snapshot<'a> {
    pub arena: &'a Arena,
    pub player: &'a Player,
    pub obstacles: &'a [Obstacle],
    pub coins: &'a [Coin],
    pub power_ups: &'a [PowerUp],
    pub score: u64,
    pub lives: u8,
    pub high_score: u64,
    pub effects: &'a ActiveEffects,
    pub phase: GamePhase,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub tuning: Tuning,
    pub arena: Arena,
    pub phase: GamePhase,
    pub score: u64,
    pub lives: u8,
    /// Best score ever seen (seeded from persistence)
    pub high_score: u64,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub player: Player,
    /// Vectors keep spawn order for deterministic resolution
    pub obstacles: Vec<Obstacle>,
    pub coins: Vec<Coin>,
    pub power_ups: Vec<PowerUp>,
    pub effects: ActiveEffects,
    /// Events produced since the last drain
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Create a new game; fails fast on a bad arena or tuning
    pub fn new(seed: u64, arena: Arena, tuning: Tuning) -> Result<Self, ConfigError> {
        let arena = Arena::new(arena.width, arena.height)?;
        tuning.validate()?;
        let tuning = tuning.sanitized();
        let player = Player::spawn(&arena, &tuning);
        Ok(Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            lives: tuning.starting_lives,
            tuning,
            arena,
            phase: GamePhase::Playing,
            score: 0,
            high_score: 0,
            time_ticks: 0,
            player,
            obstacles: Vec::new(),
            coins: Vec::new(),
            power_ups: Vec::new(),
            effects: ActiveEffects::default(),
            events: Vec::new(),
            next_id: 1,
        })
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Reset the run. Only the high score and the RNG stream carry over.
    pub fn reset(&mut self) {
        self.time_ticks = 0;
        self.score = 0;
        self.lives = self.tuning.starting_lives;
        self.player = Player::spawn(&self.arena, &self.tuning);
        self.obstacles.clear();
        self.coins.clear();
        self.power_ups.clear();
        self.effects = ActiveEffects::default();
    }

    /// Adopt new canvas bounds, rescaling the player and keeping it inside
    pub fn resize_arena(&mut self, width: f32, height: f32) -> Result<(), ConfigError> {
        self.arena = Arena::new(width, height)?;
        self.player.size = self.arena.size() * self.tuning.player_scale;
        self.player.pos = self
            .player
            .pos
            .clamp(Vec2::ZERO, self.player.max_pos(&self.arena));
        Ok(())
    }

    /// Drain pending events
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn is_game_over(&self) -> bool {
        matches!(self.phase, GamePhase::GameOver { .. })
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            arena: &self.arena,
            player: &self.player,
            obstacles: &self.obstacles,
            coins: &self.coins,
            power_ups: &self.power_ups,
            score: self.score,
            lives: self.lives,
            high_score: self.high_score,
            effects: &self.effects,
            phase: self.phase,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arena_rejects_bad_dimensions() {
        assert!(Arena::new(800.0, 600.0).is_ok());
        assert!(Arena::new(-1.0, 600.0).is_err());
        assert!(Arena::new(800.0, 0.0).is_err());
        assert!(Arena::new(f32::INFINITY, 600.0).is_err());
    }

    #[test]
    fn test_new_game_defaults() {
        let arena = Arena::new(800.0, 600.0).unwrap();
        let state = GameState::new(7, arena, Tuning::default()).unwrap();
        assert_eq!(state.score, 0);
        assert_eq!(state.lives, 3);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.player.size, Vec2::new(80.0, 60.0));
        assert_eq!(state.player.pos, Vec2::new(360.0, 530.0));
        assert!(state.obstacles.is_empty() && state.coins.is_empty() && state.power_ups.is_empty());
    }

    #[test]
    fn test_new_game_rejects_bad_arena() {
        let arena = Arena {
            width: -10.0,
            height: 600.0,
        };
        assert!(matches!(
            GameState::new(1, arena, Tuning::default()),
            Err(ConfigError::InvalidArena { .. })
        ));
    }

    #[test]
    fn test_resize_keeps_player_inside() {
        let arena = Arena::new(800.0, 600.0).unwrap();
        let mut state = GameState::new(7, arena, Tuning::default()).unwrap();
        state.player.pos = Vec2::new(700.0, 530.0);

        state.resize_arena(400.0, 300.0).unwrap();
        assert_eq!(state.player.size, Vec2::new(40.0, 30.0));
        assert_eq!(state.player.pos, Vec2::new(360.0, 270.0));

        assert!(state.resize_arena(0.0, 300.0).is_err());
    }

    #[test]
    fn test_entity_ids_increase() {
        let arena = Arena::new(800.0, 600.0).unwrap();
        let mut state = GameState::new(7, arena, Tuning::default()).unwrap();
        let a = state.next_entity_id();
        let b = state.next_entity_id();
        assert!(b > a);
    }
}
