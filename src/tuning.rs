//! Data-driven game balance
//!
//! Every gameplay constant lives in [`Tuning`] so that difficulty can be
//! changed from a JSON file without touching the simulation. Defaults match
//! the shipped game.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors raised while setting up a game
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid arena dimensions {width}x{height}")]
    InvalidArena { width: f32, height: f32 },
    #[error("invalid tuning: {0}")]
    InvalidTuning(String),
    #[error("failed to parse tuning: {0}")]
    Parse(#[from] serde_json::Error),
}

/// How often an entity type spawns
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpawnCadence {
    /// Never spawns
    Off,
    /// Spawns with this probability each tick
    Chance(f32),
    /// Spawns on every tick divisible by this interval
    Every(u32),
}

impl SpawnCadence {
    /// Clamp out-of-range parameters into something usable
    pub fn sanitized(self) -> Self {
        match self {
            SpawnCadence::Chance(p) if p.is_nan() || p <= 0.0 => SpawnCadence::Off,
            SpawnCadence::Chance(p) => SpawnCadence::Chance(p.min(1.0)),
            SpawnCadence::Every(0) => SpawnCadence::Off,
            other => other,
        }
    }
}

/// Jump semantics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JumpMode {
    /// Lift is re-applied every tick while jump is held
    #[default]
    Hover,
    /// Lift is applied once per press
    Impulse,
}

/// How many obstacle hits a shield absorbs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShieldPolicy {
    /// Every hit while the shield timer runs
    #[default]
    Unlimited,
    /// The first hit ends the shield
    SingleHit,
}

/// Gameplay balance table (all speeds are per tick)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Player ===
    pub player_scale: f32,
    pub player_speed: f32,
    pub gravity: f32,
    pub lift: f32,
    pub max_fall_speed: f32,
    pub jump_mode: JumpMode,

    // === Spawning ===
    pub spawn_y: f32,
    pub obstacle_cadence: SpawnCadence,
    pub obstacle_min_width: f32,
    pub obstacle_max_width: f32,
    pub obstacle_height: f32,
    pub obstacle_base_speed: f32,
    pub obstacle_speed_per_point: f32,
    pub obstacle_max_speed: f32,
    pub coin_cadence: SpawnCadence,
    pub coin_radius: f32,
    pub coin_speed: f32,
    /// Per-tick acceleration of falling coins (0 = constant speed)
    pub coin_gravity: f32,
    /// Drop a coin in the lane of every dodged obstacle
    pub coin_on_dodge: bool,
    pub power_up_cadence: SpawnCadence,
    pub power_up_size: f32,
    pub power_up_speed: f32,

    // === Scoring ===
    pub starting_lives: u8,
    pub coin_reward: u64,
    pub dodge_reward: u64,

    // === Power-ups ===
    pub speed_boost_factor: f32,
    pub effect_duration_ticks: u32,
    pub shield_policy: ShieldPolicy,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player_scale: PLAYER_SCALE,
            player_speed: PLAYER_SPEED,
            gravity: GRAVITY,
            lift: LIFT,
            max_fall_speed: MAX_FALL_SPEED,
            jump_mode: JumpMode::Hover,

            spawn_y: SPAWN_Y,
            obstacle_cadence: SpawnCadence::Chance(0.02),
            obstacle_min_width: OBSTACLE_MIN_WIDTH,
            obstacle_max_width: OBSTACLE_MAX_WIDTH,
            obstacle_height: OBSTACLE_HEIGHT,
            obstacle_base_speed: OBSTACLE_BASE_SPEED,
            obstacle_speed_per_point: OBSTACLE_SPEED_PER_POINT,
            obstacle_max_speed: OBSTACLE_MAX_SPEED,
            coin_cadence: SpawnCadence::Chance(0.05),
            coin_radius: COIN_RADIUS,
            coin_speed: COIN_SPEED,
            coin_gravity: 0.0,
            coin_on_dodge: false,
            power_up_cadence: SpawnCadence::Chance(0.01),
            power_up_size: POWER_UP_SIZE,
            power_up_speed: POWER_UP_SPEED,

            starting_lives: STARTING_LIVES,
            coin_reward: COIN_REWARD,
            dodge_reward: DODGE_REWARD,

            speed_boost_factor: SPEED_BOOST_FACTOR,
            effect_duration_ticks: EFFECT_DURATION_TICKS,
            shield_policy: ShieldPolicy::Unlimited,
        }
    }
}

impl Tuning {
    /// A tuning with every spawner switched off (useful for scripted scenes)
    pub fn quiet() -> Self {
        Self {
            obstacle_cadence: SpawnCadence::Off,
            coin_cadence: SpawnCadence::Off,
            power_up_cadence: SpawnCadence::Off,
            ..Self::default()
        }
    }

    /// Parse from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning.sanitized())
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let physics = [
            ("player_scale", self.player_scale),
            ("player_speed", self.player_speed),
            ("gravity", self.gravity),
            ("lift", self.lift),
            ("max_fall_speed", self.max_fall_speed),
            ("spawn_y", self.spawn_y),
            ("coin_gravity", self.coin_gravity),
            ("speed_boost_factor", self.speed_boost_factor),
        ];
        if let Some((name, value)) = physics.iter().find(|(_, v)| !v.is_finite()) {
            return Err(ConfigError::InvalidTuning(format!(
                "{name} must be finite, got {value}"
            )));
        }
        if !(self.player_scale > 0.0 && self.player_scale <= 1.0) {
            return Err(ConfigError::InvalidTuning(format!(
                "player_scale must be in (0, 1], got {}",
                self.player_scale
            )));
        }
        if self.starting_lives == 0 {
            return Err(ConfigError::InvalidTuning(
                "starting_lives must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Clamp out-of-range spawn and effect parameters instead of failing
    pub fn sanitized(mut self) -> Self {
        fn non_negative(v: f32) -> f32 {
            if v.is_finite() { v.max(0.0) } else { 0.0 }
        }
        // Anything that falls must eventually leave the arena
        fn fall_speed(v: f32) -> f32 {
            non_negative(v).max(MIN_FALL_SPEED)
        }

        // Spawning below the top edge would hand out free dodges
        self.spawn_y = self.spawn_y.min(0.0);

        self.obstacle_cadence = self.obstacle_cadence.sanitized();
        self.coin_cadence = self.coin_cadence.sanitized();
        self.power_up_cadence = self.power_up_cadence.sanitized();

        self.obstacle_min_width = non_negative(self.obstacle_min_width);
        self.obstacle_max_width = non_negative(self.obstacle_max_width);
        if self.obstacle_min_width > self.obstacle_max_width {
            std::mem::swap(&mut self.obstacle_min_width, &mut self.obstacle_max_width);
        }
        self.obstacle_height = non_negative(self.obstacle_height);
        self.obstacle_base_speed = fall_speed(self.obstacle_base_speed);
        self.obstacle_speed_per_point = non_negative(self.obstacle_speed_per_point);
        self.obstacle_max_speed = non_negative(self.obstacle_max_speed).max(self.obstacle_base_speed);
        self.coin_radius = non_negative(self.coin_radius);
        self.coin_speed = fall_speed(self.coin_speed);
        self.coin_gravity = non_negative(self.coin_gravity);
        self.power_up_size = non_negative(self.power_up_size);
        self.power_up_speed = fall_speed(self.power_up_speed);
        self.max_fall_speed = non_negative(self.max_fall_speed);
        self.player_speed = non_negative(self.player_speed);
        self.speed_boost_factor = self.speed_boost_factor.max(1.0);
        self
    }

    /// Fall speed of a freshly spawned obstacle at the given score
    pub fn obstacle_speed(&self, score: u64) -> f32 {
        let speed = self.obstacle_base_speed + score as f32 * self.obstacle_speed_per_point;
        speed.min(self.obstacle_max_speed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        assert!(Tuning::default().validate().is_ok());
        assert_eq!(Tuning::default().sanitized(), Tuning::default());
    }

    #[test]
    fn test_sanitize_clamps_spawn_parameters() {
        let tuning = Tuning {
            obstacle_cadence: SpawnCadence::Chance(3.0),
            coin_cadence: SpawnCadence::Chance(-0.5),
            power_up_cadence: SpawnCadence::Every(0),
            obstacle_min_width: 120.0,
            obstacle_max_width: 80.0,
            coin_radius: -4.0,
            speed_boost_factor: 0.5,
            ..Tuning::default()
        }
        .sanitized();

        assert_eq!(tuning.obstacle_cadence, SpawnCadence::Chance(1.0));
        assert_eq!(tuning.coin_cadence, SpawnCadence::Off);
        assert_eq!(tuning.power_up_cadence, SpawnCadence::Off);
        assert_eq!(tuning.obstacle_min_width, 80.0);
        assert_eq!(tuning.obstacle_max_width, 120.0);
        assert_eq!(tuning.coin_radius, 0.0);
        assert_eq!(tuning.speed_boost_factor, 1.0);
    }

    #[test]
    fn test_sanitize_keeps_entities_falling() {
        let tuning = Tuning::from_json(
            r#"{ "coin_speed": 0, "obstacle_base_speed": -3, "power_up_speed": 0, "spawn_y": 900 }"#,
        )
        .unwrap();
        assert_eq!(tuning.coin_speed, MIN_FALL_SPEED);
        assert_eq!(tuning.obstacle_base_speed, MIN_FALL_SPEED);
        assert_eq!(tuning.power_up_speed, MIN_FALL_SPEED);
        assert!(tuning.obstacle_speed(0) >= MIN_FALL_SPEED);
        assert_eq!(tuning.spawn_y, 0.0);
    }

    #[test]
    fn test_nan_chance_is_off() {
        assert_eq!(SpawnCadence::Chance(f32::NAN).sanitized(), SpawnCadence::Off);
    }

    #[test]
    fn test_validate_rejects_zero_lives() {
        let tuning = Tuning {
            starting_lives: 0,
            ..Tuning::default()
        };
        assert!(matches!(tuning.validate(), Err(ConfigError::InvalidTuning(_))));
    }

    #[test]
    fn test_validate_rejects_non_finite_gravity() {
        let tuning = Tuning {
            gravity: f32::NAN,
            ..Tuning::default()
        };
        assert!(tuning.validate().is_err());
    }

    #[test]
    fn test_from_json_partial() {
        let tuning = Tuning::from_json(
            r#"{ "jump_mode": "impulse", "coin_cadence": { "every": 30 }, "dodge_reward": 0 }"#,
        )
        .unwrap();
        assert_eq!(tuning.jump_mode, JumpMode::Impulse);
        assert_eq!(tuning.coin_cadence, SpawnCadence::Every(30));
        assert_eq!(tuning.dodge_reward, 0);
        assert_eq!(tuning.coin_reward, COIN_REWARD);
    }

    #[test]
    fn test_from_json_garbage() {
        assert!(matches!(
            Tuning::from_json("not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_obstacle_speed_monotonic_and_capped() {
        let tuning = Tuning::default();
        let mut last = 0.0;
        for score in (0..5000).step_by(50) {
            let speed = tuning.obstacle_speed(score);
            assert!(speed >= last);
            last = speed;
        }
        assert_eq!(tuning.obstacle_speed(1_000_000), OBSTACLE_MAX_SPEED);
        assert_eq!(tuning.obstacle_speed(0), OBSTACLE_BASE_SPEED);
    }
}
