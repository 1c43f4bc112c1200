//! Rendering
//!
//! The renderer only ever reads a [`Snapshot`]. HUD text and sprite
//! fallbacks are platform independent; the canvas backend is wasm32 only.

use crate::sim::{PowerUpKind, Snapshot};

#[cfg(target_arch = "wasm32")]
pub mod canvas;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;

/// Sprite slots, each backed by an image under `assets/`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sprite {
    Background,
    Player,
    Obstacle,
    Coin,
    SpeedBoost,
    Shield,
}

impl Sprite {
    pub const ALL: [Sprite; 6] = [
        Sprite::Background,
        Sprite::Player,
        Sprite::Obstacle,
        Sprite::Coin,
        Sprite::SpeedBoost,
        Sprite::Shield,
    ];

    pub fn path(self) -> &'static str {
        match self {
            Sprite::Background => "assets/barn.png",
            Sprite::Player => "assets/player.png",
            Sprite::Obstacle => "assets/obstacle.png",
            Sprite::Coin => "assets/coin.png",
            Sprite::SpeedBoost => "assets/speedBoost.png",
            Sprite::Shield => "assets/shield.png",
        }
    }

    /// Flat color drawn while the image is missing or still loading
    pub fn fallback_color(self) -> &'static str {
        match self {
            Sprite::Background => "#5b3a29",
            Sprite::Player => "#f5f5f0",
            Sprite::Obstacle => "#3b3b3b",
            Sprite::Coin => "#f2c230",
            Sprite::SpeedBoost => "#3ec1f3",
            Sprite::Shield => "#7be07b",
        }
    }

    pub fn for_power_up(kind: PowerUpKind) -> Self {
        match kind {
            PowerUpKind::SpeedBoost => Sprite::SpeedBoost,
            PowerUpKind::Shield => Sprite::Shield,
        }
    }
}

/// HUD text, top to bottom
pub fn hud_lines(snapshot: &Snapshot<'_>) -> [String; 3] {
    [
        format!("Score: {}", snapshot.score),
        format!("Lives: {}", snapshot.lives),
        format!("High Score: {}", snapshot.high_score),
    ]
}
