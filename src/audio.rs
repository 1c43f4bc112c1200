//! Audio
//!
//! Procedurally generated sound effects - no external files needed!
//! The event-to-sound mapping is platform independent; playback uses the
//! Web Audio API and is compiled for wasm32 only.

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Coin collected
    Coin,
    /// Unshielded obstacle hit
    Cluck,
    /// Shield deflected an obstacle
    ShieldBlock,
    /// Power-up collected
    PowerUp,
    /// Power-up ran out
    PowerDown,
    /// Game over
    GameOver,
}

impl SoundEffect {
    /// Sound to play for a simulation event, if any
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::CoinCollected { .. } => Some(SoundEffect::Coin),
            GameEvent::ObstacleHit { .. } => Some(SoundEffect::Cluck),
            GameEvent::ShieldAbsorbed => Some(SoundEffect::ShieldBlock),
            GameEvent::PowerUpCollected(_) => Some(SoundEffect::PowerUp),
            GameEvent::PowerUpExpired(_) => Some(SoundEffect::PowerDown),
            GameEvent::GameOver { .. } => Some(SoundEffect::GameOver),
            // Fires every tick while a record climbs
            GameEvent::NewHighScore(_) => None,
            GameEvent::ObstacleDodged { .. } => None,
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::SoundEffect;
    use crate::settings::Settings;

    /// Audio manager for the game
    pub struct AudioManager {
        ctx: Option<AudioContext>,
        volume: f32,
    }

    impl AudioManager {
        pub fn new(settings: &Settings) -> Self {
            // Try to create audio context (may fail if not in secure context)
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self {
                ctx,
                volume: settings.effective_volume(),
            }
        }

        /// Resume audio context (required after user gesture)
        pub fn resume(&self) {
            if let Some(ctx) = &self.ctx {
                let _ = ctx.resume();
            }
        }

        /// Play a sound effect; silently skipped without a context
        pub fn play(&self, effect: SoundEffect) {
            let vol = self.volume;
            if vol <= 0.0 {
                return;
            }

            let Some(ctx) = &self.ctx else { return };

            // Resume context if suspended (browsers require user gesture)
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            match effect {
                SoundEffect::Coin => self.play_coin(ctx, vol),
                SoundEffect::Cluck => self.play_cluck(ctx, vol),
                SoundEffect::ShieldBlock => self.play_shield_block(ctx, vol),
                SoundEffect::PowerUp => self.play_power_up(ctx, vol),
                SoundEffect::PowerDown => self.play_power_down(ctx, vol),
                SoundEffect::GameOver => self.play_game_over(ctx, vol),
            }
        }

        // === Sound generators ===

        /// Create an oscillator with gain envelope
        fn create_osc(
            &self,
            ctx: &AudioContext,
            freq: f32,
            osc_type: OscillatorType,
        ) -> Option<(OscillatorNode, GainNode)> {
            let osc = ctx.create_oscillator().ok()?;
            let gain = ctx.create_gain().ok()?;

            osc.set_type(osc_type);
            osc.frequency().set_value(freq);
            osc.connect_with_audio_node(&gain).ok()?;
            gain.connect_with_audio_node(&ctx.destination()).ok()?;

            Some((osc, gain))
        }

        /// Short enveloped tone starting `delay` seconds from now
        fn blip(
            &self,
            ctx: &AudioContext,
            freq: f32,
            osc_type: OscillatorType,
            gain_level: f32,
            delay: f64,
            duration: f64,
        ) {
            let Some((osc, gain)) = self.create_osc(ctx, freq, osc_type) else {
                return;
            };
            let t = ctx.current_time() + delay;

            gain.gain().set_value_at_time(0.0, ctx.current_time()).ok();
            gain.gain().set_value_at_time(gain_level, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + duration)
                .ok();

            osc.start_with_when(t).ok();
            osc.stop_with_when(t + duration + 0.02).ok();
        }

        /// Coin - two bright notes
        fn play_coin(&self, ctx: &AudioContext, vol: f32) {
            self.blip(ctx, 988.0, OscillatorType::Square, vol * 0.15, 0.0, 0.08);
            self.blip(ctx, 1319.0, OscillatorType::Square, vol * 0.15, 0.08, 0.25);
        }

        /// Cluck - squawk that drops in pitch
        fn play_cluck(&self, ctx: &AudioContext, vol: f32) {
            let Some((osc, gain)) = self.create_osc(ctx, 700.0, OscillatorType::Sawtooth) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(vol * 0.3, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.18)
                .ok();
            osc.frequency().set_value_at_time(700.0, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(220.0, t + 0.15)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + 0.2).ok();
        }

        /// Shield block - soft metallic ping
        fn play_shield_block(&self, ctx: &AudioContext, vol: f32) {
            self.blip(ctx, 1760.0, OscillatorType::Triangle, vol * 0.25, 0.0, 0.2);
            self.blip(ctx, 2637.0, OscillatorType::Sine, vol * 0.1, 0.0, 0.3);
        }

        /// Power-up - rising arpeggio
        fn play_power_up(&self, ctx: &AudioContext, vol: f32) {
            for (i, freq) in [523.0, 659.0, 784.0, 1047.0].into_iter().enumerate() {
                self.blip(ctx, freq, OscillatorType::Triangle, vol * 0.2, i as f64 * 0.06, 0.1);
            }
        }

        /// Power-down - two falling notes
        fn play_power_down(&self, ctx: &AudioContext, vol: f32) {
            self.blip(ctx, 784.0, OscillatorType::Triangle, vol * 0.15, 0.0, 0.1);
            self.blip(ctx, 523.0, OscillatorType::Triangle, vol * 0.15, 0.1, 0.15);
        }

        /// Game over - slow descending tones
        fn play_game_over(&self, ctx: &AudioContext, vol: f32) {
            for (i, freq) in [392.0, 330.0, 262.0, 196.0].into_iter().enumerate() {
                self.blip(ctx, freq, OscillatorType::Sine, vol * 0.3, i as f64 * 0.25, 0.35);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::PowerUpKind;

    #[test]
    fn test_event_sounds() {
        assert_eq!(
            SoundEffect::for_event(&GameEvent::CoinCollected { score: 10 }),
            Some(SoundEffect::Coin)
        );
        assert_eq!(
            SoundEffect::for_event(&GameEvent::ObstacleHit { lives: 2 }),
            Some(SoundEffect::Cluck)
        );
        assert_eq!(
            SoundEffect::for_event(&GameEvent::PowerUpCollected(PowerUpKind::Shield)),
            Some(SoundEffect::PowerUp)
        );
        assert_eq!(SoundEffect::for_event(&GameEvent::NewHighScore(10)), None);
    }
}
