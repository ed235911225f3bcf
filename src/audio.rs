//! Sound cues
//!
//! On the web the cues are generated procedurally with the Web Audio API, so
//! no asset files are needed. Playback is fire-and-forget: any failure is
//! dropped on the floor.

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    /// Bird flapped
    Flap,
    /// Bird hit a pipe, the ground or the ceiling
    Hit,
    /// Pipe pair passed
    Point,
    /// Previous best beaten
    HighScore,
}

impl SoundCue {
    /// Relative loudness of each cue
    pub fn volume(&self) -> f32 {
        match self {
            SoundCue::Flap => 0.7,
            SoundCue::Hit => 0.8,
            SoundCue::Point => 0.6,
            SoundCue::HighScore => 0.8,
        }
    }
}

/// Something that can play a cue
pub trait SoundSink {
    fn play(&mut self, cue: SoundCue);
}

/// Native sink: logs cues at debug level
#[derive(Debug, Default)]
pub struct LogSink;

impl SoundSink for LogSink {
    fn play(&mut self, cue: SoundCue) {
        log::debug!("♪ {:?}", cue);
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::{SoundCue, SoundSink};

    /// Audio manager for the game
    pub struct AudioManager {
        ctx: Option<AudioContext>,
    }

    impl Default for AudioManager {
        fn default() -> Self {
            Self::new()
        }
    }

    impl AudioManager {
        pub fn new() -> Self {
            // May fail outside a secure context
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self { ctx }
        }

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

        /// Flap - quick upward chirp
        fn play_flap(&self, ctx: &AudioContext, vol: f32) {
            let Some((osc, gain)) = self.create_osc(ctx, 300.0, OscillatorType::Triangle) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(vol * 0.4, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.1)
                .ok();
            osc.frequency().set_value_at_time(300.0, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(700.0, t + 0.08)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + 0.12).ok();
        }

        /// Hit - low thud with a noisy edge
        fn play_hit(&self, ctx: &AudioContext, vol: f32) {
            let t = ctx.current_time();

            if let Some((osc, gain)) = self.create_osc(ctx, 150.0, OscillatorType::Sine) {
                gain.gain().set_value_at_time(vol * 0.6, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.25)
                    .ok();
                osc.frequency().set_value_at_time(150.0, t).ok();
                osc.frequency()
                    .exponential_ramp_to_value_at_time(50.0, t + 0.2)
                    .ok();
                osc.start().ok();
                osc.stop_with_when(t + 0.3).ok();
            }

            if let Some((osc, gain)) = self.create_osc(ctx, 220.0, OscillatorType::Square) {
                gain.gain().set_value_at_time(vol * 0.15, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.08)
                    .ok();
                osc.start().ok();
                osc.stop_with_when(t + 0.1).ok();
            }
        }

        /// Point - two-note ding
        fn play_point(&self, ctx: &AudioContext, vol: f32) {
            for (i, freq) in [880.0, 1320.0].iter().enumerate() {
                let delay = i as f64 * 0.07;
                if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Sine) {
                    let t = ctx.current_time() + delay;
                    gain.gain().set_value_at_time(vol * 0.35, t).ok();
                    gain.gain()
                        .exponential_ramp_to_value_at_time(0.01, t + 0.15)
                        .ok();
                    osc.start_with_when(t).ok();
                    osc.stop_with_when(t + 0.2).ok();
                }
            }
        }

        /// High score - celebratory
        fn play_high_score(&self, ctx: &AudioContext, vol: f32) {
            for (i, freq) in [500.0, 600.0, 700.0, 800.0, 1000.0].iter().enumerate() {
                let delay = i as f64 * 0.08;
                if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Triangle) {
                    let t = ctx.current_time() + delay;
                    gain.gain().set_value_at_time(vol * 0.25, t).ok();
                    gain.gain()
                        .exponential_ramp_to_value_at_time(0.01, t + 0.25)
                        .ok();
                    osc.start_with_when(t).ok();
                    osc.stop_with_when(t + 0.3).ok();
                }
            }
        }
    }

    impl SoundSink for AudioManager {
        fn play(&mut self, cue: SoundCue) {
            let vol = cue.volume();
            let Some(ctx) = &self.ctx else { return };

            // Browsers keep the context suspended until a user gesture
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            match cue {
                SoundCue::Flap => self.play_flap(ctx, vol),
                SoundCue::Hit => self.play_hit(ctx, vol),
                SoundCue::Point => self.play_point(ctx, vol),
                SoundCue::HighScore => self.play_high_score(ctx, vol),
            }
        }
    }
}
