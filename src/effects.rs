//! Executes the events returned by the simulation
//!
//! Sounds are gated by the profile's sound preference. A finished run is
//! folded into the profile and saved; storage failures are logged and
//! otherwise ignored so the frame loop never stalls.

use crate::audio::{SoundCue, SoundSink};
use crate::persistence::Store;
use crate::profile::Profile;
use crate::sim::GameEvent;

/// Sound cue for an event, if it has one
pub fn cue_for(event: &GameEvent) -> Option<SoundCue> {
    match event {
        GameEvent::Flapped => Some(SoundCue::Flap),
        GameEvent::Scored { .. } => Some(SoundCue::Point),
        GameEvent::NewHighScore { .. } => Some(SoundCue::HighScore),
        GameEvent::Collided(_) => Some(SoundCue::Hit),
        GameEvent::RunFinished { .. } => None,
    }
}

/// Owns the collaborators and the profile they serve
pub struct EffectHandler<S, A> {
    pub profile: Profile,
    store: S,
    sound: A,
    /// Produces the date stamped on history entries
    clock: fn() -> String,
}

impl<S: Store, A: SoundSink> EffectHandler<S, A> {
    /// Load the profile from `store`
    pub fn new(store: S, sound: A) -> Self {
        Self {
            profile: Profile::load(&store),
            store,
            sound,
            clock: crate::profile::today,
        }
    }

    /// Replace the date source
    pub fn with_clock(mut self, clock: fn() -> String) -> Self {
        self.clock = clock;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn sound(&self) -> &A {
        &self.sound
    }

    /// Run every event's side effects in order
    pub fn apply(&mut self, events: &[GameEvent]) {
        for event in events {
            if let Some(cue) = cue_for(event).filter(|_| self.profile.sounds_enabled) {
                self.sound.play(cue);
            }

            if let GameEvent::RunFinished { score, high_score } = *event {
                self.profile.record_run(score, high_score, (self.clock)());
                if let Err(e) = self.profile.save_scores(&mut self.store) {
                    log::warn!("Could not save scores: {e}");
                }
            }
        }
    }

    /// Flip the sound preference
    pub fn toggle_sound(&mut self) {
        match self.profile.toggle_sound(&mut self.store) {
            Ok(on) => log::info!("Sound {}", if on { "on" } else { "off" }),
            Err(e) => log::warn!("Could not save sound preference: {e}"),
        }
    }
}
