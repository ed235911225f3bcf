//! Headless autopilot runs
//!
//! Drives the simulation with the built-in pilot, no rendering. Used by the
//! native binary to exercise a preset end to end.

use crate::audio::SoundSink;
use crate::effects::EffectHandler;
use crate::persistence::Store;
use crate::sim::{GamePhase, GameState, TickInput, tick};
use crate::tuning::{Tuning, TuningError};

/// Frames per demo run before giving up (five minutes at 60 fps)
pub const DEMO_MAX_FRAMES: u32 = 60 * 60 * 5;

/// Outcome of one demo run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub score: u32,
    pub frames: u32,
    /// False when the run hit the frame cap instead of crashing
    pub finished: bool,
}

/// Resolve a preset name (`classic`, `compact`) or a path to a JSON tuning file
pub fn load_tuning(arg: &str) -> Result<Tuning, TuningError> {
    match arg {
        "classic" | "default" => Ok(Tuning::default()),
        "compact" => Ok(Tuning::compact()),
        path => {
            let json = std::fs::read_to_string(path).map_err(|e| TuningError::Read {
                path: path.to_owned(),
                reason: e.to_string(),
            })?;
            Tuning::from_json(&json)
        }
    }
}

/// Play `runs` autopilot runs back to back.
///
/// A run that reaches `max_frames` is abandoned: the state is reset and the
/// run is not recorded in the profile.
pub fn play_runs<S: Store, A: SoundSink>(
    state: &mut GameState,
    effects: &mut EffectHandler<S, A>,
    runs: u32,
    max_frames: u32,
) -> Vec<RunSummary> {
    let input = TickInput {
        autopilot: true,
        ..Default::default()
    };

    let mut summaries = Vec::with_capacity(runs as usize);
    for _ in 0..runs {
        let mut frames = 0;
        let finished = loop {
            let events = tick(state, &input);
            effects.apply(&events);
            frames += 1;
            if state.phase == GamePhase::GameOver {
                break true;
            }
            if frames >= max_frames {
                break false;
            }
        };

        let score = state.score;
        if !finished {
            log::warn!("Run abandoned after {frames} frames at score {score}");
            state.reset();
        }
        summaries.push(RunSummary {
            score,
            frames,
            finished,
        });
    }
    summaries
}
