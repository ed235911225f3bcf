//! Per-frame simulation step
//!
//! Advances the game by exactly one animation frame. All side effects (sounds,
//! persistence) are returned as [`GameEvent`]s for the caller to execute.

use rand::Rng;

use super::collision::{CollisionKind, bird_collision};
use super::state::{GamePhase, GameState, PipeSide, pipe_pair};

/// Input commands for a single frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Activate action (space bar / click) this frame
    pub flap: bool,
    /// Demo mode - the game flaps for itself
    pub autopilot: bool,
}

/// Something the outside world should react to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Bird flapped while playing
    Flapped,
    /// A pipe pair was passed; carries the new score
    Scored { score: u32 },
    /// Previous best beaten for the first time this run
    NewHighScore { score: u32 },
    /// Bird hit something
    Collided(CollisionKind),
    /// Run ended and should be recorded
    RunFinished { score: u32, high_score: u32 },
}

/// Handle the activate action.
///
/// Start begins play without an impulse, Playing sets the bird's velocity to
/// the lift constant, GameOver restarts the run.
pub fn flap(state: &mut GameState) -> Vec<GameEvent> {
    match state.phase {
        GamePhase::Start => {
            state.phase = GamePhase::Playing;
            log::info!("Run started (seed {})", state.seed);
            Vec::new()
        }
        GamePhase::Playing => {
            state.bird.flap(state.tuning.lift);
            vec![GameEvent::Flapped]
        }
        GamePhase::GameOver => {
            state.reset();
            log::info!("Run restarted");
            Vec::new()
        }
    }
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: &TickInput) -> Vec<GameEvent> {
    let mut events = Vec::new();

    let wants_flap = input.flap || (input.autopilot && autopilot_wants_flap(state));
    if wants_flap {
        events.extend(flap(state));
    }

    if state.phase != GamePhase::Playing {
        return events;
    }

    state.bird.integrate(state.tuning.gravity);
    if state.tuning.rotate_bird {
        state
            .bird
            .update_rotation(state.tuning.rotation_factor, state.tuning.max_rotation);
    }

    if state.frame_count % u64::from(state.tuning.spawn_interval) == 0 {
        spawn_pipe_pair(state);
    }

    advance_pipes(state);
    score_passed_pipes(state, &mut events);

    if let Some(kind) = bird_collision(&state.bird, &state.pipes, state.tuning.ground_line()) {
        state.phase = GamePhase::GameOver;
        log::info!(
            "Run finished: score {} (best {}, {:?})",
            state.score,
            state.high_score,
            kind
        );
        events.push(GameEvent::Collided(kind));
        events.push(GameEvent::RunFinished {
            score: state.score,
            high_score: state.high_score,
        });
    }

    state.frame_count += 1;
    events
}

/// Append a new pair at the right screen edge with a random top height
pub fn spawn_pipe_pair(state: &mut GameState) {
    let top_height = state
        .rng
        .random_range(state.tuning.min_top_height..state.tuning.max_top_height);
    let pair = pipe_pair(state.tuning.screen_width, top_height as f32, &state.tuning);
    state.pipes.extend(pair);
}

/// Scroll pipes left and drop the ones fully off screen
fn advance_pipes(state: &mut GameState) {
    let speed = state.tuning.pipe_speed;
    for pipe in &mut state.pipes {
        pipe.pos.x -= speed;
    }
    state.pipes.retain(|p| p.right_edge() >= 0.0);
}

/// Award a point for each top pipe whose right edge is now left of the bird.
///
/// Uses a crossing test plus the `counted` flag, so a pair scores exactly
/// once no matter how far the pipe moves in a single frame.
fn score_passed_pipes(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let bird_left = state.bird.pos.x;

    for pipe in &mut state.pipes {
        let passed = pipe.right_edge() < bird_left;
        let PipeSide::Top { counted } = &mut pipe.side else {
            continue;
        };
        if *counted || !passed {
            continue;
        }
        *counted = true;

        state.score += 1;
        events.push(GameEvent::Scored { score: state.score });

        if state.score > state.high_score {
            state.high_score = state.score;
            if !state.new_high_score {
                state.new_high_score = true;
                log::info!("New high score!");
                events.push(GameEvent::NewHighScore { score: state.score });
            }
        }
    }
}

/// Demo pilot: aim for the center of the next gap, flap when sinking below it
fn autopilot_wants_flap(state: &GameState) -> bool {
    match state.phase {
        GamePhase::Start | GamePhase::GameOver => true,
        GamePhase::Playing => {
            let bird = &state.bird;
            let target = state
                .pipes
                .iter()
                .find(|p| p.is_top() && p.right_edge() >= bird.pos.x)
                .map(|p| p.size.y + state.tuning.pipe_gap / 2.0)
                .unwrap_or(state.tuning.bird_start_y());

            let center = bird.pos.y + bird.size.y / 2.0;
            bird.vel > 0.0 && center > target + 20.0
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;
    use proptest::prelude::*;
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg32;

    use super::*;
    use crate::sim::state::Pipe;
    use crate::tuning::Tuning;

    /// Playing state with no gravity and no pipe spawns for a long while
    fn hovering_state(high_score: u32) -> GameState {
        let tuning = Tuning {
            gravity: 0.0,
            spawn_interval: 10_000,
            title_screen: false,
            ..Tuning::default()
        };
        let mut state = GameState::new(tuning, 7, high_score).expect("valid tuning");
        // Skip the frame-zero spawn
        state.frame_count = 1;
        state
    }

    fn count(events: &[GameEvent], pred: impl Fn(&GameEvent) -> bool) -> usize {
        events.iter().filter(|&e| pred(e)).count()
    }

    #[test]
    fn test_start_to_playing() {
        let mut state = GameState::new(Tuning::default(), 12345, 0).expect("valid tuning");
        assert_eq!(state.phase, GamePhase::Start);

        // No input - nothing moves
        let events = tick(&mut state, &TickInput::default());
        assert!(events.is_empty());
        assert_eq!(state.phase, GamePhase::Start);
        assert_eq!(state.bird.pos.y, 300.0);
        assert_eq!(state.frame_count, 0);

        // First flap only starts the run, no impulse
        let events = tick(
            &mut state,
            &TickInput {
                flap: true,
                ..Default::default()
            },
        );
        assert!(!events.contains(&GameEvent::Flapped));
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.bird.vel, state.tuning.gravity);
    }

    #[test]
    fn test_rotation_follows_tuning() {
        let mut state = hovering_state(0);
        state.tuning.rotation_factor = 0.1;
        state.tuning.max_rotation = 0.3;
        state.bird.vel = 2.0;

        tick(&mut state, &TickInput::default());
        assert!((state.bird.rotation - 0.2).abs() < 1e-6);

        state.bird.vel = -9.0;
        tick(&mut state, &TickInput::default());
        assert_eq!(state.bird.rotation, -0.3);

        state.tuning.rotate_bird = false;
        state.bird.vel = 5.0;
        tick(&mut state, &TickInput::default());
        assert_eq!(state.bird.rotation, -0.3);
    }

    #[test]
    fn test_seeded_spawn_after_validation() {
        // Smallest valid height range still draws without panicking
        let tuning = Tuning {
            min_top_height: 200,
            max_top_height: 201,
            title_screen: false,
            ..Tuning::default()
        };
        let mut state = GameState::new(tuning, 3, 0).expect("valid tuning");
        tick(&mut state, &TickInput::default());
        assert_eq!(state.pipes[0].size.y, 200.0);
    }

    #[test]
    fn test_flap_sets_lift() {
        let mut state = hovering_state(0);
        state.bird.vel = 6.0;

        assert_eq!(flap(&mut state), vec![GameEvent::Flapped]);
        assert_eq!(state.bird.vel, state.tuning.lift);

        // Repeated flaps don't stack
        flap(&mut state);
        assert_eq!(state.bird.vel, state.tuning.lift);
    }

    #[test]
    fn test_flap_ignored_physics_outside_playing() {
        let mut state = GameState::new(Tuning::default(), 1, 0).expect("valid tuning");
        state.bird.vel = 3.0;
        assert!(flap(&mut state).is_empty());
        assert_eq!(state.bird.vel, 3.0);
    }

    #[test]
    fn test_first_frame_spawns_pair() {
        let mut state = GameState::new(Tuning::compact(), 99, 0).expect("valid tuning");
        tick(&mut state, &TickInput::default());

        assert_eq!(state.pipes.len(), 2);
        let (top, bottom) = (&state.pipes[0], &state.pipes[1]);
        assert_eq!(top.pos.x, bottom.pos.x);
        assert!((top.pos.x - (400.0 - 3.2)).abs() < 1e-4);
        assert_eq!(
            bottom.size.y,
            state.tuning.screen_height - top.size.y - state.tuning.pipe_gap
        );
    }

    #[test]
    fn test_seeded_pipe_geometry() {
        let seed = 4242;
        let mut state = GameState::new(Tuning::default(), seed, 0).expect("valid tuning");
        spawn_pipe_pair(&mut state);

        let mut rng = Pcg32::seed_from_u64(seed);
        let expected_top = rng.random_range(60u32..340) as f32;

        assert_eq!(state.pipes[0].size.y, expected_top);
        assert_eq!(state.pipes[1].pos.y, expected_top + 140.0);
        assert_eq!(state.pipes[1].size.y, 600.0 - expected_top - 140.0);
        assert!((60.0..340.0).contains(&expected_top));
    }

    #[test]
    fn test_spawn_interval() {
        let mut state = hovering_state(0);
        state.tuning.spawn_interval = 120;
        state.frame_count = 119;

        tick(&mut state, &TickInput::default());
        assert!(state.pipes.is_empty());
        assert_eq!(state.frame_count, 120);

        tick(&mut state, &TickInput::default());
        assert_eq!(state.pair_count(), 1);
    }

    #[test]
    fn test_offscreen_pipes_removed() {
        let mut state = hovering_state(0);
        state.pipes.extend(pipe_pair(-68.0, 100.0, &state.tuning));
        // Right edge 2.0 -> -1.2 after one frame
        tick(&mut state, &TickInput::default());
        assert!(state.pipes.is_empty());
    }

    #[test]
    fn test_scores_once_per_pair() {
        let mut state = hovering_state(0);
        // Gap spans 250..390, bird hovers at 300..324
        state.pipes.extend(pipe_pair(100.0, 250.0, &state.tuning));

        let mut events = Vec::new();
        for _ in 0..28 {
            events.extend(tick(&mut state, &TickInput::default()));
        }
        assert_eq!(state.score, 0);

        events.extend(tick(&mut state, &TickInput::default()));
        assert_eq!(state.score, 1);

        for _ in 0..60 {
            events.extend(tick(&mut state, &TickInput::default()));
        }
        assert_eq!(state.score, 1);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(count(&events, |e| matches!(e, GameEvent::Scored { .. })), 1);
    }

    #[test]
    fn test_scoring_does_not_need_exact_edge_alignment() {
        let mut state = hovering_state(0);
        // Speed that never lands the right edge exactly on the bird's left edge
        state.tuning.pipe_speed = 7.3;
        state.pipes.extend(pipe_pair(100.0, 250.0, &state.tuning));

        for _ in 0..20 {
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(state.score, 1);
    }

    #[test]
    fn test_new_high_score_fires_once() {
        let mut state = hovering_state(0);
        for x in [100.0, 300.0, 500.0] {
            let pair = pipe_pair(x, 250.0, &state.tuning);
            state.pipes.extend(pair);
        }

        let mut events = Vec::new();
        for _ in 0..200 {
            events.extend(tick(&mut state, &TickInput::default()));
        }

        assert_eq!(state.score, 3);
        assert_eq!(state.high_score, 3);
        assert_eq!(count(&events, |e| matches!(e, GameEvent::Scored { .. })), 3);
        assert_eq!(
            count(&events, |e| matches!(e, GameEvent::NewHighScore { .. })),
            1
        );
        assert!(events.contains(&GameEvent::NewHighScore { score: 1 }));
    }

    #[test]
    fn test_high_score_needs_strictly_greater() {
        let mut state = hovering_state(2);
        for x in [100.0, 300.0, 500.0] {
            let pair = pipe_pair(x, 250.0, &state.tuning);
            state.pipes.extend(pair);
        }

        let mut events = Vec::new();
        for _ in 0..200 {
            events.extend(tick(&mut state, &TickInput::default()));
        }

        // Tying the best is not a new high score
        assert_eq!(state.high_score, 3);
        assert_eq!(
            events
                .iter()
                .filter(|e| matches!(e, GameEvent::NewHighScore { .. }))
                .collect::<Vec<_>>(),
            vec![&GameEvent::NewHighScore { score: 3 }]
        );
    }

    #[test]
    fn test_top_out_collision() {
        let mut state = hovering_state(0);
        state.tuning.gravity = 0.5;
        state.bird.pos.y = 0.0;
        state.bird.vel = -1.0;

        let events = tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(
            events,
            vec![
                GameEvent::Collided(CollisionKind::Ceiling),
                GameEvent::RunFinished {
                    score: 0,
                    high_score: 0
                },
            ]
        );
    }

    #[test]
    fn test_ground_collision() {
        let mut state = hovering_state(0);
        state.bird.pos.y = state.tuning.screen_height - state.bird.size.y + 1.0;

        let events = tick(&mut state, &TickInput::default());
        assert!(events.contains(&GameEvent::Collided(CollisionKind::Ground)));
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_pipe_collision_ends_run() {
        let mut state = hovering_state(5);
        state.score = 3;
        state.pipes.push(Pipe {
            pos: Vec2::new(100.0, 0.0),
            size: Vec2::new(70.0, 400.0),
            side: PipeSide::Top { counted: false },
        });

        let events = tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(events.contains(&GameEvent::Collided(CollisionKind::Pipe)));
        assert!(events.contains(&GameEvent::RunFinished {
            score: 3,
            high_score: 5
        }));

        // Frozen after game over
        let y = state.bird.pos.y;
        assert!(tick(&mut state, &TickInput::default()).is_empty());
        assert_eq!(state.bird.pos.y, y);
    }

    #[test]
    fn test_restart_after_game_over() {
        let mut state = GameState::new(Tuning::compact(), 5, 0).expect("valid tuning");
        state.pipes.extend(pipe_pair(200.0, 100.0, &state.tuning));
        state.score = 4;
        state.frame_count = 77;
        state.phase = GamePhase::GameOver;

        let events = tick(
            &mut state,
            &TickInput {
                flap: true,
                ..Default::default()
            },
        );
        assert!(!events.contains(&GameEvent::Flapped));
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 0);
        // Spawn timing restarts from zero: fresh pair on the restart frame
        assert_eq!(state.pair_count(), 1);
        assert_eq!(state.frame_count, 1);
        assert!(state.pipes[0].pos.x > 390.0);
    }

    #[test]
    fn test_determinism() {
        let mut state1 = GameState::new(Tuning::default(), 99999, 0).expect("valid tuning");
        let mut state2 = GameState::new(Tuning::default(), 99999, 0).expect("valid tuning");

        let input = TickInput {
            autopilot: true,
            ..Default::default()
        };
        for _ in 0..600 {
            let e1 = tick(&mut state1, &input);
            let e2 = tick(&mut state2, &input);
            assert_eq!(e1, e2);
        }

        assert_eq!(state1.frame_count, state2.frame_count);
        assert_eq!(state1.score, state2.score);
        assert_eq!(state1.pipes.len(), state2.pipes.len());
        assert_eq!(state1.bird.pos, state2.bird.pos);
    }

    proptest! {
        #[test]
        fn prop_semi_implicit_euler(y in 50.0f32..500.0, vel in -10.0f32..10.0) {
            let mut state = hovering_state(0);
            state.tuning.gravity = 0.5;
            state.bird.pos.y = y;
            state.bird.vel = vel;

            tick(&mut state, &TickInput::default());

            let expected_vel = vel + 0.5;
            prop_assert_eq!(state.bird.vel, expected_vel);
            prop_assert_eq!(state.bird.pos.y, y + expected_vel);
        }

        #[test]
        fn prop_rotation_stays_clamped(vel in -50.0f32..50.0) {
            let mut state = hovering_state(0);
            state.bird.vel = vel;
            tick(&mut state, &TickInput::default());
            prop_assert!(state.bird.rotation.abs() <= state.tuning.max_rotation);
        }

        #[test]
        fn prop_score_bounded_by_passed_pairs(seed in any::<u64>()) {
            let mut state = GameState::new(Tuning::default(), seed, 0).expect("valid tuning");
            let input = TickInput { autopilot: true, ..Default::default() };
            let mut spawned = 0u32;
            let mut scored = 0u32;

            for _ in 0..1500 {
                let before = state.pair_count();
                let events = tick(&mut state, &input);
                if state.phase == GamePhase::Playing && state.pair_count() > before {
                    spawned += 1;
                }
                scored += events
                    .iter()
                    .filter(|e| matches!(e, GameEvent::Scored { .. }))
                    .count() as u32;
                if state.phase == GamePhase::GameOver {
                    break;
                }
            }

            prop_assert_eq!(scored, state.score);
            prop_assert!(state.score <= spawned);
            // Every pair on screen shares one x
            for pair in state.pipes.chunks(2) {
                prop_assert_eq!(pair.len(), 2);
                prop_assert_eq!(pair[0].pos.x, pair[1].pos.x);
            }
        }
    }
}
