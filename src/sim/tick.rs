//! Fixed timestep simulation step
//!
//! One call advances the game by exactly one frame. All quantities are in
//! world units per step, so the harness must call this at a fixed rate.

use thiserror::Error;

use super::collision::{first_landing, rects_overlap};
use super::state::{Camera, GameState, GameStatus};

/// Player intent for a single step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Intents {
    /// Left held
    pub move_left: bool,
    /// Right held
    pub move_right: bool,
    /// One-shot jump request (consumed by the input adapter once observed)
    pub jump_requested: bool,
}

/// What happened during a step, for logging and presentation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepReport {
    /// A jump request was honoured
    pub jumped: bool,
    /// Index of the platform the player landed on
    pub landed_on: Option<usize>,
    /// Player fell off the world and was reset
    pub respawned: bool,
    /// Player touched the goal
    pub won: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StepError {
    /// The harness must not step a finished or halted run
    #[error("cannot step while the game is {0:?}")]
    NotRunning(GameStatus),
}

/// Advance the game state by one step
pub fn step(state: &mut GameState, intents: &Intents) -> Result<StepReport, StepError> {
    if !state.is_running() {
        return Err(StepError::NotRunning(state.status()));
    }

    let tuning = state.tuning;
    let mut report = StepReport::default();

    // Jump is resolved against last step's ground contact
    if intents.jump_requested {
        report.jumped = state.request_jump();
    }

    state.steps += 1;

    // Gravity and vertical integration
    state.player.grounded = false;
    state.player.velocity_y += tuning.gravity;
    state.player.pos.y += state.player.velocity_y;

    // At most one landing per step; first platform in list order wins
    let landing = first_landing(
        &state.player.bounds(),
        state.platforms(),
        state.player.velocity_y,
    );
    if let Some(index) = landing {
        let top = state.platforms()[index].top();
        state.player.pos.y = top - state.player.height();
        state.player.velocity_y = 0.0;
        state.player.grounded = true;
        report.landed_on = Some(index);
    }

    // Fell below the world: respawn and keep running
    if state.player.bottom() > state.level().lower_bound() {
        state.reset();
        state.respawns += 1;
        report.respawned = true;
        log::debug!("Player fell off the world (respawn #{})", state.respawns);
    }

    // Left world boundary
    if state.player.pos.x < 0.0 {
        state.player.pos.x = 0.0;
    }

    // Both directions may apply in one step and cancel out
    if intents.move_right {
        state.player.pos.x += tuning.move_speed;
    }
    if intents.move_left {
        state.player.pos.x = (state.player.pos.x - tuning.move_speed).max(0.0);
    }

    state.camera = Camera::follow(state.player.pos.x, tuning.camera_lead);

    if rects_overlap(&state.player.bounds(), state.goal()) {
        state.set_status(GameStatus::Won);
        report.won = true;
        log::info!("Goal reached after {} steps", state.steps);
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::level::Level;
    use crate::sim::rect::Rect;
    use crate::tuning::Tuning;
    use glam::Vec2;
    use proptest::prelude::*;

    const IDLE: Intents = Intents {
        move_left: false,
        move_right: false,
        jump_requested: false,
    };

    fn at(x: f32, y: f32, velocity_y: f32) -> GameState {
        let mut state = GameState::classic();
        state.player.pos = Vec2::new(x, y);
        state.player.velocity_y = velocity_y;
        state
    }

    /// A level with nothing to land on and nothing to fall off
    fn open_sky() -> GameState {
        let level = Level::new(Vec::new(), Rect::new(100_000.0, 0.0, 10.0, 10.0))
            .with_lower_bound(f32::MAX);
        GameState::new(level, Tuning::default())
    }

    #[test]
    fn test_gravity_only_from_spawn() {
        let mut state = GameState::classic();
        state.reset();
        assert_eq!(state.player.pos, Vec2::new(100.0, 100.0));

        for i in 1..=10 {
            let before = state.player.velocity_y;
            let report = step(&mut state, &IDLE).unwrap();
            assert_eq!(report, StepReport::default());
            assert_eq!(state.player.velocity_y, before + 0.5, "step {i}");
            assert!(!state.player.grounded);
        }

        assert_eq!(state.player.velocity_y, 5.0);
        assert_eq!(state.player.pos.y, 127.5);
        assert_eq!(state.player.pos.x, 100.0);
        assert_eq!(state.steps, 10);
    }

    #[test]
    fn test_landing_snaps_to_platform_top() {
        // Bottom sweeps from 490 to 500.5 across the platform top at 500
        let mut state = at(250.0, 440.0, 10.0);
        let report = step(&mut state, &IDLE).unwrap();

        assert_eq!(report.landed_on, Some(0));
        assert_eq!(state.player.pos.y, 450.0);
        assert_eq!(state.player.velocity_y, 0.0);
        assert!(state.player.grounded);
    }

    #[test]
    fn test_standing_player_stays_grounded() {
        let mut state = at(250.0, 450.0, 0.0);
        for _ in 0..120 {
            let report = step(&mut state, &IDLE).unwrap();
            assert_eq!(report.landed_on, Some(0));
            assert_eq!(state.player.pos.y, 450.0);
            assert!(state.player.grounded);
        }
    }

    #[test]
    fn test_side_entry_below_top_falls_through() {
        // Bottom already 20 below the platform top when it reaches the ledge
        let mut state = at(165.0, 470.0, 0.0);
        let right = Intents {
            move_right: true,
            ..IDLE
        };
        for _ in 0..4 {
            let report = step(&mut state, &right).unwrap();
            assert_eq!(report.landed_on, None);
            assert!(!state.player.grounded);
        }
        // Now horizontally over the ledge, still falling
        assert!(state.player.bounds().right() > 200.0);
        assert!(state.player.pos.y > 470.0);
    }

    #[test]
    fn test_first_listed_platform_wins() {
        let goal = Rect::new(5000.0, 0.0, 10.0, 10.0);
        let a = Rect::new(200.0, 500.0, 200.0, 20.0);
        let b = Rect::new(220.0, 505.0, 100.0, 20.0);

        let mut state = GameState::new(Level::new(vec![a, b], goal), Tuning::default());
        state.player.pos = Vec2::new(250.0, 445.0);
        state.player.velocity_y = 6.0;
        let report = step(&mut state, &IDLE).unwrap();
        assert_eq!(report.landed_on, Some(0));
        assert_eq!(state.player.pos.y, 450.0);

        let mut state = GameState::new(Level::new(vec![b, a], goal), Tuning::default());
        state.player.pos = Vec2::new(250.0, 445.0);
        state.player.velocity_y = 6.0;
        let report = step(&mut state, &IDLE).unwrap();
        assert_eq!(report.landed_on, Some(0));
        assert_eq!(state.player.pos.y, 455.0);
    }

    #[test]
    fn test_jump_from_ground() {
        let mut state = at(250.0, 450.0, 0.0);
        step(&mut state, &IDLE).unwrap();
        assert!(state.player.grounded);

        let jump = Intents {
            jump_requested: true,
            ..IDLE
        };
        let report = step(&mut state, &jump).unwrap();
        assert!(report.jumped);
        assert_eq!(report.landed_on, None);
        assert!(!state.player.grounded);
        assert_eq!(state.player.velocity_y, -14.5);
        assert_eq!(state.player.pos.y, 435.5);
    }

    #[test]
    fn test_no_double_jump() {
        let mut state = at(250.0, 300.0, -4.0);
        let jump = Intents {
            jump_requested: true,
            ..IDLE
        };
        let report = step(&mut state, &jump).unwrap();
        assert!(!report.jumped);
        assert_eq!(state.player.velocity_y, -3.5);
    }

    #[test]
    fn test_falling_off_world_respawns() {
        let mut state = at(100.0, 545.0, 10.0);
        let right = Intents {
            move_right: true,
            ..IDLE
        };
        let report = step(&mut state, &right).unwrap();

        assert!(report.respawned);
        assert_eq!(state.status(), GameStatus::Running);
        assert_eq!(state.respawns, 1);
        // Movement still applies after the respawn within the same step
        assert_eq!(state.player.pos, Vec2::new(105.0, 100.0));
        assert_eq!(state.player.velocity_y, 0.0);
        assert_eq!(state.camera.scroll_offset, 0.0);
    }

    #[test]
    fn test_left_boundary() {
        let left = Intents {
            move_left: true,
            ..IDLE
        };
        let mut state = at(2.0, 100.0, 0.0);
        step(&mut state, &left).unwrap();
        assert_eq!(state.player.pos.x, 0.0);
        step(&mut state, &left).unwrap();
        assert_eq!(state.player.pos.x, 0.0);

        let mut state = at(-10.0, 100.0, 0.0);
        step(&mut state, &IDLE).unwrap();
        assert_eq!(state.player.pos.x, 0.0);
    }

    #[test]
    fn test_opposite_intents_cancel() {
        let both = Intents {
            move_left: true,
            move_right: true,
            jump_requested: false,
        };
        let mut state = at(300.0, 100.0, 0.0);
        step(&mut state, &both).unwrap();
        assert_eq!(state.player.pos.x, 300.0);
    }

    #[test]
    fn test_camera_follows_player() {
        let right = Intents {
            move_right: true,
            ..IDLE
        };
        let mut state = at(1000.0, 100.0, 0.0);
        step(&mut state, &right).unwrap();
        assert_eq!(state.player.pos.x, 1005.0);
        assert_eq!(state.camera.scroll_offset, 605.0);

        let mut state = at(150.0, 100.0, 0.0);
        step(&mut state, &right).unwrap();
        assert_eq!(state.camera.scroll_offset, 0.0);
    }

    #[test]
    fn test_reaching_goal_wins_once() {
        let mut state = at(1795.0, 320.0, 0.0);
        let report = step(&mut state, &IDLE).unwrap();
        assert!(report.won);
        assert_eq!(state.status(), GameStatus::Won);

        // The step refuses to run again and leaves the state alone
        let snapshot = state.player.clone();
        for _ in 0..5 {
            assert_eq!(
                step(&mut state, &IDLE),
                Err(StepError::NotRunning(GameStatus::Won))
            );
        }
        assert_eq!(state.player, snapshot);
        assert_eq!(state.status(), GameStatus::Won);
    }

    #[test]
    fn test_resume_inside_goal_wins_again() {
        let mut state = at(1795.0, 320.0, 0.0);
        step(&mut state, &IDLE).unwrap();
        state.resume();
        let report = step(&mut state, &IDLE).unwrap();
        assert!(report.won);
        assert_eq!(state.status(), GameStatus::Won);
    }

    #[test]
    fn test_restart_after_win() {
        let mut state = at(1795.0, 320.0, 0.0);
        step(&mut state, &IDLE).unwrap();
        state.restart();
        let report = step(&mut state, &IDLE).unwrap();
        assert!(!report.won);
        assert!(state.is_running());
        assert_eq!(state.player.pos, Vec2::new(100.0, 100.5));
    }

    #[test]
    fn test_restart_from_ledge_win_cannot_jump_midair() {
        let ledge = Rect::new(1700.0, 400.0, 200.0, 20.0);
        let goal = Rect::new(1800.0, 300.0, 20.0, 100.0);
        let mut state = GameState::new(Level::new(vec![ledge], goal), Tuning::default());
        state.player.pos = Vec2::new(1795.0, 349.0);

        let report = step(&mut state, &IDLE).unwrap();
        assert_eq!(report.landed_on, Some(0));
        assert!(report.won);
        assert!(state.player.grounded);

        state.restart();
        assert!(!state.player.grounded);

        let jump = Intents {
            jump_requested: true,
            ..IDLE
        };
        let report = step(&mut state, &jump).unwrap();
        assert!(!report.jumped);
        assert_eq!(state.player.velocity_y, 0.5);
    }

    #[test]
    fn test_stopped_game_refuses_step() {
        let mut state = GameState::classic();
        state.stop();
        assert_eq!(
            step(&mut state, &IDLE),
            Err(StepError::NotRunning(GameStatus::Stopped))
        );
        assert_eq!(state.steps, 0);
    }

    #[test]
    fn test_custom_tuning() {
        let tuning = Tuning {
            gravity: 1.0,
            move_speed: 2.0,
            ..Tuning::default()
        };
        let mut state = open_sky();
        state.tuning = tuning;
        state.player.pos = Vec2::new(10.0, 0.0);
        let right = Intents {
            move_right: true,
            ..IDLE
        };
        step(&mut state, &right).unwrap();
        assert_eq!(state.player.velocity_y, 1.0);
        assert_eq!(state.player.pos, Vec2::new(12.0, 1.0));
    }

    fn intents() -> impl Strategy<Value = Intents> {
        (any::<bool>(), any::<bool>(), any::<bool>()).prop_map(|(l, r, j)| Intents {
            move_left: l,
            move_right: r,
            jump_requested: j,
        })
    }

    proptest! {
        #[test]
        fn prop_x_never_negative(
            x in -200.0f32..3000.0,
            y in -300.0f32..540.0,
            vy in -20.0f32..20.0,
            input in intents(),
        ) {
            let mut state = at(x, y, vy);
            step(&mut state, &input).unwrap();
            prop_assert!(state.player.pos.x >= 0.0);
        }

        #[test]
        fn prop_camera_tracks_player(
            x in -200.0f32..3000.0,
            y in -300.0f32..540.0,
            input in intents(),
        ) {
            let mut state = at(x, y, 0.0);
            step(&mut state, &input).unwrap();
            let expected = (state.player.pos.x - 400.0).max(0.0);
            prop_assert_eq!(state.camera.scroll_offset, expected);
            prop_assert!(state.camera.scroll_offset >= 0.0);
        }

        #[test]
        fn prop_gravity_when_airborne(vy in -30.0f32..30.0, steps in 1usize..60) {
            let mut state = open_sky();
            state.player.velocity_y = vy;
            for _ in 0..steps {
                let before = state.player.velocity_y;
                step(&mut state, &IDLE).unwrap();
                prop_assert_eq!(state.player.velocity_y, before + 0.5);
            }
        }

        #[test]
        fn prop_falling_player_lands_before_passing_through(
            y in 250.0f32..449.0,
            vy in 0.0f32..19.5,
            x in 171.0f32..399.0,
        ) {
            let platform = Rect::new(200.0, 500.0, 200.0, 20.0);
            let level = Level::new(vec![platform], Rect::new(5000.0, 0.0, 10.0, 10.0))
                .with_lower_bound(10_000.0);
            let mut state = GameState::new(level, Tuning::default());
            state.player.pos = Vec2::new(x, y);
            state.player.velocity_y = vy;

            let mut landed = false;
            for _ in 0..200 {
                let report = step(&mut state, &IDLE).unwrap();
                if report.landed_on.is_some() {
                    landed = true;
                    break;
                }
                prop_assert!(state.player.bottom() <= platform.bottom());
            }
            prop_assert!(landed);
            prop_assert_eq!(state.player.pos.y, 450.0);
        }
    }
}
