//! Fixed timestep harness and run lifecycle
//!
//! The platform layer (browser animation frames or a native loop) feeds frame
//! deltas into [`Game::update`]. The harness converts them into whole
//! simulation steps, takes one input snapshot per step, and stops stepping as
//! soon as the run leaves `Running`. Restart and stop are commands issued from
//! outside; the step never restarts itself.

use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};
use crate::input::InputAdapter;
use crate::sim::{GameState, GameStatus, StepError, StepReport, step};

/// Accumulator that turns variable frame times into fixed steps
#[derive(Debug, Clone)]
pub struct FixedTimestep {
    dt: f32,
    max_substeps: u32,
    max_frame_dt: f32,
    accumulator: f32,
}

impl FixedTimestep {
    pub fn new(dt: f32, max_substeps: u32, max_frame_dt: f32) -> Self {
        Self {
            dt,
            max_substeps,
            max_frame_dt,
            accumulator: 0.0,
        }
    }

    /// Add a frame's elapsed time and return how many steps are due
    pub fn advance(&mut self, frame_dt: f32) -> u32 {
        self.accumulator += frame_dt.clamp(0.0, self.max_frame_dt);

        let mut due = 0;
        while self.accumulator >= self.dt && due < self.max_substeps {
            self.accumulator -= self.dt;
            due += 1;
        }

        // Drop the backlog a slow frame could not work off
        if due == self.max_substeps {
            self.accumulator = self.accumulator.min(self.dt);
        }
        due
    }

    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}

impl Default for FixedTimestep {
    fn default() -> Self {
        Self::new(SIM_DT, MAX_SUBSTEPS, MAX_FRAME_DT)
    }
}

/// What one rendered frame's worth of simulation did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameSummary {
    /// Steps simulated this frame
    pub ticks: u32,
    pub jumped: bool,
    pub respawned: bool,
    /// The run was won during this frame
    pub won: bool,
}

/// Game instance owning simulation state, input and timing
#[derive(Debug, Clone)]
pub struct Game {
    pub state: GameState,
    pub input: InputAdapter,
    clock: FixedTimestep,
    paused: bool,
}

impl Game {
    pub fn new(state: GameState) -> Self {
        Self::with_clock(state, FixedTimestep::default())
    }

    pub fn with_clock(state: GameState, clock: FixedTimestep) -> Self {
        Self {
            state,
            input: InputAdapter::new(),
            clock,
            paused: false,
        }
    }

    pub fn status(&self) -> GameStatus {
        self.state.status()
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Run the steps due for `frame_dt` seconds of wall time
    pub fn update(&mut self, frame_dt: f32) -> FrameSummary {
        let mut summary = FrameSummary::default();
        if self.paused || !self.state.is_running() {
            self.clock.reset();
            return summary;
        }

        let due = self.clock.advance(frame_dt);
        for _ in 0..due {
            let report = match self.tick() {
                Ok(report) => report,
                Err(err) => {
                    log::warn!("Step skipped: {err}");
                    break;
                }
            };
            summary.ticks += 1;
            summary.jumped |= report.jumped;
            summary.respawned |= report.respawned;
            if report.won {
                summary.won = true;
                break;
            }
        }

        if !self.state.is_running() {
            self.clock.reset();
        }
        summary
    }

    /// Take one input snapshot and advance exactly one step
    pub fn tick(&mut self) -> Result<StepReport, StepError> {
        let intents = self.input.snapshot();
        step(&mut self.state, &intents)
    }

    /// Reset the player and resume running
    pub fn restart(&mut self) {
        self.state.restart();
        self.input.clear();
        self.clock.reset();
        self.paused = false;
        log::info!("Game restarted");
    }

    /// Halt the run
    pub fn stop(&mut self) {
        self.state.stop();
        self.clock.reset();
        log::info!("Game stopped");
    }

    /// Pausing drops held keys, since release events can be missed while the
    /// window is unfocused.
    pub fn set_paused(&mut self, paused: bool) {
        if paused == self.paused {
            return;
        }
        self.paused = paused;
        self.clock.reset();
        if paused {
            self.input.clear();
        }
        log::info!("{}", if paused { "Paused" } else { "Resumed" });
    }

    pub fn toggle_pause(&mut self) {
        self.set_paused(!self.paused);
    }
}
