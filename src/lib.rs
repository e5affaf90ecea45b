//! Canvas Platformer - a single-level side-scrolling platformer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, game state)
//! - `input`: Key events to per-tick intents
//! - `game_loop`: Fixed timestep harness and run lifecycle
//! - `renderer`: WebGPU rendering pipeline
//! - `tuning`: Data-driven physics constants
//! - `settings`: User preferences

pub mod game_loop;
pub mod input;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use game_loop::{FixedTimestep, FrameSummary, Game};
pub use input::{Action, InputAdapter};
pub use settings::{Settings, Toggle};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (one step per 60 Hz display frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;
    /// Longest frame delta fed to the accumulator (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Visible world size (canvas size in CSS pixels)
    pub const VIEW_WIDTH: f32 = 800.0;
    pub const VIEW_HEIGHT: f32 = 600.0;

    /// Player box
    pub const PLAYER_WIDTH: f32 = 30.0;
    pub const PLAYER_HEIGHT: f32 = 50.0;

    /// Respawn point used by reset
    pub const SPAWN_X: f32 = 100.0;
    pub const SPAWN_Y: f32 = 100.0;

    /// Downward acceleration (world units per step²)
    pub const GRAVITY: f32 = 0.5;
    /// Vertical velocity applied by a jump (negative is up)
    pub const JUMP_IMPULSE: f32 = -15.0;
    /// Horizontal distance per step while a move key is held
    pub const MOVE_SPEED: f32 = 5.0;
    /// How far the player may run right before the camera scrolls
    pub const CAMERA_LEAD: f32 = 400.0;
}

/// Horizontal scroll for a player at `x`: never negative
#[inline]
pub fn camera_offset(x: f32, lead: f32) -> f32 {
    (x - lead).max(0.0)
}
