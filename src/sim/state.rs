//! Game state and core simulation types
//!
//! Everything the update step reads or writes lives in [`GameState`]. There
//! are no globals: the loop harness owns one value and lends it to `tick::step`
//! and, read-only, to the renderer.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::level::Level;
use super::rect::Rect;
use crate::camera_offset;
use crate::tuning::Tuning;

/// Run status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GameStatus {
    /// Active gameplay
    #[default]
    Running,
    /// Player touched the goal; waiting for restart or stop
    Won,
    /// Halted by the player; only a restart leaves this state
    Stopped,
}

/// The controllable character
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner in world space
    pub pos: Vec2,
    /// Vertical velocity (positive is down)
    pub velocity_y: f32,
    /// Resting on a platform top this step
    pub grounded: bool,
    /// Fixed at creation
    size: Vec2,
}

impl Player {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            pos,
            velocity_y: 0.0,
            grounded: false,
            size,
        }
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn width(&self) -> f32 {
        self.size.x
    }

    pub fn height(&self) -> f32 {
        self.size.y
    }

    /// Current bounding box
    pub fn bounds(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    /// Bottom edge y
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }
}

/// Horizontal scroll, recomputed from the player every step
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Camera {
    pub scroll_offset: f32,
}

impl Camera {
    pub fn follow(player_x: f32, lead: f32) -> Self {
        Self {
            scroll_offset: camera_offset(player_x, lead),
        }
    }
}

/// Complete simulation state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub player: Player,
    pub camera: Camera,
    /// Physics constants
    pub tuning: Tuning,
    /// Steps simulated since the last restart
    pub steps: u64,
    /// Falls off the bottom since the last restart
    pub respawns: u32,
    status: GameStatus,
    level: Level,
}

impl GameState {
    /// Create a running game with the player at the level's start position
    pub fn new(level: Level, tuning: Tuning) -> Self {
        let player = Player::new(level.start(), level.player_size());
        let camera = Camera::follow(player.pos.x, tuning.camera_lead);
        Self {
            player,
            camera,
            tuning,
            steps: 0,
            respawns: 0,
            status: GameStatus::Running,
            level,
        }
    }

    /// The built-in level with default tuning
    pub fn classic() -> Self {
        Self::new(Level::classic(), Tuning::default())
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_running(&self) -> bool {
        self.status == GameStatus::Running
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    pub fn platforms(&self) -> &[Rect] {
        self.level.platforms()
    }

    pub fn goal(&self) -> &Rect {
        self.level.goal()
    }

    pub(crate) fn set_status(&mut self, status: GameStatus) {
        self.status = status;
    }

    /// Apply a jump request. Only a grounded player can jump; returns whether
    /// the jump happened.
    pub fn request_jump(&mut self) -> bool {
        if !self.player.grounded {
            return false;
        }
        self.player.velocity_y = self.tuning.jump_impulse;
        true
    }

    /// Put the player back at the respawn point and re-center the camera.
    /// Status, platforms and goal are untouched.
    pub fn reset(&mut self) {
        self.player.pos = self.level.spawn();
        self.player.velocity_y = 0.0;
        self.player.grounded = false;
        self.camera = Camera::default();
    }

    /// Reset and resume play (the "play again" answer to a win)
    pub fn restart(&mut self) {
        self.reset();
        self.steps = 0;
        self.respawns = 0;
        self.status = GameStatus::Running;
    }

    /// Resume play without moving the player
    pub fn resume(&mut self) {
        self.status = GameStatus::Running;
    }

    /// Halt the run
    pub fn stop(&mut self) {
        self.status = GameStatus::Stopped;
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::classic()
    }
}
