//! Static level description
//!
//! Platforms and the goal never change once a level is built; `GameState`
//! only hands out shared references to them.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::consts::*;

/// The fixed world the player moves through
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Level {
    /// Standable platforms. Order decides which one wins when several pass the
    /// landing test in the same step.
    platforms: Vec<Rect>,
    /// Touching this box wins the level
    goal: Rect,
    /// Player position at game start
    start: Vec2,
    /// Player position after a reset
    spawn: Vec2,
    /// Falling with the player's bottom below this y triggers a reset
    lower_bound: f32,
    /// Player box size
    player_size: Vec2,
}

impl Level {
    pub fn new(platforms: Vec<Rect>, goal: Rect) -> Self {
        Self {
            platforms,
            goal,
            start: Vec2::new(VIEW_WIDTH / 2.0 - PLAYER_WIDTH / 2.0, VIEW_HEIGHT - 100.0),
            spawn: Vec2::new(SPAWN_X, SPAWN_Y),
            lower_bound: VIEW_HEIGHT,
            player_size: Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
        }
    }

    /// The single built-in level: five ledges leading right to a goal post
    pub fn classic() -> Self {
        Self::new(
            vec![
                Rect::new(200.0, 500.0, 200.0, 20.0),
                Rect::new(500.0, 400.0, 150.0, 20.0),
                Rect::new(900.0, 300.0, 200.0, 20.0),
                Rect::new(1300.0, 500.0, 100.0, 20.0),
                Rect::new(1500.0, 400.0, 250.0, 20.0),
            ],
            Rect::new(1800.0, 300.0, 20.0, 100.0),
        )
    }

    pub fn with_start(mut self, start: Vec2) -> Self {
        self.start = start;
        self
    }

    pub fn with_spawn(mut self, spawn: Vec2) -> Self {
        self.spawn = spawn;
        self
    }

    pub fn with_lower_bound(mut self, lower_bound: f32) -> Self {
        self.lower_bound = lower_bound;
        self
    }

    pub fn platforms(&self) -> &[Rect] {
        &self.platforms
    }

    pub fn goal(&self) -> &Rect {
        &self.goal
    }

    pub fn start(&self) -> Vec2 {
        self.start
    }

    pub fn spawn(&self) -> Vec2 {
        self.spawn
    }

    pub fn lower_bound(&self) -> f32 {
        self.lower_bound
    }

    pub fn player_size(&self) -> Vec2 {
        self.player_size
    }

    /// Right edge of the furthest object, for HUD progress
    pub fn extent(&self) -> f32 {
        self.platforms
            .iter()
            .map(Rect::right)
            .fold(self.goal.right(), f32::max)
    }
}

impl Default for Level {
    fn default() -> Self {
        Self::classic()
    }
}
