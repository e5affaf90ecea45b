//! Keyboard events to per-step intents
//!
//! Movement keys are level-triggered: held flags set on press and cleared on
//! release. Jump is edge-triggered: a press queues one request which the next
//! [`InputAdapter::snapshot`] hands out and clears. Auto-repeat keydown events
//! while jump is held do not queue more requests.

use crate::sim::Intents;

/// Named actions the keyboard can trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    MoveLeft,
    MoveRight,
    Jump,
}

impl Action {
    /// Map a DOM `KeyboardEvent.key` value to an action
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" | "a" | "A" => Some(Action::MoveLeft),
            "ArrowRight" | "d" | "D" => Some(Action::MoveRight),
            " " | "ArrowUp" | "w" | "W" => Some(Action::Jump),
            _ => None,
        }
    }
}

/// Accumulates key state between simulation steps
#[derive(Debug, Clone, Default)]
pub struct InputAdapter {
    left_held: bool,
    right_held: bool,
    jump_held: bool,
    jump_pending: bool,
}

impl InputAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle a keydown. Returns true if the key is bound (caller should
    /// suppress the browser default, e.g. page scroll on space).
    pub fn key_down(&mut self, key: &str) -> bool {
        match Action::from_key(key) {
            Some(action) => {
                self.press(action);
                true
            }
            None => false,
        }
    }

    /// Handle a keyup. Returns true if the key is bound.
    pub fn key_up(&mut self, key: &str) -> bool {
        match Action::from_key(key) {
            Some(action) => {
                self.release(action);
                true
            }
            None => false,
        }
    }

    pub fn press(&mut self, action: Action) {
        match action {
            Action::MoveLeft => self.left_held = true,
            Action::MoveRight => self.right_held = true,
            Action::Jump => {
                if !self.jump_held {
                    self.jump_pending = true;
                }
                self.jump_held = true;
            }
        }
    }

    pub fn release(&mut self, action: Action) {
        match action {
            Action::MoveLeft => self.left_held = false,
            Action::MoveRight => self.right_held = false,
            Action::Jump => self.jump_held = false,
        }
    }

    /// Current intents without consuming the jump request
    pub fn peek(&self) -> Intents {
        Intents {
            move_left: self.left_held,
            move_right: self.right_held,
            jump_requested: self.jump_pending,
        }
    }

    /// Intents for the next step; the jump request is consumed
    pub fn snapshot(&mut self) -> Intents {
        let intents = self.peek();
        self.jump_pending = false;
        intents
    }

    /// Drop all held keys and pending requests (focus loss, restart)
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
