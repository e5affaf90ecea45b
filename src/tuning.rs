//! Data-driven physics constants
//!
//! Every field defaults to the design value in [`crate::consts`], so a partial
//! JSON document only overrides what it names.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{CAMERA_LEAD, GRAVITY, JUMP_IMPULSE, MOVE_SPEED};

#[derive(Debug, Error)]
pub enum TuningError {
    #[error("invalid tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("tuning value `{field}` is out of range: {value}")]
    OutOfRange { field: &'static str, value: f32 },
}

/// Physics constants consumed by the update step
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Added to vertical velocity every step
    pub gravity: f32,
    /// Vertical velocity set by a grounded jump (negative is up)
    pub jump_impulse: f32,
    /// Horizontal distance per step for each held direction
    pub move_speed: f32,
    /// Player x at which the camera starts scrolling
    pub camera_lead: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            jump_impulse: JUMP_IMPULSE,
            move_speed: MOVE_SPEED,
            camera_lead: CAMERA_LEAD,
        }
    }
}

impl Tuning {
    /// Parse and validate a JSON tuning document
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values that would break the step's invariants
    pub fn validate(&self) -> Result<(), TuningError> {
        let checks = [
            ("gravity", self.gravity, self.gravity > 0.0),
            ("jump_impulse", self.jump_impulse, self.jump_impulse < 0.0),
            ("move_speed", self.move_speed, self.move_speed > 0.0),
            ("camera_lead", self.camera_lead, self.camera_lead >= 0.0),
        ];
        for (field, value, ok) in checks {
            if !value.is_finite() || !ok {
                return Err(TuningError::OutOfRange { field, value });
            }
        }
        Ok(())
    }
}
