//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Stable iteration order (platforms in level order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod level;
pub mod rect;
pub mod state;
pub mod tick;

pub use collision::{first_landing, landing_test, rects_overlap};
pub use level::Level;
pub use rect::Rect;
pub use state::{Camera, GameState, GameStatus, Player};
pub use tick::{Intents, StepError, StepReport, step};
