//! WebGPU rendering module
//!
//! The scene builder turns a read-only `GameState` into colored triangles in
//! view pixels; the pipeline maps them to the surface and draws them.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::{RenderError, RenderState};
pub use scene::build_frame;
pub use vertex::{Palette, Vertex};
