//! Frame assembly: simulation state to screen-space triangles
//!
//! Pure and read-only. World x is shifted left by the camera offset; world y
//! is used as-is since the level is exactly one screen tall.

use std::f32::consts::PI;

use super::shapes;
use super::vertex::{Palette, Vertex};
use crate::consts::{VIEW_HEIGHT, VIEW_WIDTH};
use crate::sim::{GameState, Rect};

const FACE_SEGMENTS: u32 = 32;
const EYE_SEGMENTS: u32 = 12;
const SMILE_SEGMENTS: u32 = 16;

/// Build every vertex for one frame
pub fn build_frame(state: &GameState, palette: &Palette) -> Vec<Vertex> {
    let scroll = state.camera.scroll_offset;
    let mut vertices = shapes::vertical_gradient(VIEW_WIDTH, 0.0, VIEW_HEIGHT, &palette.sky);

    for platform in state.platforms() {
        let screen = platform.shifted_x(-scroll);
        if on_screen(&screen) {
            vertices.extend(shapes::rect(&screen, palette.platform));
        }
    }

    let goal = state.goal().shifted_x(-scroll);
    if on_screen(&goal) {
        vertices.extend(shapes::rect(&goal, palette.goal));
    }

    vertices.extend(smiley(&state.player.bounds().shifted_x(-scroll), palette));
    vertices
}

/// Player avatar: a smiley face inscribed in its box
pub fn smiley(bounds: &Rect, palette: &Palette) -> Vec<Vertex> {
    let center = bounds.center();
    let radius = bounds.width().min(bounds.height()) / 2.0;
    let mut vertices = Vec::new();

    vertices.extend(shapes::circle(center, radius, palette.face, FACE_SEGMENTS));
    vertices.extend(shapes::ring(
        center,
        radius - 1.0,
        radius + 1.0,
        palette.face_outline,
        FACE_SEGMENTS,
    ));

    let eye_radius = radius * 0.15;
    let eye_dx = radius * 0.3;
    let eye_dy = radius * 0.2;
    for dx in [-eye_dx, eye_dx] {
        let eye = center + glam::Vec2::new(dx, -eye_dy);
        vertices.extend(shapes::circle(
            eye,
            eye_radius,
            palette.face_features,
            EYE_SEGMENTS,
        ));
    }

    let mouth = center + glam::Vec2::new(0.0, radius * 0.1);
    let smile = radius * 0.6;
    vertices.extend(shapes::arc_band(
        mouth,
        smile - 1.5,
        smile + 1.5,
        0.0,
        PI,
        palette.face_features,
        SMILE_SEGMENTS,
    ));

    vertices
}

fn on_screen(r: &Rect) -> bool {
    r.right() > 0.0 && r.left() < VIEW_WIDTH
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Camera;
    use glam::Vec2;

    fn count_color(vertices: &[Vertex], color: [f32; 4]) -> usize {
        vertices.iter().filter(|v| v.color == color).count()
    }

    #[test]
    fn test_start_frame_contents() {
        let state = GameState::classic();
        let palette = Palette::classic();
        let vertices = build_frame(&state, &palette);

        let background = 4 * 6;
        let platforms = 2 * 6; // only the first two ledges are on screen
        let player = smiley(&state.player.bounds(), &palette).len();
        assert_eq!(vertices.len(), background + platforms + player);
        assert_eq!(count_color(&vertices, palette.platform), platforms);
    }

    #[test]
    fn test_camera_shifts_world() {
        let mut state = GameState::classic();
        state.player.pos = Vec2::new(1000.0, 200.0);
        state.camera = Camera::follow(1000.0, 400.0);
        let palette = Palette::classic();
        let vertices = build_frame(&state, &palette);

        // Ledge at 900..1100 is drawn at 300..500
        let platform_xs: Vec<f32> = vertices
            .iter()
            .filter(|v| v.color == palette.platform)
            .map(|v| v.position[0])
            .collect();
        assert!(platform_xs.contains(&300.0));
        assert!(platform_xs.contains(&500.0));
        assert!(!platform_xs.contains(&200.0));

        // Player face centered at 1000 - 600 + 15
        let face = smiley(&Rect::new(400.0, 200.0, 30.0, 50.0), &palette);
        assert_eq!(face[0].position, [415.0, 225.0]);
        assert!(vertices.ends_with(&face));
    }

    #[test]
    fn test_goal_drawn_near_end() {
        let mut state = GameState::classic();
        state.player.pos = Vec2::new(1700.0, 300.0);
        state.camera = Camera::follow(1700.0, 400.0);
        let palette = Palette::high_contrast();
        let vertices = build_frame(&state, &palette);
        assert_eq!(count_color(&vertices, palette.goal), 6);
    }

    #[test]
    fn test_smiley_fits_box() {
        let bounds = Rect::new(0.0, 0.0, 30.0, 50.0);
        let center = bounds.center();
        for v in smiley(&bounds, &Palette::classic()) {
            // Outline extends one pixel past the face radius
            assert!(Vec2::from(v.position).distance(center) <= 16.0 + 1e-3);
        }
    }
}
