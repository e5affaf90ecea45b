//! Shape generation for 2D primitives
//!
//! All shapes are emitted as triangle lists in screen pixels (y down).

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::Vertex;
use crate::sim::Rect;

/// Filled axis-aligned rectangle (two triangles)
pub fn rect(r: &Rect, color: [f32; 4]) -> Vec<Vertex> {
    let (l, t, rt, b) = (r.left(), r.top(), r.right(), r.bottom());
    vec![
        Vertex::new(l, t, color),
        Vertex::new(l, b, color),
        Vertex::new(rt, t, color),
        Vertex::new(rt, t, color),
        Vertex::new(l, b, color),
        Vertex::new(rt, b, color),
    ]
}

/// Full-width vertical gradient from `top` to `bottom`
///
/// `stops` are (offset, color) pairs with offsets ascending in 0..=1; each
/// pair of neighbouring stops becomes one band whose colors the rasterizer
/// interpolates.
pub fn vertical_gradient(
    width: f32,
    top: f32,
    bottom: f32,
    stops: &[(f32, [f32; 4])],
) -> Vec<Vertex> {
    let height = bottom - top;
    let mut vertices = Vec::with_capacity(stops.len().saturating_sub(1) * 6);

    for pair in stops.windows(2) {
        let (o1, c1) = pair[0];
        let (o2, c2) = pair[1];
        let y1 = top + o1 * height;
        let y2 = top + o2 * height;

        vertices.push(Vertex::new(0.0, y1, c1));
        vertices.push(Vertex::new(0.0, y2, c2));
        vertices.push(Vertex::new(width, y1, c1));

        vertices.push(Vertex::new(width, y1, c1));
        vertices.push(Vertex::new(0.0, y2, c2));
        vertices.push(Vertex::new(width, y2, c2));
    }

    vertices
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Thick circular arc between two angles (radians, y-down so PI/2 is below
/// the center). A full turn draws a ring.
pub fn arc_band(
    center: Vec2,
    inner_radius: f32,
    outer_radius: f32,
    theta_start: f32,
    theta_end: f32,
    color: [f32; 4],
    segments: u32,
) -> Vec<Vertex> {
    let segments = segments.max(1);
    let span = theta_end - theta_start;
    let mut vertices = Vec::with_capacity((segments * 6) as usize);

    let point = |r: f32, theta: f32| center + Vec2::new(r * theta.cos(), r * theta.sin());

    for i in 0..segments {
        let theta1 = theta_start + span * (i as f32 / segments as f32);
        let theta2 = theta_start + span * ((i + 1) as f32 / segments as f32);

        let inner1 = point(inner_radius, theta1);
        let outer1 = point(outer_radius, theta1);
        let inner2 = point(inner_radius, theta2);
        let outer2 = point(outer_radius, theta2);

        // Two triangles per segment
        vertices.push(Vertex::new(inner1.x, inner1.y, color));
        vertices.push(Vertex::new(outer1.x, outer1.y, color));
        vertices.push(Vertex::new(inner2.x, inner2.y, color));

        vertices.push(Vertex::new(inner2.x, inner2.y, color));
        vertices.push(Vertex::new(outer1.x, outer1.y, color));
        vertices.push(Vertex::new(outer2.x, outer2.y, color));
    }

    vertices
}

/// Generate vertices for a ring (hollow circle)
pub fn ring(
    center: Vec2,
    inner_radius: f32,
    outer_radius: f32,
    color: [f32; 4],
    segments: u32,
) -> Vec<Vertex> {
    arc_band(center, inner_radius, outer_radius, 0.0, 2.0 * PI, color, segments)
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: [f32; 4] = [1.0, 0.0, 0.0, 1.0];

    #[test]
    fn test_rect_corners() {
        let vertices = rect(&Rect::new(10.0, 20.0, 30.0, 40.0), RED);
        assert_eq!(vertices.len(), 6);
        let xs: Vec<f32> = vertices.iter().map(|v| v.position[0]).collect();
        let ys: Vec<f32> = vertices.iter().map(|v| v.position[1]).collect();
        assert_eq!(xs.iter().cloned().fold(f32::MAX, f32::min), 10.0);
        assert_eq!(xs.iter().cloned().fold(f32::MIN, f32::max), 40.0);
        assert_eq!(ys.iter().cloned().fold(f32::MAX, f32::min), 20.0);
        assert_eq!(ys.iter().cloned().fold(f32::MIN, f32::max), 60.0);
    }

    #[test]
    fn test_gradient_bands() {
        let stops = [(0.0, RED), (0.5, [0.0, 1.0, 0.0, 1.0]), (1.0, RED)];
        let vertices = vertical_gradient(800.0, 0.0, 600.0, &stops);
        assert_eq!(vertices.len(), 12);
        // Second band starts halfway down in the middle color
        assert_eq!(vertices[6].position, [0.0, 300.0]);
        assert_eq!(vertices[6].color, [0.0, 1.0, 0.0, 1.0]);
        assert!(vertical_gradient(800.0, 0.0, 600.0, &stops[..1]).is_empty());
    }

    #[test]
    fn test_circle_stays_within_radius() {
        let center = Vec2::new(100.0, 50.0);
        let vertices = circle(center, 15.0, RED, 24);
        assert_eq!(vertices.len(), 72);
        for v in &vertices {
            let d = Vec2::from(v.position).distance(center);
            assert!(d <= 15.0 + 1e-3);
        }
    }

    #[test]
    fn test_lower_half_arc_is_below_center() {
        let center = Vec2::new(0.0, 0.0);
        let vertices = arc_band(center, 8.0, 10.0, 0.0, PI, RED, 12);
        assert_eq!(vertices.len(), 72);
        for v in &vertices {
            assert!(v.position[1] >= -1e-3);
        }
    }
}
