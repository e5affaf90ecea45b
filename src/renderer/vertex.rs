//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Colors for game elements (sRGB)
pub mod colors {
    /// Sky gradient stops, top to bottom: (offset 0..1, color)
    pub const SKY: [(f32, [f32; 4]); 5] = [
        (0.0, [0.310, 0.675, 0.996, 1.0]),
        (0.3, [0.0, 0.949, 0.996, 1.0]),
        (0.6, [0.263, 0.914, 0.482, 1.0]),
        (0.8, [0.220, 0.976, 0.843, 1.0]),
        (1.0, [0.176, 0.831, 0.749, 1.0]),
    ];
    pub const PLATFORM: [f32; 4] = [0.0, 0.502, 0.0, 1.0];
    pub const GOAL: [f32; 4] = [1.0, 0.843, 0.0, 1.0];
    pub const FACE: [f32; 4] = [1.0, 0.843, 0.0, 1.0];
    pub const FACE_OUTLINE: [f32; 4] = [1.0, 0.647, 0.0, 1.0];
    pub const FACE_FEATURES: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
    /// Bars outside the view when the surface aspect differs
    pub const LETTERBOX: [f32; 4] = [0.0, 0.0, 0.0, 1.0];

    pub const HC_SKY: [(f32, [f32; 4]); 2] = [
        (0.0, [0.02, 0.02, 0.05, 1.0]),
        (1.0, [0.02, 0.02, 0.05, 1.0]),
    ];
    pub const HC_PLATFORM: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const HC_GOAL: [f32; 4] = [1.0, 0.0, 1.0, 1.0];
}

/// Color set used by the scene builder
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    pub sky: Vec<(f32, [f32; 4])>,
    pub platform: [f32; 4],
    pub goal: [f32; 4],
    pub face: [f32; 4],
    pub face_outline: [f32; 4],
    pub face_features: [f32; 4],
    pub letterbox: [f32; 4],
}

impl Palette {
    pub fn classic() -> Self {
        Self {
            sky: colors::SKY.to_vec(),
            platform: colors::PLATFORM,
            goal: colors::GOAL,
            face: colors::FACE,
            face_outline: colors::FACE_OUTLINE,
            face_features: colors::FACE_FEATURES,
            letterbox: colors::LETTERBOX,
        }
    }

    pub fn high_contrast() -> Self {
        Self {
            sky: colors::HC_SKY.to_vec(),
            platform: colors::HC_PLATFORM,
            goal: colors::HC_GOAL,
            ..Self::classic()
        }
    }

    pub fn for_settings(high_contrast: bool) -> Self {
        if high_contrast {
            Self::high_contrast()
        } else {
            Self::classic()
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::classic()
    }
}
