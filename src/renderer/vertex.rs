//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
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

/// Colors for game elements
pub mod colors {
    pub const BACKGROUND: [f32; 4] = [0.55, 0.8, 0.95, 1.0];
    pub const LETTERBOX: [f32; 4] = [0.02, 0.02, 0.05, 1.0];
    pub const PLATFORM: [f32; 4] = [0.35, 0.7, 0.25, 1.0];
    pub const PLATFORM_EDGE: [f32; 4] = [0.2, 0.45, 0.15, 1.0];
    pub const ENEMY: [f32; 4] = [0.85, 0.2, 0.25, 1.0];
    pub const ENEMY_EYE: [f32; 4] = [1.0, 0.95, 0.4, 1.0];
    pub const BIRD: [f32; 4] = [0.95, 0.75, 0.2, 1.0];
    pub const BIRD_WING: [f32; 4] = [0.85, 0.55, 0.1, 1.0];
    pub const BEAK: [f32; 4] = [1.0, 0.45, 0.1, 1.0];
    pub const EYE: [f32; 4] = [0.05, 0.05, 0.1, 1.0];
    pub const JETPACK: [f32; 4] = [0.55, 0.55, 0.65, 1.0];
    pub const FLAME: [f32; 4] = [1.0, 0.55, 0.1, 0.9];
    pub const TEXT: [f32; 4] = [0.1, 0.1, 0.2, 1.0];
    pub const TEXT_LIGHT: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const BUTTON: [f32; 4] = [0.25, 0.35, 0.6, 1.0];
    pub const BUTTON_FOCUS: [f32; 4] = [0.35, 0.5, 0.85, 1.0];
    pub const OVERLAY: [f32; 4] = [0.0, 0.0, 0.0, 0.55];
    pub const STATUS: [f32; 4] = [0.1, 0.1, 0.15, 0.8];
    pub const WORK_BG: [f32; 4] = [0.94, 0.94, 0.94, 1.0];
    pub const WORK_BAR: [f32; 4] = [0.2, 0.3, 0.5, 1.0];
    pub const WORK_ROW: [f32; 4] = [0.86, 0.88, 0.92, 1.0];
}
