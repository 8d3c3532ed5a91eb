//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// 2D vertex with position and color
///
/// Positions are in field units until [`RenderState`](super::RenderState)
/// maps them to clip space.
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

/// Replace the alpha channel of a color
pub fn with_alpha(color: [f32; 4], alpha: f32) -> [f32; 4] {
    [color[0], color[1], color[2], alpha]
}

/// Colors for game elements
pub mod colors {
    /// Outside the playfield (letterbox bars)
    pub const LETTERBOX: [f32; 4] = [0.02, 0.02, 0.05, 1.0];
    pub const FIELD: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
    pub const NET: [f32; 4] = [0.2, 0.2, 0.2, 1.0];
    pub const PADDLE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const BALL: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    /// Score flash, alpha set per frame
    pub const FLASH: [f32; 4] = [1.0, 1.0, 1.0, 0.0];
    pub const OVERLAY: [f32; 4] = [0.0, 0.0, 0.0, 0.7];
    pub const PAUSE_PANEL: [f32; 4] = [0.0, 0.0, 0.0, 0.5];
    /// Player 1 sparks
    pub const LEFT_ACCENT: [f32; 4] = [0.3, 0.8, 1.0, 1.0];
    /// Player 2 sparks
    pub const RIGHT_ACCENT: [f32; 4] = [1.0, 0.45, 0.3, 1.0];
    pub const GOLD: [f32; 4] = [1.0, 0.84, 0.0, 1.0];
}
