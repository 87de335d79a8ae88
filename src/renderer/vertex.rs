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

/// Colors for game elements
pub mod colors {
    pub const BACKGROUND: [f32; 4] = [0.02, 0.02, 0.05, 1.0];
    pub const PLAYER: [f32; 4] = [0.2, 0.8, 0.4, 1.0];
    pub const PLAYER_OUTLINE: [f32; 4] = [0.6, 1.0, 0.7, 1.0];
    /// Player after the run ended
    pub const PLAYER_DOWN: [f32; 4] = [0.35, 0.35, 0.4, 1.0];
    pub const PARTICLE: [f32; 4] = [1.0, 0.85, 0.3, 1.0];
    pub const ENEMY: [f32; 4] = [1.0, 0.3, 0.25, 1.0];

    /// High contrast palette
    pub mod contrast {
        pub const BACKGROUND: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
        pub const PLAYER: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
        pub const PARTICLE: [f32; 4] = [1.0, 1.0, 0.0, 1.0];
        pub const ENEMY: [f32; 4] = [1.0, 0.0, 1.0, 1.0];
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_layout_matches_struct() {
        let layout = Vertex::desc();
        assert_eq!(layout.array_stride, 24);
        assert_eq!(layout.attributes.len(), 2);
        assert_eq!(bytemuck::bytes_of(&Vertex::new(1.0, 2.0, [0.0; 4])).len(), 24);
    }
}
