//! Vertex format for tessellated geometry.

use crate::Color;
use bytemuck::{Pod, Zeroable};
use glam::Vec2;
use static_assertions::const_assert_eq;

/// One GPU vertex: position, texture coordinate and color.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    /// Position in screen space
    pub position: Vec2,
    /// Texture coordinate (unused by plain and gradient buffers)
    pub uv: Vec2,
    pub color: Color,
}

const_assert_eq!(std::mem::size_of::<Vertex>(), 32);

impl Vertex {
    pub const fn new(position: Vec2, uv: Vec2, color: Color) -> Self {
        Self {
            position,
            uv,
            color,
        }
    }

    /// Vertex without texture coordinates.
    pub const fn colored(position: Vec2, color: Color) -> Self {
        Self::new(position, Vec2::ZERO, color)
    }

    /// Get the WGPU vertex buffer layout.
    pub fn vertex_layout() -> wgpu::VertexBufferLayout<'static> {
        const ATTRS: &[wgpu::VertexAttribute] = &wgpu::vertex_attr_array![
            // location 0: position
            0 => Float32x2,
            // location 1: uv
            1 => Float32x2,
            // location 2: color
            2 => Float32x4,
        ];

        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Self>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: ATTRS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_layout_stride() {
        let layout = Vertex::vertex_layout();
        assert_eq!(layout.array_stride, 32);
        assert_eq!(layout.attributes.len(), 3);
        assert_eq!(layout.attributes[2].offset, 16);
    }

    #[test]
    fn test_vertex_bytes() {
        let vertices = [Vertex::colored(Vec2::new(1.0, 2.0), Color::RED)];
        let bytes: &[u8] = bytemuck::cast_slice(&vertices);
        assert_eq!(bytes.len(), 32);
    }
}
