//! Draw buffers: batches of geometry sharing one render state.

use crate::{ColorGradient, TextureHandle, Vertex};
use glam::Vec2;

/// Vertices and triangle indices sharing a render state and draw order.
///
/// Vertex insertion order is draw order within the batch. Indices only ever refer to
/// vertices of the same buffer.
#[derive(Debug, Clone, Default)]
pub struct DrawBuffer {
    vertices: Vec<Vertex>,
    indices: Vec<u32>,
    draw_order: i32,
}

impl DrawBuffer {
    pub fn new(draw_order: i32) -> Self {
        Self {
            vertices: Vec::new(),
            indices: Vec::new(),
            draw_order,
        }
    }

    /// Create a buffer with room for `reserve` vertices (and the indices of as many quads).
    pub fn with_capacity(draw_order: i32, reserve: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(reserve),
            indices: Vec::with_capacity(reserve / 4 * 6),
            draw_order,
        }
    }

    pub fn draw_order(&self) -> i32 {
        self.draw_order
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// True when there is nothing to draw.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Index the next pushed vertex will get.
    #[inline]
    pub fn next_index(&self) -> u32 {
        self.vertices.len() as u32
    }

    #[inline]
    pub fn push_vertex(&mut self, vertex: Vertex) -> u32 {
        let index = self.next_index();
        self.vertices.push(vertex);
        index
    }

    #[inline]
    pub fn push_triangle(&mut self, a: u32, b: u32, c: u32) {
        debug_assert!(a.max(b).max(c) < self.next_index());
        self.indices.extend_from_slice(&[a, b, c]);
    }

    /// Push four vertices as two triangles `{0,1,3}` and `{1,2,3}`. Returns the first index.
    pub fn push_quad(&mut self, quad: [Vertex; 4]) -> u32 {
        let base = self.next_index();
        self.vertices.extend_from_slice(&quad);
        self.indices
            .extend_from_slice(&[base, base + 1, base + 3, base + 1, base + 2, base + 3]);
        base
    }

    pub fn vertex(&self, index: u32) -> &Vertex {
        &self.vertices[index as usize]
    }

    pub fn vertex_mut(&mut self, index: u32) -> &mut Vertex {
        &mut self.vertices[index as usize]
    }

    /// Heap capacity in vertices, kept across [`reset`](Self::reset).
    pub fn capacity(&self) -> usize {
        self.vertices.capacity()
    }

    /// Drop the contents but keep the allocation, retargeting the buffer to `draw_order`.
    pub(crate) fn reset(&mut self, draw_order: i32) {
        self.vertices.clear();
        self.indices.clear();
        self.draw_order = draw_order;
    }
}

/// Render state of a gradient buffer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientKey {
    pub gradient: ColorGradient,
    pub aa: bool,
}

/// Render state of a textured buffer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextureKey {
    pub handle: TextureHandle,
    pub uv_tiling: Vec2,
    pub uv_offset: Vec2,
    pub aa: bool,
}

/// Render state of a text buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextKey {
    pub atlas: TextureHandle,
    pub aa: bool,
}

/// A [`DrawBuffer`] specialized by an extra render-state key.
#[derive(Debug, Clone)]
pub struct KeyedDrawBuffer<K> {
    pub key: K,
    pub buffer: DrawBuffer,
}

impl<K> KeyedDrawBuffer<K> {
    pub fn draw_order(&self) -> i32 {
        self.buffer.draw_order
    }
}

pub type GradientDrawBuffer = KeyedDrawBuffer<GradientKey>;
pub type TexturedDrawBuffer = KeyedDrawBuffer<TextureKey>;
pub type TextDrawBuffer = KeyedDrawBuffer<TextKey>;

/// Which buffer kind (and key) a piece of geometry goes into.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BufferTarget {
    Plain,
    Gradient(GradientKey),
    Textured(TextureKey),
    Text(TextKey),
}
