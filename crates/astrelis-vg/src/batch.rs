//! Per-frame batch store.
//!
//! Owns every [`DrawBuffer`] emitted during a frame, one list per buffer kind, and hands
//! them to a [`Backend`] in draw-order. Lookup is a linear scan over the live buffers of one
//! kind; the number of distinct render states per frame is small next to the vertex count.

use crate::backend::Backend;
use crate::buffer::{
    BufferTarget, DrawBuffer, GradientDrawBuffer, GradientKey, KeyedDrawBuffer, TextDrawBuffer,
    TextKey, TextureKey, TexturedDrawBuffer,
};
use crate::config::{Config, DrawOrderTraversal};
use astrelis_core::profiling::profile_function;

/// Inclusive range of draw orders with at least one live buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawOrderRange {
    pub min: i32,
    pub max: i32,
}

impl DrawOrderRange {
    fn include(range: &mut Option<Self>, order: i32) {
        *range = Some(match *range {
            Some(r) => Self {
                min: r.min.min(order),
                max: r.max.max(order),
            },
            None => Self {
                min: order,
                max: order,
            },
        });
    }

    pub fn contains(&self, order: i32) -> bool {
        (self.min..=self.max).contains(&order)
    }
}

/// Counters from one [`BatchStore::render`] pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub draw_calls: usize,
    pub vertices: usize,
    pub indices: usize,
}

impl RenderStats {
    fn record(&mut self, buffer: &DrawBuffer) {
        self.draw_calls += 1;
        self.vertices += buffer.vertex_count();
        self.indices += buffer.index_count();
    }
}

/// Buffers live in the current frame, segregated by kind.
#[derive(Debug)]
pub struct BatchStore {
    plain: Vec<KeyedDrawBuffer<()>>,
    gradient: Vec<GradientDrawBuffer>,
    textured: Vec<TexturedDrawBuffer>,
    text: Vec<TextDrawBuffer>,
    range: Option<DrawOrderRange>,
    /// Cleared buffers whose allocations are reused by later frames.
    pool: Vec<DrawBuffer>,
    frame: u64,
    gc_interval: u32,
    buffer_reserve: usize,
}

impl BatchStore {
    pub fn new(config: &Config) -> Self {
        Self {
            plain: Vec::new(),
            gradient: Vec::new(),
            textured: Vec::new(),
            text: Vec::new(),
            range: None,
            pool: Vec::new(),
            frame: 0,
            gc_interval: config.gc_interval,
            buffer_reserve: config.buffer_reserve,
        }
    }

    /// Get or create the plain buffer for `draw_order`.
    pub fn plain_buffer(&mut self, draw_order: i32) -> &mut DrawBuffer {
        &mut self.get_or_create_plain(draw_order).buffer
    }

    /// Get or create the gradient buffer matching `draw_order` and `key`.
    pub fn gradient_buffer(&mut self, draw_order: i32, key: GradientKey) -> &mut GradientDrawBuffer {
        get_or_create(
            &mut self.gradient,
            &mut self.pool,
            &mut self.range,
            self.buffer_reserve,
            draw_order,
            key,
        )
    }

    /// Get or create the textured buffer matching `draw_order` and `key`.
    pub fn textured_buffer(&mut self, draw_order: i32, key: TextureKey) -> &mut TexturedDrawBuffer {
        get_or_create(
            &mut self.textured,
            &mut self.pool,
            &mut self.range,
            self.buffer_reserve,
            draw_order,
            key,
        )
    }

    /// Get or create the text buffer matching `draw_order` and `key`.
    pub fn text_buffer(&mut self, draw_order: i32, key: TextKey) -> &mut TextDrawBuffer {
        get_or_create(
            &mut self.text,
            &mut self.pool,
            &mut self.range,
            self.buffer_reserve,
            draw_order,
            key,
        )
    }

    /// Get or create whichever buffer `target` names.
    pub fn buffer_for(&mut self, draw_order: i32, target: &BufferTarget) -> &mut DrawBuffer {
        match target {
            BufferTarget::Plain => self.plain_buffer(draw_order),
            BufferTarget::Gradient(key) => &mut self.gradient_buffer(draw_order, *key).buffer,
            BufferTarget::Textured(key) => &mut self.textured_buffer(draw_order, *key).buffer,
            BufferTarget::Text(key) => &mut self.text_buffer(draw_order, *key).buffer,
        }
    }

    fn get_or_create_plain(&mut self, draw_order: i32) -> &mut KeyedDrawBuffer<()> {
        get_or_create(
            &mut self.plain,
            &mut self.pool,
            &mut self.range,
            self.buffer_reserve,
            draw_order,
            (),
        )
    }

    pub fn plain_buffers(&self) -> impl Iterator<Item = &DrawBuffer> {
        self.plain.iter().map(|entry| &entry.buffer)
    }

    pub fn gradient_buffers(&self) -> &[GradientDrawBuffer] {
        &self.gradient
    }

    pub fn textured_buffers(&self) -> &[TexturedDrawBuffer] {
        &self.textured
    }

    pub fn text_buffers(&self) -> &[TextDrawBuffer] {
        &self.text
    }

    /// `None` when no buffer is live.
    pub fn draw_order_range(&self) -> Option<DrawOrderRange> {
        self.range
    }

    /// Number of live buffers across all kinds.
    pub fn buffer_count(&self) -> usize {
        self.plain.len() + self.gradient.len() + self.textured.len() + self.text.len()
    }

    /// Total vertices across all live buffers.
    pub fn vertex_count(&self) -> usize {
        self.all_buffers().map(DrawBuffer::vertex_count).sum()
    }

    /// Cleared buffers waiting for reuse.
    pub fn pooled_count(&self) -> usize {
        self.pool.len()
    }

    /// Number of completed frames.
    pub fn frame_count(&self) -> u64 {
        self.frame
    }

    fn all_buffers(&self) -> impl Iterator<Item = &DrawBuffer> {
        self.plain
            .iter()
            .map(|e| &e.buffer)
            .chain(self.gradient.iter().map(|e| &e.buffer))
            .chain(self.textured.iter().map(|e| &e.buffer))
            .chain(self.text.iter().map(|e| &e.buffer))
    }

    /// Distinct draw orders of the live buffers, sorted in `traversal` direction.
    pub fn draw_orders(&self, traversal: DrawOrderTraversal) -> Vec<i32> {
        sorted_orders(std::slice::from_ref(&self), traversal)
    }

    /// Submit every non-empty buffer to `backend`.
    ///
    /// Draw orders are visited in `traversal` direction. Within one draw order the kinds go
    /// plain, gradient, textured, text, each in creation order.
    pub fn render<B: Backend + ?Sized>(
        &self,
        backend: &mut B,
        traversal: DrawOrderTraversal,
    ) -> RenderStats {
        render_merged(&[self], backend, traversal)
    }

    /// Clear every buffer, release them from the frame and advance the frame counter.
    ///
    /// With a non-zero `gc_interval` the cleared allocations go to the pool, which is itself
    /// released every `gc_interval` frames.
    pub fn end_frame(&mut self) {
        profile_function!();

        self.discard();
        self.frame += 1;

        if self.gc_interval > 0
            && self.frame % u64::from(self.gc_interval) == 0
            && !self.pool.is_empty()
        {
            tracing::debug!(
                "Releasing {} pooled draw buffers at frame {}",
                self.pool.len(),
                self.frame
            );
            self.pool.clear();
            self.pool.shrink_to_fit();
        }
    }

    /// Drop every live buffer without finishing the frame.
    pub(crate) fn discard(&mut self) {
        let pooling = self.gc_interval > 0;
        let pool = &mut self.pool;
        let mut recycle = |mut buffer: DrawBuffer| {
            buffer.reset(0);
            if pooling {
                pool.push(buffer);
            }
        };

        self.plain.drain(..).for_each(|e| recycle(e.buffer));
        self.gradient.drain(..).for_each(|e| recycle(e.buffer));
        self.textured.drain(..).for_each(|e| recycle(e.buffer));
        self.text.drain(..).for_each(|e| recycle(e.buffer));

        self.range = None;
    }
}

fn get_or_create<'a, K: PartialEq>(
    list: &'a mut Vec<KeyedDrawBuffer<K>>,
    pool: &mut Vec<DrawBuffer>,
    range: &mut Option<DrawOrderRange>,
    reserve: usize,
    draw_order: i32,
    key: K,
) -> &'a mut KeyedDrawBuffer<K> {
    if let Some(index) = list
        .iter()
        .position(|entry| entry.buffer.draw_order() == draw_order && entry.key == key)
    {
        return &mut list[index];
    }

    let buffer = match pool.pop() {
        Some(mut buffer) => {
            buffer.reset(draw_order);
            buffer
        }
        None => DrawBuffer::with_capacity(draw_order, reserve),
    };
    tracing::trace!("Created draw buffer at order {}", draw_order);

    DrawOrderRange::include(range, draw_order);

    let index = list.len();
    list.push(KeyedDrawBuffer { key, buffer });
    &mut list[index]
}

fn sorted_orders(stores: &[&BatchStore], traversal: DrawOrderTraversal) -> Vec<i32> {
    let mut orders: Vec<i32> = stores
        .iter()
        .flat_map(|store| store.all_buffers().map(DrawBuffer::draw_order))
        .collect();
    orders.sort_unstable();
    orders.dedup();
    if traversal == DrawOrderTraversal::Descending {
        orders.reverse();
    }
    orders
}

/// Submit the buffers of several stores (one per worker), grouped by draw order.
///
/// For each draw order and kind, stores are visited in slice order and buffers in creation
/// order.
pub fn render_merged<B: Backend + ?Sized>(
    stores: &[&BatchStore],
    backend: &mut B,
    traversal: DrawOrderTraversal,
) -> RenderStats {
    profile_function!();

    let mut stats = RenderStats::default();

    for order in sorted_orders(stores, traversal) {
        let at_order = |buffer: &DrawBuffer| buffer.draw_order() == order && !buffer.is_empty();

        for store in stores {
            for entry in store.plain.iter().filter(|e| at_order(&e.buffer)) {
                backend.draw_plain(&entry.buffer);
                stats.record(&entry.buffer);
            }
        }
        for store in stores {
            for entry in store.gradient.iter().filter(|e| at_order(&e.buffer)) {
                backend.draw_gradient(entry);
                stats.record(&entry.buffer);
            }
        }
        for store in stores {
            for entry in store.textured.iter().filter(|e| at_order(&e.buffer)) {
                backend.draw_textured(entry);
                stats.record(&entry.buffer);
            }
        }
        for store in stores {
            for entry in store.text.iter().filter(|e| at_order(&e.buffer)) {
                backend.draw_text(entry);
                stats.record(&entry.buffer);
            }
        }
    }

    stats
}
