//! Frame lifecycle: initialize, start a frame, draw (optionally in parallel), render, end.

use crate::backend::{Backend, FrameInfo};
use crate::batch::{BatchStore, DrawOrderRange, RenderStats, render_merged};
use crate::config::Config;
use crate::error::{ConfigError, VgError, VgResult};
use crate::tessellator::Drawer;
use astrelis_core::profiling::{self, profile_function, profile_scope};
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::thread;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RendererState {
    Uninitialized,
    Idle,
    InFrame,
    Terminated,
}

impl RendererState {
    fn name(self) -> &'static str {
        match self {
            RendererState::Uninitialized => "uninitialized",
            RendererState::Idle => "idle",
            RendererState::InFrame => "in frame",
            RendererState::Terminated => "terminated",
        }
    }
}

/// Owns the backend and one [`Drawer`] per worker, and drives them through frames.
///
/// ```
/// use astrelis_vg::{Color, Config, StyleOptions, VectorRenderer};
/// # use astrelis_vg::{Backend, BackendError, DrawBuffer, FrameInfo};
/// # use astrelis_vg::{GradientDrawBuffer, TextDrawBuffer, TexturedDrawBuffer};
/// # struct Null;
/// # impl Backend for Null {
/// #     fn initialize(&mut self) -> Result<(), BackendError> { Ok(()) }
/// #     fn terminate(&mut self) {}
/// #     fn start_frame(&mut self, _: &FrameInfo) {}
/// #     fn draw_plain(&mut self, _: &DrawBuffer) {}
/// #     fn draw_gradient(&mut self, _: &GradientDrawBuffer) {}
/// #     fn draw_textured(&mut self, _: &TexturedDrawBuffer) {}
/// #     fn draw_text(&mut self, _: &TextDrawBuffer) {}
/// #     fn end_frame(&mut self) {}
/// # }
/// use glam::Vec2;
///
/// let mut renderer = VectorRenderer::new(Null, Config::default());
/// renderer.initialize()?;
///
/// renderer.start_frame(1)?;
/// if let Some(drawer) = renderer.main_drawer() {
///     drawer.draw_rect(Vec2::ZERO, Vec2::splat(10.0), &StyleOptions::fill(Color::RED), 0.0, 0);
/// }
/// let stats = renderer.render()?;
/// renderer.end_frame()?;
///
/// assert_eq!(stats.draw_calls, 1);
/// # Ok::<(), astrelis_vg::VgError>(())
/// ```
pub struct VectorRenderer<B: Backend> {
    backend: B,
    config: Arc<Config>,
    drawers: Vec<Drawer>,
    active_workers: usize,
    state: RendererState,
    frame: u64,
}

impl<B: Backend> VectorRenderer<B> {
    pub fn new(backend: B, config: Config) -> Self {
        let config = Arc::new(config);
        Self {
            backend,
            drawers: vec![Drawer::for_worker(config.clone(), 0)],
            config,
            active_workers: 1,
            state: RendererState::Uninitialized,
            frame: 0,
        }
    }

    /// Initialize the backend. Must be called once before the first frame.
    pub fn initialize(&mut self) -> VgResult<()> {
        self.expect_state(RendererState::Uninitialized)?;
        self.backend.initialize()?;
        self.state = RendererState::Idle;
        tracing::debug!("Vector renderer initialized");
        Ok(())
    }

    /// Begin a frame with `worker_count` drawers. Zero is reported and treated as one.
    pub fn start_frame(&mut self, worker_count: usize) -> VgResult<()> {
        profile_function!();
        self.expect_state(RendererState::Idle)?;

        let workers = if worker_count == 0 {
            self.config.report(ConfigError::InvalidWorkerCount(worker_count));
            1
        } else {
            worker_count
        };

        while self.drawers.len() < workers {
            let index = self.drawers.len();
            self.drawers.push(Drawer::for_worker(self.config.clone(), index));
        }
        for drawer in &mut self.drawers[..workers] {
            drawer.begin_frame();
        }
        self.active_workers = workers;

        self.backend.start_frame(&FrameInfo {
            frame: self.frame,
            worker_count: workers,
            display_position: self.config.display_position,
            display_size: self.config.display_size,
            framebuffer_scale: self.config.framebuffer_scale,
        });
        self.state = RendererState::InFrame;
        tracing::trace!("Started frame {} with {} workers", self.frame, workers);
        Ok(())
    }

    /// The drawer of worker `index`, if a frame is open and that worker is active in it.
    pub fn drawer(&mut self, index: usize) -> Option<&mut Drawer> {
        self.drawers_mut().get_mut(index)
    }

    /// The drawer of worker 0. `None` outside a frame.
    pub fn main_drawer(&mut self) -> Option<&mut Drawer> {
        self.drawer(0)
    }

    /// All drawers active this frame, in worker order. Empty outside a frame.
    pub fn drawers_mut(&mut self) -> &mut [Drawer] {
        let active = if self.state == RendererState::InFrame {
            self.active_workers
        } else {
            0
        };
        &mut self.drawers[..active]
    }

    /// Read access to a worker's buffers, in or out of a frame.
    pub fn store(&self, index: usize) -> Option<&BatchStore> {
        self.drawers.get(index).map(Drawer::store)
    }

    /// Run `draw` once per active worker, each on its own thread with its own drawer.
    ///
    /// With a single worker the closure runs on the calling thread. Either way a panicking
    /// worker is reported as [`VgError::WorkerPanicked`] and the frame stays open.
    pub fn draw_parallel<F>(&mut self, draw: F) -> VgResult<()>
    where
        F: Fn(usize, &mut Drawer) + Sync,
    {
        profile_function!();
        self.expect_state(RendererState::InFrame)?;

        let drawers = &mut self.drawers[..self.active_workers];
        if drawers.len() == 1 {
            let drawer = &mut drawers[0];
            return panic::catch_unwind(AssertUnwindSafe(|| draw(0, drawer)))
                .map_err(|_| VgError::WorkerPanicked(0));
        }

        let draw = &draw;
        thread::scope(|scope| {
            let mut handles = Vec::with_capacity(drawers.len());
            let mut spawn_error = None;
            for (index, drawer) in drawers.iter_mut().enumerate() {
                let spawned = thread::Builder::new()
                    .name(format!("astrelis-vg-worker-{}", index))
                    .spawn_scoped(scope, move || {
                        profile_scope!("vg_worker");
                        draw(index, drawer)
                    });
                match spawned {
                    Ok(handle) => handles.push((index, handle)),
                    Err(err) => {
                        spawn_error = Some(VgError::WorkerSpawn(err));
                        break;
                    }
                }
            }

            // Join everything before reporting so no panicked thread is left unjoined.
            let mut result = spawn_error.map_or(Ok(()), Err);
            for (index, handle) in handles {
                if handle.join().is_err() && result.is_ok() {
                    result = Err(VgError::WorkerPanicked(index));
                }
            }
            result
        })
    }

    /// Submit every worker's buffers to the backend in draw order.
    pub fn render(&mut self) -> VgResult<RenderStats> {
        profile_function!();
        self.expect_state(RendererState::InFrame)?;

        let stores: Vec<_> = self.drawers[..self.active_workers]
            .iter()
            .map(Drawer::store)
            .collect();
        let stats = render_merged(&stores, &mut self.backend, self.config.traversal);
        tracing::trace!(
            "Frame {}: {} draw calls, {} vertices, {} indices",
            self.frame,
            stats.draw_calls,
            stats.vertices,
            stats.indices
        );
        Ok(stats)
    }

    /// Finish the frame: notify the backend and clear every drawer's buffers.
    pub fn end_frame(&mut self) -> VgResult<()> {
        profile_function!();
        self.expect_state(RendererState::InFrame)?;

        self.backend.end_frame();
        for drawer in &mut self.drawers[..self.active_workers] {
            drawer.end_frame();
        }
        self.frame += 1;
        self.state = RendererState::Idle;
        profiling::new_frame();
        Ok(())
    }

    /// Tear down the backend. Later lifecycle calls fail with [`VgError::InvalidState`].
    pub fn terminate(&mut self) {
        match self.state {
            RendererState::Terminated => return,
            RendererState::Uninitialized => {}
            RendererState::Idle | RendererState::InFrame => self.backend.terminate(),
        }
        self.drawers.truncate(1);
        self.active_workers = 1;
        self.state = RendererState::Terminated;
        tracing::debug!("Vector renderer terminated after {} frames", self.frame);
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Number of completed frames.
    pub fn frame_count(&self) -> u64 {
        self.frame
    }

    pub fn worker_count(&self) -> usize {
        self.active_workers
    }

    pub fn is_in_frame(&self) -> bool {
        self.state == RendererState::InFrame
    }

    /// Draw-order range across the active workers' live buffers.
    pub fn draw_order_range(&self) -> Option<DrawOrderRange> {
        self.drawers[..self.active_workers]
            .iter()
            .filter_map(|drawer| drawer.store().draw_order_range())
            .reduce(|a, b| DrawOrderRange {
                min: a.min.min(b.min),
                max: a.max.max(b.max),
            })
    }

    fn expect_state(&self, expected: RendererState) -> VgResult<()> {
        if self.state == expected {
            Ok(())
        } else {
            Err(VgError::InvalidState {
                expected: expected.name(),
                actual: self.state.name(),
            })
        }
    }
}

impl<B: Backend> Drop for VectorRenderer<B> {
    fn drop(&mut self) {
        self.terminate();
    }
}
