//! Headless validating backend
//!
//! Performs no GPU work but enforces the full renderer lifecycle contract and
//! records what was submitted. Used as the default backend when no GPU
//! feature is compiled in, and by tests that exercise the frame bracket
//! discipline without a device.

use crate::foundation::math::Mat4;
use crate::render::{Camera, FramePhase, Mesh, PrimitiveKind, RenderResult, Renderer};
use crate::window::Window;

/// Renderer that validates the contract and counts submissions
#[derive(Default)]
pub struct NullRenderer {
    phase: FramePhase,
    width: u32,
    height: u32,
    draws_this_frame: usize,
    frames_submitted: u64,
}

impl NullRenderer {
    /// Create an uninitialized null renderer
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw submissions recorded in the current (or last completed) frame
    #[must_use]
    pub fn draws_this_frame(&self) -> usize {
        self.draws_this_frame
    }

    /// Total frames submitted since initialization
    #[must_use]
    pub fn frames_submitted(&self) -> u64 {
        self.frames_submitted
    }

    /// Current surface size
    #[must_use]
    pub fn surface_size(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

impl Renderer for NullRenderer {
    fn initialize(&mut self, _window: &mut Window, width: u32, height: u32) -> RenderResult<()> {
        self.phase.initialize()?;
        self.width = width;
        self.height = height;
        log::info!("null renderer initialized ({width}x{height})");
        Ok(())
    }

    fn begin_frame(&mut self, camera: &Camera) -> RenderResult<()> {
        self.phase.begin_frame()?;
        self.draws_this_frame = 0;
        log::trace!("begin frame, camera at {:?}", camera.position());
        Ok(())
    }

    fn draw_mesh(&mut self, mesh: &Mesh, _model: &Mat4) -> RenderResult<()> {
        self.phase.ensure_in_frame()?;
        self.draws_this_frame += 1;
        log::trace!("draw mesh, {} triangles", mesh.triangle_count());
        Ok(())
    }

    fn draw_primitive(&mut self, kind: PrimitiveKind, _model: &Mat4) -> RenderResult<()> {
        self.phase.ensure_in_frame()?;
        self.draws_this_frame += 1;
        log::trace!("draw primitive {kind:?}");
        Ok(())
    }

    fn end_frame(&mut self) -> RenderResult<()> {
        self.phase.end_frame()?;
        self.frames_submitted += 1;
        Ok(())
    }

    fn resize(&mut self, width: u32, height: u32) -> RenderResult<()> {
        self.phase.ensure_between_frames()?;
        self.width = width;
        self.height = height;
        log::debug!("null renderer resized to {width}x{height}");
        Ok(())
    }

    fn shutdown(&mut self) {
        if self.phase.shutdown() {
            log::info!("null renderer shut down after {} frames", self.frames_submitted);
        }
    }
}
