//! Rendering abstraction
//!
//! Defines the minimal polymorphic surface that lets the engine drive any GPU
//! backend uniformly: frame bracketing, draw submission, resize, and teardown.
//! Concrete backends own incompatible native resource handles; none of those
//! types cross this boundary.

pub mod backend;
pub mod camera;
pub mod mesh;

pub use camera::Camera;
pub use mesh::{Mesh, Vertex};

use crate::foundation::math::Mat4;
use crate::window::Window;
use thiserror::Error;

/// Rendering errors
#[derive(Error, Debug)]
pub enum RenderError {
    /// The native graphics API could not bind to the window surface
    ///
    /// Fatal to the engine: there is no fallback backend selection at runtime.
    #[error("backend initialization failed: {0}")]
    BackendInit(String),

    /// An operation was called in the wrong lifecycle state
    ///
    /// Draw calls outside a begin/end bracket, resize inside one, and similar
    /// misuses are programming errors in the caller, not runtime conditions to
    /// recover from.
    #[error("invalid renderer state: {0}")]
    InvalidState(String),

    /// A rendering operation failed during execution
    #[error("rendering failed: {0}")]
    RenderingFailed(String),
}

/// Result type for rendering operations
pub type RenderResult<T> = Result<T, RenderError>;

/// Built-in primitive shapes a backend can draw without a loaded mesh
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveKind {
    /// A single unit triangle
    Triangle,
    /// A unit cube centered at the origin
    Cube,
}

/// Rendering backend contract
///
/// Exactly one backend is active per process, chosen at build time (see
/// [`backend::create_renderer`]). Lifecycle:
///
/// ```text
/// Uninitialized -> Initialized <-> InFrame, terminal Shutdown
/// ```
///
/// `begin_frame` enters `InFrame` and must be paired with exactly one
/// `end_frame` before the next `begin_frame`. Draw submissions are valid only
/// inside that bracket; `resize` and `shutdown` only outside it. `end_frame`
/// submits the pass but does not present; presentation is the engine's job.
pub trait Renderer {
    /// Acquire the GPU context and surface bound to the given window
    ///
    /// # Errors
    /// [`RenderError::BackendInit`] if the graphics API cannot bind to the
    /// surface; the engine treats this as fatal.
    fn initialize(&mut self, window: &mut Window, width: u32, height: u32) -> RenderResult<()>;

    /// Start a render pass using the camera's view and projection transforms
    fn begin_frame(&mut self, camera: &Camera) -> RenderResult<()>;

    /// Submit geometry loaded by the application
    ///
    /// The mesh is borrowed for the duration of the call only; backends must
    /// not retain references to it.
    fn draw_mesh(&mut self, mesh: &Mesh, model: &Mat4) -> RenderResult<()>;

    /// Submit a built-in primitive
    fn draw_primitive(&mut self, kind: PrimitiveKind, model: &Mat4) -> RenderResult<()>;

    /// Finalize and submit the render pass
    fn end_frame(&mut self) -> RenderResult<()>;

    /// Reconfigure the backend surface and targets for a new window size
    fn resize(&mut self, width: u32, height: u32) -> RenderResult<()>;

    /// Release all backend GPU resources
    ///
    /// Idempotent: calling it twice must not fault.
    fn shutdown(&mut self);
}

/// Lifecycle tracker shared by backend implementations
///
/// Backends embed one of these and route every operation through it so the
/// begin/end bracket discipline is enforced uniformly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FramePhase {
    /// No GPU context acquired yet
    #[default]
    Uninitialized,
    /// Context acquired, between frames
    Initialized,
    /// Inside a begin/end bracket
    InFrame,
    /// Resources released; terminal
    Shutdown,
}

impl FramePhase {
    /// Transition `Uninitialized -> Initialized`
    pub fn initialize(&mut self) -> RenderResult<()> {
        match self {
            Self::Uninitialized => {
                *self = Self::Initialized;
                Ok(())
            }
            other => Err(RenderError::InvalidState(format!(
                "initialize called in {other:?}"
            ))),
        }
    }

    /// Transition `Initialized -> InFrame`
    pub fn begin_frame(&mut self) -> RenderResult<()> {
        match self {
            Self::Initialized => {
                *self = Self::InFrame;
                Ok(())
            }
            other => Err(RenderError::InvalidState(format!(
                "begin_frame called in {other:?}"
            ))),
        }
    }

    /// Transition `InFrame -> Initialized`
    pub fn end_frame(&mut self) -> RenderResult<()> {
        match self {
            Self::InFrame => {
                *self = Self::Initialized;
                Ok(())
            }
            other => Err(RenderError::InvalidState(format!(
                "end_frame called in {other:?}"
            ))),
        }
    }

    /// Require the `InFrame` state for a draw submission
    pub fn ensure_in_frame(self) -> RenderResult<()> {
        if self == Self::InFrame {
            Ok(())
        } else {
            Err(RenderError::InvalidState(format!(
                "draw submitted in {self:?}"
            )))
        }
    }

    /// Require the between-frames `Initialized` state (for resize)
    pub fn ensure_between_frames(self) -> RenderResult<()> {
        if self == Self::Initialized {
            Ok(())
        } else {
            Err(RenderError::InvalidState(format!(
                "operation requires Initialized, state is {self:?}"
            )))
        }
    }

    /// Enter the terminal `Shutdown` state
    ///
    /// Legal from any state so teardown paths stay simple; repeated calls are
    /// no-ops, satisfying the idempotence requirement.
    pub fn shutdown(&mut self) -> bool {
        let was_live = !matches!(self, Self::Shutdown | Self::Uninitialized);
        *self = Self::Shutdown;
        was_live
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_happy_path() {
        let mut phase = FramePhase::default();
        assert!(phase.initialize().is_ok());
        assert!(phase.begin_frame().is_ok());
        assert!(phase.ensure_in_frame().is_ok());
        assert!(phase.end_frame().is_ok());
        assert!(phase.ensure_between_frames().is_ok());
        assert!(phase.shutdown());
    }

    #[test]
    fn test_draw_outside_bracket_rejected() {
        let mut phase = FramePhase::default();
        phase.initialize().unwrap();
        assert!(matches!(
            phase.ensure_in_frame(),
            Err(RenderError::InvalidState(_))
        ));
    }

    #[test]
    fn test_double_begin_rejected() {
        let mut phase = FramePhase::default();
        phase.initialize().unwrap();
        phase.begin_frame().unwrap();
        assert!(matches!(
            phase.begin_frame(),
            Err(RenderError::InvalidState(_))
        ));
    }

    #[test]
    fn test_resize_inside_bracket_rejected() {
        let mut phase = FramePhase::default();
        phase.initialize().unwrap();
        phase.begin_frame().unwrap();
        assert!(phase.ensure_between_frames().is_err());
    }

    #[test]
    fn test_shutdown_idempotent() {
        let mut phase = FramePhase::default();
        phase.initialize().unwrap();
        assert!(phase.shutdown());
        assert!(!phase.shutdown());
    }
}
