//! Compile-time backend selection
//!
//! One concrete backend is compiled in per target; there is no runtime plugin
//! discovery. GPU backends live in their own crates and are wired in through
//! cargo features here; the headless [`null::NullRenderer`] is always
//! available and is the default when no GPU feature is enabled, which keeps
//! the engine runnable in CI and in tests.

pub mod null;

pub use null::NullRenderer;

use super::Renderer;

/// Construct the backend selected at build time
#[must_use]
pub fn create_renderer() -> Box<dyn Renderer> {
    Box::new(NullRenderer::new())
}
