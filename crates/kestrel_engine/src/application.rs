//! Application trait for embedding the engine
//!
//! An application implements this trait and hands itself to
//! [`Engine::run`](crate::Engine::run). The engine owns the frame sequencing;
//! the application decides what to simulate in `update` and what to draw in
//! `render`, which runs inside the begin/end frame bracket.

use crate::assets::LoadError;
use thiserror::Error;

/// Application-level errors surfaced through the main loop
#[derive(Error, Debug)]
pub enum AppError {
    /// An asset the application needs failed to load
    #[error("load error: {0}")]
    Load(#[from] LoadError),

    /// Application-specific failure
    #[error("{0}")]
    Custom(String),
}

/// Embedding application surface
pub trait Application {
    /// Called once after the engine is initialized, before the first frame
    fn initialize(&mut self, engine: &mut crate::Engine) -> Result<(), AppError>;

    /// Called once per frame after input polling, before the frame bracket
    ///
    /// `delta_time` is the elapsed seconds since the previous frame; input
    /// deltas are per-frame displacements, so scale them here if velocity is
    /// wanted.
    fn update(&mut self, engine: &mut crate::Engine, delta_time: f32) -> Result<(), AppError>;

    /// Called once per frame inside the begin/end frame bracket
    ///
    /// This is the only place draw submissions are valid.
    fn render(&mut self, engine: &mut crate::Engine) -> Result<(), AppError>;

    /// Called once when the main loop exits, before engine shutdown
    fn cleanup(&mut self, _engine: &mut crate::Engine) {}
}
