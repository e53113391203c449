//! Asset loading collaborators
//!
//! Loading yields move-once values (for meshes: vertex and index buffers)
//! that the application owns and hands to draw calls. A failed load is fatal
//! to that asset only, never to the engine.

pub mod obj_loader;

pub use obj_loader::ObjLoader;

use thiserror::Error;

/// Asset loading errors
#[derive(Error, Debug)]
pub enum LoadError {
    /// The asset file could not be read
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The file contents could not be parsed
    #[error("parse error: {0}")]
    Parse(String),

    /// The file parsed but violates the format's structure
    #[error("invalid format: {0}")]
    InvalidFormat(String),
}
