//! # Kestrel Engine
//!
//! A minimal real-time 3D engine runtime. The engine mediates between the OS
//! window/input provider and a pluggable GPU rendering backend, producing one
//! consistent frame per iteration: updated input state, updated camera
//! orientation, and a batch of draw calls.
//!
//! ## Frame lifecycle
//!
//! ```text
//! poll_events -> [application reads input, drives camera]
//!   -> begin_frame -> [application submits draws] -> end_frame (present)
//! ```
//!
//! The core is single-threaded and synchronous: the engine, input, camera,
//! and renderer contract never suspend or touch worker threads. Backends may
//! queue work to hardware internally, but `end_frame` means "submitted"
//! before the next `begin_frame` is legal.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use kestrel_engine::prelude::*;
//!
//! struct MyApp;
//!
//! impl Application for MyApp {
//!     fn initialize(&mut self, _engine: &mut Engine) -> Result<(), AppError> {
//!         Ok(())
//!     }
//!
//!     fn update(&mut self, engine: &mut Engine, _delta_time: f32) -> Result<(), AppError> {
//!         if engine.input().is_key_pressed(Key::Escape) {
//!             engine.stop();
//!         }
//!         Ok(())
//!     }
//!
//!     fn render(&mut self, engine: &mut Engine) -> Result<(), AppError> {
//!         engine
//!             .renderer_mut()
//!             .draw_primitive(PrimitiveKind::Cube, &Mat4::identity())
//!             .map_err(|e| AppError::Custom(e.to_string()))
//!     }
//! }
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     kestrel_engine::foundation::logging::init();
//!     let mut app = MyApp;
//!     Engine::run(EngineConfig::default(), &mut app)?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]

pub mod assets;
#[cfg(feature = "audio")]
pub mod audio;
pub mod config;
pub mod foundation;
pub mod input;
pub mod render;
pub mod window;

mod application;
mod engine;

pub use application::{AppError, Application};
pub use config::{ConfigError, EngineConfig, MouseConfig, WindowConfig};
pub use engine::{Engine, EngineError};

/// Common imports for engine users
pub mod prelude {
    #[cfg(feature = "audio")]
    pub use crate::audio::{Audio, AudioError};
    pub use crate::{
        assets::{LoadError, ObjLoader},
        foundation::math::{Mat4, Mat4Ext, Vec2, Vec3},
        input::{Input, InputError, Key, MouseButton},
        render::{Camera, Mesh, PrimitiveKind, RenderError, Renderer, Vertex},
        AppError, Application, Engine, EngineConfig, EngineError,
    };
}
