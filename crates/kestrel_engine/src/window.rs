//! GLFW-based window and event provider
//!
//! Owns the platform window, its event receiver, and the GLFW context. The
//! engine is the only caller of the event-pump and presentation primitives;
//! input state is read through the [`InputSource`] seam so the input system
//! never touches the window type directly.

use crate::foundation::math::Vec2;
use crate::input::{InputSource, Key, MouseButton};
use glfw::Context;
use thiserror::Error;

/// Window management errors
#[derive(Error, Debug)]
pub enum WindowError {
    /// GLFW could not be initialized
    #[error("GLFW initialization failed")]
    InitializationFailed,

    /// The platform refused to create the window
    #[error("window creation failed")]
    CreationFailed,
}

/// Result type for window operations
pub type WindowResult<T> = Result<T, WindowError>;

/// GLFW window wrapper with event receiver
///
/// Events are delivered through the receiver owned by this struct rather than
/// process-wide callbacks, so each window's events are associated with its own
/// instance and multiple windows would not collide.
pub struct Window {
    glfw: glfw::Glfw,
    window: glfw::PWindow,
    events: glfw::GlfwReceiver<(f64, glfw::WindowEvent)>,
}

impl Window {
    /// Create a window with the given title and size
    pub fn new(title: &str, width: u32, height: u32, resizable: bool) -> WindowResult<Self> {
        let mut glfw = glfw::init(glfw::fail_on_errors)
            .map_err(|_| WindowError::InitializationFailed)?;

        glfw.window_hint(glfw::WindowHint::Resizable(resizable));

        let (mut window, events) = glfw
            .create_window(width, height, title, glfw::WindowMode::Windowed)
            .ok_or(WindowError::CreationFailed)?;

        window.make_current();
        window.set_key_polling(true);
        window.set_mouse_button_polling(true);
        window.set_cursor_pos_polling(true);
        window.set_close_polling(true);
        window.set_framebuffer_size_polling(true);

        log::info!("window created: \"{title}\" {width}x{height}");
        Ok(Self { glfw, window, events })
    }

    /// Whether a close has been requested by the user or the application
    #[must_use]
    pub fn should_close(&self) -> bool {
        self.window.should_close()
    }

    /// Request the window to close
    pub fn set_should_close(&mut self, should_close: bool) {
        self.window.set_should_close(should_close);
    }

    /// Pump the platform event queue
    pub fn poll_events(&mut self) {
        self.glfw.poll_events();
    }

    /// Drain events received since the last pump
    pub fn flush_events(&self) -> glfw::FlushedMessages<(f64, glfw::WindowEvent)> {
        glfw::flush_messages(&self.events)
    }

    /// Framebuffer size in pixels (may exceed the client area on high-DPI displays)
    #[must_use]
    pub fn framebuffer_size(&self) -> (u32, u32) {
        let (width, height) = self.window.get_framebuffer_size();
        (width.unsigned_abs(), height.unsigned_abs())
    }

    /// Present the finished frame (buffer swap)
    pub fn swap_buffers(&mut self) {
        self.window.swap_buffers();
    }
}

impl InputSource for Window {
    fn is_key_down(&self, key: Key) -> bool {
        matches!(self.window.get_key(key), glfw::Action::Press | glfw::Action::Repeat)
    }

    fn is_mouse_button_down(&self, button: MouseButton) -> bool {
        matches!(
            self.window.get_mouse_button(button),
            glfw::Action::Press | glfw::Action::Repeat
        )
    }

    fn cursor_position(&self) -> Vec2 {
        let (x, y) = self.window.get_cursor_pos();
        #[allow(clippy::cast_possible_truncation)]
        Vec2::new(x as f32, y as f32)
    }
}
