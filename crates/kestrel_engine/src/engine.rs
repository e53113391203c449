//! Core engine implementation
//!
//! The engine owns the window, exactly one renderer backend, one camera, and
//! one input state, and sequences them into frames: poll -> update -> render
//! -> present. It composes the subsystems but does not interpret them;
//! movement and look logic belong to the embedding application, which reads
//! input and mutates the camera through the accessors here.

use crate::application::{AppError, Application};
#[cfg(feature = "audio")]
use crate::audio::Audio;
use crate::config::EngineConfig;
use crate::foundation::time::Timer;
use crate::input::Input;
use crate::render::{backend, Camera, RenderError, RenderResult, Renderer};
use crate::window::{Window, WindowError};
use thiserror::Error;

/// Engine errors
#[derive(Error, Debug)]
pub enum EngineError {
    /// The window or event provider could not be created
    #[error("window error: {0}")]
    Window(#[from] WindowError),

    /// The renderer backend failed; fatal on the initialization path
    #[error("renderer error: {0}")]
    Renderer(#[from] RenderError),

    /// The embedding application reported a failure
    #[error("application error: {0}")]
    Application(#[from] AppError),
}

/// The engine runtime
pub struct Engine {
    // Field order matters: the renderer must drop before the window whose
    // surface it is bound to.
    renderer: Box<dyn Renderer>,
    window: Window,
    camera: Camera,
    input: Input,
    // None when no output device was available at startup; audio is best-effort
    #[cfg(feature = "audio")]
    audio: Option<Audio>,
    timer: Timer,
    running: bool,
    shut_down: bool,
}

impl Engine {
    /// Initialize the engine with the build-time selected renderer backend
    ///
    /// Acquires the window first, then the renderer bound to it, then
    /// constructs the camera and input. Renderer initialization failure is
    /// surfaced and leaves no running engine; there is no fallback backend.
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        Self::with_renderer(config, backend::create_renderer())
    }

    /// Initialize the engine with an externally supplied renderer backend
    pub fn with_renderer(
        config: EngineConfig,
        mut renderer: Box<dyn Renderer>,
    ) -> Result<Self, EngineError> {
        log::info!("initializing engine");

        let mut window = Window::new(
            &config.window.title,
            config.window.width,
            config.window.height,
            config.window.resizable,
        )?;

        let (width, height) = window.framebuffer_size();
        renderer.initialize(&mut window, width, height)?;

        let mut camera = Camera::default();
        #[allow(clippy::cast_precision_loss)]
        camera.set_aspect_ratio(width as f32 / height.max(1) as f32);

        let input = Input::new(config.mouse.look_deadzone);

        // Audio is off the critical path: a machine with no output device
        // still runs, silently.
        #[cfg(feature = "audio")]
        let audio = match Audio::new() {
            Ok(audio) => Some(audio),
            Err(err) => {
                log::warn!("audio unavailable, continuing without sound: {err}");
                None
            }
        };

        log::info!("engine initialized");
        Ok(Self {
            renderer,
            window,
            camera,
            input,
            #[cfg(feature = "audio")]
            audio,
            timer: Timer::new(),
            running: true,
            shut_down: false,
        })
    }

    /// True until the window reports a close request or [`Engine::stop`]
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running && !self.window.should_close()
    }

    /// Request the frame loop to end after the current iteration
    ///
    /// Also forwards the request to the window, so an application-initiated
    /// stop and a user-initiated close travel the same path.
    pub fn stop(&mut self) {
        log::info!("engine stop requested");
        self.running = false;
        self.window.set_should_close(true);
    }

    /// Pump the event queue and refresh input state
    ///
    /// Must be called once per frame, before any input query. Window resize
    /// notifications are forwarded to the renderer and the camera's aspect
    /// ratio from here; application logic never calls resize directly.
    pub fn poll_events(&mut self) {
        self.timer.update();
        self.window.poll_events();

        let events: Vec<glfw::WindowEvent> =
            self.window.flush_events().map(|(_, event)| event).collect();
        for event in events {
            match event {
                glfw::WindowEvent::FramebufferSize(width, height) => {
                    if width > 0 && height > 0 {
                        if let Err(err) = self.resize(width.unsigned_abs(), height.unsigned_abs())
                        {
                            // Resize arriving mid-frame would be a sequencing
                            // bug in the frame loop, not a recoverable event.
                            debug_assert!(false, "resize during poll failed: {err}");
                            log::error!("resize failed: {err}");
                        }
                    }
                }
                glfw::WindowEvent::Close => {
                    log::info!("window close requested");
                }
                _ => {}
            }
        }

        self.input.update(&self.window);
    }

    /// Start the frame's render pass with the current camera
    pub fn begin_frame(&mut self) -> RenderResult<()> {
        self.renderer.begin_frame(&self.camera)
    }

    /// Submit the render pass and present it to the window
    pub fn end_frame(&mut self) -> RenderResult<()> {
        self.renderer.end_frame()?;
        self.window.swap_buffers();
        Ok(())
    }

    /// Reconfigure the renderer surface and camera aspect for a new size
    pub fn resize(&mut self, width: u32, height: u32) -> RenderResult<()> {
        self.renderer.resize(width, height)?;
        #[allow(clippy::cast_precision_loss)]
        self.camera.set_aspect_ratio(width as f32 / height.max(1) as f32);
        Ok(())
    }

    /// Get the renderer for draw submission
    pub fn renderer_mut(&mut self) -> &mut dyn Renderer {
        self.renderer.as_mut()
    }

    /// Get the camera
    #[must_use]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Get mutable access to the camera
    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    /// Get the input state
    #[must_use]
    pub fn input(&self) -> &Input {
        &self.input
    }

    /// Get the audio output, if a device was available at startup
    #[cfg(feature = "audio")]
    pub fn audio_mut(&mut self) -> Option<&mut Audio> {
        self.audio.as_mut()
    }

    /// Get the window
    #[must_use]
    pub fn window(&self) -> &Window {
        &self.window
    }

    /// Seconds elapsed between the two most recent polls
    #[must_use]
    pub fn delta_time(&self) -> f32 {
        self.timer.delta_time()
    }

    /// Release the renderer's GPU resources
    ///
    /// The renderer is shut down before the window is dropped, reversing
    /// acquisition order so the surface never outlives its window.
    /// Idempotent; also invoked from `Drop` as a safety net.
    pub fn shutdown(&mut self) {
        if self.shut_down {
            return;
        }
        self.shut_down = true;
        self.running = false;
        #[cfg(feature = "audio")]
        if let Some(audio) = self.audio.as_mut() {
            audio.shutdown();
        }
        self.renderer.shutdown();
        log::info!("engine shutdown complete");
    }

    /// Run the main loop with the given application
    ///
    /// Convenience driver for the per-frame sequence: poll -> application
    /// update -> begin frame -> application render -> end frame.
    ///
    /// `cleanup` runs whether the loop finished normally or an error cut it
    /// short, so applications can release resources on both paths.
    pub fn run<A: Application>(config: EngineConfig, app: &mut A) -> Result<(), EngineError> {
        let mut engine = Self::new(config)?;

        let result = Self::drive(&mut engine, app);

        app.cleanup(&mut engine);
        engine.shutdown();
        result
    }

    fn drive<A: Application>(engine: &mut Self, app: &mut A) -> Result<(), EngineError> {
        app.initialize(engine)?;

        log::info!("entering main loop");
        while engine.is_running() {
            engine.poll_events();
            let delta_time = engine.delta_time();

            app.update(engine, delta_time)?;

            engine.begin_frame()?;
            app.render(engine)?;
            engine.end_frame()?;
        }

        Ok(())
    }
}

impl Drop for Engine {
    fn drop(&mut self) {
        self.shutdown();
    }
}
